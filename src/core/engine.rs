use crate::core::ProjectionPipeline;
use crate::domain::model::ProjectionOutcome;
use crate::utils::error::Result;

/// Summary of one engine run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub years: usize,
    pub final_revenue: Option<f64>,
    pub cumulative_revenue: f64,
}

impl RunReport {
    fn from_outcome(outcome: &ProjectionOutcome, output_path: String) -> Self {
        Self {
            output_path,
            years: outcome.revenue.len(),
            final_revenue: outcome.revenue.last().copied(),
            cumulative_revenue: outcome.revenue.iter().sum(),
        }
    }
}

pub struct ProjectionEngine<P: ProjectionPipeline> {
    pipeline: P,
}

impl<P: ProjectionPipeline> ProjectionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting projection...");

        let parameters = self.pipeline.gather().await?;
        tracing::info!(
            "Parameters: base GDP {}B, rates {}%/{}%/{}%, growth {}%, {} years",
            parameters.base_gdp,
            parameters.income_tax_rate,
            parameters.corporate_tax_rate,
            parameters.sales_tax_rate,
            parameters.gdp_growth_rate,
            parameters.horizon_years
        );

        let outcome = self.pipeline.project(parameters).await?;
        tracing::info!("Projected {} years", outcome.revenue.len());

        let report_outcome = outcome.clone();
        let output_path = self.pipeline.load(outcome).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunReport::from_outcome(&report_outcome, output_path))
    }
}
