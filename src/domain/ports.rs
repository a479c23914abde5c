use crate::domain::chart::ChartFrame;
use crate::domain::model::{ProjectionOutcome, ProjectionParameters};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Output sink for rendered files. Nothing in the projector reads its
/// own output back, so the port is write-only.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ParameterSource: Send + Sync {
    fn parameters(&self) -> ProjectionParameters;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn zip_output(&self) -> bool;
}

/// Draws or updates a chart from an already computed frame. The frame
/// carries every scale and label, so renderers hold no chart state of
/// their own beyond their output sink.
pub trait ChartRenderer {
    fn render(&mut self, frame: &ChartFrame) -> Result<()>;
}

#[async_trait]
pub trait ProjectionPipeline: Send + Sync {
    async fn gather(&self) -> Result<ProjectionParameters>;
    async fn project(&self, parameters: ProjectionParameters) -> Result<ProjectionOutcome>;
    async fn load(&self, outcome: ProjectionOutcome) -> Result<String>;
}
