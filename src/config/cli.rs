use crate::core::ParameterSource;
use crate::domain::model::ProjectionParameters;
use crate::utils::error::Result;
use crate::utils::validation::{validate_output_formats, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "revenue-projector")]
#[command(about = "Project government tax revenue from GDP and tax rates")]
pub struct CliConfig {
    /// Base GDP in billions
    #[arg(long, default_value = "1000", allow_negative_numbers = true)]
    pub base_gdp: f64,

    /// Income tax rate (%)
    #[arg(long, default_value = "20", allow_negative_numbers = true)]
    pub income_tax: f64,

    /// Corporate tax rate (%)
    #[arg(long, default_value = "21", allow_negative_numbers = true)]
    pub corporate_tax: f64,

    /// Sales tax rate (%)
    #[arg(long, default_value = "8", allow_negative_numbers = true)]
    pub sales_tax: f64,

    /// Annual GDP growth rate (%)
    #[arg(long, default_value = "2", allow_negative_numbers = true)]
    pub gdp_growth: f64,

    /// Number of years to project
    #[arg(long, default_value = "10", allow_negative_numbers = true)]
    pub years: i64,

    /// Use the fixed legacy preset (base GDP 1,000,000, 10 years)
    #[arg(long)]
    pub legacy: bool,

    /// Directory for output files; only the table is printed when omitted
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "csv,json")]
    pub formats: Vec<String>,

    /// Bundle output files into projection.zip
    #[arg(long)]
    pub zip: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn projection_parameters(&self) -> ProjectionParameters {
        if self.legacy {
            ProjectionParameters::legacy_preset(
                self.income_tax,
                self.corporate_tax,
                self.sales_tax,
                self.gdp_growth,
            )
        } else {
            ProjectionParameters::new(
                self.base_gdp,
                self.income_tax,
                self.corporate_tax,
                self.sales_tax,
                self.gdp_growth,
                self.years,
            )
        }
    }
}

impl ParameterSource for CliConfig {
    fn parameters(&self) -> ProjectionParameters {
        self.projection_parameters()
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(".")
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn zip_output(&self) -> bool {
        self.zip
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.projection_parameters().validate()?;
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }
        validate_output_formats("formats", &self.formats)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_initial_sliders() {
        let config = CliConfig::parse_from(["revenue-projector"]);
        assert_eq!(config.projection_parameters(), ProjectionParameters::default());
        assert_eq!(config.formats, vec!["csv", "json"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_growth_flag() {
        let config = CliConfig::parse_from(["revenue-projector", "--gdp-growth", "-3.5"]);
        assert_eq!(config.gdp_growth, -3.5);
    }

    #[test]
    fn test_legacy_overrides_gdp_and_years() {
        let config = CliConfig::parse_from([
            "revenue-projector",
            "--legacy",
            "--base-gdp",
            "5",
            "--years",
            "3",
        ]);
        let params = config.projection_parameters();
        assert_eq!(params.base_gdp, 1_000_000.0);
        assert_eq!(params.horizon_years, 10);
    }

    #[test]
    fn test_oversized_horizon_rejected() {
        let config = CliConfig::parse_from(["revenue-projector", "--years", "100000000000"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["revenue-projector", "--years", "-1"]);
        assert!(config.validate().is_ok());
        assert!(config.projection_parameters().project().is_empty());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let config = CliConfig::parse_from(["revenue-projector", "--formats", "csv,pdf"]);
        assert!(config.validate().is_err());
    }
}
