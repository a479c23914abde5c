use crate::core::ParameterSource;
use crate::domain::chart::ChartConfig;
use crate::domain::model::ProjectionParameters;
use crate::utils::error::{ProjectorError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_output_formats, validate_path, validate_required_field,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub project: ProjectInfo,
    pub output: OutputConfig,
    pub chart: Option<ChartConfig>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub formats: Option<Vec<String>>,
    pub zip: Option<bool>,
}

/// 單一試算情境，未填的欄位沿用預設滑桿值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub legacy: Option<bool>,
    pub base_gdp: Option<f64>,
    pub income_tax_rate: Option<f64>,
    pub corporate_tax_rate: Option<f64>,
    pub sales_tax_rate: Option<f64>,
    pub gdp_growth_rate: Option<f64>,
    pub horizon_years: Option<i64>,
}

impl ScenarioDefinition {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn parameters(&self) -> ProjectionParameters {
        let defaults = ProjectionParameters::default();
        let income = self.income_tax_rate.unwrap_or(defaults.income_tax_rate);
        let corporate = self.corporate_tax_rate.unwrap_or(defaults.corporate_tax_rate);
        let sales = self.sales_tax_rate.unwrap_or(defaults.sales_tax_rate);
        let growth = self.gdp_growth_rate.unwrap_or(defaults.gdp_growth_rate);

        if self.legacy.unwrap_or(false) {
            return ProjectionParameters::legacy_preset(income, corporate, sales, growth);
        }

        ProjectionParameters::new(
            self.base_gdp.unwrap_or(defaults.base_gdp),
            income,
            corporate,
            sales,
            growth,
            self.horizon_years.unwrap_or(defaults.horizon_years),
        )
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProjectorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProjectorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BASE_GDP})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProjectorError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or("./output")
    }

    pub fn output_formats(&self) -> Vec<String> {
        self.output
            .formats
            .clone()
            .unwrap_or_else(|| vec!["csv".to_string(), "json".to_string()])
    }

    pub fn chart_config(&self) -> ChartConfig {
        self.chart.unwrap_or_default()
    }

    pub fn enabled_scenarios(&self) -> impl Iterator<Item = &ScenarioDefinition> {
        self.scenarios.iter().filter(|s| s.is_enabled())
    }

    pub fn find_scenario(&self, name: &str) -> Option<&ScenarioDefinition> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Parameter source for one scenario. Output lands in a
    /// subdirectory named after the scenario.
    pub fn source_for(&self, scenario: &ScenarioDefinition) -> ScenarioSource {
        ScenarioSource {
            parameters: scenario.parameters(),
            output_path: format!("{}/{}", self.output_path(), scenario.name),
            formats: self.output_formats(),
            zip: self.output.zip.unwrap_or(false),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("project.name", &self.project.name)?;
        validate_path("output.path", self.output_path())?;
        validate_output_formats("output.formats", &self.output_formats())?;

        if let Some(chart) = &self.chart {
            chart.validate()?;
        }

        let first = self.scenarios.first();
        validate_required_field("scenarios", &first)?;

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            validate_non_empty_string("scenarios.name", &scenario.name)?;
            if !seen.insert(scenario.name.as_str()) {
                return Err(ProjectorError::InvalidConfigValueError {
                    field: "scenarios.name".to_string(),
                    value: scenario.name.clone(),
                    reason: "Scenario names must be unique".to_string(),
                });
            }
            scenario.parameters().validate()?;
        }

        Ok(())
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioSource {
    parameters: ProjectionParameters,
    output_path: String,
    formats: Vec<String>,
    zip: bool,
}

impl ParameterSource for ScenarioSource {
    fn parameters(&self) -> ProjectionParameters {
        self.parameters
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn zip_output(&self) -> bool {
        self.zip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[project]
name = "budget-2030"

[output]
path = "./out"
formats = ["csv", "tsv"]
zip = true

[[scenarios]]
name = "baseline"

[[scenarios]]
name = "austerity"
income_tax_rate = 30
gdp_growth_rate = -1.5
horizon_years = 5

[[scenarios]]
name = "disabled"
enabled = false
"#;

    #[test]
    fn test_parse_basic_scenario_config() {
        let config = ScenarioConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.project.name, "budget-2030");
        assert_eq!(config.scenarios.len(), 3);
        assert_eq!(config.enabled_scenarios().count(), 2);
        assert_eq!(
            config.find_scenario("baseline").unwrap().parameters(),
            ProjectionParameters::default()
        );

        let austerity = config.find_scenario("austerity").unwrap().parameters();
        assert_eq!(austerity.income_tax_rate, 30.0);
        assert_eq!(austerity.gdp_growth_rate, -1.5);
        assert_eq!(austerity.horizon_years, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_for_scenario() {
        let config = ScenarioConfig::from_toml_str(BASIC).unwrap();
        let scenario = config.find_scenario("austerity").unwrap();
        let source = config.source_for(scenario);

        assert_eq!(source.output_path(), "./out/austerity");
        assert_eq!(source.output_formats(), &["csv".to_string(), "tsv".to_string()]);
        assert!(source.zip_output());
    }

    #[test]
    fn test_legacy_scenario() {
        let content = r#"
[project]
name = "legacy"

[output]

[[scenarios]]
name = "fixed"
legacy = true
base_gdp = 12
"#;
        let config = ScenarioConfig::from_toml_str(content).unwrap();
        let params = config.scenarios[0].parameters();
        assert_eq!(params.base_gdp, 1_000_000.0);
        assert_eq!(params.horizon_years, 10);
        assert_eq!(config.output_path(), "./output");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REVENUE_TEST_BASE_GDP", "2500");

        let content = r#"
[project]
name = "env"

[output]

[[scenarios]]
name = "from-env"
base_gdp = ${REVENUE_TEST_BASE_GDP}
"#;

        let config = ScenarioConfig::from_toml_str(content).unwrap();
        assert_eq!(config.scenarios[0].parameters().base_gdp, 2500.0);

        std::env::remove_var("REVENUE_TEST_BASE_GDP");
    }

    #[test]
    fn test_config_validation() {
        let no_scenarios = r#"
[project]
name = "empty"

[output]
"#;
        let config = ScenarioConfig::from_toml_str(no_scenarios).unwrap();
        assert!(config.validate().is_err());

        let duplicate = r#"
[project]
name = "dup"

[output]

[[scenarios]]
name = "a"

[[scenarios]]
name = "a"
"#;
        let config = ScenarioConfig::from_toml_str(duplicate).unwrap();
        assert!(config.validate().is_err());

        let bad_gdp = r#"
[project]
name = "bad"

[output]

[[scenarios]]
name = "negative"
base_gdp = -10
"#;
        let config = ScenarioConfig::from_toml_str(bad_gdp).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ScenarioConfig::from_toml_str("[project\nname=").unwrap_err();
        assert!(matches!(err, ProjectorError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = ScenarioConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.project.name, "budget-2030");
    }
}
