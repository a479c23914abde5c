use crate::core::export;
use crate::core::{ParameterSource, ProjectionPipeline, Storage};
use crate::domain::chart::{ChartConfig, ChartFrame};
use crate::domain::model::{ProjectionOutcome, ProjectionParameters};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const ZIP_FILENAME: &str = "projection.zip";
pub const CSV_FILENAME: &str = "revenue.csv";
pub const TSV_FILENAME: &str = "revenue.tsv";
pub const JSON_FILENAME: &str = "projection.json";

/// Reads parameters from a [`ParameterSource`], projects them and writes
/// the requested formats through a [`Storage`] backend.
pub struct OutputPipeline<S: Storage, P: ParameterSource> {
    storage: S,
    source: P,
    chart: ChartConfig,
}

impl<S: Storage, P: ParameterSource> OutputPipeline<S, P> {
    pub fn new(storage: S, source: P) -> Self {
        Self {
            storage,
            source,
            chart: ChartConfig::default(),
        }
    }

    pub fn with_chart_config(mut self, chart: ChartConfig) -> Self {
        self.chart = chart;
        self
    }

    fn render_files(&self, outcome: &ProjectionOutcome) -> Result<Vec<(&'static str, String)>> {
        let mut files = Vec::new();
        for format in self.source.output_formats() {
            match format.as_str() {
                "csv" => files.push((CSV_FILENAME, export::to_csv(&outcome.breakdown)?)),
                "tsv" => files.push((TSV_FILENAME, export::to_tsv(&outcome.breakdown)?)),
                "json" => {
                    let frame = ChartFrame::build(
                        &outcome.revenue,
                        outcome.parameters.series_len(),
                        &self.chart,
                    );
                    files.push((JSON_FILENAME, export::to_json(outcome, &frame)?));
                }
                other => tracing::warn!("Skipping unsupported output format: {}", other),
            }
        }
        Ok(files)
    }
}

#[async_trait::async_trait]
impl<S: Storage, P: ParameterSource> ProjectionPipeline for OutputPipeline<S, P> {
    async fn gather(&self) -> Result<ProjectionParameters> {
        let parameters = self.source.parameters();
        tracing::debug!("Gathered parameters: {:?}", parameters);
        parameters.validate()?;
        Ok(parameters)
    }

    async fn project(&self, parameters: ProjectionParameters) -> Result<ProjectionOutcome> {
        let breakdown = parameters.project_breakdown();
        let revenue = parameters.project();
        Ok(ProjectionOutcome {
            parameters,
            revenue,
            breakdown,
        })
    }

    async fn load(&self, outcome: ProjectionOutcome) -> Result<String> {
        let files = self.render_files(&outcome)?;

        if !self.source.zip_output() {
            for (name, content) in &files {
                tracing::debug!("Writing {} ({} bytes)", name, content.len());
                self.storage.write_file(name, content.as_bytes()).await?;
            }
            return Ok(self.source.output_path().to_string());
        }

        tracing::debug!("Creating ZIP file with {} files", files.len());

        // 打包成單一 ZIP
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, content) in &files {
                zip.start_file::<_, ()>(*name, FileOptions::default())?;
                zip.write_all(content.as_bytes())?;
            }
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        self.storage.write_file(ZIP_FILENAME, &zip_data).await?;

        Ok(format!("{}/{}", self.source.output_path(), ZIP_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ProjectorError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockSource {
        parameters: ProjectionParameters,
        output_path: String,
        formats: Vec<String>,
        zip: bool,
    }

    impl MockSource {
        fn new(formats: &[&str], zip: bool) -> Self {
            Self {
                parameters: ProjectionParameters::default(),
                output_path: "test_output".to_string(),
                formats: formats.iter().map(|f| f.to_string()).collect(),
                zip,
            }
        }
    }

    impl ParameterSource for MockSource {
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

    #[tokio::test]
    async fn test_gather_rejects_invalid_base_gdp() {
        let mut source = MockSource::new(&["csv"], false);
        source.parameters.base_gdp = f64::NAN;
        let pipeline = OutputPipeline::new(MockStorage::new(), source);

        let err = pipeline.gather().await.unwrap_err();
        assert!(matches!(err, ProjectorError::InvalidConfigValueError { .. }));
    }

    #[tokio::test]
    async fn test_project_fills_series_and_breakdown() {
        let pipeline = OutputPipeline::new(MockStorage::new(), MockSource::new(&["csv"], false));
        let parameters = pipeline.gather().await.unwrap();
        let outcome = pipeline.project(parameters).await.unwrap();

        assert_eq!(outcome.revenue.len(), 10);
        assert_eq!(outcome.breakdown.len(), 10);
        assert_eq!(outcome.breakdown[9].total_revenue, outcome.revenue[9]);
    }

    #[tokio::test]
    async fn test_load_writes_plain_files() {
        let storage = MockStorage::new();
        let pipeline = OutputPipeline::new(storage.clone(), MockSource::new(&["csv", "json"], false));
        let parameters = pipeline.gather().await.unwrap();
        let outcome = pipeline.project(parameters).await.unwrap();

        let output_path = pipeline.load(outcome).await.unwrap();

        assert_eq!(output_path, "test_output");
        assert!(storage.get_file(CSV_FILENAME).await.is_some());
        assert!(storage.get_file(JSON_FILENAME).await.is_some());
        assert!(storage.get_file(TSV_FILENAME).await.is_none());
    }

    #[tokio::test]
    async fn test_load_bundles_zip() {
        let storage = MockStorage::new();
        let pipeline = OutputPipeline::new(
            storage.clone(),
            MockSource::new(&["csv", "tsv", "json"], true),
        );
        let parameters = pipeline.gather().await.unwrap();
        let outcome = pipeline.project(parameters).await.unwrap();

        let output_path = pipeline.load(outcome).await.unwrap();
        assert_eq!(output_path, "test_output/projection.zip");

        let zip_bytes = storage.get_file(ZIP_FILENAME).await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();
        assert_eq!(
            file_names,
            vec!["projection.json", "revenue.csv", "revenue.tsv"]
        );

        let csv_content = {
            let mut csv_file = archive.by_name(CSV_FILENAME).unwrap();
            let mut content = String::new();
            std::io::Read::read_to_string(&mut csv_file, &mut content).unwrap();
            content
        };
        assert!(csv_content.starts_with("year,gdp,"));
        assert_eq!(csv_content.lines().count(), 11);
    }
}
