pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::control_panel::{Control, ControlPanel};
pub use config::storage::LocalStorage;
pub use config::toml_config::ScenarioConfig;
pub use core::{
    engine::ProjectionEngine, pipeline::OutputPipeline, projector::project,
    render::TableRenderer,
};
pub use domain::chart::{ChartConfig, ChartFrame};
pub use domain::model::{ProjectionParameters, RevenueSeries, YearProjection};
pub use utils::error::{ProjectorError, Result};
