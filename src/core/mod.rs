pub mod chart;
pub mod engine;
pub mod export;
pub mod pipeline;
pub mod projector;
pub mod render;

pub use crate::domain::model::{ProjectionOutcome, ProjectionParameters, RevenueSeries};
pub use crate::domain::ports::{ChartRenderer, ParameterSource, ProjectionPipeline, Storage};
pub use crate::utils::error::Result;
