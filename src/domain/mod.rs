// Domain layer: projection models, chart data and ports (interfaces).

pub mod chart;
pub mod model;
pub mod ports;
