use crate::domain::chart::{AxisTick, ChartConfig, ChartFrame, ChartPoint};
use crate::domain::model::RevenueSeries;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive, validate_range, Validate};

/// Revenue values are in millions; axis labels show billions.
const LABEL_DIVISOR: f64 = 1_000_000.0;

/// y 軸在沒有資料時的初始範圍
const INITIAL_Y_DOMAIN: (f64, f64) = (0.0, 1.0);

pub fn format_axis_revenue(value: f64) -> String {
    format!("${:.1}B", value / LABEL_DIVISOR)
}

pub fn format_tooltip_revenue(value: f64) -> String {
    format!("${:.2}B", value / LABEL_DIVISOR)
}

/// Label for a zero-based year index.
pub fn year_label(index: usize) -> String {
    format!("Year {}", index + 1)
}

pub fn tooltip_text(index: usize, revenue: f64) -> String {
    format!(
        "{}\nRevenue: {}",
        year_label(index),
        format_tooltip_revenue(revenue)
    )
}

#[derive(Debug, Clone, Copy)]
struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    fn map(&self, value: f64) -> f64 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 || !span.is_finite() {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

impl ChartFrame {
    /// Rescale both axes to the series and lay out every point.
    pub fn build(series: &RevenueSeries, years: usize, config: &ChartConfig) -> Self {
        let x_domain = (0.0, years.saturating_sub(1) as f64);
        let y_domain = match series.max() {
            Some(max) if max.is_finite() && max > 0.0 => (0.0, max * config.y_padding),
            _ => INITIAL_Y_DOMAIN,
        };

        let x_scale = LinearScale {
            domain: x_domain,
            range: (0.0, config.inner_width()),
        };
        let y_scale = LinearScale {
            domain: y_domain,
            range: (config.inner_height(), 0.0),
        };

        let x_ticks = (0..years)
            .map(|i| AxisTick {
                value: i as f64,
                position: x_scale.map(i as f64),
                label: year_label(i),
            })
            .collect();

        let steps = config.y_ticks.max(1);
        let y_ticks = (0..=steps)
            .map(|step| {
                let value = y_domain.0 + (y_domain.1 - y_domain.0) * step as f64 / steps as f64;
                AxisTick {
                    value,
                    position: y_scale.map(value),
                    label: format_axis_revenue(value),
                }
            })
            .collect();

        let points = series
            .iter()
            .enumerate()
            .map(|(i, &revenue)| ChartPoint {
                year: i + 1,
                revenue,
                x: x_scale.map(i as f64),
                y: y_scale.map(revenue),
                tooltip: tooltip_text(i, revenue),
            })
            .collect();

        tracing::debug!(
            "Chart frame built: {} points, y domain {:?}",
            series.len(),
            y_domain
        );

        Self {
            config: *config,
            years,
            x_domain,
            y_domain,
            x_ticks,
            y_ticks,
            points,
        }
    }
}

impl Validate for ChartConfig {
    fn validate(&self) -> Result<()> {
        validate_positive("chart.width", self.width)?;
        validate_positive("chart.height", self.height)?;
        validate_positive("chart.y_padding", self.y_padding)?;
        validate_range("chart.y_ticks", self.y_ticks, 1, 20)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_labels() {
        assert_eq!(format_axis_revenue(226_000_000.0), "$226.0B");
        assert_eq!(format_axis_revenue(0.0), "$0.0B");
        assert_eq!(format_tooltip_revenue(1_234_567.0), "$1.23B");
        assert_eq!(year_label(0), "Year 1");
        assert_eq!(tooltip_text(4, 2_500_000.0), "Year 5\nRevenue: $2.50B");
    }

    #[test]
    fn test_domains_follow_series() {
        let series = RevenueSeries::from(vec![100.0, 200.0, 400.0]);
        let frame = ChartFrame::build(&series, 3, &ChartConfig::default());

        assert_eq!(frame.x_domain, (0.0, 2.0));
        assert!((frame.y_domain.1 - 440.0).abs() < 1e-9);
        assert_eq!(frame.x_ticks.len(), 3);
        assert_eq!(frame.x_ticks[2].label, "Year 3");
        assert_eq!(frame.y_ticks.len(), 6);
        assert_eq!(frame.points.len(), 3);
    }

    #[test]
    fn test_points_map_into_inner_area() {
        let config = ChartConfig::default();
        let series = RevenueSeries::from(vec![10.0, 20.0]);
        let frame = ChartFrame::build(&series, 2, &config);

        assert_eq!(frame.points[0].x, 0.0);
        assert!((frame.points[1].x - config.inner_width()).abs() < 1e-9);
        // larger revenue sits higher on screen
        assert!(frame.points[1].y < frame.points[0].y);
        assert!(frame.points.iter().all(|p| p.y >= 0.0 && p.y <= config.inner_height()));
    }

    #[test]
    fn test_empty_series_uses_initial_domain() {
        let frame = ChartFrame::build(&RevenueSeries::default(), 0, &ChartConfig::default());
        assert_eq!(frame.y_domain, (0.0, 1.0));
        assert!(frame.points.is_empty());
        assert!(frame.x_ticks.is_empty());
    }

    #[test]
    fn test_all_zero_series_uses_initial_domain() {
        let series = RevenueSeries::from(vec![0.0; 4]);
        let frame = ChartFrame::build(&series, 4, &ChartConfig::default());
        assert_eq!(frame.y_domain, (0.0, 1.0));
    }

    #[test]
    fn test_single_year_does_not_divide_by_zero() {
        let series = RevenueSeries::from(vec![5.0]);
        let frame = ChartFrame::build(&series, 1, &ChartConfig::default());
        assert_eq!(frame.points[0].x, 0.0);
        assert!(frame.points[0].y.is_finite());
    }

    #[test]
    fn test_chart_config_validation() {
        assert!(ChartConfig::default().validate().is_ok());
        let config = ChartConfig {
            y_ticks: 0,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
