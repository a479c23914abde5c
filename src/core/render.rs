use crate::core::chart::format_tooltip_revenue;
use crate::domain::chart::ChartFrame;
use crate::domain::ports::ChartRenderer;
use crate::utils::error::Result;
use std::io::Write;

/// Writes the chart as an aligned text table, one row per point.
pub struct TableRenderer<W: Write> {
    out: W,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for TableRenderer<W> {
    fn render(&mut self, frame: &ChartFrame) -> Result<()> {
        let rows: Vec<(String, String)> = frame
            .points
            .iter()
            .zip(frame.x_ticks.iter())
            .map(|(point, tick)| {
                (
                    tick.label.clone(),
                    format_tooltip_revenue(point.revenue),
                )
            })
            .collect();

        let year_width = rows
            .iter()
            .map(|(year, _)| year.len())
            .max()
            .unwrap_or(0)
            .max("Year".len());
        let revenue_width = rows
            .iter()
            .map(|(_, revenue)| revenue.len())
            .max()
            .unwrap_or(0)
            .max("Revenue".len());

        writeln!(
            self.out,
            "{:<yw$}  {:>rw$}",
            "Year",
            "Revenue",
            yw = year_width,
            rw = revenue_width
        )?;
        writeln!(
            self.out,
            "{}  {}",
            "-".repeat(year_width),
            "-".repeat(revenue_width)
        )?;
        for (year, revenue) in &rows {
            writeln!(
                self.out,
                "{:<yw$}  {:>rw$}",
                year,
                revenue,
                yw = year_width,
                rw = revenue_width
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// 保留最後一次繪製的 frame，供控制面板與測試檢查
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<ChartFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ChartFrame> {
        self.frames.last()
    }

    pub fn render_count(&self) -> usize {
        self.frames.len()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, frame: &ChartFrame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartConfig;
    use crate::domain::model::{ProjectionParameters, RevenueSeries};

    #[test]
    fn test_table_renderer_writes_one_row_per_year() {
        let params = ProjectionParameters::new(1000.0, 20.0, 21.0, 8.0, 0.0, 3);
        let frame = ChartFrame::build(&params.project(), 3, &ChartConfig::default());

        let mut renderer = TableRenderer::new(Vec::new());
        renderer.render(&frame).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Year"));
        assert!(lines[2].starts_with("Year 1"));
        assert!(lines[2].ends_with("$226.00B"));
        assert!(lines[4].starts_with("Year 3"));
    }

    #[test]
    fn test_recording_renderer_keeps_last_frame() {
        let mut renderer = RecordingRenderer::new();
        let config = ChartConfig::default();
        renderer
            .render(&ChartFrame::build(&RevenueSeries::from(vec![1.0]), 1, &config))
            .unwrap();
        renderer
            .render(&ChartFrame::build(&RevenueSeries::from(vec![1.0, 2.0]), 2, &config))
            .unwrap();

        assert_eq!(renderer.render_count(), 2);
        assert_eq!(renderer.last().unwrap().points.len(), 2);
    }
}
