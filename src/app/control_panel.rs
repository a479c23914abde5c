use crate::domain::chart::{ChartConfig, ChartFrame};
use crate::domain::model::{ProjectionParameters, RevenueSeries, MAX_HORIZON_YEARS};
use crate::domain::ports::ChartRenderer;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_number, parse_whole_number, validate_finite, validate_positive, validate_range,
};

/// The six sliders of the calculator page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    BaseGdp,
    IncomeTax,
    CorporateTax,
    SalesTax,
    GdpGrowth,
    ProjectionYears,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::BaseGdp,
        Control::IncomeTax,
        Control::CorporateTax,
        Control::SalesTax,
        Control::GdpGrowth,
        Control::ProjectionYears,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Control::BaseGdp => "baseGDP",
            Control::IncomeTax => "incomeTax",
            Control::CorporateTax => "corporateTax",
            Control::SalesTax => "salesTax",
            Control::GdpGrowth => "gdpGrowth",
            Control::ProjectionYears => "projectionYears",
        }
    }

    pub fn from_id(id: &str) -> Option<Control> {
        Control::ALL.into_iter().find(|c| c.id() == id)
    }

    /// 稅率與成長率的標籤要加上百分比符號
    pub fn is_percentage(&self) -> bool {
        let id = self.id();
        id.contains("Tax") || id.contains("Growth")
    }
}

type ChangeHandler = Box<dyn FnMut(&ProjectionParameters, &RevenueSeries)>;

/// Slider state plus the handlers that run on every change. Each change
/// recomputes the whole series before any handler is called.
pub struct ControlPanel {
    parameters: ProjectionParameters,
    handlers: Vec<ChangeHandler>,
}

impl ControlPanel {
    pub fn new(initial: ProjectionParameters) -> Self {
        Self {
            parameters: initial,
            handlers: Vec::new(),
        }
    }

    pub fn parameters(&self) -> &ProjectionParameters {
        &self.parameters
    }

    pub fn on_change<F>(&mut self, handler: F)
    where
        F: FnMut(&ProjectionParameters, &RevenueSeries) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Register a renderer that redraws on every change.
    pub fn attach_renderer<R>(&mut self, mut renderer: R, config: ChartConfig)
    where
        R: ChartRenderer + 'static,
    {
        self.on_change(move |parameters, series| {
            let frame = ChartFrame::build(series, parameters.series_len(), &config);
            if let Err(e) = renderer.render(&frame) {
                tracing::error!("❌ Chart render failed: {}", e);
            }
        });
    }

    pub fn value(&self, control: Control) -> f64 {
        let p = &self.parameters;
        match control {
            Control::BaseGdp => p.base_gdp,
            Control::IncomeTax => p.income_tax_rate,
            Control::CorporateTax => p.corporate_tax_rate,
            Control::SalesTax => p.sales_tax_rate,
            Control::GdpGrowth => p.gdp_growth_rate,
            Control::ProjectionYears => p.horizon_years as f64,
        }
    }

    pub fn value_label(&self, control: Control) -> String {
        let value = self.value(control);
        if control.is_percentage() {
            format!("{}%", value)
        } else {
            format!("{}", value)
        }
    }

    /// Set a control and recompute. Years are truncated toward zero.
    pub fn set(&mut self, control: Control, value: f64) -> RevenueSeries {
        let p = &mut self.parameters;
        match control {
            Control::BaseGdp => p.base_gdp = value,
            Control::IncomeTax => p.income_tax_rate = value,
            Control::CorporateTax => p.corporate_tax_rate = value,
            Control::SalesTax => p.sales_tax_rate = value,
            Control::GdpGrowth => p.gdp_growth_rate = value,
            Control::ProjectionYears => p.horizon_years = value.trunc() as i64,
        }
        tracing::debug!("{} = {}", control.id(), self.value_label(control));
        self.refresh()
    }

    /// Parse a raw slider value. Unparsable or non-finite input, a
    /// non-positive base GDP and an oversized horizon leave the panel
    /// unchanged and no handler runs.
    pub fn set_raw(&mut self, control: Control, raw: &str) -> Result<RevenueSeries> {
        let value = match control {
            Control::ProjectionYears => {
                let years = parse_whole_number(control.id(), raw)?;
                validate_range(control.id(), years.max(0), 0, MAX_HORIZON_YEARS)?;
                years as f64
            }
            Control::BaseGdp => {
                let value = parse_number(control.id(), raw)?;
                validate_positive(control.id(), value)?;
                value
            }
            _ => {
                let value = parse_number(control.id(), raw)?;
                validate_finite(control.id(), value)?;
                value
            }
        };
        Ok(self.set(control, value))
    }

    pub fn refresh(&mut self) -> RevenueSeries {
        let series = self.parameters.project();
        for handler in self.handlers.iter_mut() {
            handler(&self.parameters, &series);
        }
        series
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(ProjectionParameters::default())
    }
}
