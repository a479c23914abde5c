/// Tax revenue projection.
///
/// GDP compounds by the growth rate each year. Each year's revenue is the
/// sum of three taxes, each levied on a fixed fraction of that year's GDP.
/// The fractions are model assumptions, not derived values.
use crate::domain::model::{
    ProjectionParameters, RevenueSeries, YearProjection, MAX_HORIZON_YEARS,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_finite, validate_positive, validate_range, Validate};

/// Base GDP is entered in billions and carried internally in millions.
pub const GDP_SCALE: f64 = 1_000_000.0;

/// Share of GDP treated as personal income.
pub const INCOME_TAX_BASE_FRACTION: f64 = 0.6;

/// Share of GDP treated as corporate profit.
pub const CORPORATE_TAX_BASE_FRACTION: f64 = 0.2;

/// Share of GDP treated as consumer spending.
pub const SALES_TAX_BASE_FRACTION: f64 = 0.8;

/// Project annual revenue. Never fails: out-of-range rates are used as
/// given, a horizon of zero or less gives an empty series and NaN input
/// yields NaN entries.
pub fn project(
    base_gdp: f64,
    income_tax_rate: f64,
    corporate_tax_rate: f64,
    sales_tax_rate: f64,
    gdp_growth_rate: f64,
    horizon_years: i64,
) -> RevenueSeries {
    let parameters = ProjectionParameters::new(
        base_gdp,
        income_tax_rate,
        corporate_tax_rate,
        sales_tax_rate,
        gdp_growth_rate,
        horizon_years,
    );

    let capacity = parameters.series_len().min(MAX_HORIZON_YEARS as usize);
    let mut revenue = RevenueSeries::with_capacity(capacity);
    for year in YearIter::new(&parameters) {
        revenue.push(year.total_revenue);
    }
    revenue
}

/// Same recurrence as [`project`], keeping each tax component.
pub fn project_breakdown(parameters: &ProjectionParameters) -> Vec<YearProjection> {
    YearIter::new(parameters).collect()
}

/// 逐年計算，GDP 在每年結束後才成長
struct YearIter {
    current_gdp: f64,
    income_rate: f64,
    corporate_rate: f64,
    sales_rate: f64,
    growth_factor: f64,
    year: usize,
    remaining: usize,
}

impl YearIter {
    fn new(parameters: &ProjectionParameters) -> Self {
        Self {
            current_gdp: parameters.base_gdp * GDP_SCALE,
            income_rate: parameters.income_tax_rate / 100.0,
            corporate_rate: parameters.corporate_tax_rate / 100.0,
            sales_rate: parameters.sales_tax_rate / 100.0,
            growth_factor: 1.0 + parameters.gdp_growth_rate / 100.0,
            year: 0,
            remaining: parameters.series_len(),
        }
    }
}

impl Iterator for YearIter {
    type Item = YearProjection;

    fn next(&mut self) -> Option<YearProjection> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.year += 1;

        let gdp = self.current_gdp;
        let income_tax = gdp * INCOME_TAX_BASE_FRACTION * self.income_rate;
        let corporate_tax = gdp * CORPORATE_TAX_BASE_FRACTION * self.corporate_rate;
        let sales_tax = gdp * SALES_TAX_BASE_FRACTION * self.sales_rate;
        let total_revenue = income_tax + corporate_tax + sales_tax;

        self.current_gdp *= self.growth_factor;

        Some(YearProjection {
            year: self.year,
            gdp,
            income_tax,
            corporate_tax,
            sales_tax,
            total_revenue,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ProjectionParameters {
    pub fn project(&self) -> RevenueSeries {
        project(
            self.base_gdp,
            self.income_tax_rate,
            self.corporate_tax_rate,
            self.sales_tax_rate,
            self.gdp_growth_rate,
            self.horizon_years,
        )
    }

    pub fn project_breakdown(&self) -> Vec<YearProjection> {
        project_breakdown(self)
    }
}

/// Boundary check for user supplied parameters. Rates are model inputs
/// and stay unchecked. Non-finite numbers, a non-positive base GDP and a
/// horizon above `MAX_HORIZON_YEARS` are rejected; a horizon of zero or
/// less is accepted and gives an empty series.
impl Validate for ProjectionParameters {
    fn validate(&self) -> Result<()> {
        validate_positive("base_gdp", self.base_gdp)?;
        validate_finite("income_tax_rate", self.income_tax_rate)?;
        validate_finite("corporate_tax_rate", self.corporate_tax_rate)?;
        validate_finite("sales_tax_rate", self.sales_tax_rate)?;
        validate_finite("gdp_growth_rate", self.gdp_growth_rate)?;
        validate_range(
            "horizon_years",
            self.horizon_years.max(0),
            0,
            MAX_HORIZON_YEARS,
        )?;
        Ok(())
    }
}
