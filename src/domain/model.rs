use serde::{Deserialize, Serialize};

/// 一次試算所需的六個參數，對應畫面上的六個滑桿
///
/// Rates are percentages (0–100 by convention, not enforced) and
/// `base_gdp` is in billions. A `horizon_years` of zero or less yields an
/// empty series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    pub base_gdp: f64,
    pub income_tax_rate: f64,
    pub corporate_tax_rate: f64,
    pub sales_tax_rate: f64,
    pub gdp_growth_rate: f64,
    pub horizon_years: i64,
}

pub const DEFAULT_BASE_GDP: f64 = 1000.0;
pub const DEFAULT_INCOME_TAX_RATE: f64 = 20.0;
pub const DEFAULT_CORPORATE_TAX_RATE: f64 = 21.0;
pub const DEFAULT_SALES_TAX_RATE: f64 = 8.0;
pub const DEFAULT_GDP_GROWTH_RATE: f64 = 2.0;
pub const DEFAULT_HORIZON_YEARS: i64 = 10;

/// Upper bound on the horizon accepted from user input.
pub const MAX_HORIZON_YEARS: i64 = 1000;

/// 舊版頁面寫死的 BASE_GDP 與 YEARS
pub const LEGACY_BASE_GDP: f64 = 1_000_000.0;
pub const LEGACY_HORIZON_YEARS: i64 = 10;

impl ProjectionParameters {
    pub fn new(
        base_gdp: f64,
        income_tax_rate: f64,
        corporate_tax_rate: f64,
        sales_tax_rate: f64,
        gdp_growth_rate: f64,
        horizon_years: i64,
    ) -> Self {
        Self {
            base_gdp,
            income_tax_rate,
            corporate_tax_rate,
            sales_tax_rate,
            gdp_growth_rate,
            horizon_years,
        }
    }

    /// Parameters of the fixed-GDP, fixed-horizon page variant. Only the
    /// rates and growth are adjustable there.
    pub fn legacy_preset(
        income_tax_rate: f64,
        corporate_tax_rate: f64,
        sales_tax_rate: f64,
        gdp_growth_rate: f64,
    ) -> Self {
        Self::new(
            LEGACY_BASE_GDP,
            income_tax_rate,
            corporate_tax_rate,
            sales_tax_rate,
            gdp_growth_rate,
            LEGACY_HORIZON_YEARS,
        )
    }

    /// Number of entries the produced series will hold.
    pub fn series_len(&self) -> usize {
        usize::try_from(self.horizon_years).unwrap_or(0)
    }
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self::new(
            DEFAULT_BASE_GDP,
            DEFAULT_INCOME_TAX_RATE,
            DEFAULT_CORPORATE_TAX_RATE,
            DEFAULT_SALES_TAX_RATE,
            DEFAULT_GDP_GROWTH_RATE,
            DEFAULT_HORIZON_YEARS,
        )
    }
}

/// Projected revenue per year; index `i` is year `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevenueSeries(Vec<f64>);

impl RevenueSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, revenue: f64) {
        self.0.push(revenue);
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Largest entry, ignoring NaN. `None` for an empty series.
    pub fn max(&self) -> Option<f64> {
        self.0
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

impl std::ops::Deref for RevenueSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for RevenueSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// 單一年度的稅收拆解，用於表格與 CSV 輸出
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: usize,
    pub gdp: f64,
    pub income_tax: f64,
    pub corporate_tax: f64,
    pub sales_tax: f64,
    pub total_revenue: f64,
}

/// 一次完整試算的結果，交給 load 階段輸出
#[derive(Debug, Clone)]
pub struct ProjectionOutcome {
    pub parameters: ProjectionParameters,
    pub revenue: RevenueSeries,
    pub breakdown: Vec<YearProjection>,
}
