//! Per-category totals feeding the overview chart.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ledger::{Category, Ledger};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartModel {
    pub income: Decimal,
    pub expenditure: Decimal,
    pub savings: Decimal,
    pub loan: Decimal,
}

/// Sums every category of `ledger`. There is no cached copy anywhere, so the
/// result always reflects the ledger as it is now.
pub fn recompute(ledger: &Ledger) -> ChartModel {
    ChartModel {
        income: ledger.total(Category::Income),
        expenditure: ledger.total(Category::Expenditure),
        savings: ledger.total(Category::Savings),
        loan: ledger.total(Category::Loan),
    }
}

impl ChartModel {
    pub fn total(&self, category: Category) -> Decimal {
        match category {
            Category::Income => self.income,
            Category::Expenditure => self.expenditure,
            Category::Savings => self.savings,
            Category::Loan => self.loan,
        }
    }

    pub fn series(&self) -> Vec<(Category, Decimal)> {
        Category::ALL.iter().map(|c| (*c, self.total(*c))).collect()
    }

    /// Maps the four totals onto an SVG viewport, left to right in display
    /// order. The largest total touches the top edge; an empty ledger draws a
    /// flat line along the bottom.
    pub fn line_points(&self, width: f64, height: f64) -> Vec<(f64, f64)> {
        let values: Vec<f64> = self
            .series()
            .iter()
            .map(|(_, v)| v.to_f64().unwrap_or(0.0))
            .collect();
        let max = values.iter().cloned().fold(0.0_f64, f64::max);
        let step = width / (values.len() - 1) as f64;

        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let y = if max > 0.0 {
                    height - v * height / max
                } else {
                    height
                };
                (i as f64 * step, y)
            })
            .collect()
    }
}
