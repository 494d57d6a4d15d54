use super::engine::FiscalEngine;
use super::error::FiscalError;
use super::money::{ensure_non_negative, round_cents};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    MicroBic,
    Real,
}

impl Regime {
    pub fn display(&self) -> &'static str {
        match self {
            Regime::MicroBic => "micro-BIC",
            Regime::Real => "real",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Micro-BIC versus real regime for a year's receipts and charges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegimeComparison {
    pub recommended: Regime,
    pub micro_bic_eligible: bool,
    /// Equal to the full income when micro-BIC is not available
    pub micro_bic_base: Decimal,
    pub real_base: Decimal,
    pub estimated_saving: Decimal,
    pub micro_bic_threshold: Decimal,
    pub micro_bic_allowance: Decimal,
}

impl FiscalEngine {
    /// Compare the taxable base under both regimes. `charges` covers
    /// everything deductible under the real regime (expenses, loan costs,
    /// depreciation).
    pub fn compare_regimes(&self, income: Decimal, charges: Decimal) -> Result<RegimeComparison, FiscalError> {
        ensure_non_negative("income", income)?;
        ensure_non_negative("charges", charges)?;

        let threshold = self.params().micro_bic_threshold;
        let allowance = self.params().micro_bic_allowance;

        let micro_bic_eligible = income <= threshold;
        let micro_bic_base = if micro_bic_eligible {
            round_cents(income * (Decimal::ONE - allowance))
        } else {
            round_cents(income)
        };
        let real_base = round_cents(income - charges);

        let (recommended, estimated_saving) = if micro_bic_eligible && micro_bic_base < real_base {
            (Regime::MicroBic, real_base - micro_bic_base)
        } else if micro_bic_eligible {
            (Regime::Real, micro_bic_base - real_base)
        } else {
            (Regime::Real, round_cents(Decimal::ZERO))
        };

        log::debug!(
            "Regimes for income={} charges={}: micro={} (eligible: {}), real={} -> {}",
            income,
            charges,
            micro_bic_base,
            micro_bic_eligible,
            real_base,
            recommended
        );

        Ok(RegimeComparison {
            recommended,
            micro_bic_eligible,
            micro_bic_base,
            real_base,
            estimated_saving,
            micro_bic_threshold: threshold,
            micro_bic_allowance: allowance,
        })
    }
}
