use super::engine::FiscalEngine;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Figures the advisory rules look at.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceBasis {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub result: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    MicroBicEligible,
    LowCharges,
    HighCharges,
    LossCarryForward,
    ReserveForCharges,
}

impl Advice {
    pub fn message(&self) -> &'static str {
        match self {
            Advice::MicroBicEligible => {
                "You are eligible for the micro-BIC regime and its automatic flat allowance"
            }
            Advice::LowCharges => {
                "Your charges look low. Check that every deductible expense is declared"
            }
            Advice::HighCharges => "Your charges are significant. The real regime may be more favourable",
            Advice::LossCarryForward => {
                "The activity is running a loss. It can be carried forward against future profits"
            }
            Advice::ReserveForCharges => "The activity is profitable. Consider setting aside funds for future charges",
        }
    }
}

impl std::fmt::Display for Advice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl FiscalEngine {
    /// Advisory observations, in a fixed order: regime eligibility, charge
    /// ratio, then the sign of the result. Never changes any figure.
    pub fn advise(&self, basis: &AdviceBasis) -> Vec<Advice> {
        let mut advice = Vec::new();

        if basis.total_income <= self.params().micro_bic_threshold {
            advice.push(Advice::MicroBicEligible);
        }

        // A ratio too large for `Decimal` is far above the upper bound.
        let charge_ratio = if basis.total_income > Decimal::ZERO {
            basis
                .total_expenses
                .checked_div(basis.total_income)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        } else {
            Some(Decimal::ZERO)
        };
        match charge_ratio {
            Some(ratio) if ratio < dec!(20) => advice.push(Advice::LowCharges),
            Some(ratio) if ratio <= dec!(60) => {}
            _ => advice.push(Advice::HighCharges),
        }

        if basis.result < Decimal::ZERO {
            advice.push(Advice::LossCarryForward);
        } else if basis.result > Decimal::ZERO {
            advice.push(Advice::ReserveForCharges);
        }

        advice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basis(income: Decimal, expenses: Decimal, result: Decimal) -> AdviceBasis {
        AdviceBasis {
            total_income: income,
            total_expenses: expenses,
            result,
        }
    }

    #[test]
    fn moderate_profitable_activity() {
        let advice = FiscalEngine::default().advise(&basis(dec!(24000), dec!(8000), dec!(16000)));
        assert_eq!(advice, vec![Advice::MicroBicEligible, Advice::ReserveForCharges]);
    }

    #[test]
    fn low_charges_warned() {
        let advice = FiscalEngine::default().advise(&basis(dec!(24000), dec!(1000), dec!(23000)));
        assert_eq!(
            advice,
            vec![Advice::MicroBicEligible, Advice::LowCharges, Advice::ReserveForCharges]
        );
    }

    #[test]
    fn heavy_charges_and_loss() {
        let advice = FiscalEngine::default().advise(&basis(dec!(90000), dec!(60000), dec!(-2500)));
        assert_eq!(advice, vec![Advice::HighCharges, Advice::LossCarryForward]);
    }

    #[test]
    fn ratio_bounds_are_exclusive() {
        let engine = FiscalEngine::default();
        let at_20 = engine.advise(&basis(dec!(100000), dec!(20000), dec!(0)));
        assert!(at_20.is_empty());
        let at_60 = engine.advise(&basis(dec!(100000), dec!(60000), dec!(0)));
        assert!(at_60.is_empty());
    }

    #[test]
    fn overflowing_ratio_counts_as_high_charges() {
        let advice = FiscalEngine::default().advise(&basis(
            dec!(0.0000000000000000000000000001),
            dec!(1000000000000000),
            dec!(-1000000000000000),
        ));
        assert_eq!(
            advice,
            vec![Advice::MicroBicEligible, Advice::HighCharges, Advice::LossCarryForward]
        );
    }

    #[test]
    fn zero_income_counts_as_low_charges() {
        let advice = FiscalEngine::default().advise(&basis(dec!(0), dec!(500), dec!(-500)));
        assert_eq!(
            advice,
            vec![Advice::MicroBicEligible, Advice::LowCharges, Advice::LossCarryForward]
        );
    }
}
