use super::advice::AdviceBasis;
use super::engine::FiscalEngine;
use super::entities::{Expenses, Income, Loan, Property};
use super::error::FiscalError;
use super::money::round_cents;
use rust_decimal::Decimal;
use serde::Serialize;

/// Net taxable result of one property for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalResult {
    pub property_id: String,
    pub year: i32,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_loan_cost: Decimal,
    pub depreciation_deducted: Decimal,
    pub result_before_depreciation: Decimal,
    pub result_after_depreciation: Decimal,
}

impl FiscalResult {
    /// Everything deducted under the real regime.
    pub fn total_charges(&self) -> Decimal {
        self.total_expenses + self.total_loan_cost + self.depreciation_deducted
    }

    pub fn advice_basis(&self) -> AdviceBasis {
        AdviceBasis {
            total_income: self.total_income,
            total_expenses: self.total_expenses,
            result: self.result_after_depreciation,
        }
    }
}

impl FiscalEngine {
    pub fn fiscal_result(
        &self,
        property: &Property,
        income: &Income,
        expenses: &Expenses,
        loan: Option<&Loan>,
        year: i32,
    ) -> Result<FiscalResult, FiscalError> {
        let total_income = round_cents(self.total_income(income)?);
        let total_expenses = round_cents(self.total_expenses(expenses)?);
        let total_loan_cost = round_cents(self.total_loan_cost(loan)?);
        let depreciation_deducted = self.depreciation(property, year)?.deductible();

        let result_before_depreciation = total_income - total_expenses - total_loan_cost;
        let result_after_depreciation = result_before_depreciation - depreciation_deducted;

        log::debug!(
            "Property {} {}: income={}, expenses={}, loan={}, depreciation={}, result={}",
            property.id,
            year,
            total_income,
            total_expenses,
            total_loan_cost,
            depreciation_deducted,
            result_after_depreciation
        );

        Ok(FiscalResult {
            property_id: property.id.clone(),
            year,
            total_income,
            total_expenses,
            total_loan_cost,
            depreciation_deducted,
            result_before_depreciation,
            result_after_depreciation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entities::tests::property;
    use rust_decimal_macros::dec;

    fn income() -> Income {
        Income {
            gross_rent: dec!(24000),
            other_income: dec!(0),
        }
    }

    fn expenses() -> Expenses {
        Expenses {
            management_fees: dec!(2400),
            co_ownership_charges: dec!(3600),
            insurance: dec!(800),
            property_tax: dec!(1200),
            ..Default::default()
        }
    }

    fn loan() -> Loan {
        Loan {
            annual_interest: dec!(4800),
            insurance: dec!(600),
            ..Default::default()
        }
    }

    #[test]
    fn declaration_example() {
        let engine = FiscalEngine::default();
        let result = engine
            .fiscal_result(&property("2024-01-01"), &income(), &expenses(), Some(&loan()), 2024)
            .unwrap();

        assert_eq!(result.total_income, dec!(24000.00));
        assert_eq!(result.total_expenses, dec!(8000.00));
        assert_eq!(result.total_loan_cost, dec!(5400.00));
        assert_eq!(result.depreciation_deducted, dec!(7733.33));
        assert_eq!(result.result_before_depreciation, dec!(10600.00));
        assert_eq!(result.result_after_depreciation, dec!(2866.67));
        assert_eq!(result.total_charges(), dec!(21133.33));

        let basis = result.advice_basis();
        assert_eq!(basis.total_expenses, dec!(8000.00));
        assert_eq!(basis.result, dec!(2866.67));
    }

    #[test]
    fn first_year_deducts_pro_rata() {
        let engine = FiscalEngine::default();
        let result = engine
            .fiscal_result(&property("2023-07-01"), &income(), &expenses(), None, 2023)
            .unwrap();

        assert_eq!(result.total_loan_cost, dec!(0));
        assert_eq!(result.depreciation_deducted, dec!(3898.45));
        assert_eq!(result.result_before_depreciation, dec!(16000.00));
        assert_eq!(result.result_after_depreciation, dec!(12101.55));
    }

    #[test]
    fn identities_hold_with_sub_cent_inputs() {
        let engine = FiscalEngine::default();
        let income = Income {
            gross_rent: dec!(18000.005),
            other_income: dec!(0.004),
        };
        let expenses = Expenses {
            upkeep: dec!(1234.565),
            minor_repairs: dec!(0.333),
            ..Default::default()
        };
        let loan = Loan {
            annual_interest: dec!(999.995),
            ..Default::default()
        };
        let r = engine
            .fiscal_result(&property("2021-02-03"), &income, &expenses, Some(&loan), 2024)
            .unwrap();

        assert_eq!(
            r.result_before_depreciation,
            r.total_income - r.total_expenses - r.total_loan_cost
        );
        assert_eq!(
            r.result_after_depreciation,
            r.result_before_depreciation - r.depreciation_deducted
        );
    }

    #[test]
    fn loss_making_year() {
        let engine = FiscalEngine::default();
        let small = Income {
            gross_rent: dec!(6000),
            other_income: dec!(0),
        };
        let r = engine
            .fiscal_result(&property("2020-01-01"), &small, &expenses(), Some(&loan()), 2024)
            .unwrap();
        assert_eq!(r.result_after_depreciation, dec!(-15133.33));
    }

    #[test]
    fn malformed_duration_propagates() {
        let engine = FiscalEngine::default();
        let mut p = property("2024-01-01");
        p.fee_years = 0;
        assert!(engine
            .fiscal_result(&p, &income(), &expenses(), None, 2024)
            .is_err());
    }
}
