use super::engine::FiscalEngine;
use super::entities::{Expenses, Income, Loan};
use super::error::FiscalError;
use rust_decimal::Decimal;

impl FiscalEngine {
    /// Sum of the 15 deductible expense categories.
    pub fn total_expenses(&self, expenses: &Expenses) -> Result<Decimal, FiscalError> {
        expenses.validate()?;
        Ok(expenses.total())
    }

    pub fn total_income(&self, income: &Income) -> Result<Decimal, FiscalError> {
        income.validate()?;
        Ok(income.total())
    }

    /// Interest, insurance and fees of the loan; no loan costs nothing.
    pub fn total_loan_cost(&self, loan: Option<&Loan>) -> Result<Decimal, FiscalError> {
        match loan {
            Some(loan) => {
                loan.validate()?;
                Ok(loan.total())
            }
            None => Ok(Decimal::ZERO),
        }
    }
}
