use super::advice::{Advice, AdviceBasis};
use super::engine::FiscalEngine;
use super::entities::{Expenses, Income, Loan, Property};
use super::error::FiscalError;
use super::money::checked_add;
use super::regime::RegimeComparison;
use super::result::FiscalResult;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

/// One property with its figures for the declared year.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub property: Property,
    pub income: Income,
    pub expenses: Expenses,
    pub loan: Option<Loan>,
}

/// Everything a taxpayer declares for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub year: i32,
    pub entries: Vec<PropertyEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclarationTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_loan_cost: Decimal,
    pub depreciation_deducted: Decimal,
    pub result_before_depreciation: Decimal,
    pub result_after_depreciation: Decimal,
}

impl DeclarationTotals {
    fn add(&mut self, result: &FiscalResult) -> Result<(), FiscalError> {
        self.total_income = checked_add("total_income", self.total_income, result.total_income)?;
        self.total_expenses = checked_add("total_expenses", self.total_expenses, result.total_expenses)?;
        self.total_loan_cost = checked_add("total_loan_cost", self.total_loan_cost, result.total_loan_cost)?;
        self.depreciation_deducted = checked_add(
            "depreciation_deducted",
            self.depreciation_deducted,
            result.depreciation_deducted,
        )?;
        self.result_before_depreciation = checked_add(
            "result_before_depreciation",
            self.result_before_depreciation,
            result.result_before_depreciation,
        )?;
        self.result_after_depreciation = checked_add(
            "result_after_depreciation",
            self.result_after_depreciation,
            result.result_after_depreciation,
        )?;
        Ok(())
    }

    pub fn total_charges(&self) -> Result<Decimal, FiscalError> {
        let charges = checked_add("total_charges", self.total_expenses, self.total_loan_cost)?;
        checked_add("total_charges", charges, self.depreciation_deducted)
    }

    pub fn advice_basis(&self) -> AdviceBasis {
        AdviceBasis {
            total_income: self.total_income,
            total_expenses: self.total_expenses,
            result: self.result_after_depreciation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeclarationSummary {
    pub year: i32,
    pub results: Vec<FiscalResult>,
    pub totals: DeclarationTotals,
    pub regime: RegimeComparison,
    pub cfe_estimate: Decimal,
    pub advice: Vec<Advice>,
}

impl FiscalEngine {
    /// Roll every property of a declaration up into one summary: results
    /// per property, totals, the regime comparison on the totals, a CFE
    /// estimate on total receipts and advice.
    pub fn declaration_summary(&self, declaration: &Declaration) -> Result<DeclarationSummary, FiscalError> {
        if declaration.entries.is_empty() {
            return Err(FiscalError::input("properties", "a declaration needs at least one property"));
        }

        let mut seen = HashSet::new();
        let mut results = Vec::with_capacity(declaration.entries.len());
        let mut totals = DeclarationTotals::default();

        for (i, entry) in declaration.entries.iter().enumerate() {
            let prefix = format!("properties[{i}]");
            if !seen.insert(entry.property.id.as_str()) {
                return Err(FiscalError::input(
                    format!("{prefix}.id"),
                    format!("duplicate property id '{}'", entry.property.id),
                ));
            }
            let result = self
                .fiscal_result(
                    &entry.property,
                    &entry.income,
                    &entry.expenses,
                    entry.loan.as_ref(),
                    declaration.year,
                )
                .map_err(|e| e.within(&prefix))?;
            totals.add(&result)?;
            results.push(result);
        }

        let regime = self
            .compare_regimes(totals.total_income, totals.total_charges()?)
            .map_err(|e| e.within("totals"))?;
        let cfe_estimate = self
            .estimate_cfe(totals.total_income)
            .map_err(|e| e.within("totals"))?;
        let advice = self.advise(&totals.advice_basis());

        log::info!(
            "Declaration {}: {} properties, income {}, result {}, recommended regime {}",
            declaration.year,
            results.len(),
            totals.total_income,
            totals.result_after_depreciation,
            regime.recommended
        );

        Ok(DeclarationSummary {
            year: declaration.year,
            results,
            totals,
            regime,
            cfe_estimate,
            advice,
        })
    }
}
