use super::error::FiscalError;
use super::money::ensure_non_negative;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A rental unit enrolled in the LMNP regime.
///
/// Built from caller input by [`crate::core::input`]; the engine re-checks
/// it with [`Property::validate`] before every calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: String,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    /// Date the unit entered the regime; drives first-year pro-rata
    pub enrollment_date: NaiveDate,
    pub acquisition_price: Decimal,
    pub notary_fees: Decimal,
    pub agency_fees: Decimal,
    pub land_share: Decimal,
    pub building_share: Decimal,
    pub building_years: u32,
    pub fee_years: u32,
}

impl Property {
    pub fn validate(&self, split_tolerance: Decimal) -> Result<(), FiscalError> {
        ensure_non_negative("acquisition_price", self.acquisition_price)?;
        ensure_non_negative("notary_fees", self.notary_fees)?;
        ensure_non_negative("agency_fees", self.agency_fees)?;
        validate_split(self.land_share, self.building_share, split_tolerance)?;
        if self.building_years == 0 {
            return Err(FiscalError::config("building_years", "depreciation duration must be positive"));
        }
        if self.fee_years == 0 {
            return Err(FiscalError::config("fee_years", "depreciation duration must be positive"));
        }
        Ok(())
    }
}

/// Check that a land/building split is coherent: each share in [0, 1] and
/// their sum within `tolerance` (exclusive) of 1.
pub fn validate_split(land: Decimal, building: Decimal, tolerance: Decimal) -> Result<(), FiscalError> {
    for (field, share) in [("land_share", land), ("building_share", building)] {
        if share < Decimal::ZERO || share > Decimal::ONE {
            return Err(FiscalError::config(field, format!("share must be between 0 and 1, got {share}")));
        }
    }
    let total = land + building;
    if (total - Decimal::ONE).abs() >= tolerance {
        return Err(FiscalError::config(
            "building_share",
            format!("land and building shares must sum to 1, got {total}"),
        ));
    }
    Ok(())
}

/// Gross receipts for a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Income {
    /// Rent received, before any charge
    #[schemars(with = "f64")]
    pub gross_rent: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub other_income: Decimal,
}

impl Income {
    pub fn validate(&self) -> Result<(), FiscalError> {
        ensure_non_negative("gross_rent", self.gross_rent)?;
        ensure_non_negative("other_income", self.other_income)?;
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.gross_rent + self.other_income
    }
}

/// Deductible operating costs for a period.
///
/// Categories a caller sends that are not listed here are ignored when
/// decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Expenses {
    #[schemars(with = "f64")]
    pub management_fees: Decimal,
    #[schemars(with = "f64")]
    pub co_ownership_charges: Decimal,
    #[schemars(with = "f64")]
    pub insurance: Decimal,
    #[schemars(with = "f64")]
    pub upkeep: Decimal,
    #[schemars(with = "f64")]
    pub platform_fees: Decimal,
    #[schemars(with = "f64")]
    pub accounting_fees: Decimal,
    #[schemars(with = "f64")]
    pub subscriptions: Decimal,
    #[schemars(with = "f64")]
    pub property_tax: Decimal,
    #[schemars(with = "f64")]
    pub residence_tax: Decimal,
    #[schemars(with = "f64")]
    pub tourist_tax: Decimal,
    /// Business property levy (CFE) actually paid
    #[schemars(with = "f64")]
    pub cfe: Decimal,
    #[schemars(with = "f64")]
    pub social_charges: Decimal,
    #[schemars(with = "f64")]
    pub miscellaneous: Decimal,
    #[schemars(with = "f64")]
    pub minor_repairs: Decimal,
    #[schemars(with = "f64")]
    pub minor_furnishings: Decimal,
}

impl Expenses {
    pub const CATEGORY_COUNT: usize = 15;

    pub fn categories(&self) -> [(&'static str, Decimal); Self::CATEGORY_COUNT] {
        [
            ("management_fees", self.management_fees),
            ("co_ownership_charges", self.co_ownership_charges),
            ("insurance", self.insurance),
            ("upkeep", self.upkeep),
            ("platform_fees", self.platform_fees),
            ("accounting_fees", self.accounting_fees),
            ("subscriptions", self.subscriptions),
            ("property_tax", self.property_tax),
            ("residence_tax", self.residence_tax),
            ("tourist_tax", self.tourist_tax),
            ("cfe", self.cfe),
            ("social_charges", self.social_charges),
            ("miscellaneous", self.miscellaneous),
            ("minor_repairs", self.minor_repairs),
            ("minor_furnishings", self.minor_furnishings),
        ]
    }

    pub fn validate(&self) -> Result<(), FiscalError> {
        for (field, amount) in self.categories() {
            ensure_non_negative(field, amount)?;
        }
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.categories().iter().map(|(_, amount)| *amount).sum()
    }
}

/// Financing costs attached to a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Loan {
    #[schemars(with = "f64")]
    pub annual_interest: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub insurance: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub origination_fees: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub broker_fees: Decimal,
}

impl Loan {
    pub fn validate(&self) -> Result<(), FiscalError> {
        ensure_non_negative("annual_interest", self.annual_interest)?;
        ensure_non_negative("insurance", self.insurance)?;
        ensure_non_negative("origination_fees", self.origination_fees)?;
        ensure_non_negative("broker_fees", self.broker_fees)?;
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.annual_interest + self.insurance + self.origination_fees + self.broker_fees
    }
}
