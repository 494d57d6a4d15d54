//! Boundary between loosely typed caller documents (JSON maps, CSV rows)
//! and the engine's typed entities. Input is parsed and validated once
//! here; nothing downstream coerces values.

use super::declaration::{Declaration, PropertyEntry};
use super::entities::{Expenses, Income, Loan, Property};
use super::error::FiscalError;
use super::params::FiscalParameters;
use super::split::Region;
use chrono::NaiveDate;
use lmnpc_derive::CsvSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Description of one CSV input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Root of a JSON declaration document.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DeclarationInput {
    /// Tax year declared; may be supplied by the caller instead
    #[serde(default)]
    pub year: Option<i32>,
    pub properties: Vec<EntryInput>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EntryInput {
    pub property: PropertyInput,
    pub income: Income,
    #[serde(default)]
    pub expenses: Expenses,
    #[serde(default)]
    pub loan: Option<Loan>,
}

/// Property as sent by a caller. Required values are optional here so
/// that a missing one is reported with its field name.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PropertyInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Date the unit entered the LMNP regime (YYYY-MM-DD)
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub acquisition_price: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub notary_fees: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub agency_fees: Option<Decimal>,
    /// Omit both shares to use the postal-code suggestion
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub land_share: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub building_share: Option<Decimal>,
    #[serde(default)]
    pub building_years: Option<i64>,
    #[serde(default)]
    pub fee_years: Option<i64>,
}

impl PropertyInput {
    /// Build a validated [`Property`]. `index` numbers properties without
    /// an id.
    pub fn into_property(self, index: usize, params: &FiscalParameters) -> Result<Property, FiscalError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("property-{}", index + 1));

        let enrollment_date = parse_date(
            "enrollment_date",
            self.enrollment_date
                .as_deref()
                .ok_or_else(|| FiscalError::input("enrollment_date", "required"))?,
        )?;
        let acquisition_price = self
            .acquisition_price
            .ok_or_else(|| FiscalError::input("acquisition_price", "required"))?;

        let (land_share, building_share) = match (self.land_share, self.building_share) {
            (Some(land), Some(building)) => (land, building),
            (None, None) => match self.postal_code.as_deref() {
                Some(code) => {
                    let region = Region::from_postal_code(code);
                    log::info!(
                        "Property {}: no land/building split given, using {} split for {}",
                        id,
                        region.display(),
                        code.trim()
                    );
                    region.shares()
                }
                None => (params.default_land_share, params.default_building_share),
            },
            (Some(_), None) => {
                return Err(FiscalError::config("building_share", "required when land_share is given"))
            }
            (None, Some(_)) => {
                return Err(FiscalError::config("land_share", "required when building_share is given"))
            }
        };

        let property = Property {
            id,
            address: self.address,
            postal_code: self.postal_code.map(|c| c.trim().to_string()),
            enrollment_date,
            acquisition_price,
            notary_fees: self.notary_fees.unwrap_or_default(),
            agency_fees: self.agency_fees.unwrap_or_default(),
            land_share,
            building_share,
            building_years: duration("building_years", self.building_years, params.default_building_years)?,
            fee_years: duration("fee_years", self.fee_years, params.default_fee_years)?,
        };
        property.validate(params.split_tolerance)?;
        Ok(property)
    }
}

impl EntryInput {
    pub fn into_entry(self, index: usize, params: &FiscalParameters) -> Result<PropertyEntry, FiscalError> {
        let property = self.property.into_property(index, params)?;
        self.income.validate().map_err(|e| e.within("income"))?;
        self.expenses.validate().map_err(|e| e.within("expenses"))?;
        if let Some(loan) = &self.loan {
            loan.validate().map_err(|e| e.within("loan"))?;
        }
        Ok(PropertyEntry {
            property,
            income: self.income,
            expenses: self.expenses,
            loan: self.loan,
        })
    }
}

impl DeclarationInput {
    /// Convert every property on its own, keeping each outcome so callers
    /// can report all problems at once.
    pub fn parse_entries(self, params: &FiscalParameters) -> Vec<Result<PropertyEntry, FiscalError>> {
        self.properties
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                entry
                    .into_entry(i, params)
                    .map_err(|e| e.within(&format!("properties[{i}]")))
            })
            .collect()
    }

    /// Convert to a [`Declaration`], failing on the first invalid property.
    /// `year` overrides the document's year.
    pub fn into_declaration(self, year: Option<i32>, params: &FiscalParameters) -> Result<Declaration, FiscalError> {
        let year = year
            .or(self.year)
            .ok_or_else(|| FiscalError::input("year", "required"))?;
        let entries = self.parse_entries(params).into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(Declaration { year, entries })
    }
}

/// Flat CSV row: one property with its year's figures.
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct PropertyRecord {
    /// Property identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Postal code, used to suggest the land/building split
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Date the unit entered the LMNP regime (YYYY-MM-DD)
    pub enrollment_date: String,
    /// Purchase price, land included
    pub acquisition_price: Decimal,
    /// Notary fees
    pub notary_fees: Option<Decimal>,
    /// Agency fees
    pub agency_fees: Option<Decimal>,
    /// Land share of the price (0-1)
    pub land_share: Option<Decimal>,
    /// Building share of the price (0-1)
    pub building_share: Option<Decimal>,
    /// Building depreciation duration in years
    pub building_years: Option<i64>,
    /// Notary/agency fee depreciation duration in years
    pub fee_years: Option<i64>,
    /// Gross rent received
    pub gross_rent: Decimal,
    /// Other receipts
    pub other_income: Option<Decimal>,
    /// Management fees
    pub management_fees: Option<Decimal>,
    /// Co-ownership charges
    pub co_ownership_charges: Option<Decimal>,
    /// Insurance premiums
    pub insurance: Option<Decimal>,
    /// Cleaning and upkeep
    pub upkeep: Option<Decimal>,
    /// Booking platform fees
    pub platform_fees: Option<Decimal>,
    /// Accounting fees
    pub accounting_fees: Option<Decimal>,
    /// Subscriptions (internet, utilities)
    pub subscriptions: Option<Decimal>,
    /// Property tax
    pub property_tax: Option<Decimal>,
    /// Residence tax
    pub residence_tax: Option<Decimal>,
    /// Tourist tax
    pub tourist_tax: Option<Decimal>,
    /// Business property levy paid
    pub cfe: Option<Decimal>,
    /// Social charges
    pub social_charges: Option<Decimal>,
    /// Miscellaneous expenses
    pub miscellaneous: Option<Decimal>,
    /// Minor repairs
    pub minor_repairs: Option<Decimal>,
    /// Minor furnishings
    pub minor_furnishings: Option<Decimal>,
    /// Annual loan interest
    pub loan_interest: Option<Decimal>,
    /// Loan insurance
    pub loan_insurance: Option<Decimal>,
    /// Loan origination fees
    pub loan_origination_fees: Option<Decimal>,
    /// Broker fees
    pub loan_broker_fees: Option<Decimal>,
}

impl From<PropertyRecord> for EntryInput {
    fn from(r: PropertyRecord) -> Self {
        let has_loan = r.loan_interest.is_some()
            || r.loan_insurance.is_some()
            || r.loan_origination_fees.is_some()
            || r.loan_broker_fees.is_some();
        let loan = has_loan.then(|| Loan {
            annual_interest: r.loan_interest.unwrap_or_default(),
            insurance: r.loan_insurance.unwrap_or_default(),
            origination_fees: r.loan_origination_fees.unwrap_or_default(),
            broker_fees: r.loan_broker_fees.unwrap_or_default(),
        });
        EntryInput {
            property: PropertyInput {
                id: r.id,
                address: r.address,
                postal_code: r.postal_code,
                enrollment_date: Some(r.enrollment_date),
                acquisition_price: Some(r.acquisition_price),
                notary_fees: r.notary_fees,
                agency_fees: r.agency_fees,
                land_share: r.land_share,
                building_share: r.building_share,
                building_years: r.building_years,
                fee_years: r.fee_years,
            },
            income: Income {
                gross_rent: r.gross_rent,
                other_income: r.other_income.unwrap_or_default(),
            },
            expenses: Expenses {
                management_fees: r.management_fees.unwrap_or_default(),
                co_ownership_charges: r.co_ownership_charges.unwrap_or_default(),
                insurance: r.insurance.unwrap_or_default(),
                upkeep: r.upkeep.unwrap_or_default(),
                platform_fees: r.platform_fees.unwrap_or_default(),
                accounting_fees: r.accounting_fees.unwrap_or_default(),
                subscriptions: r.subscriptions.unwrap_or_default(),
                property_tax: r.property_tax.unwrap_or_default(),
                residence_tax: r.residence_tax.unwrap_or_default(),
                tourist_tax: r.tourist_tax.unwrap_or_default(),
                cfe: r.cfe.unwrap_or_default(),
                social_charges: r.social_charges.unwrap_or_default(),
                miscellaneous: r.miscellaneous.unwrap_or_default(),
                minor_repairs: r.minor_repairs.unwrap_or_default(),
                minor_furnishings: r.minor_furnishings.unwrap_or_default(),
            },
            loan,
        }
    }
}

/// Decode a JSON declaration document.
pub fn read_declaration_json<R: Read>(reader: R) -> Result<DeclarationInput, FiscalError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Decode a declaration from an already parsed JSON value, as handed over
/// by an HTTP layer.
pub fn declaration_from_value(value: serde_json::Value) -> Result<DeclarationInput, FiscalError> {
    Ok(serde_json::from_value(value)?)
}

/// Decode CSV rows (header required) into a declaration without a year.
pub fn read_declaration_csv<R: Read>(reader: R) -> Result<DeclarationInput, FiscalError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut properties = Vec::new();
    for (i, record) in rdr.deserialize::<PropertyRecord>().enumerate() {
        let record = record.map_err(|e| FiscalError::MalformedDocument(format!("row {}: {e}", i + 1)))?;
        properties.push(EntryInput::from(record));
    }
    log::info!("Read {} csv records", properties.len());
    Ok(DeclarationInput { year: None, properties })
}

/// Serialize any engine output into a JSON value. Decimals are written as
/// strings so no precision is lost before the caller decides how to
/// present them.
pub fn to_value<T: Serialize>(output: &T) -> Result<serde_json::Value, FiscalError> {
    Ok(serde_json::to_value(output)?)
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, FiscalError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| FiscalError::input(field, format!("expected YYYY-MM-DD, got '{value}' ({e})")))
}

fn duration(field: &str, years: Option<i64>, default: u32) -> Result<u32, FiscalError> {
    match years {
        None => Ok(default),
        Some(y) if y <= 0 => Err(FiscalError::config(field, format!("depreciation duration must be positive, got {y}"))),
        Some(y) => u32::try_from(y).map_err(|_| FiscalError::config(field, format!("{y} years is out of range"))),
    }
}
