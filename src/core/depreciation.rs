use super::engine::FiscalEngine;
use super::entities::Property;
use super::error::FiscalError;
use super::money::round_cents;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

/// Straight-line depreciation of one property for one year.
///
/// Every amount is rounded to cents; the totals are the sums of the rounded
/// components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepreciationSchedule {
    pub property_id: String,
    pub year: i32,
    /// Whether `year` is the enrollment year (pro-rated amounts apply)
    pub first_year: bool,
    /// Days from enrollment through 31 December, inclusive (0 outside the
    /// enrollment year)
    pub elapsed_days: i64,
    /// Pro-rata factor, rounded to 6 places for display only
    pub pro_rata_factor: Decimal,
    pub building_annual: Decimal,
    pub building_pro_rata: Decimal,
    pub notary_annual: Decimal,
    pub notary_pro_rata: Decimal,
    pub agency_annual: Decimal,
    pub agency_pro_rata: Decimal,
    pub total_annual: Decimal,
    pub total_pro_rata: Decimal,
}

impl DepreciationSchedule {
    /// Amount deducted from the year's result.
    pub fn deductible(&self) -> Decimal {
        if self.first_year {
            self.total_pro_rata
        } else {
            self.total_annual
        }
    }
}

/// First-year pro-rata: days from `enrollment` through 31 December
/// inclusive, over a fixed `denominator` (365, even in leap years), capped
/// at 1. Any other year is a full year.
pub fn pro_rata_factor(
    enrollment: NaiveDate,
    year: i32,
    denominator: u32,
) -> Result<(i64, Decimal), FiscalError> {
    if denominator == 0 {
        return Err(FiscalError::config("pro_rata_days", "must be positive"));
    }
    if year != enrollment.year() {
        return Ok((0, Decimal::ONE));
    }
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| FiscalError::input("year", format!("{year} is out of range")))?;
    let days = (year_end - enrollment).num_days() + 1;
    let factor = (Decimal::from(days) / Decimal::from(denominator)).min(Decimal::ONE);
    Ok((days, factor))
}

fn annual(base: Decimal, years: u32, field: &str) -> Result<Decimal, FiscalError> {
    if years == 0 {
        return Err(FiscalError::config(field, "depreciation duration must be positive"));
    }
    Ok(base / Decimal::from(years))
}

impl FiscalEngine {
    pub fn depreciation(&self, property: &Property, year: i32) -> Result<DepreciationSchedule, FiscalError> {
        property.validate(self.params().split_tolerance)?;

        let enrollment_year = property.enrollment_date.year();
        if year < enrollment_year {
            log::warn!(
                "Property {}: year {} precedes enrollment year {}, using a full year",
                property.id,
                year,
                enrollment_year
            );
        }

        let (elapsed_days, factor) =
            pro_rata_factor(property.enrollment_date, year, self.params().pro_rata_days)?;

        let building_base = property.acquisition_price * property.building_share;
        let building = annual(building_base, property.building_years, "building_years")?;
        let notary = annual(property.notary_fees, property.fee_years, "fee_years")?;
        let agency = annual(property.agency_fees, property.fee_years, "fee_years")?;

        log::debug!(
            "Property {} {}: building base={}, annual building={}, notary={}, agency={}, factor={}",
            property.id,
            year,
            building_base,
            building,
            notary,
            agency,
            factor
        );

        let building_annual = round_cents(building);
        let notary_annual = round_cents(notary);
        let agency_annual = round_cents(agency);
        let building_pro_rata = round_cents(building * factor);
        let notary_pro_rata = round_cents(notary * factor);
        let agency_pro_rata = round_cents(agency * factor);

        Ok(DepreciationSchedule {
            property_id: property.id.clone(),
            year,
            first_year: year == enrollment_year,
            elapsed_days,
            pro_rata_factor: factor.round_dp(6),
            building_annual,
            building_pro_rata,
            notary_annual,
            notary_pro_rata,
            agency_annual,
            agency_pro_rata,
            total_annual: building_annual + notary_annual + agency_annual,
            total_pro_rata: building_pro_rata + notary_pro_rata + agency_pro_rata,
        })
    }
}
