use super::error::FiscalError;
use super::money::MAX_AMOUNT;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tax parameters used by the engine (2024-2025 values by default).
///
/// Every field may be overridden from a JSON file; missing fields keep
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FiscalParameters {
    /// Receipts ceiling for the micro-BIC regime
    #[schemars(with = "f64")]
    pub micro_bic_threshold: Decimal,
    /// Flat allowance applied to receipts under micro-BIC
    #[schemars(with = "f64")]
    pub micro_bic_allowance: Decimal,
    /// Minimum CFE contribution
    #[schemars(with = "f64")]
    pub cfe_minimum: Decimal,
    /// Receipts bands (inclusive upper bounds) and the multiple of the
    /// minimum charged within each band
    #[schemars(with = "Vec<(f64, f64)>")]
    pub cfe_bands: Vec<(Decimal, Decimal)>,
    /// Multiple of the minimum charged above the last band
    #[schemars(with = "f64")]
    pub cfe_top_multiplier: Decimal,
    /// Share of receipts charged above the last band, when higher than
    /// the top multiple
    #[schemars(with = "f64")]
    pub cfe_rate: Decimal,
    /// Maximum distance of land + building shares from 1 (exclusive)
    #[schemars(with = "f64")]
    pub split_tolerance: Decimal,
    /// Day count denominator for first-year pro-rata
    pub pro_rata_days: u32,
    pub default_building_years: u32,
    pub default_fee_years: u32,
    #[schemars(with = "f64")]
    pub default_land_share: Decimal,
    #[schemars(with = "f64")]
    pub default_building_share: Decimal,
}

impl Default for FiscalParameters {
    fn default() -> Self {
        FiscalParameters {
            micro_bic_threshold: dec!(77700),
            micro_bic_allowance: dec!(0.50),
            cfe_minimum: dec!(227),
            cfe_bands: vec![
                (dec!(5000), dec!(1)),
                (dec!(10000), dec!(1.5)),
                (dec!(32600), dec!(2)),
            ],
            cfe_top_multiplier: dec!(3),
            cfe_rate: dec!(0.002),
            split_tolerance: dec!(0.01),
            pro_rata_days: 365,
            default_building_years: 25,
            default_fee_years: 15,
            default_land_share: dec!(0.20),
            default_building_share: dec!(0.80),
        }
    }
}

impl FiscalParameters {
    pub fn from_json(json: &str) -> Result<Self, FiscalError> {
        let params: FiscalParameters = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), FiscalError> {
        let non_negative = [
            ("micro_bic_threshold", self.micro_bic_threshold),
            ("cfe_minimum", self.cfe_minimum),
            ("cfe_top_multiplier", self.cfe_top_multiplier),
            ("split_tolerance", self.split_tolerance),
        ];
        for (field, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(FiscalError::config(field, "must not be negative"));
            }
            if value > MAX_AMOUNT {
                return Err(FiscalError::config(field, "out of range"));
            }
        }
        for (field, value) in [
            ("micro_bic_allowance", self.micro_bic_allowance),
            ("cfe_rate", self.cfe_rate),
            ("default_land_share", self.default_land_share),
            ("default_building_share", self.default_building_share),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(FiscalError::config(field, "must be between 0 and 1"));
            }
        }
        if (self.default_land_share + self.default_building_share - Decimal::ONE).abs()
            >= self.split_tolerance
        {
            return Err(FiscalError::config(
                "default_building_share",
                "default land and building shares must sum to 1",
            ));
        }
        for (field, value) in [
            ("pro_rata_days", self.pro_rata_days),
            ("default_building_years", self.default_building_years),
            ("default_fee_years", self.default_fee_years),
        ] {
            if value == 0 {
                return Err(FiscalError::config(field, "must be positive"));
            }
        }
        let mut previous = Decimal::MIN;
        for (bound, multiplier) in &self.cfe_bands {
            if *bound <= previous {
                return Err(FiscalError::config("cfe_bands", "bounds must be strictly increasing"));
            }
            if *multiplier < Decimal::ZERO {
                return Err(FiscalError::config("cfe_bands", "multipliers must not be negative"));
            }
            if *multiplier > MAX_AMOUNT {
                return Err(FiscalError::config("cfe_bands", "multipliers out of range"));
            }
            previous = *bound;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = FiscalParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.micro_bic_threshold, dec!(77700));
        assert_eq!(params.micro_bic_allowance, dec!(0.50));
        assert_eq!(params.pro_rata_days, 365);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params = FiscalParameters::from_json(r#"{ "micro_bic_threshold": "83600" }"#).unwrap();
        assert_eq!(params.micro_bic_threshold, dec!(83600));
        assert_eq!(params.cfe_minimum, dec!(227));
    }

    #[test]
    fn zero_pro_rata_days_rejected() {
        let err = FiscalParameters::from_json(r#"{ "pro_rata_days": 0 }"#).unwrap_err();
        assert_eq!(err.field(), Some("pro_rata_days"));
    }

    #[test]
    fn allowance_above_one_rejected() {
        let err = FiscalParameters::from_json(r#"{ "micro_bic_allowance": 1.5 }"#).unwrap_err();
        assert_eq!(err.field(), Some("micro_bic_allowance"));
    }

    #[test]
    fn unordered_cfe_bands_rejected() {
        let err =
            FiscalParameters::from_json(r#"{ "cfe_bands": [[10000, 1], [5000, 2]] }"#).unwrap_err();
        assert_eq!(err.field(), Some("cfe_bands"));
    }

    #[test]
    fn out_of_range_values_rejected() {
        let err = FiscalParameters::from_json(r#"{ "cfe_minimum": "100000000000000000000" }"#).unwrap_err();
        assert_eq!(err.field(), Some("cfe_minimum"));
        let err = FiscalParameters::from_json(r#"{ "cfe_rate": 2 }"#).unwrap_err();
        assert_eq!(err.field(), Some("cfe_rate"));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            FiscalParameters::from_json("{ nope"),
            Err(FiscalError::MalformedDocument(_))
        ));
    }
}
