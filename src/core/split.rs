use super::engine::FiscalEngine;
use super::entities::validate_split;
use super::error::FiscalError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Broad location bucket used to guess the land share of a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Paris and the inner ring (75, 92, 93, 94)
    ParisInnerRing,
    /// Riviera and Provence (06, 83, 13)
    Riviera,
    /// Rural departments (01, 02, 03)
    Rural,
    Standard,
}

impl Region {
    pub fn from_postal_code(postal_code: &str) -> Region {
        let code = postal_code.trim();
        let starts = |prefixes: &[&str]| prefixes.iter().any(|p| code.starts_with(p));
        if starts(&["75", "92", "93", "94"]) {
            Region::ParisInnerRing
        } else if starts(&["06", "83", "13"]) {
            Region::Riviera
        } else if starts(&["01", "02", "03"]) {
            Region::Rural
        } else {
            Region::Standard
        }
    }

    /// (land, building) shares for the region.
    pub fn shares(&self) -> (Decimal, Decimal) {
        match self {
            Region::ParisInnerRing => (dec!(0.15), dec!(0.85)),
            Region::Riviera => (dec!(0.25), dec!(0.75)),
            Region::Rural => (dec!(0.30), dec!(0.70)),
            Region::Standard => (dec!(0.20), dec!(0.80)),
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Region::ParisInnerRing => "Paris & inner ring",
            Region::Riviera => "Riviera / PACA",
            Region::Rural => "Rural",
            Region::Standard => "Standard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSuggestion {
    pub postal_code: String,
    pub region: Region,
    pub land_share: Decimal,
    pub building_share: Decimal,
}

impl FiscalEngine {
    pub fn suggest_split(&self, postal_code: &str) -> SplitSuggestion {
        let region = Region::from_postal_code(postal_code);
        let (land_share, building_share) = region.shares();
        SplitSuggestion {
            postal_code: postal_code.trim().to_string(),
            region,
            land_share,
            building_share,
        }
    }

    pub fn validate_split(&self, land_share: Decimal, building_share: Decimal) -> Result<(), FiscalError> {
        validate_split(land_share, building_share, self.params().split_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets() {
        let engine = FiscalEngine::default();
        let cases = [
            ("75001", Region::ParisInnerRing, dec!(0.15)),
            ("92100", Region::ParisInnerRing, dec!(0.15)),
            ("06000", Region::Riviera, dec!(0.25)),
            ("13008", Region::Riviera, dec!(0.25)),
            ("03200", Region::Rural, dec!(0.30)),
            ("69003", Region::Standard, dec!(0.20)),
            ("", Region::Standard, dec!(0.20)),
            (" 94300 ", Region::ParisInnerRing, dec!(0.15)),
        ];
        for (code, region, land) in cases {
            let s = engine.suggest_split(code);
            assert_eq!(s.region, region, "{code}");
            assert_eq!(s.land_share, land, "{code}");
            assert_eq!(s.land_share + s.building_share, Decimal::ONE);
        }
    }

    #[test]
    fn every_suggestion_is_a_valid_split() {
        let engine = FiscalEngine::default();
        for region in [Region::ParisInnerRing, Region::Riviera, Region::Rural, Region::Standard] {
            let (land, building) = region.shares();
            assert!(engine.validate_split(land, building).is_ok());
        }
    }
}
