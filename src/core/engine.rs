use super::error::FiscalError;
use super::params::FiscalParameters;

/// Entry point for every fiscal calculation.
///
/// The engine only holds its parameters; all operations take `&self` and
/// build fresh results, so one engine can be shared freely across threads.
/// Operations live next to their domain in the sibling modules
/// (`depreciation`, `aggregate`, `result`, `regime`, `cfe`, `split`,
/// `advice`, `declaration`).
#[derive(Debug, Clone, Default)]
pub struct FiscalEngine {
    params: FiscalParameters,
}

impl FiscalEngine {
    pub fn new(params: FiscalParameters) -> Result<Self, FiscalError> {
        params.validate()?;
        Ok(FiscalEngine { params })
    }

    pub fn params(&self) -> &FiscalParameters {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_invalid_parameters() {
        let params = FiscalParameters {
            default_fee_years: 0,
            ..Default::default()
        };
        assert!(FiscalEngine::new(params).is_err());
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FiscalEngine>();
        assert_eq!(FiscalEngine::default().params().micro_bic_threshold, dec!(77700));
    }
}
