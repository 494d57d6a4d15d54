//! Fiscal calculations for French LMNP (furnished rental) activity:
//! depreciation with first-year pro-rata, deductible charges, micro-BIC
//! versus real regime, CFE estimate and advice.
//!
//! ```
//! use lmnpc::core::FiscalEngine;
//! use rust_decimal_macros::dec;
//!
//! let engine = FiscalEngine::default();
//! let cmp = engine.compare_regimes(dec!(24000), dec!(8000)).unwrap();
//! assert_eq!(cmp.estimated_saving, dec!(4000));
//! ```

pub mod cmd;
pub mod core;
