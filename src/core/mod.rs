pub mod advice;
pub mod aggregate;
pub mod cfe;
pub mod declaration;
pub mod depreciation;
pub mod engine;
pub mod entities;
pub mod error;
pub mod input;
pub mod money;
pub mod params;
pub mod regime;
pub mod result;
pub mod split;

// Flat public surface for domain types and functions.
pub use advice::{Advice, AdviceBasis};
pub use declaration::{Declaration, DeclarationSummary, DeclarationTotals, PropertyEntry};
pub use depreciation::{pro_rata_factor, DepreciationSchedule};
pub use engine::FiscalEngine;
pub use entities::{validate_split, Expenses, Income, Loan, Property};
pub use error::{ErrorKind, FiscalError};
pub use input::{
    declaration_from_value, read_declaration_csv, read_declaration_json, to_value, CsvColumn,
    DeclarationInput, EntryInput, PropertyInput, PropertyRecord,
};
pub use params::FiscalParameters;
pub use regime::{Regime, RegimeComparison};
pub use result::FiscalResult;
pub use split::{Region, SplitSuggestion};
