//! Core business logic abstractions

pub mod catalog;
pub mod config;
pub mod convert;
pub mod log;
pub mod rates;
pub mod selection;

// Re-export main types for cleaner imports
pub use catalog::{CurrencyCatalog, CurrencyEntry};
pub use convert::{
    AmountError, ConversionFailure, ConversionRequest, ConversionResult, ConvertError, convert,
    fetch_and_convert, parse_amount,
};
pub use rates::{BASE_CURRENCY, RateError, RateProvider, RateTable};
pub use selection::Selection;
