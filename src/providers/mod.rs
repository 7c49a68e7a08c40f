pub mod exchange_rate_api;

pub use exchange_rate_api::ExchangeRateApi;
