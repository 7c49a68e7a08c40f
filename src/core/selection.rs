//! The from/to currency pair the user is converting between.

use crate::core::catalog::CurrencyCatalog;

pub const DEFAULT_FROM: &str = "USD";
pub const DEFAULT_TO: &str = "INR";

/// The two currently selected currency codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub from: String,
    pub to: String,
}

impl Selection {
    /// Initial selection: USD → INR when the catalog carries both, else
    /// the catalog's first entry on either side.
    pub fn defaults(catalog: &CurrencyCatalog) -> Self {
        let fallback = catalog.first_code().unwrap_or(DEFAULT_FROM);
        let from = catalog.resolve(DEFAULT_FROM).unwrap_or(fallback);
        let to = catalog.resolve(DEFAULT_TO).unwrap_or(fallback);
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Exchanges the two codes. No network effect.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}
