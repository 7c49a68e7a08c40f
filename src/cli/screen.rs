//! Converter screen state: validation, busy/error toggling, rendering text.

use crate::core::catalog::CurrencyCatalog;
use crate::core::convert::{ConversionFailure, ConversionRequest, ConversionResult, parse_amount};
use crate::core::selection::Selection;
use thiserror::Error;

pub const IDLE_LABEL: &str = "Convert";
pub const BUSY_LABEL: &str = "Fetching latest rates...";
pub const INVALID_AMOUNT_MESSAGE: &str = "Error: Only numeric values greater than 0 are allowed.";

/// How a piece of screen text should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Error,
}

/// A line of text plus its tone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn normal(text: impl Into<String>) -> Self {
        Line {
            text: text.into(),
            tone: Tone::Normal,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Line {
            text: text.into(),
            tone: Tone::Error,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The convert control: enabled flag plus current label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub enabled: bool,
    pub label: String,
}

/// Everything the terminal surface renders between interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Last submitted amount text; the error tone marks it invalid.
    pub amount: Line,
    pub convert: Control,
    pub status: Line,
    pub result: Line,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            amount: Line::default(),
            convert: Control {
                enabled: true,
                label: IDLE_LABEL.to_string(),
            },
            status: Line::default(),
            result: Line::default(),
        }
    }
}

/// Identifies one submission; outcomes for stale tokens are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A selection change named a code the catalog does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

/// The converter screen.
///
/// Owns the selected pair and the visible state, and steps through the
/// conversion cycle: validate a submission, go busy while the request
/// runs, render the outcome, return to idle. The screen never performs
/// I/O itself; drivers run the request and hand the outcome back with
/// the token from `submit`.
pub struct Screen<'a> {
    catalog: &'a CurrencyCatalog,
    selection: Selection,
    ui: UiState,
    generation: u64,
    in_flight: Option<RequestToken>,
}

impl<'a> Screen<'a> {
    pub fn new(catalog: &'a CurrencyCatalog) -> Self {
        Screen {
            catalog,
            selection: Selection::defaults(catalog),
            ui: UiState::default(),
            generation: 0,
            in_flight: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Exchanges the selected pair. No network effect.
    pub fn swap(&mut self) {
        self.selection.swap();
    }

    pub fn set_from(&mut self, code: &str) -> Result<(), UnknownCurrency> {
        self.selection.from = self.resolve(code)?;
        Ok(())
    }

    pub fn set_to(&mut self, code: &str) -> Result<(), UnknownCurrency> {
        self.selection.to = self.resolve(code)?;
        Ok(())
    }

    fn resolve(&self, code: &str) -> Result<String, UnknownCurrency> {
        self.catalog
            .resolve(code)
            .map(str::to_string)
            .ok_or_else(|| UnknownCurrency(code.trim().to_string()))
    }

    /// Validates a submitted amount.
    ///
    /// Rejections render the error locally and start no request; the
    /// convert control is left untouched. Acceptance captures the pair
    /// from the current selection, flips the screen into its busy state
    /// and hands back the request to run.
    pub fn submit(&mut self, raw: &str) -> Option<(RequestToken, ConversionRequest)> {
        self.ui.amount = Line::normal(raw.trim());
        match parse_amount(raw) {
            Err(_) => {
                self.ui.amount.tone = Tone::Error;
                self.ui.result = Line::error(INVALID_AMOUNT_MESSAGE);
                None
            }
            Ok(amount) => {
                self.ui.result.tone = Tone::Normal;
                self.generation += 1;
                let token = RequestToken(self.generation);
                self.in_flight = Some(token);
                self.ui.convert = Control {
                    enabled: false,
                    label: BUSY_LABEL.to_string(),
                };
                Some((
                    token,
                    ConversionRequest {
                        amount,
                        from: self.selection.from.clone(),
                        to: self.selection.to.clone(),
                    },
                ))
            }
        }
    }

    /// Applies the outcome of a submitted request.
    ///
    /// Returns false and leaves the screen untouched when the token is
    /// stale, i.e. a newer submission has started since. The convert
    /// control is re-enabled on every applied outcome, success or not.
    pub fn finish(
        &mut self,
        token: RequestToken,
        outcome: Result<ConversionResult, ConversionFailure>,
    ) -> bool {
        if self.in_flight != Some(token) {
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                self.ui.status = Line::normal(format!(
                    "1 {} = {:.2} {}",
                    result.from, result.per_unit_rate, result.to
                ));
                self.ui.result = Line::normal(format!(
                    "{} {} = {:.2} {}",
                    result.amount, result.from, result.converted_amount, result.to
                ));
            }
            Err(failure) => {
                self.ui.result = Line::error(format!("Error: {failure}"));
            }
        }

        self.ui.convert = Control {
            enabled: true,
            label: IDLE_LABEL.to_string(),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::convert::{ConvertError, convert};
    use crate::core::rates::{RateError, RateTable};

    fn usd_inr_table() -> RateTable {
        [("USD".to_string(), 1.0), ("INR".to_string(), 83.0)]
            .into_iter()
            .collect()
    }

    fn run_pipeline(
        table: &RateTable,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConversionFailure> {
        convert(table, request).map_err(ConversionFailure::from)
    }

    #[test]
    fn test_new_screen_defaults() {
        let catalog = CurrencyCatalog::bundled();
        let screen = Screen::new(&catalog);

        assert_eq!(screen.selection().from, "USD");
        assert_eq!(screen.selection().to, "INR");
        assert!(screen.ui().convert.enabled);
        assert_eq!(screen.ui().convert.label, IDLE_LABEL);
        assert!(screen.ui().status.is_empty());
        assert!(screen.ui().result.is_empty());
    }

    #[test]
    fn test_submit_rejects_non_numeric_without_request() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        assert!(screen.submit("abc").is_none());
        assert_eq!(screen.ui().result.text, INVALID_AMOUNT_MESSAGE);
        assert_eq!(screen.ui().result.tone, Tone::Error);
        assert_eq!(screen.ui().amount.tone, Tone::Error);
        // Validation failures never touch the convert control.
        assert!(screen.ui().convert.enabled);
        assert_eq!(screen.ui().convert.label, IDLE_LABEL);
    }

    #[test]
    fn test_submit_rejects_negative_amount() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        assert!(screen.submit("-5").is_none());
        assert_eq!(screen.ui().result.text, INVALID_AMOUNT_MESSAGE);
    }

    #[test]
    fn test_submit_rejects_amount_below_one() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        assert!(screen.submit("0.5").is_none());
        assert_eq!(screen.ui().result.text, INVALID_AMOUNT_MESSAGE);
    }

    #[test]
    fn test_submit_goes_busy_and_captures_the_pair() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (_, request) = screen.submit("10").expect("valid amount");
        assert_eq!(request.amount, 10.0);
        assert_eq!(request.from, "USD");
        assert_eq!(request.to, "INR");
        assert!(!screen.ui().convert.enabled);
        assert_eq!(screen.ui().convert.label, BUSY_LABEL);
    }

    #[test]
    fn test_finish_success_renders_both_lines() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (token, request) = screen.submit("10").expect("valid amount");
        let outcome = run_pipeline(&usd_inr_table(), &request);
        assert!(screen.finish(token, outcome));

        assert_eq!(screen.ui().status.text, "1 USD = 83.00 INR");
        assert_eq!(screen.ui().result.text, "10 USD = 830.00 INR");
        assert_eq!(screen.ui().result.tone, Tone::Normal);
        assert!(screen.ui().convert.enabled);
        assert_eq!(screen.ui().convert.label, IDLE_LABEL);
    }

    #[test]
    fn test_finish_http_error_reenables_the_control() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (token, _) = screen.submit("10").expect("valid amount");
        let outcome = Err(ConversionFailure::Rates(RateError::Http {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }));
        assert!(screen.finish(token, outcome));

        assert_eq!(
            screen.ui().result.text,
            "Error: HTTP error: 500 Internal Server Error"
        );
        assert_eq!(screen.ui().result.tone, Tone::Error);
        assert!(screen.ui().convert.enabled);
    }

    #[test]
    fn test_finish_missing_code_renders_no_nan() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (token, _) = screen.submit("10").expect("valid amount");
        let outcome = Err(ConversionFailure::Convert(ConvertError::RateNotFound(
            "XYZ".to_string(),
        )));
        assert!(screen.finish(token, outcome));

        assert_eq!(screen.ui().result.text, "Error: no exchange rate for XYZ");
        assert!(!screen.ui().result.text.contains("NaN"));
        assert!(screen.ui().convert.enabled);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (first, request_a) = screen.submit("10").expect("valid amount");
        let (second, request_b) = screen.submit("20").expect("valid amount");

        // The outcome for the superseded request must not render.
        assert!(!screen.finish(first, run_pipeline(&usd_inr_table(), &request_a)));
        assert!(!screen.ui().convert.enabled);
        assert!(screen.ui().result.is_empty());

        assert!(screen.finish(second, run_pipeline(&usd_inr_table(), &request_b)));
        assert_eq!(screen.ui().result.text, "20 USD = 1660.00 INR");
    }

    #[test]
    fn test_finish_twice_is_a_noop() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (token, request) = screen.submit("10").expect("valid amount");
        assert!(screen.finish(token, run_pipeline(&usd_inr_table(), &request)));

        let before = screen.ui().clone();
        assert!(!screen.finish(token, run_pipeline(&usd_inr_table(), &request)));
        assert_eq!(screen.ui(), &before);
    }

    #[test]
    fn test_swap_while_fetching_keeps_the_submitted_pair() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (token, request) = screen.submit("10").expect("valid amount");
        screen.swap();

        assert!(screen.finish(token, run_pipeline(&usd_inr_table(), &request)));
        assert_eq!(screen.ui().result.text, "10 USD = 830.00 INR");
        assert_eq!(screen.selection().from, "INR");
    }

    #[test]
    fn test_invalid_submit_while_fetching_leaves_request_current() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        let (token, request) = screen.submit("10").expect("valid amount");
        assert!(screen.submit("abc").is_none());

        assert!(screen.finish(token, run_pipeline(&usd_inr_table(), &request)));
        assert_eq!(screen.ui().result.text, "10 USD = 830.00 INR");
    }

    #[test]
    fn test_set_from_and_to_validate_against_catalog() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);

        screen.set_from("eur").expect("EUR is in the catalog");
        assert_eq!(screen.selection().from, "EUR");

        let err = screen.set_to("ZZZ").unwrap_err();
        assert_eq!(err, UnknownCurrency("ZZZ".to_string()));
        assert_eq!(screen.selection().to, "INR");
    }

    #[test]
    fn test_swap_twice_restores_selection() {
        let catalog = CurrencyCatalog::bundled();
        let mut screen = Screen::new(&catalog);
        let original = screen.selection().clone();

        screen.swap();
        screen.swap();
        assert_eq!(screen.selection(), &original);
    }
}
