use super::screen::{Line, Screen, Tone};
use super::ui;
use crate::core::catalog::CurrencyCatalog;
use crate::core::convert::fetch_and_convert;
use crate::core::rates::RateProvider;
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

/// Runs a single conversion and renders the outcome, then returns.
///
/// A rendered conversion error is a completed run, not an application
/// failure; unknown currency codes on the command line are.
pub async fn run(
    catalog: &CurrencyCatalog,
    provider: &(dyn RateProvider + Send + Sync),
    amount: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let mut screen = Screen::new(catalog);
    if let Some(code) = from {
        screen.set_from(code)?;
    }
    if let Some(code) = to {
        screen.set_to(code)?;
    }

    info!("Converting {} {}", amount, screen.selection());

    let Some((token, request)) = screen.submit(amount) else {
        print_amount_marker(&screen.ui().amount);
        print_line(&screen.ui().result);
        return Ok(());
    };

    let pb = ui::new_spinner(&screen.ui().convert.label);
    let outcome = fetch_and_convert(provider, &request).await;
    pb.finish_and_clear();

    let as_of = outcome.as_ref().ok().and_then(|result| result.as_of);
    screen.finish(token, outcome);

    print_line(&screen.ui().status);
    print_line(&screen.ui().result);
    print_as_of(as_of);
    Ok(())
}

fn print_line(line: &Line) {
    if line.is_empty() {
        return;
    }
    match line.tone {
        Tone::Error => println!("{}", ui::style_text(&line.text, ui::StyleType::Error)),
        Tone::Normal => println!("{}", line.text),
    }
}

// The terminal equivalent of the amount field turning red.
fn print_amount_marker(line: &Line) {
    if line.tone == Tone::Error {
        let marker = format!("Amount: {}", line.text);
        println!("{}", ui::style_text(&marker, ui::StyleType::Error));
    }
}

fn print_as_of(as_of: Option<DateTime<Utc>>) {
    if let Some(at) = as_of {
        let note = format!("Rates as of {}", at.format("%Y-%m-%d %H:%M UTC"));
        println!("{}", ui::style_text(&note, ui::StyleType::Subtle));
    }
}
