use super::screen::{Line, Screen, Tone, UnknownCurrency};
use super::{list, ui};
use crate::core::catalog::CurrencyCatalog;
use crate::core::convert::fetch_and_convert;
use crate::core::rates::RateProvider;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// One line of session input, parsed.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand<'a> {
    Empty,
    Quit,
    Help,
    List,
    Swap,
    SetFrom(&'a str),
    SetTo(&'a str),
    SelectionUsage,
    Amount(&'a str),
}

fn parse_command(line: &str) -> SessionCommand<'_> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (None, ..) => SessionCommand::Empty,
        (Some("quit" | "exit"), None, _) => SessionCommand::Quit,
        (Some("help"), None, _) => SessionCommand::Help,
        (Some("list"), None, _) => SessionCommand::List,
        (Some("swap"), None, _) => SessionCommand::Swap,
        (Some("from"), Some(code), None) => SessionCommand::SetFrom(code),
        (Some("to"), Some(code), None) => SessionCommand::SetTo(code),
        (Some("from" | "to"), ..) => SessionCommand::SelectionUsage,
        _ => SessionCommand::Amount(line),
    }
}

/// The interactive converter session, the default command.
///
/// The prompt shows the selected pair; a number converts it, everything
/// else is a session command. Ends on `quit`, `exit` or EOF.
pub async fn run(
    catalog: &CurrencyCatalog,
    provider: &(dyn RateProvider + Send + Sync),
) -> Result<()> {
    println!(
        "{}",
        ui::style_text("xfx - currency converter", ui::StyleType::Title)
    );
    println!("Type an amount to convert it, or `help` for the commands.");

    let mut screen = Screen::new(catalog);
    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("{}> ", screen.selection());
        io::stdout().flush().context("Failed to flush the prompt")?;

        input.clear();
        let bytes = stdin
            .lock()
            .read_line(&mut input)
            .context("Failed to read session input")?;
        if bytes == 0 {
            println!();
            break;
        }

        match parse_command(&input) {
            SessionCommand::Empty => {}
            SessionCommand::Quit => break,
            SessionCommand::Help => print_help(),
            SessionCommand::List => list::run(catalog),
            SessionCommand::Swap => screen.swap(),
            SessionCommand::SetFrom(code) => match screen.set_from(code) {
                Ok(()) => print_selected("From", &screen.selection().from, catalog),
                Err(e) => print_unknown(&e),
            },
            SessionCommand::SetTo(code) => match screen.set_to(code) {
                Ok(()) => print_selected("To", &screen.selection().to, catalog),
                Err(e) => print_unknown(&e),
            },
            SessionCommand::SelectionUsage => println!("Usage: from CODE | to CODE"),
            SessionCommand::Amount(raw) => convert_amount(&mut screen, provider, raw).await,
        }
    }

    Ok(())
}

async fn convert_amount(
    screen: &mut Screen<'_>,
    provider: &(dyn RateProvider + Send + Sync),
    raw: &str,
) {
    let Some((token, request)) = screen.submit(raw) else {
        print_line(&screen.ui().result);
        return;
    };

    debug!(
        "Converting {} {} to {}",
        request.amount, request.from, request.to
    );
    let pb = ui::new_spinner(&screen.ui().convert.label);
    let outcome = fetch_and_convert(provider, &request).await;
    pb.finish_and_clear();

    let as_of = outcome.as_ref().ok().and_then(|result| result.as_of);
    if screen.finish(token, outcome) {
        print_line(&screen.ui().status);
        print_line(&screen.ui().result);
        print_as_of(as_of);
    }
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

fn print_as_of(as_of: Option<DateTime<Utc>>) {
    if let Some(at) = as_of {
        let note = format!("Rates as of {}", at.format("%Y-%m-%d %H:%M UTC"));
        println!("{}", ui::style_text(&note, ui::StyleType::Subtle));
    }
}

fn print_selected(side: &str, code: &str, catalog: &CurrencyCatalog) {
    if let Some(entry) = catalog.entry(code) {
        println!("{side}: {entry}");
    }
}

fn print_unknown(err: &UnknownCurrency) {
    println!(
        "{}",
        ui::style_text(&format!("Error: {err}"), ui::StyleType::Error)
    );
}

fn print_help() {
    println!("Commands:");
    println!("  AMOUNT      convert AMOUNT between the selected currencies");
    println!("  swap        exchange the selected currencies");
    println!("  from CODE   select the source currency");
    println!("  to CODE     select the target currency");
    println!("  list        show the supported currencies");
    println!("  help        show this message");
    println!("  quit        leave the session");
}
