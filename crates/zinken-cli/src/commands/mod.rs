//! Subcommand implementations and shared output helpers.

pub mod check;
pub mod odds;
pub mod roll;
pub mod seek;

use ariadne::{Color, Label, Report, ReportKind, Source};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use zinken_dice::{Bindings, DieMark, Formula, RollOutcome};

/// Parse formula text, rendering any error against the source.
pub(crate) fn parse_formula(text: &str) -> Result<Formula, String> {
    Formula::parse(text).map_err(|err| {
        let mut output = Vec::new();
        Report::build(ReportKind::Error, ("formula", err.span.clone()))
            .with_message(&err.message)
            .with_label(
                Label::new(("formula", err.span.clone()))
                    .with_message(&err.message)
                    .with_color(Color::Red),
            )
            .finish()
            .write(("formula", Source::from(text)), &mut output)
            .ok();
        let rendered = String::from_utf8(output).unwrap_or_default();
        format!("invalid formula `{text}`\n{rendered}")
    })
}

/// Parse `name=value` binding arguments.
pub(crate) fn parse_bindings(args: &[String]) -> Result<Bindings, String> {
    let mut bindings = Bindings::new();
    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("binding `{arg}` is not in name=value form"))?;
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| format!("binding `{arg}` has a non-integer value"))?;
        bindings.insert(name.trim(), value);
    }
    Ok(bindings)
}

/// Seeded RNG when requested, OS entropy otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Print an outcome: per-die breakdown (if any dice) plus the total.
pub(crate) fn print_outcome(outcome: &RollOutcome) {
    if !outcome.dice.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Die", "Value", "Kept", ""]);
        for roll in &outcome.dice {
            let mark = match roll.mark {
                DieMark::Crit => "crit".green().bold().to_string(),
                DieMark::Fumble => "fumble".red().bold().to_string(),
                DieMark::None => String::new(),
            };
            table.add_row(vec![
                roll.die.to_string(),
                roll.value.to_string(),
                if roll.kept {
                    "yes".to_string()
                } else {
                    "no".dimmed().to_string()
                },
                mark,
            ]);
        }
        println!("{table}");
    }

    let total = if outcome.is_critical() {
        outcome.total.to_string().green().bold()
    } else if outcome.is_fumble() {
        outcome.total.to_string().red().bold()
    } else {
        outcome.total.to_string().bold()
    };
    println!("  {} {total}", "Total".bold());
}
