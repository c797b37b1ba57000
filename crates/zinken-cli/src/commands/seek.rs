//! `zinken seek` — re-roll a formula until it lands on the target.

use colored::Colorize;
use zinken_dice::odds::{chance_of, expected_attempts};
use zinken_dice::{SeekResolution, Seeker};

pub fn run(
    formula_text: &str,
    target: Option<i64>,
    binding_args: &[String],
    max_attempts: u32,
    seed: Option<u64>,
) -> Result<(), String> {
    let formula = super::parse_formula(formula_text)?;
    let bindings = super::parse_bindings(binding_args)?;
    let mut rng = super::make_rng(seed);

    let report = Seeker::new()
        .with_max_attempts(max_attempts)
        .seek(&formula, &bindings, target, &mut rng)
        .map_err(|e| e.to_string())?;

    println!("  {} {formula}", "Seeking".bold());
    match report.resolution {
        SeekResolution::Matched => {
            let target = target.expect("a matched seek has a target");
            println!(
                "  {}",
                format!("landed on {target} after {} attempt(s)", report.attempts).green()
            );
            let chance = chance_of(&formula, &bindings, target).map_err(|e| e.to_string())?;
            if let Some(expected) = expected_attempts(chance) {
                println!(
                    "  {}",
                    format!(
                        "per-roll chance {:.2}%, about {expected:.0} attempts expected",
                        chance * 100.0
                    )
                    .dimmed()
                );
            }
        }
        SeekResolution::Maximized => {
            println!(
                "  {}",
                "no target given; showing the best possible roll".dimmed()
            );
        }
        SeekResolution::TargetUnreachable => {
            let target = target.expect("an unreachable seek has a target");
            let min = formula.minimum(&bindings).map_err(|e| e.to_string())?;
            let max = formula.maximum(&bindings).map_err(|e| e.to_string())?;
            println!(
                "  {} target {target} is outside the achievable range {min}..={max}; rolled honestly",
                "WARN".yellow().bold()
            );
        }
        SeekResolution::AttemptsExhausted => {
            println!(
                "  {} gave up after {} attempts; showing the last honest roll",
                "WARN".yellow().bold(),
                report.attempts
            );
        }
    }
    super::print_outcome(&report.outcome);
    Ok(())
}
