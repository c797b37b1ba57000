//! `zinken check` — compose a check from a character sheet, then roll or seek.

use std::fs;
use std::path::Path;

use colored::Colorize;
use zinken_dice::{SeekResolution, Seeker};
use zinken_sheet::{Advantage, CharacterSheet, CheckKind, CheckRequest, plan_check};

pub fn run(
    sheet_path: &Path,
    kind: CheckKind,
    name: &str,
    advantage: Advantage,
    modifier: i64,
    target: Option<i64>,
    seed: Option<u64>,
) -> Result<(), String> {
    let text = fs::read_to_string(sheet_path)
        .map_err(|e| format!("cannot read {}: {e}", sheet_path.display()))?;
    let sheet: CharacterSheet =
        serde_json::from_str(&text).map_err(|e| format!("invalid character sheet: {e}"))?;

    let request = CheckRequest {
        kind,
        name: name.to_string(),
        advantage,
        modifier,
        target,
    };
    let plan = plan_check(&sheet, &request).map_err(|e| e.to_string())?;

    println!("  {}  {}", sheet.name.bold(), plan.label);
    println!("  {}", plan.formula.to_string().dimmed());

    let mut rng = super::make_rng(seed);
    match target {
        None => {
            let outcome = plan
                .formula
                .evaluate(&plan.bindings, &mut rng)
                .map_err(|e| e.to_string())?;
            super::print_outcome(&outcome);
        }
        Some(target) => {
            let report = Seeker::new()
                .seek(&plan.formula, &plan.bindings, Some(target), &mut rng)
                .map_err(|e| e.to_string())?;
            match report.resolution {
                SeekResolution::Matched => {
                    println!(
                        "  {}",
                        format!("landed on {target} after {} attempt(s)", report.attempts).green()
                    );
                }
                SeekResolution::TargetUnreachable => {
                    println!(
                        "  {} target {target} is out of reach for this check; rolled honestly",
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
                // A seek with a target never maximizes
                SeekResolution::Maximized => {}
            }
            super::print_outcome(&report.outcome);
        }
    }
    Ok(())
}
