//! `zinken odds` — the exact outcome distribution of a formula.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use zinken_dice::odds::{distribution, expected_attempts};

pub fn run(formula_text: &str, target: Option<i64>, binding_args: &[String]) -> Result<(), String> {
    let formula = super::parse_formula(formula_text)?;
    let bindings = super::parse_bindings(binding_args)?;
    let dist = distribution(&formula, &bindings).map_err(|e| e.to_string())?;

    println!("  {} {formula}", "Odds for".bold());

    let peak = dist.values().copied().fold(0.0f64, f64::max);
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Total", "Chance", ""]);
    for (&total, &p) in &dist {
        let bar_len = if peak > 0.0 {
            (p / peak * 30.0).round() as usize
        } else {
            0
        };
        let label = if target == Some(total) {
            format!("{total} <-")
        } else {
            total.to_string()
        };
        table.add_row(vec![
            label,
            format!("{:6.2}%", p * 100.0),
            "#".repeat(bar_len),
        ]);
    }
    println!("{table}");

    if let Some(target) = target {
        let chance = dist.get(&target).copied().unwrap_or(0.0);
        match expected_attempts(chance) {
            Some(expected) => println!(
                "  target {target}: {:.2}% per roll, about {expected:.0} seek attempts expected",
                chance * 100.0
            ),
            None => println!(
                "  {} target {target} is unreachable; a seek would roll honestly instead",
                "WARN".yellow().bold()
            ),
        }
    }
    Ok(())
}
