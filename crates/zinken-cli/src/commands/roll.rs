//! `zinken roll` — one honest evaluation.

use colored::Colorize;

pub fn run(formula_text: &str, binding_args: &[String], seed: Option<u64>) -> Result<(), String> {
    let formula = super::parse_formula(formula_text)?;
    let bindings = super::parse_bindings(binding_args)?;
    let mut rng = super::make_rng(seed);

    let outcome = formula
        .evaluate(&bindings, &mut rng)
        .map_err(|e| e.to_string())?;

    println!("  {} {formula}", "Rolling".bold());
    super::print_outcome(&outcome);
    Ok(())
}
