//! Exact outcome distributions for formulas.
//!
//! The total of a formula is a sum of independent terms, so its probability
//! mass function is the convolution of the per-term distributions.
//! Keep-highest/lowest groups use the order-statistic CDF: the chance the
//! kept-highest of `n` dice is at most `v` is `(v/s)^n`.

use std::collections::BTreeMap;

use crate::eval::EvalError;
use crate::formula::{Bindings, DiceTerm, Formula, Keep, TermKind};

/// Exact probability of each achievable total.
///
/// The map's keys are exactly the integers in `[minimum, maximum]` that the
/// formula can produce, and the values sum to 1.
pub fn distribution(
    formula: &Formula,
    bindings: &Bindings,
) -> Result<BTreeMap<i64, f64>, EvalError> {
    let mut dist = BTreeMap::from([(0i64, 1.0f64)]);

    for term in formula.terms() {
        let factor = term.sign.factor();
        match &term.kind {
            TermKind::Constant(n) => dist = shifted(&dist, factor * n),
            TermKind::Variable(name) => {
                let value = bindings
                    .get(name)
                    .ok_or_else(|| EvalError::UnboundVariable(name.clone()))?;
                dist = shifted(&dist, factor * value);
            }
            TermKind::Dice(group) => dist = convolved(&dist, &group_pmf(group), factor),
        }
    }

    Ok(dist)
}

/// Probability that one honest evaluation totals exactly `target`.
pub fn chance_of(
    formula: &Formula,
    bindings: &Bindings,
    target: i64,
) -> Result<f64, EvalError> {
    Ok(distribution(formula, bindings)?
        .get(&target)
        .copied()
        .unwrap_or(0.0))
}

/// Expected number of attempts for a seek to land on a total with
/// per-attempt probability `chance`. `None` when the chance is zero.
pub fn expected_attempts(chance: f64) -> Option<f64> {
    if chance > 0.0 { Some(chance.recip()) } else { None }
}

/// Probability mass function of one dice group's kept total.
fn group_pmf(group: &DiceTerm) -> Vec<(i64, f64)> {
    let sides = i64::from(group.die.sides());
    let n = group.count;

    match group.keep {
        Keep::All => {
            let die: Vec<(i64, f64)> = (1..=sides)
                .map(|v| (v, 1.0 / sides as f64))
                .collect();
            let mut pmf = BTreeMap::from([(0i64, 1.0f64)]);
            for _ in 0..n {
                pmf = convolved(&pmf, &die, 1);
            }
            pmf.into_iter().collect()
        }
        Keep::Highest => (1..=sides)
            .map(|v| {
                let p = cdf_pow(v, sides, n) - cdf_pow(v - 1, sides, n);
                (v, p)
            })
            .collect(),
        Keep::Lowest => (1..=sides)
            .map(|v| {
                let p = cdf_pow(sides - v + 1, sides, n) - cdf_pow(sides - v, sides, n);
                (v, p)
            })
            .collect(),
    }
}

/// `(v / sides)^n`: the chance all `n` dice land at or below `v`.
fn cdf_pow(v: i64, sides: i64, n: u32) -> f64 {
    (v as f64 / sides as f64).powi(n as i32)
}

/// Convolve a distribution with a term pmf whose values are scaled by `factor`.
fn convolved(dist: &BTreeMap<i64, f64>, pmf: &[(i64, f64)], factor: i64) -> BTreeMap<i64, f64> {
    let mut out = BTreeMap::new();
    for (&total, &p) in dist {
        for &(value, q) in pmf {
            *out.entry(total + factor * value).or_insert(0.0) += p * q;
        }
    }
    out
}

/// Shift every total in a distribution by a constant.
fn shifted(dist: &BTreeMap<i64, f64>, delta: i64) -> BTreeMap<i64, f64> {
    dist.iter().map(|(&total, &p)| (total + delta, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn dist(text: &str, bindings: &Bindings) -> BTreeMap<i64, f64> {
        distribution(&Formula::parse(text).unwrap(), bindings).unwrap()
    }

    #[test]
    fn single_die_is_uniform() {
        let d = dist("1d6", &Bindings::new());
        assert_eq!(d.len(), 6);
        for v in 1..=6 {
            assert!((d[&v] - 1.0 / 6.0).abs() < EPS);
        }
    }

    #[test]
    fn distribution_sums_to_one() {
        for text in ["2d6 + 1", "2d20kh", "3d4kl - 2", "1d6 - 1d6"] {
            let d = dist(text, &Bindings::new());
            let sum: f64 = d.values().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{text}: sum {sum}");
        }
    }

    #[test]
    fn support_matches_min_max() {
        let formula = Formula::parse("2d6 + 1").unwrap();
        let bindings = Bindings::new();
        let d = distribution(&formula, &bindings).unwrap();
        assert_eq!(
            *d.keys().next().unwrap(),
            formula.minimum(&bindings).unwrap()
        );
        assert_eq!(
            *d.keys().next_back().unwrap(),
            formula.maximum(&bindings).unwrap()
        );
    }

    #[test]
    fn advantage_skews_high() {
        // Keep-highest of two d20s: P(20) = 1 - (19/20)^2 = 39/400
        let d = dist("2d20kh", &Bindings::new());
        assert!((d[&20] - 39.0 / 400.0).abs() < EPS);
        assert!((d[&1] - 1.0 / 400.0).abs() < EPS);
    }

    #[test]
    fn disadvantage_mirrors_advantage() {
        let d = dist("2d20kl", &Bindings::new());
        assert!((d[&1] - 39.0 / 400.0).abs() < EPS);
        assert!((d[&20] - 1.0 / 400.0).abs() < EPS);
    }

    #[test]
    fn variables_shift_the_support() {
        let bindings = Bindings::new().with("m", 10);
        let d = dist("1d4 + @m", &bindings);
        assert_eq!(
            d.keys().copied().collect::<Vec<_>>(),
            vec![11, 12, 13, 14]
        );
    }

    #[test]
    fn subtracted_die_is_symmetric_around_zero() {
        let d = dist("1d6 - 1d6", &Bindings::new());
        assert!((d[&0] - 6.0 / 36.0).abs() < EPS);
        assert!((d[&5] - 1.0 / 36.0).abs() < EPS);
        assert!((d[&-5] - 1.0 / 36.0).abs() < EPS);
    }

    #[test]
    fn two_dice_sum_triangle() {
        let d = dist("2d6", &Bindings::new());
        assert!((d[&7] - 6.0 / 36.0).abs() < EPS);
        assert!((d[&2] - 1.0 / 36.0).abs() < EPS);
        assert!((d[&12] - 1.0 / 36.0).abs() < EPS);
    }

    #[test]
    fn chance_of_unreachable_is_zero() {
        let formula = Formula::parse("1d20 + 5").unwrap();
        let bindings = Bindings::new();
        assert_eq!(chance_of(&formula, &bindings, 30).unwrap(), 0.0);
    }

    #[test]
    fn chance_of_unbound_variable_is_an_error() {
        let formula = Formula::parse("1d4 + @m").unwrap();
        assert!(chance_of(&formula, &Bindings::new(), 12).is_err());
    }

    #[test]
    fn expected_attempts_inverts_chance() {
        assert_eq!(expected_attempts(0.25), Some(4.0));
        assert_eq!(expected_attempts(0.0), None);
    }
}
