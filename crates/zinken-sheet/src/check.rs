//! Check composition: from a request plus a sheet to a rollable plan.
//!
//! A [`CheckRequest`] is a plain synchronous value object — whatever UI the
//! host embeds produces one, and the roller never sees the UI. The composed
//! formula references `@mod` and `@prof` variables with the sheet-derived
//! values carried in the bindings, so variable substitution is exercised on
//! every check.

use serde::{Deserialize, Serialize};

use zinken_dice::{Bindings, Die, Formula, Keep};

use crate::error::SheetResult;
use crate::sheet::{CharacterSheet, Training};

/// The four roll workflows a check can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Raw ability check.
    Ability,
    /// Saving throw.
    Save,
    /// Skill check.
    Skill,
    /// Attack roll.
    Attack,
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ability => write!(f, "ability check"),
            Self::Save => write!(f, "saving throw"),
            Self::Skill => write!(f, "skill check"),
            Self::Attack => write!(f, "attack roll"),
        }
    }
}

/// Roll two d20s and keep the higher, the lower, or roll just one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advantage {
    /// A single d20.
    #[default]
    None,
    /// Two d20s, keep the highest.
    Advantage,
    /// Two d20s, keep the lowest.
    Disadvantage,
}

impl Advantage {
    /// The d20 group this advantage state rolls.
    fn d20_group(self) -> (u32, Keep) {
        match self {
            Self::None => (1, Keep::All),
            Self::Advantage => (2, Keep::Highest),
            Self::Disadvantage => (2, Keep::Lowest),
        }
    }
}

/// A request to roll one check. Produced by the caller's UI; consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Which workflow this check belongs to.
    pub kind: CheckKind,
    /// The ability, skill, or attack name being tested.
    pub name: String,
    /// Advantage state.
    #[serde(default)]
    pub advantage: Advantage,
    /// Situational modifier folded in as a constant.
    #[serde(default)]
    pub modifier: i64,
    /// Desired total, if the roll should be steered.
    #[serde(default)]
    pub target: Option<i64>,
}

/// A composed check, ready for the dice crate to roll or seek.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollPlan {
    /// The formula to evaluate, referencing `@mod` and `@prof`.
    pub formula: Formula,
    /// Values for the formula's variables.
    pub bindings: Bindings,
    /// Human-readable description, e.g. `Stealth (skill check) with advantage`.
    pub label: String,
}

/// Compose a check request against a sheet into a formula and bindings.
pub fn plan_check(sheet: &CharacterSheet, request: &CheckRequest) -> SheetResult<RollPlan> {
    let (modifier, proficiency) = match request.kind {
        CheckKind::Ability => (sheet.ability_modifier(&request.name)?, 0),
        CheckKind::Save => (
            sheet.ability_modifier(&request.name)?,
            sheet
                .save_training(&request.name)
                .bonus(sheet.proficiency_bonus),
        ),
        CheckKind::Skill => {
            let entry = sheet.skill(&request.name)?;
            (
                sheet.ability_modifier(&entry.ability)?,
                entry.training.bonus(sheet.proficiency_bonus),
            )
        }
        CheckKind::Attack => {
            let entry = sheet.attack(&request.name)?;
            let training = if entry.proficient {
                Training::Proficient
            } else {
                Training::Untrained
            };
            (
                sheet.ability_modifier(&entry.ability)? + entry.bonus,
                training.bonus(sheet.proficiency_bonus),
            )
        }
    };

    let (count, keep) = request.advantage.d20_group();
    let mut formula = Formula::dice(count, Die::D20, keep)
        .plus_variable("mod")
        .plus_variable("prof");
    if request.modifier > 0 {
        formula = formula.plus_constant(request.modifier);
    } else if request.modifier < 0 {
        formula = formula.minus_constant(-request.modifier);
    }

    let bindings = Bindings::new()
        .with("mod", modifier)
        .with("prof", proficiency);

    let label = match request.advantage {
        Advantage::None => format!("{} ({})", request.name, request.kind),
        Advantage::Advantage => {
            format!("{} ({}) with advantage", request.name, request.kind)
        }
        Advantage::Disadvantage => {
            format!("{} ({}) with disadvantage", request.name, request.kind)
        }
    };

    Ok(RollPlan {
        formula,
        bindings,
        label,
    })
}
