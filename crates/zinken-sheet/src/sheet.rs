//! Character sheets: ability scores, proficiencies, and attack entries.
//!
//! Sheets are data-driven — ability, skill, and attack names are plain
//! strings looked up case-insensitively, so any d20-family system works
//! without code changes. Sheets deserialize from JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SheetError, SheetResult};

/// How trained a character is in a skill or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Training {
    /// No proficiency bonus.
    #[default]
    Untrained,
    /// Full proficiency bonus.
    Proficient,
    /// Double proficiency bonus.
    Expertise,
}

impl Training {
    /// The bonus this training level grants for a given proficiency bonus.
    pub fn bonus(self, proficiency: i64) -> i64 {
        match self {
            Self::Untrained => 0,
            Self::Proficient => proficiency,
            Self::Expertise => proficiency * 2,
        }
    }
}

/// A skill entry: which ability it keys off and how trained it is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Name of the governing ability (e.g. "dexterity").
    pub ability: String,
    /// Training level.
    #[serde(default)]
    pub training: Training,
}

/// An attack entry: ability, proficiency, and any flat bonus (magic weapons,
/// fighting styles).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackEntry {
    /// Name of the governing ability (e.g. "strength").
    pub ability: String,
    /// Whether the proficiency bonus applies.
    #[serde(default = "default_true")]
    pub proficient: bool,
    /// Flat bonus added on top.
    #[serde(default)]
    pub bonus: i64,
}

fn default_true() -> bool {
    true
}

/// A character's mechanical state, read-only to the roller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    /// Character name.
    pub name: String,
    /// Proficiency bonus.
    pub proficiency_bonus: i64,
    /// Ability scores (e.g. "strength": 16).
    pub abilities: HashMap<String, i64>,
    /// Skill entries keyed by skill name.
    #[serde(default)]
    pub skills: HashMap<String, SkillEntry>,
    /// Abilities whose saving throws are proficient.
    #[serde(default)]
    pub saves: Vec<String>,
    /// Attack entries keyed by attack name.
    #[serde(default)]
    pub attacks: HashMap<String, AttackEntry>,
}

impl CharacterSheet {
    /// Look up an ability score, case-insensitively.
    pub fn ability_score(&self, name: &str) -> SheetResult<i64> {
        self.abilities
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, &score)| score)
            .ok_or_else(|| SheetError::UnknownAbility(name.to_string()))
    }

    /// The modifier for an ability: `(score - 10) / 2`, rounded down.
    ///
    /// Floor division, so a score of 7 gives -2.
    pub fn ability_modifier(&self, name: &str) -> SheetResult<i64> {
        Ok((self.ability_score(name)? - 10).div_euclid(2))
    }

    /// Training level for a saving throw on the given ability.
    pub fn save_training(&self, ability: &str) -> Training {
        if self
            .saves
            .iter()
            .any(|s| s.eq_ignore_ascii_case(ability))
        {
            Training::Proficient
        } else {
            Training::Untrained
        }
    }

    /// Look up a skill entry, case-insensitively.
    pub fn skill(&self, name: &str) -> SheetResult<&SkillEntry> {
        self.skills
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, entry)| entry)
            .ok_or_else(|| SheetError::UnknownSkill(name.to_string()))
    }

    /// Look up an attack entry, case-insensitively.
    pub fn attack(&self, name: &str) -> SheetResult<&AttackEntry> {
        self.attacks
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, entry)| entry)
            .ok_or_else(|| SheetError::UnknownAttack(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_sheet() -> CharacterSheet {
        serde_json::from_str(
            r#"{
                "name": "Kael",
                "proficiency_bonus": 3,
                "abilities": {
                    "strength": 16,
                    "dexterity": 14,
                    "constitution": 13,
                    "intelligence": 10,
                    "wisdom": 8,
                    "charisma": 7
                },
                "skills": {
                    "stealth": { "ability": "dexterity", "training": "proficient" },
                    "athletics": { "ability": "strength", "training": "expertise" },
                    "arcana": { "ability": "intelligence" }
                },
                "saves": ["dexterity", "constitution"],
                "attacks": {
                    "longsword": { "ability": "strength", "bonus": 1 },
                    "improvised": { "ability": "strength", "proficient": false }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn ability_modifiers_floor() {
        let sheet = test_sheet();
        assert_eq!(sheet.ability_modifier("strength").unwrap(), 3);
        assert_eq!(sheet.ability_modifier("dexterity").unwrap(), 2);
        assert_eq!(sheet.ability_modifier("constitution").unwrap(), 1);
        assert_eq!(sheet.ability_modifier("intelligence").unwrap(), 0);
        assert_eq!(sheet.ability_modifier("wisdom").unwrap(), -1);
        // 7 floors to -2, not -1
        assert_eq!(sheet.ability_modifier("charisma").unwrap(), -2);
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let sheet = test_sheet();
        assert_eq!(sheet.ability_score("Strength").unwrap(), 16);
        assert!(sheet.skill("Stealth").is_ok());
        assert!(sheet.attack("LONGSWORD").is_ok());
    }

    #[test]
    fn unknown_names_are_errors() {
        let sheet = test_sheet();
        assert!(matches!(
            sheet.ability_score("luck"),
            Err(SheetError::UnknownAbility(_))
        ));
        assert!(matches!(
            sheet.skill("basket weaving"),
            Err(SheetError::UnknownSkill(_))
        ));
        assert!(matches!(
            sheet.attack("trebuchet"),
            Err(SheetError::UnknownAttack(_))
        ));
    }

    #[test]
    fn save_training_from_list() {
        let sheet = test_sheet();
        assert_eq!(sheet.save_training("dexterity"), Training::Proficient);
        assert_eq!(sheet.save_training("Constitution"), Training::Proficient);
        assert_eq!(sheet.save_training("wisdom"), Training::Untrained);
    }

    #[test]
    fn training_bonus_scales() {
        assert_eq!(Training::Untrained.bonus(3), 0);
        assert_eq!(Training::Proficient.bonus(3), 3);
        assert_eq!(Training::Expertise.bonus(3), 6);
    }

    #[test]
    fn serde_defaults() {
        let sheet = test_sheet();
        // Missing training defaults to untrained
        assert_eq!(sheet.skill("arcana").unwrap().training, Training::Untrained);
        // Missing proficient defaults to true, missing bonus to 0
        let longsword = sheet.attack("longsword").unwrap();
        assert!(longsword.proficient);
        assert_eq!(longsword.bonus, 1);
        let improvised = sheet.attack("improvised").unwrap();
        assert!(!improvised.proficient);
        assert_eq!(improvised.bonus, 0);
    }

    #[test]
    fn minimal_sheet_parses() {
        let sheet: CharacterSheet = serde_json::from_str(
            r#"{ "name": "Mook", "proficiency_bonus": 2, "abilities": { "strength": 10 } }"#,
        )
        .unwrap();
        assert!(sheet.skills.is_empty());
        assert!(sheet.saves.is_empty());
        assert!(sheet.attacks.is_empty());
    }
}
