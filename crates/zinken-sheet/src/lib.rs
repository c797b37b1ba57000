//! Character sheets and check composition.
//!
//! A [`CharacterSheet`] is a read-only data provider for ability modifiers,
//! proficiency, and attack bonuses. [`plan_check`] turns a sheet plus a
//! [`CheckRequest`] into a concrete formula and bindings ready for the
//! dice crate to roll or seek.

pub mod check;
pub mod error;
pub mod sheet;

pub use check::{Advantage, CheckKind, CheckRequest, RollPlan, plan_check};
pub use error::{SheetError, SheetResult};
pub use sheet::{AttackEntry, CharacterSheet, SkillEntry, Training};
