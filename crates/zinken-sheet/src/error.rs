//! Error types for sheet lookups and check composition.

/// Errors that can occur while composing a check from a sheet.
///
/// These are configuration errors: they surface to the caller and are never
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// An ability referenced in a check does not exist on the sheet.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// A skill referenced in a check does not exist on the sheet.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// An attack referenced in a check does not exist on the sheet.
    #[error("unknown attack: {0}")]
    UnknownAttack(String),
}

/// Convenience result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;
