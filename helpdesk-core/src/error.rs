use thiserror::Error;

/// Rejections raised while turning caller-supplied text into core types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown recipient role: {0}")]
    UnknownRoleGroup(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown sender type: {0}")]
    UnknownSenderType(String),

    #[error("{0} is required")]
    Blank(&'static str),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Returns `Err(CoreError::Blank(field))` when `value` is empty or whitespace only.
pub fn require_non_blank(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Blank(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank() {
        assert!(require_non_blank("101", "Room number").is_ok());
        assert_eq!(
            require_non_blank("   ", "Room number"),
            Err(CoreError::Blank("Room number"))
        );
        assert_eq!(
            CoreError::Blank("Guest username").to_string(),
            "Guest username is required"
        );
    }
}
