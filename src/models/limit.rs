use std::num::NonZeroUsize;
use thiserror::Error;

/// Default number of entries kept in history
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Reasons a history size limit typed by the user is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("history size is empty")]
    Empty,
    #[error("history size '{0}' is not a number")]
    NotANumber(String),
    #[error("history size must be at least 1, got {0}")]
    NotPositive(i64),
}

/// Parse a history size limit from raw user input
///
/// Surrounding whitespace is ignored. Zero and negative values are
/// reported as `NotPositive` rather than `NotANumber`.
pub fn parse_max_size(input: &str) -> Result<NonZeroUsize, LimitError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LimitError::Empty);
    }

    if let Ok(value) = trimmed.parse::<usize>() {
        return NonZeroUsize::new(value).ok_or(LimitError::NotPositive(0));
    }

    match trimmed.parse::<i64>() {
        Ok(value) => Err(LimitError::NotPositive(value)),
        Err(_) => Err(LimitError::NotANumber(trimmed.to_string())),
    }
}

/// Default limit as a `NonZeroUsize`
pub fn default_max_size() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_MAX_HISTORY).unwrap_or(NonZeroUsize::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_limits() {
        assert_eq!(parse_max_size("5").unwrap().get(), 5);
        assert_eq!(parse_max_size("  42 \n").unwrap().get(), 42);
        assert_eq!(parse_max_size("1").unwrap().get(), 1);
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert_eq!(parse_max_size("0"), Err(LimitError::NotPositive(0)));
        assert_eq!(parse_max_size("-3"), Err(LimitError::NotPositive(-3)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_max_size(""), Err(LimitError::Empty));
        assert_eq!(parse_max_size("   "), Err(LimitError::Empty));
        assert_eq!(
            parse_max_size("ten"),
            Err(LimitError::NotANumber("ten".to_string()))
        );
        assert!(matches!(parse_max_size("2.5"), Err(LimitError::NotANumber(_))));
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(default_max_size().get(), DEFAULT_MAX_HISTORY);
    }
}
