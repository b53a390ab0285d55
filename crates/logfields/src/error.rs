use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Structurally unusable input (too short, wrong field count, wrong delimiters)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Timestamp text does not match the fixed access-log format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Address or numeric field does not match its decimal format
    #[error("Format error: {0}")]
    Format(String),
}

impl FieldError {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldError::InvalidInput(_) => "invalid_input",
            FieldError::Parse(_) => "parse",
            FieldError::Format(_) => "format",
        }
    }
}

pub type FieldResult<T> = Result<T, FieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(FieldError::InvalidInput("x".into()).kind(), "invalid_input");
        assert_eq!(FieldError::Parse("x".into()).kind(), "parse");
        assert_eq!(FieldError::Format("x".into()).kind(), "format");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = FieldError::Format("octet 300 out of range".into());
        assert_eq!(err.to_string(), "Format error: octet 300 out of range");
    }
}
