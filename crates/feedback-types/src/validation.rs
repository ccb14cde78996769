use thiserror::Error;

/// Rejected feedback input. Always user-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Feedback input that passed validation. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    name: String,
    message: String,
}

impl NewFeedback {
    pub fn parse(name: Option<&str>, message: Option<&str>) -> Result<Self, ValidationError> {
        let name = required("name", name)?;
        let message = required("message", message)?;
        Ok(Self { name, message })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::Empty { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_both_fields() {
        let new = NewFeedback::parse(Some("  Ada  "), Some("\tLove it\n")).unwrap();
        assert_eq!(new.name(), "Ada");
        assert_eq!(new.message(), "Love it");
    }

    #[test]
    fn rejects_missing_name() {
        assert_eq!(
            NewFeedback::parse(None, Some("hello")),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn rejects_whitespace_message() {
        assert_eq!(
            NewFeedback::parse(Some("Ada"), Some("   \n ")),
            Err(ValidationError::Empty { field: "message" })
        );
    }

    #[test]
    fn error_display() {
        let err = ValidationError::Empty { field: "name" };
        assert_eq!(err.to_string(), "name cannot be empty");
    }
}
