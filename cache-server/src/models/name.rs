//! Record name validation
//!
//! Names are free text; the only rule is that they are not empty.

use super::ValidationError;

/// Validated, non-empty record name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordName(String);

impl RecordName {
    /// Create a new name, rejecting the empty string.
    ///
    /// Whitespace is kept as-is: `" "` is a valid name.
    ///
    /// # Example
    /// ```
    /// use cache_server::models::RecordName;
    ///
    /// assert!(RecordName::new("Warehouse A").is_ok());
    /// assert!(RecordName::new("").is_err());
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        Ok(Self(s))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_non_empty_text() {
        assert!(RecordName::new("Box").is_ok());
        assert!(RecordName::new("Shelf #3 (top)").is_ok());
        assert!(RecordName::new(" ").is_ok());
        assert!(RecordName::new("Ñandú").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = RecordName::new("").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn into_string_returns_original() {
        let name = RecordName::new("Garage").unwrap();
        assert_eq!(name.as_str(), "Garage");
        assert_eq!(name.into_string(), "Garage");
    }
}
