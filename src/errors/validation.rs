use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::AppError;

/// Field name → messages map returned with 422 responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// `Ok(())` when nothing was recorded, the collected failures otherwise
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_messages_accumulate_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "The Title field is required.");
        errors.add("url", "The Url field is not a valid URL.");
        errors.add("title", "Title is too long.");

        assert_eq!(errors.fields()["title"].len(), 2);
        assert_eq!(
            errors.to_string(),
            "title: The Title field is required.; title: Title is too long.; url: The Url field is not a valid URL."
        );

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["url"][0], "The Url field is not a valid URL.");
    }
}
