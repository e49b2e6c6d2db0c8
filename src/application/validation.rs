use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppResult, ValidationErrors};

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,4}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)$",
    )
    .expect("URL pattern is valid")
});

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("key pattern is valid"));

/// Accumulates failures so every broken field is reported at once
#[derive(Debug, Default)]
pub struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors
                .add(field, format!("The {} field is required.", display_name(field)));
        }
        self
    }

    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        if value.chars().count() > max {
            self.errors.add(
                field,
                format!(
                    "The field {} must be a string with a maximum length of {}.",
                    display_name(field),
                    max
                ),
            );
        }
        self
    }

    pub fn url(mut self, field: &str, value: &str) -> Self {
        if !value.is_empty() && !URL_PATTERN.is_match(value) {
            self.errors.add(
                field,
                format!("The {} field is not a valid URL.", display_name(field)),
            );
        }
        self
    }

    pub fn key(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            if !KEY_PATTERN.is_match(value) {
                self.errors.add(
                    field,
                    format!(
                        "The {} field may only contain letters, digits, '-' and '_'.",
                        display_name(field)
                    ),
                );
            }
        }
        self
    }

    pub fn non_negative(mut self, field: &str, value: i32) -> Self {
        if value < 0 {
            self.errors.add(
                field,
                format!("The field {} must not be negative.", display_name(field)),
            );
        }
        self
    }

    pub fn tags(mut self, field: &str, tags: &[String], max: usize) -> Self {
        if tags.iter().any(|tag| tag.trim().is_empty()) {
            self.errors.add(field, "Tags must not be empty.");
        }
        if tags.iter().any(|tag| tag.chars().count() > max) {
            self.errors
                .add(field, format!("Tags must not exceed {} characters.", max));
        }
        self
    }

    pub fn finish(self) -> AppResult<()> {
        self.errors.into_result()
    }
}

/// `relatedThemeIds` → `RelatedThemeIds`
fn display_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
