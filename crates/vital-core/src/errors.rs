//! Cross-cutting error types for Salud Vital.
//!
//! Validation failures are never a single message: every constraint check
//! accumulates into a [`FieldErrors`] map so a form can show each field its
//! own problems. Storage and HTTP errors are defined in their own crates.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not match any recognized value of an enum field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' no es una opción válida")]
pub struct InvalidChoice {
    pub value: String,
}

/// Ordered mapping of field name → error messages.
///
/// Serializes as `{"campo": ["mensaje", ...]}`, the shape both the JSON API
/// (400 body) and the HTML form redisplay consume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one error message against a field. Fields accumulate.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Single-field constructor, for uniqueness and reference errors raised
    /// outside the validation pass.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages recorded against `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when empty, `Err(self)` otherwise. Validation passes end with
    /// this.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field has a recorded message.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}
