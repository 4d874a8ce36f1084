//! String classification for pseudonym categories

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email shape: a non-`@` run, an `@`, then a domain containing a `.`
pub const DEFAULT_EMAIL_PATTERN: &str = r"[^@]+@[^@]+\.[^@]+";

/// Phone shape: optional `+`, then 8+ digits/spaces/hyphens/parentheses
/// starting and ending with a digit
pub const DEFAULT_PHONE_PATTERN: &str = r"\+?\d[\d\s\-()]{6,}\d";

/// Pseudonym category; each has its own counter and token prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PseudonymCategory {
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// Web URLs
    Url,
    /// Anything else
    Text,
}

impl PseudonymCategory {
    /// All categories in classification priority order
    pub const ALL: [PseudonymCategory; 4] = [Self::Email, Self::Phone, Self::Url, Self::Text];

    /// Token prefix for the category
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for PseudonymCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Priority-ordered string classifier
///
/// Patterns match from the start of the string only; trailing content after
/// the matched shape does not prevent a match.
#[derive(Debug, Clone)]
pub struct StringClassifier {
    email: Regex,
    phone: Regex,
}

impl StringClassifier {
    /// Create a classifier with the built-in email and phone shapes
    pub fn new() -> Result<Self> {
        Self::with_patterns(DEFAULT_EMAIL_PATTERN, DEFAULT_PHONE_PATTERN)
    }

    /// Create a classifier with custom email and phone shapes
    pub fn with_patterns(email: &str, phone: &str) -> Result<Self> {
        Ok(Self {
            email: anchored(email).context("Invalid email pattern")?,
            phone: anchored(phone).context("Invalid phone pattern")?,
        })
    }

    /// Classify a string; first match wins
    pub fn classify(&self, value: &str) -> PseudonymCategory {
        if self.email.is_match(value) {
            PseudonymCategory::Email
        } else if self.phone.is_match(value) {
            PseudonymCategory::Phone
        } else if value.starts_with("http") {
            PseudonymCategory::Url
        } else {
            PseudonymCategory::Text
        }
    }
}

fn anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})"))
        .with_context(|| format!("Failed to compile pattern: {pattern}"))
}
