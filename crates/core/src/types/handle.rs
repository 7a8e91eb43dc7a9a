//! URL handle type for products and collections.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Handle`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input string is empty.
    #[error("handle cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that is not allowed in a handle.
    #[error("handle contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A Shopify URL handle (slug), e.g. `blue-widget`.
///
/// Handles are interpolated into Storefront search query strings
/// (`handle:<value> AND (...)`), so anything that could change the meaning of
/// such a query is rejected.
///
/// ## Constraints
///
/// - Length: 1-255 characters
/// - Only alphanumeric characters, `-`, `_` and `.`
///
/// ## Examples
///
/// ```
/// use b2b_headless_core::Handle;
///
/// assert!(Handle::parse("blue-widget").is_ok());
/// assert!(Handle::parse("case_12.5kg").is_ok());
///
/// assert!(Handle::parse("").is_err());
/// assert!(Handle::parse("a OR tag:retail").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Maximum length of a handle.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `Handle` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 255 characters, or
    /// contains anything other than alphanumerics, `-`, `_` and `.`.
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        if s.is_empty() {
            return Err(HandleError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(HandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(HandleError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Handle` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Title-cases the handle's hyphen-separated words.
    ///
    /// `blue-widget` becomes `Blue Widget`.
    #[must_use]
    pub fn to_title(&self) -> String {
        self.0
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Handle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_handles() {
        assert!(Handle::parse("blue-widget").is_ok());
        assert!(Handle::parse("widget").is_ok());
        assert!(Handle::parse("pallet_48x40").is_ok());
        assert!(Handle::parse("case-12.5kg").is_ok());
        assert!(Handle::parse("café-crème").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Handle::parse(""), Err(HandleError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(256);
        assert!(matches!(
            Handle::parse(&long),
            Err(HandleError::TooLong { .. })
        ));
        assert!(Handle::parse(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_parse_rejects_query_syntax() {
        assert_eq!(
            Handle::parse("a OR tag:retail"),
            Err(HandleError::InvalidCharacter(' '))
        );
        assert_eq!(
            Handle::parse("widget)"),
            Err(HandleError::InvalidCharacter(')'))
        );
        assert_eq!(
            Handle::parse("tag:B2B"),
            Err(HandleError::InvalidCharacter(':'))
        );
        assert_eq!(
            Handle::parse("a/b"),
            Err(HandleError::InvalidCharacter('/'))
        );
    }

    #[test]
    fn test_to_title() {
        let handle = Handle::parse("blue-widget").unwrap();
        assert_eq!(handle.to_title(), "Blue Widget");

        let handle = Handle::parse("single").unwrap();
        assert_eq!(handle.to_title(), "Single");

        let handle = Handle::parse("double--dash").unwrap();
        assert_eq!(handle.to_title(), "Double  Dash");
    }

    #[test]
    fn test_display() {
        let handle = Handle::parse("blue-widget").unwrap();
        assert_eq!(format!("{handle}"), "blue-widget");
    }

    #[test]
    fn test_serde_transparent() {
        let handle = Handle::parse("blue-widget").unwrap();
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, "\"blue-widget\"");
    }

    #[test]
    fn test_from_str() {
        let handle: Handle = "blue-widget".parse().unwrap();
        assert_eq!(handle.as_str(), "blue-widget");
    }
}
