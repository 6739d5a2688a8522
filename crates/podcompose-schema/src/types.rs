//! Validated newtypes for the restricted string forms used by appc manifests.
//!
//! All newtypes serialize/deserialize as plain strings; deserialization runs the
//! same validation as the `parse` constructors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// The only content identifier algorithm the runtime accepts.
pub const IMAGE_ID_ALGORITHM: &str = "sha512";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("invalid name '{0}': expected lowercase alphanumerics separated by single '-'")]
    InvalidName(String),
    #[error("invalid identifier '{0}': expected lowercase alphanumerics separated by one of '-._~/'")]
    InvalidIdentifier(String),
    #[error("invalid image id '{value}': {reason}")]
    InvalidImageId { value: String, reason: String },
}

macro_rules! validated_newtype {
    ($(#[$meta:meta])* $name:ident, $validate:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap the given string.
            pub fn parse(s: impl Into<String>) -> Result<Self, IdentifierError> {
                let s = s.into();
                $validate(&s)?;
                Ok(Self(s))
            }

            /// Return the inner string as a slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the inner `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(s)
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.0
            }
        }
    };
}

validated_newtype!(
    /// Restricted name used for apps and volumes (appc `ACName`), e.g. `web-server`.
    AcName,
    validate_name
);

validated_newtype!(
    /// Restricted image identifier (appc `ACIdentifier`), e.g. `quay.io/example/app`.
    AcIdentifier,
    validate_identifier
);

validated_newtype!(
    /// Content-addressed image identifier of the form `sha512-<hex>`.
    ImageId,
    validate_image_id
);

impl AcIdentifier {
    /// Wrap a compile-time constant known to be valid.
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(validate_identifier(s).is_ok());
        Self(s.to_owned())
    }
}

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Lowercase alphanumeric runs separated by exactly one separator character.
fn is_separated_alnum(s: &str, separators: &[char]) -> bool {
    let mut prev_sep = true;
    for c in s.chars() {
        if is_lower_alnum(c) {
            prev_sep = false;
        } else if separators.contains(&c) {
            if prev_sep {
                return false;
            }
            prev_sep = true;
        } else {
            return false;
        }
    }
    !prev_sep
}

fn validate_name(s: &str) -> Result<(), IdentifierError> {
    if is_separated_alnum(s, &['-']) {
        Ok(())
    } else {
        Err(IdentifierError::InvalidName(s.to_owned()))
    }
}

fn validate_identifier(s: &str) -> Result<(), IdentifierError> {
    if is_separated_alnum(s, &['-', '.', '_', '~', '/']) {
        Ok(())
    } else {
        Err(IdentifierError::InvalidIdentifier(s.to_owned()))
    }
}

fn validate_image_id(s: &str) -> Result<(), IdentifierError> {
    let invalid = |reason: &str| IdentifierError::InvalidImageId {
        value: s.to_owned(),
        reason: reason.to_owned(),
    };
    let parts: Vec<&str> = s.split('-').collect();
    let [algorithm, value] = parts.as_slice() else {
        return Err(invalid("expected '<algorithm>-<value>'"));
    };
    if algorithm.is_empty() {
        return Err(invalid("empty hash algorithm"));
    }
    if *algorithm != IMAGE_ID_ALGORITHM {
        return Err(invalid(&format!("unsupported hash algorithm '{algorithm}'")));
    }
    if value.is_empty() {
        return Err(invalid("empty hash value"));
    }
    Ok(())
}
