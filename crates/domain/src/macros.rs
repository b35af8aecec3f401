//! Macro for implementing identifier conversions on closed enums
//!
//! Cleanup actions and the other closed vocabularies of the domain travel
//! across the boundary as plain strings. This macro generates `as_str`,
//! `Display` and `FromStr` from a single variant/identifier table so the
//! three can never drift apart.
//!
//! Parsing is exact: identifiers are whitelisted values, so `"Revisions"` is
//! not accepted where `"revisions"` is.
//!
//! # Example
//!
//! ```rust
//! use dbsweep_domain::impl_identifier_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Moderation {
//!     Spam,
//!     Trash,
//! }
//!
//! impl_identifier_conversions!(Moderation {
//!     Spam => "spam",
//!     Trash => "trash",
//! });
//!
//! assert_eq!(Moderation::Spam.as_str(), "spam");
//! assert_eq!("trash".parse::<Moderation>(), Ok(Moderation::Trash));
//! assert!("TRASH".parse::<Moderation>().is_err());
//! ```

/// Implements `as_str`, `Display` and `FromStr` for identifier enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their identifiers
#[macro_export]
macro_rules! impl_identifier_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Stable identifier of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestKind {
        Revisions,
        AutoDrafts,
    }

    impl_identifier_conversions!(TestKind {
        Revisions => "revisions",
        AutoDrafts => "auto_drafts",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestKind::Revisions.to_string(), "revisions");
        assert_eq!(TestKind::AutoDrafts.to_string(), "auto_drafts");
    }

    #[test]
    fn test_fromstr_exact() {
        assert_eq!(TestKind::from_str("revisions").unwrap(), TestKind::Revisions);
        assert_eq!(TestKind::from_str("auto_drafts").unwrap(), TestKind::AutoDrafts);
    }

    #[test]
    fn test_fromstr_is_case_sensitive() {
        assert!(TestKind::from_str("REVISIONS").is_err());
        assert!(TestKind::from_str(" revisions").is_err());
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestKind::from_str("drop_all_tables");
        assert!(result.unwrap_err().contains("Invalid TestKind: drop_all_tables"));
    }
}
