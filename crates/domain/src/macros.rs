//! Macro for implementing Display and FromStr for string-keyed enums
//!
//! Used for enums that travel as lower-case strings on the wire or in
//! config (event types, week starts). Parsing is case-insensitive.
//!
//! # Example
//!
//! ```rust
//! use hrcal_domain::impl_domain_str_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Visibility {
//!     Public,
//!     Private,
//! }
//!
//! impl_domain_str_conversions!(Visibility {
//!     Public => "public",
//!     Private => "private",
//! });
//! ```

/// Implements Display and FromStr for an enum from a variant/string table.
///
/// `$str` must be lower-case; `FromStr` lower-cases its input before
/// matching and reports the enum name on failure.
#[macro_export]
macro_rules! impl_domain_str_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
