//! Macros for code generation in XOBIS value types.
//!
//! XOBIS attributes are closed vocabularies (`type`, `class`, `usage`, ...).
//! Each one is a plain enum with a fixed XML spelling; this module generates
//! the boilerplate shared by all of them.

/// Define a closed attribute vocabulary.
///
/// Generates an enum with:
/// - `as_str()` - the literal XML spelling
/// - `parse()` - the inverse, failing with [`XobisError::Invariant`](crate::XobisError::Invariant)
/// - `ALL` - every member in declaration order
/// - `Display`
///
/// # Example
///
/// ```ignore
/// xobis_vocabulary! {
///     /// Type of a Language.
///     LanguageType, "language type" {
///         Natural => "natural",
///         Constructed => "constructed",
///     }
/// }
/// ```
#[macro_export]
macro_rules! xobis_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* #[doc = $text] $variant ),+
        }

        impl $name {
            /// Every member of the vocabulary in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The literal attribute value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Parse the literal attribute value.
            ///
            /// # Errors
            ///
            /// Returns [`XobisError::Invariant`](crate::XobisError::Invariant)
            /// if `value` is not in the vocabulary.
            pub fn parse(value: &str) -> $crate::Result<Self> {
                match value {
                    $( $text => Ok($name::$variant), )+
                    other => Err($crate::XobisError::Invariant(format!(
                        "{} must be one of {:?}, got {:?}",
                        $label,
                        [$($text),+],
                        other
                    ))),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
