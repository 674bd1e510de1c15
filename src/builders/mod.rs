//! Builders for XOBIS values.
//!
//! Each builder accumulates pieces with `set_*`/`add_*` calls and produces
//! an immutable value with `build()`. Calls that the target element cannot
//! take fail immediately with [`XobisError::Structural`](crate::XobisError::Structural);
//! values outside a vocabulary fail with
//! [`XobisError::Invariant`](crate::XobisError::Invariant).
//!
//! # Examples
//!
//! ```
//! use xobis::builders::PrincipalElementBuilder;
//! use xobis::xobis::NameContent;
//! use xobis::ElementType;
//!
//! let mut builder = PrincipalElementBuilder::new(ElementType::Being)?;
//! builder.set_type("human")?.set_class("individual")?;
//! builder
//!     .entry_mut()
//!     .add_name(NameContent::new("Smith"), Some("surname"))?
//!     .add_name(NameContent::new("John"), Some("given"))?;
//! let element = builder.build()?;
//! assert_eq!(element.element_type(), ElementType::Being);
//! # Ok::<(), xobis::XobisError>(())
//! ```

pub mod entry;
pub mod holdings;
pub mod principal;
pub mod record;
pub mod reference;
pub mod relationship;
pub mod time;
pub mod variant;

pub use entry::{EntryBuilder, NameItem};
pub use holdings::HoldingsBuilder;
pub use principal::PrincipalElementBuilder;
pub use record::RecordBuilder;
pub use reference::{build_ref_from_field, build_simple_ref};
pub use relationship::RelationshipBuilder;
pub use time::{DurationRefBuilder, TimeRefBuilder};
pub use variant::VariantBuilder;
