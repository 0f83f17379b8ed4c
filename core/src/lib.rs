//! Type-erased named attribute values and ordered attribute lists.
//!
//! A [`TypedValue`] pairs an interned name with a [`TypeDesc`] and a payload
//! of raw component bytes. Small payloads live inline; large ones are owned
//! heap blocks or borrowed caller data. An [`AttributeList`] keeps values in
//! insertion order and layers name lookup, replacement, merging and sorting
//! on top.
//!
//! ```
//! use paramval_core::{AttributeList, TYPE_FLOAT, TypedValue};
//!
//! let mut list = AttributeList::new();
//! list.add_or_replace(TypedValue::parse("gain", TYPE_FLOAT, "1.5"), true);
//! assert_eq!(list.get_float("gain", 0.0, true, false), 1.5);
//! assert_eq!(list.get_int("gain", 0, true, true), 1);
//! ```

pub mod attributes;
pub mod convert;
pub mod error;
mod format;
pub mod half;
pub mod options;
pub mod parse;
pub mod payload;
pub mod scalar;
pub mod ustring;
pub mod values;

pub use attributes::AttributeList;
pub use convert::convert_type;
pub use error::ValueError;
pub use half::Half;
pub use options::FormatOptions;
pub use paramval_types::*;
pub use payload::{INLINE_CAPACITY, PayloadKind};
pub use scalar::{Number, Ptr, Scalar};
pub use ustring::UString;
pub use values::{Interp, TypedValue};
