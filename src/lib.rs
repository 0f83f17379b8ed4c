//! Paramval - typed, named attribute values for metadata-heavy pipelines
//!
//! # Overview
//!
//! Paramval stores arbitrary metadata (scalars, vectors, matrices, arrays,
//! strings) as named, type-erased values and keeps them in ordered lists.
//! Common uses include:
//!
//! - Image and scene file headers
//! - Renderer and plugin options
//! - Per-primitive geometry attributes
//!
//! # Quick Start
//!
//! ```
//! use paramval::{AttributeList, TypedValue, TYPE_COLOR, TYPE_INT};
//!
//! let mut header = AttributeList::new();
//! header.add_or_replace(TypedValue::string("compression", "zip"), true);
//! header.add_or_replace(TypedValue::parse("tint", TYPE_COLOR, "1 0.5 0.25"), true);
//! header.add_or_replace(TypedValue::parse("oiio:BitsPerSample", TYPE_INT, "16"), true);
//!
//! assert_eq!(header.get_string("Compression", "none", false, false), "zip");
//! assert_eq!(header.get_int("oiio:BitsPerSample", 8, true, false), 16);
//!
//! let tint = header.find("tint", TYPE_COLOR, true).unwrap();
//! assert_eq!(tint.get_string(0), "1, 0.5, 0.25");
//! ```
//!
//! # Storage
//!
//! Values of up to [`INLINE_CAPACITY`] bytes never allocate. Larger values
//! either own a heap block or borrow the caller's bytes for the value's
//! lifetime (see [`TypedValue::borrowed`]).

// Re-export public API from paramval_core
pub use paramval_core::{
    AttributeList, FormatOptions, INLINE_CAPACITY, Interp, PayloadKind, TypedValue, ValueError,
    convert_type,
};

// Re-export scalar kinds and interned strings
pub use paramval_core::{Half, Ptr, Scalar, UString};

// Re-export type descriptors
pub use paramval_types::*;
