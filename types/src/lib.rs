//! Type descriptors for paramval attribute values.
//!
//! This crate describes the layout of a value (scalar kind, aggregate arity,
//! interpretation hint, array length) without holding any data itself.
//!
//! # Example
//!
//! ```
//! use paramval_types::{TYPE_COLOR, TypeDesc};
//!
//! let ty: TypeDesc = "color[2]".parse().unwrap();
//! assert_eq!(ty, TYPE_COLOR.array(2));
//! assert_eq!(ty.size(), 24);
//! ```

#![no_std]
extern crate alloc;

pub mod desc;
pub mod names;

pub use desc::*;
pub use names::TypeParseError;
