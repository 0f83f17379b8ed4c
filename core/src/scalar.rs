//! Scalar kinds and the single dispatch point from `BaseType` to Rust types.
//!
//! Every operation that needs to look at individual components (retrieval,
//! conversion, parsing, formatting) is written once, generically over
//! [`Scalar`], and instantiated for a runtime `BaseType` through
//! [`dispatch_scalar!`].

use core::fmt::{self, Write as _};

use paramval_types::BaseType;

use crate::{half::Half, options::FormatOptions, parse, ustring::UString};

/// Intermediate representation for numeric conversion between kinds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// Opaque address stored by `ptr` values. Never dereferenced.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ptr(pub u64);

impl fmt::Debug for Ptr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ptr({:#x})", self.0)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A Rust type that can be stored as one component of a `TypedValue`.
///
/// Components are stored in native byte order with no alignment
/// requirement; `read` and `write` go through byte arrays.
pub trait Scalar: Copy + Default + fmt::Debug + sealed::Sealed + 'static {
    const BASETYPE: BaseType;
    const SIZE: usize = Self::BASETYPE.size();

    /// Reads one component from the front of `bytes`. `None` if `bytes` is
    /// too short.
    fn read(bytes: &[u8]) -> Option<Self>;

    /// Writes one component to the front of `out`. Does nothing if `out` is
    /// too short.
    fn write(self, out: &mut [u8]);

    /// Lenient parse of the leading part of `text`. Never fails: text with no
    /// usable prefix yields the kind's zero.
    fn parse_prefix(text: &str) -> Self;

    /// Strict parse: the whole (trimmed) text must be a valid value.
    fn parse_exact(text: &str) -> Option<Self>;

    fn to_number(self) -> Option<Number>;

    fn from_number(n: Number) -> Option<Self>;

    fn write_text(self, out: &mut String, options: &FormatOptions);
}

macro_rules! impl_int_scalar {
    ($($ty:ty => $base:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const BASETYPE: BaseType = BaseType::$base;

            fn read(bytes: &[u8]) -> Option<Self> {
                let raw = bytes.get(..Self::SIZE)?.try_into().ok()?;
                Some(<$ty>::from_ne_bytes(raw))
            }

            fn write(self, out: &mut [u8]) {
                if let Some(dst) = out.get_mut(..Self::SIZE) {
                    dst.copy_from_slice(&self.to_ne_bytes());
                }
            }

            fn parse_prefix(text: &str) -> Self {
                parse::int_prefix(text)
                    .and_then(|i| Self::from_number(Number::Int(i)))
                    .unwrap_or(0)
            }

            fn parse_exact(text: &str) -> Option<Self> {
                text.trim().parse().ok()
            }

            fn to_number(self) -> Option<Number> {
                Some(Number::Int(self as i128))
            }

            fn from_number(n: Number) -> Option<Self> {
                Some(match n {
                    Number::Int(i) => i.clamp(<$ty>::MIN as i128, <$ty>::MAX as i128) as $ty,
                    // `as` truncates toward zero, saturates, and maps NaN to 0.
                    Number::Float(f) => f as $ty,
                })
            }

            fn write_text(self, out: &mut String, _options: &FormatOptions) {
                let _ = write!(out, "{}", self);
            }
        }
    )*};
}

impl_int_scalar! {
    u8 => UInt8,
    i8 => Int8,
    u16 => UInt16,
    i16 => Int16,
    u32 => UInt32,
    i32 => Int32,
    u64 => UInt64,
    i64 => Int64,
}

macro_rules! impl_float_scalar {
    ($($ty:ty => $base:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const BASETYPE: BaseType = BaseType::$base;

            fn read(bytes: &[u8]) -> Option<Self> {
                let raw = bytes.get(..Self::SIZE)?.try_into().ok()?;
                Some(<$ty>::from_ne_bytes(raw))
            }

            fn write(self, out: &mut [u8]) {
                if let Some(dst) = out.get_mut(..Self::SIZE) {
                    dst.copy_from_slice(&self.to_ne_bytes());
                }
            }

            fn parse_prefix(text: &str) -> Self {
                parse::float_prefix(text).map(|f| f as $ty).unwrap_or(0.0)
            }

            fn parse_exact(text: &str) -> Option<Self> {
                text.trim().parse().ok()
            }

            fn to_number(self) -> Option<Number> {
                Some(Number::Float(self as f64))
            }

            fn from_number(n: Number) -> Option<Self> {
                Some(n.as_f64() as $ty)
            }

            fn write_text(self, out: &mut String, _options: &FormatOptions) {
                let _ = write!(out, "{}", self);
            }
        }
    )*};
}

impl_float_scalar! {
    f32 => Float,
    f64 => Double,
}

impl sealed::Sealed for Half {}

impl Scalar for Half {
    const BASETYPE: BaseType = BaseType::Half;

    fn read(bytes: &[u8]) -> Option<Self> {
        u16::read(bytes).map(Half::from_bits)
    }

    fn write(self, out: &mut [u8]) {
        self.to_bits().write(out)
    }

    fn parse_prefix(text: &str) -> Self {
        Half::from_f32(f32::parse_prefix(text))
    }

    fn parse_exact(text: &str) -> Option<Self> {
        f32::parse_exact(text).map(Half::from_f32)
    }

    fn to_number(self) -> Option<Number> {
        Some(Number::Float(self.to_f32() as f64))
    }

    fn from_number(n: Number) -> Option<Self> {
        Some(Half::from_f32(n.as_f64() as f32))
    }

    fn write_text(self, out: &mut String, options: &FormatOptions) {
        self.to_f32().write_text(out, options)
    }
}

impl sealed::Sealed for UString {}

impl Scalar for UString {
    const BASETYPE: BaseType = BaseType::String;

    fn read(bytes: &[u8]) -> Option<Self> {
        let id = u64::read(bytes)?;
        // Handles the global table never issued read back as empty strings.
        Some(
            u32::try_from(id)
                .ok()
                .and_then(UString::from_id)
                .unwrap_or_default(),
        )
    }

    fn write(self, out: &mut [u8]) {
        u64::from(self.id()).write(out)
    }

    fn parse_prefix(text: &str) -> Self {
        UString::new(text)
    }

    fn parse_exact(text: &str) -> Option<Self> {
        Some(UString::new(text))
    }

    fn to_number(self) -> Option<Number> {
        None
    }

    fn from_number(_n: Number) -> Option<Self> {
        None
    }

    fn write_text(self, out: &mut String, options: &FormatOptions) {
        let text = self.as_str();
        if !options.quote_strings {
            out.push_str(text);
            return;
        }
        out.push('"');
        if options.escape_strings {
            for c in text.chars() {
                match c {
                    '"' => out.push_str("\\\""),
                    '\\' => out.push_str("\\\\"),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    c => out.push(c),
                }
            }
        } else {
            out.push_str(text);
        }
        out.push('"');
    }
}

impl sealed::Sealed for Ptr {}

impl Scalar for Ptr {
    const BASETYPE: BaseType = BaseType::Ptr;

    fn read(bytes: &[u8]) -> Option<Self> {
        u64::read(bytes).map(Ptr)
    }

    fn write(self, out: &mut [u8]) {
        self.0.write(out)
    }

    fn parse_prefix(text: &str) -> Self {
        Ptr(parse::hex_prefix(text).unwrap_or(0))
    }

    fn parse_exact(_text: &str) -> Option<Self> {
        None
    }

    fn to_number(self) -> Option<Number> {
        None
    }

    fn from_number(_n: Number) -> Option<Self> {
        None
    }

    fn write_text(self, out: &mut String, _options: &FormatOptions) {
        let _ = write!(out, "{:#x}", self.0);
    }
}

/// Runs `$body` with `$T` bound to the Rust type of `$basetype`, or evaluates
/// `$fallback` for `unknown`/`none`.
///
/// ```ignore
/// let size = dispatch_scalar!(ty.basetype, |T| T::SIZE, else 0);
/// ```
macro_rules! dispatch_scalar {
    ($basetype:expr, |$T:ident| $body:expr, else $fallback:expr) => {
        match $basetype {
            ::paramval_types::BaseType::UInt8 => {
                type $T = u8;
                $body
            }
            ::paramval_types::BaseType::Int8 => {
                type $T = i8;
                $body
            }
            ::paramval_types::BaseType::UInt16 => {
                type $T = u16;
                $body
            }
            ::paramval_types::BaseType::Int16 => {
                type $T = i16;
                $body
            }
            ::paramval_types::BaseType::UInt32 => {
                type $T = u32;
                $body
            }
            ::paramval_types::BaseType::Int32 => {
                type $T = i32;
                $body
            }
            ::paramval_types::BaseType::UInt64 => {
                type $T = u64;
                $body
            }
            ::paramval_types::BaseType::Int64 => {
                type $T = i64;
                $body
            }
            ::paramval_types::BaseType::Half => {
                type $T = $crate::half::Half;
                $body
            }
            ::paramval_types::BaseType::Float => {
                type $T = f32;
                $body
            }
            ::paramval_types::BaseType::Double => {
                type $T = f64;
                $body
            }
            ::paramval_types::BaseType::String => {
                type $T = $crate::ustring::UString;
                $body
            }
            ::paramval_types::BaseType::Ptr => {
                type $T = $crate::scalar::Ptr;
                $body
            }
            ::paramval_types::BaseType::Unknown | ::paramval_types::BaseType::None => $fallback,
        }
    };
}

pub(crate) use dispatch_scalar;
