//! Rendering stored bytes as text.
//!
//! All numeric output is locale-independent. Floats use Rust's shortest
//! round-trip form, so a rendered float parses back to the same value.

use core::fmt::Write as _;
use core::ops::Range;

use paramval_types::{BaseType, TypeDesc};

use crate::{
    options::FormatOptions,
    scalar::{Ptr, Scalar, dispatch_scalar},
    ustring::UString,
};

fn write_scalars_as<T: Scalar>(
    out: &mut String,
    data: &[u8],
    range: Range<usize>,
    separator: &str,
    options: &FormatOptions,
) {
    for (n, i) in range.enumerate() {
        if n > 0 {
            out.push_str(separator);
        }
        let value = data
            .get(i * T::SIZE..)
            .and_then(T::read)
            .unwrap_or_default();
        value.write_text(out, options);
    }
}

/// Appends components `range` of `data`, read as `basetype`, separated by
/// `separator`. Returns false for `unknown`/`none`.
pub(crate) fn write_scalars(
    out: &mut String,
    basetype: BaseType,
    data: &[u8],
    range: Range<usize>,
    separator: &str,
    options: &FormatOptions,
) -> bool {
    dispatch_scalar!(
        basetype,
        |T| {
            write_scalars_as::<T>(out, data, range, separator, options);
            true
        },
        else false
    )
}

/// Appends one aggregate element (a rational renders as `num/den`).
fn write_element(out: &mut String, elem: TypeDesc, data: &[u8], options: &FormatOptions) -> bool {
    if elem.is_rational() {
        let mut parts = [0i64; 2];
        for (k, part) in parts.iter_mut().enumerate() {
            let bytes = data.get(k * 4..).unwrap_or_default();
            *part = match elem.basetype {
                BaseType::UInt32 => u32::read(bytes).map(i64::from),
                _ => i32::read(bytes).map(i64::from),
            }
            .unwrap_or(0);
        }
        let _ = write!(out, "{}/{}", parts[0], parts[1]);
        return true;
    }
    write_scalars(
        out,
        elem.basetype,
        data,
        0..elem.aggregate.count(),
        &options.aggregate_separator,
        options,
    )
}

/// Appends the packed SMPTE time word at the front of `data` as
/// `hh:mm:ss:ff`.
fn write_timecode(out: &mut String, data: &[u8]) {
    let word = u32::read(data).unwrap_or(0);
    let bcd = |shift: u32, tens_mask: u32| {
        let field = word >> shift;
        (field & 0xf) + 10 * ((field >> 4) & tens_mask)
    };
    let _ = write!(
        out,
        "{:02}:{:02}:{:02}:{:02}",
        bcd(24, 0x3),
        bcd(16, 0x7),
        bcd(8, 0x7),
        bcd(0, 0x3)
    );
}

/// Appends a whole value of type `ty`, keeping its element structure.
/// Returns false for `unknown`/`none` base types.
pub(crate) fn write_value(
    out: &mut String,
    ty: TypeDesc,
    data: &[u8],
    options: &FormatOptions,
) -> bool {
    if ty.is_timecode() {
        write_timecode(out, data);
        return true;
    }
    let elem = ty.elementtype();
    let elemsize = elem.size();
    for i in 0..ty.numelements() {
        if i > 0 {
            out.push_str(&options.element_separator);
        }
        let bytes = data.get(i * elemsize..).unwrap_or_default();
        if !write_element(out, elem, bytes, options) {
            return false;
        }
    }
    true
}

/// Text shown for values whose base type has no rendering.
pub(crate) fn unknown_placeholder(ty: TypeDesc) -> String {
    tracing::warn!(basetype = ty.basetype as u8, "no text rendering for base type");
    format!(
        "<unknown data type> (base {}, agg {} vec {})",
        ty.basetype as u8, ty.aggregate as u8, ty.vecsemantics as u8
    )
}

/// Renders array element `index` of `data` (laid out as consecutive
/// elements of `ty.elementtype()`).
pub(crate) fn element_text(ty: TypeDesc, data: &[u8], index: usize) -> String {
    let elem = ty.elementtype();
    let mut out = String::new();
    match elem.basetype {
        BaseType::Unknown | BaseType::None => return unknown_placeholder(ty),
        BaseType::String => {
            let handle = data
                .get(index * elem.size()..)
                .and_then(UString::read)
                .unwrap_or_default();
            out.push_str(handle.as_str());
        }
        BaseType::UInt32 if ty.is_timecode() => {
            // A timecode spans all its elements; render the value `index`
            // falls in.
            let start = (index / ty.numelements()) * ty.size();
            write_timecode(&mut out, data.get(start..).unwrap_or_default());
        }
        BaseType::Ptr => {
            let ptr = data
                .get(index * elem.size()..)
                .and_then(Ptr::read)
                .unwrap_or_default();
            out.push_str("ptr ");
            ptr.write_text(&mut out, &FormatOptions::ELEMENT);
        }
        _ => {
            let bytes = data.get(index * elem.size()..).unwrap_or_default();
            write_element(&mut out, elem, bytes, &FormatOptions::ELEMENT);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramval_types::*;

    fn bytes_of<T: Scalar>(values: &[T]) -> Vec<u8> {
        let mut out = vec![0u8; values.len() * T::SIZE];
        for (slot, v) in out.chunks_exact_mut(T::SIZE).zip(values) {
            v.write(slot);
        }
        out
    }

    #[test]
    fn test_write_value_aggregate() {
        let data = bytes_of(&[1.0f32, 0.5, 0.25]);
        let mut out = String::new();
        assert!(write_value(&mut out, TYPE_COLOR, &data, &FormatOptions::LISTING));
        assert_eq!(out, "1, 0.5, 0.25");
    }

    #[test]
    fn test_write_value_rational() {
        let data = bytes_of(&[30000i32, 1001]);
        let mut out = String::new();
        assert!(write_value(&mut out, TYPE_RATIONAL, &data, &FormatOptions::LISTING));
        assert_eq!(out, "30000/1001");
    }

    #[test]
    fn test_write_timecode() {
        // 01:02:03:04 in packed BCD.
        let data = bytes_of(&[0x0102_0304u32, 0]);
        let mut out = String::new();
        assert!(write_value(&mut out, TYPE_TIMECODE, &data, &FormatOptions::LISTING));
        assert_eq!(out, "01:02:03:04");
    }

    #[test]
    fn test_write_value_unknown() {
        let mut out = String::new();
        assert!(!write_value(&mut out, TYPE_UNKNOWN, &[], &FormatOptions::LISTING));
    }

    #[test]
    fn test_element_text() {
        let data = bytes_of(&[1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(element_text(TYPE_POINT.array(2), &data, 1), "4 5 6");

        let urational = bytes_of(&[1u32, 3]);
        assert_eq!(element_text(TYPE_URATIONAL, &urational, 0), "1/3");

        let ptr = bytes_of(&[Ptr(0x10)]);
        assert_eq!(element_text(TYPE_PTR, &ptr, 0), "ptr 0x10");
    }

    #[test]
    fn test_unknown_placeholder() {
        assert_eq!(
            unknown_placeholder(TYPE_UNKNOWN),
            "<unknown data type> (base 0, agg 1 vec 0)"
        );
    }
}
