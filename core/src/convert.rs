//! Generic value conversion between type descriptors.

use paramval_types::{BaseType, TYPE_STRING, TypeDesc};
use smallvec::{SmallVec, smallvec};

use crate::{
    format,
    options::FormatOptions,
    scalar::{Number, Scalar, dispatch_scalar},
    ustring::UString,
};

fn read_number(basetype: BaseType, bytes: &[u8]) -> Option<Number> {
    dispatch_scalar!(basetype, |T| T::read(bytes)?.to_number(), else None)
}

fn write_number(basetype: BaseType, n: Number, out: &mut [u8]) -> bool {
    dispatch_scalar!(
        basetype,
        |T| match T::from_number(n) {
            Some(value) => {
                value.write(out);
                true
            }
            None => false,
        },
        else false
    )
}

fn parse_into(basetype: BaseType, text: &str, out: &mut [u8]) -> bool {
    dispatch_scalar!(
        basetype,
        |T| match T::parse_exact(text) {
            Some(value) => {
                value.write(out);
                true
            }
            None => false,
        },
        else false
    )
}

fn convert_into(src_ty: TypeDesc, src: &[u8], dst_ty: TypeDesc, dst: &mut [u8]) -> bool {
    if src_ty == dst_ty {
        dst.copy_from_slice(src);
        return true;
    }

    if dst_ty == TYPE_STRING {
        let mut text = String::new();
        if !format::write_value(&mut text, src_ty, src, &FormatOptions::ELEMENT) {
            return false;
        }
        UString::new(&text).write(dst);
        return true;
    }

    if src_ty == TYPE_STRING {
        if dst_ty.basevalues() != 1 {
            return false;
        }
        let Some(text) = UString::read(src) else {
            return false;
        };
        return parse_into(dst_ty.basetype, text.as_str(), dst);
    }

    if src_ty.is_rational() && dst_ty.basevalues() == 1 && dst_ty.basetype.is_floating_point() {
        let num = read_number(src_ty.basetype, src);
        let den = read_number(src_ty.basetype, &src[src_ty.basesize()..]);
        let (Some(num), Some(den)) = (num, den) else {
            return false;
        };
        let den = den.as_f64();
        let ratio = if den == 0.0 { 0.0 } else { num.as_f64() / den };
        return write_number(dst_ty.basetype, Number::Float(ratio), dst);
    }

    if !src_ty.basetype.is_numeric()
        || !dst_ty.basetype.is_numeric()
        || src_ty.basevalues() != dst_ty.basevalues()
    {
        return false;
    }
    let (src_size, dst_size) = (src_ty.basesize(), dst_ty.basesize());
    src.chunks_exact(src_size)
        .zip(dst.chunks_exact_mut(dst_size))
        .all(|(from, to)| {
            read_number(src_ty.basetype, from)
                .is_some_and(|n| write_number(dst_ty.basetype, n, to))
        })
}

/// Converts one value of `src_ty` stored at the front of `src` into a value
/// of `dst_ty` written to the front of `dst`.
///
/// Supported conversions:
/// - identical types (byte copy)
/// - anything renderable into a `string`
/// - a `string` that parses completely into a scalar numeric kind
/// - a rational into a scalar float, double or half
/// - numeric into numeric with the same number of components (integers
///   saturate, floats truncate toward zero when narrowed to integers)
///
/// Returns false for anything else, including buffers too short for their
/// type. `dst` is only written when the conversion succeeds.
pub fn convert_type(src_ty: TypeDesc, src: &[u8], dst_ty: TypeDesc, dst: &mut [u8]) -> bool {
    let (src_size, dst_size) = (src_ty.size(), dst_ty.size());
    if src_ty.is_unknown() || dst_ty.is_unknown() || src.len() < src_size || dst.len() < dst_size
    {
        tracing::debug!(%src_ty, %dst_ty, "conversion rejected: unknown type or short buffer");
        return false;
    }

    let mut scratch: SmallVec<[u8; 64]> = smallvec![0; dst_size];
    if !convert_into(src_ty, &src[..src_size], dst_ty, &mut scratch) {
        tracing::debug!(%src_ty, %dst_ty, "no conversion between types");
        return false;
    }
    dst[..dst_size].copy_from_slice(&scratch);
    true
}
