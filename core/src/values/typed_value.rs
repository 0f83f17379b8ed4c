//! `TypedValue`: one named attribute of arbitrary type.

use core::fmt::{self, Write as _};

use paramval_types::{BaseType, TYPE_FLOAT, TYPE_INT, TYPE_STRING, TypeDesc};

use crate::{
    convert::convert_type,
    error::ValueError,
    format,
    options::FormatOptions,
    parse::parse_elements,
    payload::{Payload, PayloadKind},
    scalar::{Scalar, dispatch_scalar},
    ustring::UString,
    values::Interp,
};

/// A named value of any `TypeDesc`, repeated `nvalues` times.
///
/// The payload is `nvalues` consecutive values of the type in native byte
/// order. Payloads of up to [`INLINE_CAPACITY`](crate::INLINE_CAPACITY)
/// bytes are stored inside the value itself. Larger payloads are either
/// owned heap blocks or bytes borrowed from the caller for `'a`.
///
/// String components are [`UString`] handles, so a value never holds raw
/// text and every handle it holds was issued by the global table.
#[derive(Default)]
pub struct TypedValue<'a> {
    name: UString,
    ty: TypeDesc,
    nvalues: usize,
    interp: Interp,
    payload: Payload<'a>,
}

fn checked_datasize(ty: TypeDesc, nvalues: usize) -> Result<usize, ValueError> {
    ty.size()
        .checked_mul(nvalues)
        .ok_or(ValueError::SizeOverflow { nvalues, ty })
}

fn check_length(expected: usize, data: &[u8]) -> Result<(), ValueError> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(ValueError::DataLength {
            expected,
            actual: data.len(),
        })
    }
}

/// Rewrites every handle in `bytes` with one the global table issued.
/// Foreign or corrupt ids become the empty string.
fn reintern_strings(bytes: &mut [u8]) {
    for slot in bytes.chunks_exact_mut(UString::SIZE) {
        UString::read(slot).unwrap_or_default().write(slot);
    }
}

fn strings_are_interned(bytes: &[u8]) -> bool {
    bytes.chunks_exact(UString::SIZE).all(|slot| {
        u64::read(slot) == UString::read(slot).map(|handle| u64::from(handle.id()))
    })
}

impl<'a> TypedValue<'a> {
    fn from_parts(name: UString, ty: TypeDesc, nvalues: usize, payload: Payload<'a>) -> Self {
        Self {
            name,
            ty,
            nvalues,
            interp: Interp::Constant,
            payload,
        }
    }

    /// A value whose every component is zero (empty, for strings).
    pub fn zeroed(
        name: impl Into<UString>,
        ty: TypeDesc,
        nvalues: usize,
    ) -> Result<Self, ValueError> {
        let size = checked_datasize(ty, nvalues)?;
        Ok(Self::from_parts(name.into(), ty, nvalues, Payload::zeroed(size)))
    }

    /// Copies `data`, which must hold exactly `nvalues` values of `ty`.
    ///
    /// String handles are re-interned; ids the global table never issued
    /// read back as empty strings.
    pub fn from_bytes(
        name: impl Into<UString>,
        ty: TypeDesc,
        nvalues: usize,
        data: &[u8],
    ) -> Result<Self, ValueError> {
        let size = checked_datasize(ty, nvalues)?;
        check_length(size, data)?;
        let mut payload = Payload::copied(data);
        if ty.basetype == BaseType::String {
            if let Some(bytes) = payload.as_mut_slice() {
                reintern_strings(bytes);
            }
        }
        Ok(Self::from_parts(name.into(), ty, nvalues, payload))
    }

    /// Like [`from_bytes`](Self::from_bytes), but a payload too large to be
    /// stored inline points at `data` instead of copying it.
    ///
    /// String payloads holding handles the global table never issued are
    /// copied and sanitized rather than borrowed.
    pub fn borrowed(
        name: impl Into<UString>,
        ty: TypeDesc,
        nvalues: usize,
        data: &'a [u8],
    ) -> Result<Self, ValueError> {
        let name = name.into();
        let size = checked_datasize(ty, nvalues)?;
        check_length(size, data)?;
        if ty.basetype == BaseType::String && !strings_are_interned(data) {
            tracing::debug!(%name, "foreign string handles, copying instead of borrowing");
            return Self::from_bytes(name, ty, nvalues, data);
        }
        Ok(Self::from_parts(name, ty, nvalues, Payload::borrowed(data)))
    }

    /// Builds a value from its components. `values.len()` must be a multiple
    /// of `ty.basevalues()`; the quotient becomes `nvalues`.
    pub fn from_slice<T: Scalar>(
        name: impl Into<UString>,
        ty: TypeDesc,
        values: &[T],
    ) -> Result<Self, ValueError> {
        if ty.basetype != T::BASETYPE {
            return Err(ValueError::TypeMismatch {
                expected: ty,
                actual: T::BASETYPE,
            });
        }
        let per_value = ty.basevalues();
        if values.len() % per_value != 0 {
            return Err(ValueError::ComponentCount {
                expected: per_value,
                actual: values.len(),
            });
        }
        let mut value = Self::zeroed(name, ty, values.len() / per_value)?;
        if let Some(bytes) = value.payload.as_mut_slice() {
            for (slot, v) in bytes.chunks_exact_mut(T::SIZE).zip(values) {
                v.write(slot);
            }
        }
        Ok(value)
    }

    /// A single scalar of `T`'s own type.
    pub fn from_scalar<T: Scalar>(name: impl Into<UString>, value: T) -> Self {
        let mut payload = Payload::zeroed(T::SIZE);
        if let Some(bytes) = payload.as_mut_slice() {
            value.write(bytes);
        }
        Self::from_parts(name.into(), TypeDesc::new(T::BASETYPE), 1, payload)
    }

    pub fn string(name: impl Into<UString>, value: &str) -> Self {
        Self::from_scalar(name, UString::new(value))
    }

    /// Builds a single value of `ty` from text.
    ///
    /// Numeric types read up to `ty.basevalues()` components from a list
    /// delimited by spaces, commas or tabs. Components the text does not
    /// reach stay zero, and a component with no numeric prefix reads as
    /// zero. A `string` type takes the whole text as its one element. Other
    /// base types are left zeroed.
    pub fn parse(name: impl Into<UString>, ty: TypeDesc, text: &str) -> Self {
        let mut payload = Payload::zeroed(ty.size());
        if let Some(bytes) = payload.as_mut_slice() {
            if ty.basetype == BaseType::String {
                UString::new(text).write(bytes);
            } else if ty.basetype.is_numeric() {
                let count = ty.basevalues();
                dispatch_scalar!(
                    ty.basetype,
                    |T| {
                        parse_elements::<T>(text, bytes, count);
                    },
                    else ()
                );
            }
        }
        Self::from_parts(name.into(), ty, 1, payload)
    }

    pub fn with_interp(mut self, interp: Interp) -> Self {
        self.interp = interp;
        self
    }

    pub fn name(&self) -> UString {
        self.name
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.ty
    }

    pub fn nvalues(&self) -> usize {
        self.nvalues
    }

    pub fn interp(&self) -> Interp {
        self.interp
    }

    /// Size in bytes of the full payload: `nvalues * type_desc().size()`.
    pub fn datasize(&self) -> usize {
        self.nvalues * self.ty.size()
    }

    /// The payload bytes. Empty once the value has been cleared or taken.
    pub fn data(&self) -> &[u8] {
        self.payload.as_slice()
    }

    pub fn storage(&self) -> PayloadKind {
        self.payload.kind()
    }

    pub fn is_inline(&self) -> bool {
        self.storage() == PayloadKind::Inline
    }

    /// True if dropping or clearing this value frees a heap block.
    pub fn owns_heap(&self) -> bool {
        self.storage() == PayloadKind::Owned
    }

    pub fn is_borrowed(&self) -> bool {
        self.storage() == PayloadKind::Borrowed
    }

    fn is_released(&self) -> bool {
        self.payload.len() < self.datasize()
    }

    /// Component `index` (counting across all values) if the value stores
    /// `T`'s base type.
    pub fn get<T: Scalar>(&self, index: usize) -> Option<T> {
        if self.ty.basetype != T::BASETYPE {
            return None;
        }
        let offset = index.checked_mul(T::SIZE)?;
        self.data().get(offset..).and_then(T::read)
    }

    /// Every stored component, or nothing if the value does not store `T`'s
    /// base type.
    pub fn values<T: Scalar>(&self) -> impl Iterator<Item = T> + '_ {
        let data: &[u8] = if self.ty.basetype == T::BASETYPE {
            self.data()
        } else {
            &[]
        };
        data.chunks_exact(T::SIZE).filter_map(T::read)
    }

    fn convert_element(&self, index: usize, dst_ty: TypeDesc, dst: &mut [u8]) -> bool {
        let Some(src) = index
            .checked_mul(self.ty.basesize())
            .and_then(|offset| self.data().get(offset..))
        else {
            return false;
        };
        convert_type(self.ty.elementtype(), src, dst_ty, dst)
    }

    pub fn get_int(&self, default: i32) -> i32 {
        self.get_int_indexed(0, default)
    }

    /// Converts the element at component offset `index` to `int`, or returns
    /// `default` when it cannot be converted.
    pub fn get_int_indexed(&self, index: usize, default: i32) -> i32 {
        let mut out = [0u8; 4];
        if self.convert_element(index, TYPE_INT, &mut out) {
            i32::from_ne_bytes(out)
        } else {
            default
        }
    }

    pub fn get_float(&self, default: f32) -> f32 {
        self.get_float_indexed(0, default)
    }

    /// Converts the element at component offset `index` to `float`, or
    /// returns `default` when it cannot be converted.
    pub fn get_float_indexed(&self, index: usize, default: f32) -> f32 {
        let mut out = [0u8; 4];
        if self.convert_element(index, TYPE_FLOAT, &mut out) {
            f32::from_ne_bytes(out)
        } else {
            default
        }
    }

    /// Renders the value for display, at most `maxsize` components when
    /// `maxsize` is non-zero.
    pub fn get_string(&self, maxsize: usize) -> String {
        self.get_string_with(maxsize, &FormatOptions::LISTING)
    }

    /// A truncated rendering ends with `, ... [N x type]`, giving the full
    /// component count and the scalar type.
    pub fn get_string_with(&self, maxsize: usize, options: &FormatOptions) -> String {
        let mut out = String::new();
        if self.is_released() {
            return out;
        }
        let nfull = self.ty.basevalues() * self.nvalues;
        let n = if maxsize == 0 { nfull } else { maxsize.min(nfull) };
        let rendered = if self.nvalues != 1 || n < nfull {
            format::write_scalars(
                &mut out,
                self.ty.basetype,
                self.data(),
                0..n,
                &options.element_separator,
                options,
            )
        } else {
            format::write_value(&mut out, self.ty, self.data(), options)
        };
        if !rendered {
            return format::unknown_placeholder(self.ty);
        }
        if n < nfull {
            let _ = write!(out, ", ... [{} x {}]", nfull, self.ty.scalartype());
        }
        out
    }

    /// Renders array element `index` (counting across all values). Out of
    /// range indices give an empty string.
    pub fn get_string_indexed(&self, index: usize) -> String {
        let n = self.ty.numelements() * self.nvalues;
        if index >= n || self.is_released() {
            return String::new();
        }
        format::element_text(self.ty, self.data(), index)
    }

    /// Interned form of [`get_string`](Self::get_string). A `string` value
    /// returns its first stored handle as is.
    pub fn get_ustring(&self, maxsize: usize) -> UString {
        if self.ty == TYPE_STRING {
            return self.get::<UString>(0).unwrap_or_default();
        }
        UString::new(&self.get_string(maxsize))
    }

    pub fn get_ustring_indexed(&self, index: usize) -> UString {
        if self.ty.elementtype() == TYPE_STRING {
            return self.get::<UString>(index).unwrap_or_default();
        }
        UString::new(&self.get_string_indexed(index))
    }

    /// Releases the payload. Name, type and count are kept; the data reads
    /// back empty. Calling it again does nothing.
    pub fn clear(&mut self) {
        self.payload.release();
    }

    /// Moves the payload out into a new value, leaving `self` cleared.
    pub fn take(&mut self) -> Self {
        Self {
            name: self.name,
            ty: self.ty,
            nvalues: self.nvalues,
            interp: self.interp,
            payload: core::mem::take(&mut self.payload),
        }
    }

    /// Releases this value's payload, then takes over `other`'s, leaving
    /// `other` cleared.
    pub fn move_from(&mut self, other: &mut TypedValue<'a>) {
        self.clear();
        *self = other.take();
    }
}

impl Clone for TypedValue<'_> {
    /// Owned payloads are deep-copied. Borrowed payloads stay borrowed from
    /// the same source.
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            ty: self.ty,
            nvalues: self.nvalues,
            interp: self.interp,
            payload: self.payload.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.name = source.name;
        self.ty = source.ty;
        self.nvalues = source.nvalues;
        self.interp = source.interp;
        self.payload = source.payload.clone();
    }
}

impl PartialEq for TypedValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.ty == other.ty
            && self.nvalues == other.nvalues
            && self.interp == other.interp
            && self.data() == other.data()
    }
}

impl fmt::Debug for TypedValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedValue")
            .field("name", &self.name)
            .field("type", &format_args!("{}", self.ty))
            .field("nvalues", &self.nvalues)
            .field("interp", &self.interp)
            .field("storage", &self.storage())
            .field("value", &self.get_string(8))
            .finish()
    }
}
