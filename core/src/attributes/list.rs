//! `AttributeList`: an ordered collection of named values.
//!
//! Lookups are linear scans from the front, so insertion order decides
//! which of several same-named entries a lookup sees. Nothing enforces
//! unique names; [`AttributeList::add_or_replace`] is the only operation
//! that dedups.

use core::cmp::Ordering;
use core::ops::Deref;

use paramval_types::{TYPE_FLOAT, TYPE_INT, TYPE_STRING, TYPE_UNKNOWN, TypeDesc};

use crate::{
    convert::convert_type, error::ValueError, scalar::Scalar, ustring::UString,
    values::TypedValue,
};

/// Separates a namespace prefix (`"exr:"`, `"oiio:"`) from the rest of an
/// attribute name.
pub const NAMESPACE_SEPARATOR: char = ':';

enum NameQuery<'n> {
    /// Case-sensitive lookups compare handles. `None` when the name was never
    /// interned, so no entry can carry it.
    Exact(Option<UString>),
    Folded(&'n str),
}

impl<'n> NameQuery<'n> {
    fn new(name: &'n str, case_sensitive: bool) -> Self {
        if case_sensitive {
            NameQuery::Exact(UString::lookup(name))
        } else {
            NameQuery::Folded(name)
        }
    }

    fn matches(&self, candidate: UString) -> bool {
        match self {
            NameQuery::Exact(handle) => *handle == Some(candidate),
            NameQuery::Folded(name) => candidate.as_str().eq_ignore_ascii_case(name),
        }
    }
}

/// `TYPE_UNKNOWN` is the wildcard filter.
fn type_matches(filter: TypeDesc, ty: TypeDesc) -> bool {
    filter == TYPE_UNKNOWN || filter == ty
}

fn folded(name: &str) -> impl Iterator<Item = u8> + '_ {
    name.bytes().map(|c| c.to_ascii_lowercase())
}

/// Names without a namespace sort before names with one.
fn compare_names(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    let namespaced = |name: &str| name.contains(NAMESPACE_SEPARATOR);
    namespaced(a).cmp(&namespaced(b)).then_with(|| {
        if case_sensitive {
            a.cmp(b)
        } else {
            folded(a).cmp(folded(b))
        }
    })
}

fn string_from_handle(bytes: &[u8]) -> String {
    UString::read(bytes).unwrap_or_default().as_str().to_owned()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeList<'a> {
    values: Vec<TypedValue<'a>>,
}

impl<'a> AttributeList<'a> {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, TypedValue<'a>> {
        self.values.iter_mut()
    }

    /// Index of the first entry named `name` whose type is `ty`
    /// (`TYPE_UNKNOWN` accepts any type).
    pub fn position(&self, name: &str, ty: TypeDesc, case_sensitive: bool) -> Option<usize> {
        let query = NameQuery::new(name, case_sensitive);
        self.values
            .iter()
            .position(|value| type_matches(ty, value.type_desc()) && query.matches(value.name()))
    }

    pub fn find(&self, name: &str, ty: TypeDesc, case_sensitive: bool) -> Option<&TypedValue<'a>> {
        self.position(name, ty, case_sensitive)
            .and_then(|index| self.values.get(index))
    }

    pub fn find_mut(
        &mut self,
        name: &str,
        ty: TypeDesc,
        case_sensitive: bool,
    ) -> Option<&mut TypedValue<'a>> {
        self.position(name, ty, case_sensitive)
            .and_then(|index| self.values.get_mut(index))
    }

    pub fn contains(&self, name: &str, ty: TypeDesc, case_sensitive: bool) -> bool {
        self.position(name, ty, case_sensitive).is_some()
    }

    /// Reads `name` as an `int`. Unless `convert` is set, only an entry
    /// stored as `int` is considered.
    pub fn get_int(&self, name: &str, default: i32, case_sensitive: bool, convert: bool) -> i32 {
        let ty = if convert { TYPE_UNKNOWN } else { TYPE_INT };
        self.find(name, ty, case_sensitive)
            .map_or(default, |value| value.get_int(default))
    }

    /// Reads `name` as a `float`. Unless `convert` is set, only an entry
    /// stored as `float` is considered.
    pub fn get_float(&self, name: &str, default: f32, case_sensitive: bool, convert: bool) -> f32 {
        let ty = if convert { TYPE_UNKNOWN } else { TYPE_FLOAT };
        self.find(name, ty, case_sensitive)
            .map_or(default, |value| value.get_float(default))
    }

    /// Reads `name` as text. Unless `convert` is set, only an entry stored
    /// as `string` is considered.
    pub fn get_string<'s>(
        &self,
        name: &str,
        default: &'s str,
        case_sensitive: bool,
        convert: bool,
    ) -> &'s str {
        let ty = if convert { TYPE_UNKNOWN } else { TYPE_STRING };
        match self.find(name, ty, case_sensitive) {
            Some(value) => value.get_ustring(0).as_str(),
            None => default,
        }
    }

    pub fn get_ustring(
        &self,
        name: &str,
        default: UString,
        case_sensitive: bool,
        convert: bool,
    ) -> UString {
        let ty = if convert { TYPE_UNKNOWN } else { TYPE_STRING };
        self.find(name, ty, case_sensitive)
            .map_or(default, |value| value.get_ustring(0))
    }

    /// Removes and returns the first match.
    pub fn remove(
        &mut self,
        name: &str,
        ty: TypeDesc,
        case_sensitive: bool,
    ) -> Option<TypedValue<'a>> {
        let index = self.position(name, ty, case_sensitive)?;
        Some(self.values.remove(index))
    }

    /// Overwrites the first entry with the same name (any type), keeping its
    /// position, or appends `value` if there is none.
    pub fn add_or_replace(&mut self, value: TypedValue<'a>, case_sensitive: bool) {
        match self.position(value.name().as_str(), TYPE_UNKNOWN, case_sensitive) {
            Some(index) => {
                tracing::trace!(name = %value.name(), index, "replacing attribute");
                self.values[index] = value;
            }
            None => self.values.push(value),
        }
    }

    /// Appends `values` as one new entry, without checking for an existing
    /// entry of the same name.
    pub fn attribute<T: Scalar>(
        &mut self,
        name: impl Into<UString>,
        ty: TypeDesc,
        values: &[T],
    ) -> Result<(), ValueError> {
        self.values.push(TypedValue::from_slice(name, ty, values)?);
        Ok(())
    }

    pub fn attribute_value(&mut self, value: TypedValue<'a>) {
        self.values.push(value);
    }

    /// Converts the first value of `name` into `ty`, written to `out`.
    /// `out` is untouched on failure.
    pub fn getattribute(
        &self,
        name: &str,
        ty: TypeDesc,
        out: &mut [u8],
        case_sensitive: bool,
    ) -> bool {
        self.find(name, TYPE_UNKNOWN, case_sensitive)
            .is_some_and(|value| convert_type(value.type_desc(), value.data(), ty, out))
    }

    /// Converts component `index` of the first value of `name` into `ty`.
    /// Fails if `index` is not below the entry type's `basevalues()`.
    pub fn getattribute_indexed(
        &self,
        name: &str,
        index: usize,
        ty: TypeDesc,
        out: &mut [u8],
        case_sensitive: bool,
    ) -> bool {
        let Some(value) = self.find(name, TYPE_UNKNOWN, case_sensitive) else {
            return false;
        };
        let stored = value.type_desc();
        if index >= stored.basevalues() {
            return false;
        }
        let scalar = stored.scalartype();
        value
            .data()
            .get(index * scalar.size()..)
            .is_some_and(|src| convert_type(scalar, src, ty, out))
    }

    pub fn getattribute_string(&self, name: &str, case_sensitive: bool) -> Option<String> {
        let mut handle = [0u8; 8];
        self.getattribute(name, TYPE_STRING, &mut handle, case_sensitive)
            .then(|| string_from_handle(&handle))
    }

    pub fn getattribute_indexed_string(
        &self,
        name: &str,
        index: usize,
        case_sensitive: bool,
    ) -> Option<String> {
        let mut handle = [0u8; 8];
        self.getattribute_indexed(name, index, TYPE_STRING, &mut handle, case_sensitive)
            .then(|| string_from_handle(&handle))
    }

    /// Typed form of [`getattribute`](Self::getattribute) for scalar
    /// destinations.
    pub fn getattribute_as<T: Scalar>(&self, name: &str, case_sensitive: bool) -> Option<T> {
        let mut out = [0u8; 8];
        if self.getattribute(name, TypeDesc::new(T::BASETYPE), &mut out, case_sensitive) {
            T::read(&out)
        } else {
            None
        }
    }

    /// Orders entries by name, with every namespaced name after every plain
    /// one. Entries with equal names may end up in any order.
    pub fn sort(&mut self, case_sensitive: bool) {
        self.values.sort_unstable_by(|a, b| {
            compare_names(a.name().as_str(), b.name().as_str(), case_sensitive)
        });
    }

    /// Copies every entry of `other` into this list. Names already present
    /// are only overwritten when `override_existing` is set, and keep their
    /// position when they are.
    pub fn merge(&mut self, other: &AttributeList<'a>, override_existing: bool) {
        for value in &other.values {
            if override_existing || !self.contains(value.name().as_str(), TYPE_UNKNOWN, true) {
                self.add_or_replace(value.clone(), true);
            }
        }
    }

    /// Drops every entry and releases the list's own storage.
    pub fn free(&mut self) {
        self.values = Vec::new();
    }
}

impl<'a> Deref for AttributeList<'a> {
    type Target = [TypedValue<'a>];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl<'a> FromIterator<TypedValue<'a>> for AttributeList<'a> {
    fn from_iter<I: IntoIterator<Item = TypedValue<'a>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<TypedValue<'a>> for AttributeList<'a> {
    fn extend<I: IntoIterator<Item = TypedValue<'a>>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl<'a> IntoIterator for AttributeList<'a> {
    type Item = TypedValue<'a>;
    type IntoIter = std::vec::IntoIter<TypedValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'l, 'a> IntoIterator for &'l AttributeList<'a> {
    type Item = &'l TypedValue<'a>;
    type IntoIter = core::slice::Iter<'l, TypedValue<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
