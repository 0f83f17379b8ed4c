//! The type descriptor carried by every attribute value.
//!
//! A `TypeDesc` is a small `Copy` struct describing the layout of one value:
//! the scalar kind of its components (`BaseType`), how many components form
//! one logical element (`Aggregate`), an optional interpretation hint
//! (`VecSemantics`) and an optional array length.

/// Scalar kind of the components of a value.
///
/// The discriminants are stable and appear in diagnostic output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum BaseType {
    #[default]
    Unknown = 0,
    None = 1,
    UInt8 = 2,
    Int8 = 3,
    UInt16 = 4,
    Int16 = 5,
    UInt32 = 6,
    Int32 = 7,
    UInt64 = 8,
    Int64 = 9,
    Half = 10,
    Float = 11,
    Double = 12,
    String = 13,
    Ptr = 14,
}

impl BaseType {
    /// Size in bytes of one component of this kind.
    ///
    /// Strings are stored as interned handles and pointers as opaque
    /// addresses; both occupy 8 bytes regardless of the host.
    pub const fn size(self) -> usize {
        match self {
            BaseType::Unknown | BaseType::None => 0,
            BaseType::UInt8 | BaseType::Int8 => 1,
            BaseType::UInt16 | BaseType::Int16 | BaseType::Half => 2,
            BaseType::UInt32 | BaseType::Int32 | BaseType::Float => 4,
            BaseType::UInt64 | BaseType::Int64 | BaseType::Double => 8,
            BaseType::String | BaseType::Ptr => 8,
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            BaseType::UInt8
                | BaseType::Int8
                | BaseType::UInt16
                | BaseType::Int16
                | BaseType::UInt32
                | BaseType::Int32
                | BaseType::UInt64
                | BaseType::Int64
        )
    }

    pub const fn is_floating_point(self) -> bool {
        matches!(self, BaseType::Half | BaseType::Float | BaseType::Double)
    }

    /// Returns true for the kinds that take part in numeric conversion.
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_floating_point()
    }

    pub const fn name(self) -> &'static str {
        match self {
            BaseType::Unknown => "unknown",
            BaseType::None => "none",
            BaseType::UInt8 => "uint8",
            BaseType::Int8 => "int8",
            BaseType::UInt16 => "uint16",
            BaseType::Int16 => "int16",
            BaseType::UInt32 => "uint",
            BaseType::Int32 => "int",
            BaseType::UInt64 => "uint64",
            BaseType::Int64 => "int64",
            BaseType::Half => "half",
            BaseType::Float => "float",
            BaseType::Double => "double",
            BaseType::String => "string",
            BaseType::Ptr => "ptr",
        }
    }

    pub(crate) const ALL: [BaseType; 15] = [
        BaseType::Unknown,
        BaseType::None,
        BaseType::UInt8,
        BaseType::Int8,
        BaseType::UInt16,
        BaseType::Int16,
        BaseType::UInt32,
        BaseType::Int32,
        BaseType::UInt64,
        BaseType::Int64,
        BaseType::Half,
        BaseType::Float,
        BaseType::Double,
        BaseType::String,
        BaseType::Ptr,
    ];
}

/// Number of components forming one logical element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Aggregate {
    #[default]
    Scalar = 1,
    Vec2 = 2,
    Vec3 = 3,
    Vec4 = 4,
    Matrix33 = 9,
    Matrix44 = 16,
}

impl Aggregate {
    pub const fn count(self) -> usize {
        self as usize
    }

    pub const fn from_count(count: usize) -> Option<Aggregate> {
        match count {
            1 => Some(Aggregate::Scalar),
            2 => Some(Aggregate::Vec2),
            3 => Some(Aggregate::Vec3),
            4 => Some(Aggregate::Vec4),
            9 => Some(Aggregate::Matrix33),
            16 => Some(Aggregate::Matrix44),
            _ => None,
        }
    }
}

/// Interpretation hint for an aggregate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum VecSemantics {
    #[default]
    NoXform = 0,
    Color = 1,
    Point = 2,
    Vector = 3,
    Normal = 4,
    /// SMPTE timecode, two packed `uint` words.
    Timecode = 5,
    /// SMPTE keycode, seven `int` words.
    Keycode = 6,
    /// Numerator/denominator pair.
    Rational = 7,
    Box = 8,
}

/// Layout descriptor of a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct TypeDesc {
    pub basetype: BaseType,
    pub aggregate: Aggregate,
    pub vecsemantics: VecSemantics,
    /// Number of array elements, `0` when the type is not an array.
    pub arraylen: u32,
}

impl TypeDesc {
    pub const fn new(basetype: BaseType) -> Self {
        Self {
            basetype,
            aggregate: Aggregate::Scalar,
            vecsemantics: VecSemantics::NoXform,
            arraylen: 0,
        }
    }

    pub const fn with_aggregate(
        basetype: BaseType,
        aggregate: Aggregate,
        vecsemantics: VecSemantics,
    ) -> Self {
        Self {
            basetype,
            aggregate,
            vecsemantics,
            arraylen: 0,
        }
    }

    /// Returns a copy of this type turned into an array of `arraylen`
    /// elements (`0` removes the array-ness).
    pub const fn array(self, arraylen: u32) -> Self {
        Self { arraylen, ..self }
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self.basetype, BaseType::Unknown)
    }

    pub const fn is_array(&self) -> bool {
        self.arraylen > 0
    }

    /// Number of array elements, `1` for non-arrays.
    pub const fn numelements(&self) -> usize {
        if self.arraylen > 0 {
            self.arraylen as usize
        } else {
            1
        }
    }

    /// Total number of scalar components described by this type.
    pub const fn basevalues(&self) -> usize {
        self.numelements() * self.aggregate.count()
    }

    /// Size in bytes of one scalar component.
    pub const fn basesize(&self) -> usize {
        self.basetype.size()
    }

    /// Size in bytes of one array element.
    pub const fn elementsize(&self) -> usize {
        self.aggregate.count() * self.basesize()
    }

    /// Total size in bytes of a value of this type.
    pub const fn size(&self) -> usize {
        self.numelements() * self.elementsize()
    }

    /// The type of one array element (the array-ness stripped).
    pub const fn elementtype(&self) -> Self {
        self.array(0)
    }

    /// The scalar type of one component.
    pub const fn scalartype(&self) -> Self {
        Self::new(self.basetype)
    }

    /// True for `int`/`uint` pairs tagged as rationals.
    pub const fn is_rational(&self) -> bool {
        matches!(self.basetype, BaseType::Int32 | BaseType::UInt32)
            && matches!(self.aggregate, Aggregate::Vec2)
            && matches!(self.vecsemantics, VecSemantics::Rational)
    }

    pub const fn is_timecode(&self) -> bool {
        matches!(self.basetype, BaseType::UInt32)
            && matches!(self.vecsemantics, VecSemantics::Timecode)
    }
}

pub const TYPE_UNKNOWN: TypeDesc = TypeDesc::new(BaseType::Unknown);
pub const TYPE_FLOAT: TypeDesc = TypeDesc::new(BaseType::Float);
pub const TYPE_DOUBLE: TypeDesc = TypeDesc::new(BaseType::Double);
pub const TYPE_HALF: TypeDesc = TypeDesc::new(BaseType::Half);
pub const TYPE_INT: TypeDesc = TypeDesc::new(BaseType::Int32);
pub const TYPE_UINT: TypeDesc = TypeDesc::new(BaseType::UInt32);
pub const TYPE_INT64: TypeDesc = TypeDesc::new(BaseType::Int64);
pub const TYPE_UINT64: TypeDesc = TypeDesc::new(BaseType::UInt64);
pub const TYPE_INT16: TypeDesc = TypeDesc::new(BaseType::Int16);
pub const TYPE_UINT16: TypeDesc = TypeDesc::new(BaseType::UInt16);
pub const TYPE_INT8: TypeDesc = TypeDesc::new(BaseType::Int8);
pub const TYPE_UINT8: TypeDesc = TypeDesc::new(BaseType::UInt8);
pub const TYPE_STRING: TypeDesc = TypeDesc::new(BaseType::String);
pub const TYPE_PTR: TypeDesc = TypeDesc::new(BaseType::Ptr);
pub const TYPE_COLOR: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Vec3, VecSemantics::Color);
pub const TYPE_POINT: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Vec3, VecSemantics::Point);
pub const TYPE_VECTOR: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Vec3, VecSemantics::Vector);
pub const TYPE_NORMAL: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Vec3, VecSemantics::Normal);
pub const TYPE_MATRIX33: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Matrix33, VecSemantics::NoXform);
pub const TYPE_MATRIX44: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Matrix44, VecSemantics::NoXform);
pub const TYPE_RATIONAL: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Int32, Aggregate::Vec2, VecSemantics::Rational);
pub const TYPE_URATIONAL: TypeDesc =
    TypeDesc::with_aggregate(BaseType::UInt32, Aggregate::Vec2, VecSemantics::Rational);
pub const TYPE_TIMECODE: TypeDesc = TypeDesc {
    basetype: BaseType::UInt32,
    aggregate: Aggregate::Scalar,
    vecsemantics: VecSemantics::Timecode,
    arraylen: 2,
};
pub const TYPE_KEYCODE: TypeDesc = TypeDesc {
    basetype: BaseType::Int32,
    aggregate: Aggregate::Scalar,
    vecsemantics: VecSemantics::Keycode,
    arraylen: 7,
};
pub const TYPE_FLOAT2: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Vec2, VecSemantics::NoXform);
pub const TYPE_FLOAT4: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Vec4, VecSemantics::NoXform);
pub const TYPE_VECTOR2: TypeDesc =
    TypeDesc::with_aggregate(BaseType::Float, Aggregate::Vec2, VecSemantics::Vector);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(TYPE_FLOAT.size(), 4);
        assert_eq!(TYPE_COLOR.size(), 12);
        assert_eq!(TYPE_MATRIX44.size(), 64);
        assert_eq!(TYPE_FLOAT.array(5).size(), 20);
        assert_eq!(TYPE_STRING.size(), 8);
        assert_eq!(TYPE_UNKNOWN.size(), 0);
    }

    #[test]
    fn test_element_and_scalar_types() {
        let ty = TYPE_COLOR.array(4);
        assert_eq!(ty.numelements(), 4);
        assert_eq!(ty.basevalues(), 12);
        assert_eq!(ty.elementtype(), TYPE_COLOR);
        assert_eq!(ty.scalartype(), TYPE_FLOAT);
        assert_eq!(ty.basesize(), 4);
        assert_eq!(ty.elementsize(), 12);
    }

    #[test]
    fn test_rational_and_timecode_predicates() {
        assert!(TYPE_RATIONAL.is_rational());
        assert!(TYPE_URATIONAL.is_rational());
        assert!(!TYPE_FLOAT2.is_rational());
        assert!(!TYPE_TIMECODE.is_rational());
    }
}
