//! Textual names of type descriptors.
//!
//! `Display` produces the canonical short name (`float`, `color`,
//! `int[4]`, `rational`, ...) and `FromStr` accepts the same spellings.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::desc::{Aggregate, BaseType, TypeDesc, VecSemantics};

/// Error returned when a type name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    #[error("unrecognized type name `{0}`")]
    UnknownName(String),
    #[error("malformed array suffix in `{0}`")]
    BadArraySuffix(String),
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names that carry their own aggregate and semantics.
const SPECIAL_NAMES: &[(&str, TypeDesc)] = &[
    ("color", crate::TYPE_COLOR),
    ("point", crate::TYPE_POINT),
    ("vector", crate::TYPE_VECTOR),
    ("normal", crate::TYPE_NORMAL),
    ("matrix", crate::TYPE_MATRIX44),
    ("matrix33", crate::TYPE_MATRIX33),
    ("vector2", crate::TYPE_VECTOR2),
    ("rational", crate::TYPE_RATIONAL),
    ("urational", crate::TYPE_URATIONAL),
    ("timecode", crate::TYPE_TIMECODE),
    ("keycode", crate::TYPE_KEYCODE),
];

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Timecode and keycode are arrays by definition; their name already
        // implies the length.
        if *self == crate::TYPE_TIMECODE || *self == crate::TYPE_KEYCODE {
            let (name, _) = SPECIAL_NAMES
                .iter()
                .find(|(_, ty)| ty == self)
                .ok_or(fmt::Error)?;
            return f.write_str(name);
        }
        let element = self.elementtype();
        match SPECIAL_NAMES.iter().find(|(_, ty)| *ty == element) {
            Some((name, _)) => f.write_str(name)?,
            None if element.aggregate == Aggregate::Scalar => {
                f.write_str(element.basetype.name())?
            }
            None => write!(
                f,
                "{}{}",
                element.basetype.name(),
                element.aggregate.count()
            )?,
        }
        if self.arraylen > 0 {
            write!(f, "[{}]", self.arraylen)?;
        }
        Ok(())
    }
}

impl FromStr for TypeDesc {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (head, arraylen) = match s.find('[') {
            Some(open) => {
                let len = s[open..]
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .filter(|len| *len > 0)
                    .ok_or_else(|| TypeParseError::BadArraySuffix(s.to_string()))?;
                (&s[..open], len)
            }
            None => (s, 0),
        };

        if let Some((_, ty)) = SPECIAL_NAMES.iter().find(|(name, _)| *name == head) {
            return Ok(if arraylen > 0 { ty.array(arraylen) } else { *ty });
        }

        // Longest base name first so "uint8" is not read as "uint" + "8".
        let mut best: Option<BaseType> = None;
        for base in BaseType::ALL {
            if head.starts_with(base.name())
                && best.is_none_or(|b| b.name().len() < base.name().len())
            {
                best = Some(base);
            }
        }
        let base = best.ok_or_else(|| TypeParseError::UnknownName(s.to_string()))?;
        let rest = &head[base.name().len()..];
        let aggregate = if rest.is_empty() {
            Aggregate::Scalar
        } else {
            rest.parse::<usize>()
                .ok()
                .and_then(Aggregate::from_count)
                .ok_or_else(|| TypeParseError::UnknownName(s.to_string()))?
        };
        Ok(TypeDesc::with_aggregate(base, aggregate, VecSemantics::NoXform).array(arraylen))
    }
}
