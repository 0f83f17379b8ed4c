//! Payload: the byte storage behind a `TypedValue`.
//!
//! A payload holds its bytes in one of three places, chosen once when it is
//! built and never revisited:
//! - `Inline`: up to `INLINE_CAPACITY` bytes stored in the value itself, so
//!   small attributes never touch the allocator
//! - `Owned`: a heap block the payload frees when dropped
//! - `Borrowed`: caller-owned bytes the payload only points at
//!
//! A cleared payload is `Empty`: no storage at all.

use static_assertions::const_assert;

/// Largest payload, in bytes, stored without a heap allocation.
pub const INLINE_CAPACITY: usize = 16;

const_assert!(INLINE_CAPACITY <= u8::MAX as usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Empty,
    Inline,
    Owned,
    Borrowed,
}

#[derive(Clone)]
pub(crate) enum Payload<'a> {
    Empty,
    Inline {
        len: u8,
        bytes: [u8; INLINE_CAPACITY],
    },
    Owned(Box<[u8]>),
    Borrowed(&'a [u8]),
}

impl<'a> Payload<'a> {
    /// Zero-filled storage of `size` bytes.
    pub fn zeroed(size: usize) -> Self {
        if size <= INLINE_CAPACITY {
            Payload::Inline {
                len: size as u8,
                bytes: [0; INLINE_CAPACITY],
            }
        } else {
            tracing::trace!(size, "allocating heap payload");
            Payload::Owned(vec![0; size].into_boxed_slice())
        }
    }

    /// A private copy of `src`.
    pub fn copied(src: &[u8]) -> Self {
        if src.len() <= INLINE_CAPACITY {
            let mut bytes = [0; INLINE_CAPACITY];
            bytes[..src.len()].copy_from_slice(src);
            Payload::Inline {
                len: src.len() as u8,
                bytes,
            }
        } else {
            tracing::trace!(size = src.len(), "allocating heap payload");
            Payload::Owned(Box::from(src))
        }
    }

    /// Points at `src` without copying, unless it is small enough to be
    /// copied inline.
    pub fn borrowed(src: &'a [u8]) -> Self {
        if src.len() <= INLINE_CAPACITY {
            Self::copied(src)
        } else {
            tracing::trace!(size = src.len(), "borrowing caller payload");
            Payload::Borrowed(src)
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Empty => PayloadKind::Empty,
            Payload::Inline { .. } => PayloadKind::Inline,
            Payload::Owned(_) => PayloadKind::Owned,
            Payload::Borrowed(_) => PayloadKind::Borrowed,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            Payload::Empty => &[],
            Payload::Inline { len, bytes } => &bytes[..*len as usize],
            Payload::Owned(data) => &data[..],
            Payload::Borrowed(data) => *data,
        }
    }

    /// Mutable access to storage this payload holds itself. Borrowed bytes
    /// are never written through.
    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        match self {
            Payload::Empty => Some(&mut []),
            Payload::Inline { len, bytes } => Some(&mut bytes[..*len as usize]),
            Payload::Owned(data) => Some(&mut data[..]),
            Payload::Borrowed(_) => None,
        }
    }

    /// Drops any storage and leaves the payload `Empty`. Idempotent.
    pub fn release(&mut self) {
        if let Payload::Owned(data) = self {
            tracing::trace!(size = data.len(), "releasing heap payload");
        }
        *self = Payload::Empty;
    }
}

impl Default for Payload<'_> {
    fn default() -> Self {
        Payload::Empty
    }
}
