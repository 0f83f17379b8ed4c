//! Process-wide interned strings.
//!
//! A `UString` is a 32-bit handle into a single global table. Two handles
//! are equal iff they name the same text, so comparison and hashing are O(1).
//! Interned text is never freed and `as_str` hands out `&'static str`.
//!
//! Id 0 is reserved for the empty string, which makes a zero-filled payload
//! of string type read back as empty strings.

use bumpalo::Bump;
use core::fmt;
use hashbrown::HashMap;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct UString(u32);

struct StringTable {
    // Holds the bytes of every interned string. Never reset.
    arena: Bump,
    ids: HashMap<&'static str, u32>,
    strs: Vec<&'static str>,
}

impl StringTable {
    fn new() -> Self {
        let mut ids = HashMap::new();
        ids.insert("", 0);
        Self {
            arena: Bump::new(),
            ids,
            strs: vec![""],
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.ids.get(s) {
            return id;
        }
        let arena_str: &str = self.arena.alloc_str(s);
        // SAFETY: the table lives in a static and its arena is never reset or
        // dropped, so strings allocated from it are valid for 'static.
        let arena_str: &'static str = unsafe { core::mem::transmute(arena_str) };
        let id = u32::try_from(self.strs.len()).unwrap_or(u32::MAX);
        tracing::trace!(id, text = arena_str, "interned new string");
        self.strs.push(arena_str);
        self.ids.insert(arena_str, id);
        id
    }
}

static TABLE: Lazy<Mutex<StringTable>> = Lazy::new(|| Mutex::new(StringTable::new()));

fn table() -> MutexGuard<'static, StringTable> {
    // Nothing in the table can be left half-updated by a panic, so a
    // poisoned lock is still usable.
    TABLE.lock().unwrap_or_else(PoisonError::into_inner)
}

impl UString {
    pub const EMPTY: UString = UString(0);

    /// Interns `s` and returns its handle.
    pub fn new(s: &str) -> Self {
        if s.is_empty() {
            return Self::EMPTY;
        }
        UString(table().intern(s))
    }

    /// Returns the handle for `s` only if it was already interned.
    pub fn lookup(s: &str) -> Option<Self> {
        if s.is_empty() {
            return Some(Self::EMPTY);
        }
        table().ids.get(s).map(|&id| UString(id))
    }

    /// Rebuilds a handle from its raw id, rejecting ids the table never
    /// issued.
    pub fn from_id(id: u32) -> Option<Self> {
        if id == 0 {
            return Some(Self::EMPTY);
        }
        ((id as usize) < table().strs.len()).then_some(UString(id))
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn as_str(self) -> &'static str {
        if self.0 == 0 {
            return "";
        }
        table().strs.get(self.0 as usize).copied().unwrap_or("")
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.as_str().len()
    }

    /// True if the text contains `c`.
    pub fn contains(self, c: char) -> bool {
        self.as_str().contains(c)
    }
}

impl From<&str> for UString {
    fn from(s: &str) -> Self {
        UString::new(s)
    }
}

impl From<&String> for UString {
    fn from(s: &String) -> Self {
        UString::new(s)
    }
}

impl From<UString> for &'static str {
    fn from(u: UString) -> Self {
        u.as_str()
    }
}

impl PartialEq<str> for UString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for UString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for UString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
