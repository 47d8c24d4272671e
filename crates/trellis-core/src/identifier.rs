//! Interned identifiers for stable cell keys.
//!
//! Keys are compared on every declaration of every pass, so they are interned
//! once and compared as symbols afterwards.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<T>(f: impl FnOnce(&mut DefaultStringInterner) -> T) -> T {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// A cheap, copyable identifier backed by the global interner.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::Id;
///
/// let a = Id::new("greeting");
/// let b: Id = "greeting".into();
/// assert_eq!(a, b);
/// assert_eq!(a, "greeting");
/// assert_eq!(a.to_string(), "greeting");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = with_interner(|interner| {
            interner
                .resolve(self.0)
                .map(str::to_owned)
                .expect("Symbol should exist in interner")
        });
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        with_interner(|interner| interner.get(*other)) == Some(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("button"), Id::new("button"));
        assert_ne!(Id::new("button"), Id::new("label"));
    }

    #[test]
    fn test_display_roundtrip() {
        let id = Id::from("small_text");
        assert_eq!(id.to_string(), "small_text");
    }

    #[test]
    fn test_str_comparison() {
        let id = Id::new("hello");
        assert!(id == "hello");
        assert!(id != "never-interned-name");
    }
}
