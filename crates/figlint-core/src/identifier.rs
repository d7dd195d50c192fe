//! Shape identifiers backed by a global string interner.
//!
//! Every shape in a figure carries an [`Id`]. Identifiers come from the
//! element's `id` attribute or are synthesized by the parser, and they are
//! compared and hashed as interned symbols.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Interned shape identifier.
///
/// Equality and hashing work on the interned symbol. Ordering compares the
/// underlying strings, which gives unordered shape pairs a stable canonical
/// form regardless of interning order.
///
/// # Examples
///
/// ```
/// use figlint_core::identifier::Id;
///
/// let arrow = Id::new("arrow");
/// assert_eq!(arrow.segment(2), "arrow_seg2");
/// assert_eq!(Id::synthesized(7), "elem_7");
/// assert!(Id::new("a") < Id::new("b"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates the placeholder name given to an element without an `id`.
    ///
    /// `index` is the 1-based document-order position of the element.
    pub fn synthesized(index: usize) -> Self {
        Self::new(&format!("elem_{index}"))
    }

    /// Creates the identifier of the `index`-th segment of a flattened path.
    pub fn segment(&self, index: usize) -> Self {
        self.with_suffix(&format!("_seg{index}"))
    }

    /// Creates the identifier of the marker drawn at the end of this line.
    pub fn marker(&self) -> Self {
        self.with_suffix(":marker")
    }

    fn with_suffix(&self, suffix: &str) -> Self {
        with_interner(|interner| {
            let base = interner
                .resolve(self.0)
                .map(str::to_string)
                .unwrap_or_default();
            Self(interner.get_or_intern(format!("{base}{suffix}")))
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| interner.resolve(self.0).map(str::to_string));
        write!(f, "{}", value.unwrap_or_default())
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        self.to_string().cmp(&other.to_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_interning_is_stable() {
        let first = Id::new("box1");
        let second = Id::new("box1");
        assert_eq!(first, second);
        assert_ne!(first, Id::new("box2"));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(Id::new("label").to_string(), "label");
    }

    #[test]
    fn test_synthesized_name() {
        assert_eq!(Id::synthesized(1), "elem_1");
        assert_eq!(Id::synthesized(42), "elem_42");
    }

    #[test]
    fn test_segment_and_marker_suffixes() {
        let path = Id::new("connector");
        assert_eq!(path.segment(0), "connector_seg0");
        assert_eq!(path.marker(), "connector:marker");
    }

    #[test]
    fn test_ordering_follows_strings() {
        // Intern in reverse order so symbol order disagrees with string order
        let zeta = Id::new("zeta_order_test");
        let alpha = Id::new("alpha_order_test");
        assert!(alpha < zeta);
        assert_eq!(alpha.cmp(&alpha), Ordering::Equal);
    }
}
