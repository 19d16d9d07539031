//! Rule tables - ordered `pattern -> replacement` lists for [`replace_all`].

use bytes::Bytes;

use super::Chain;
use crate::config::StreamConfig;
use crate::replacer::Replacer;

/// An ordered list of replacement rules.
///
/// Rule `i` becomes stage `i` of the chain built by [`replace_all`], so
/// later rules see the output of earlier ones.
pub trait RuleTable {
    /// Returns the number of rules.
    fn len(&self) -> usize;

    /// Returns rule `index` as `(pattern, replacement)` bytes.
    ///
    /// # Panics
    ///
    /// May panic if `index >= self.len()`.
    fn at(&self, index: usize) -> (Bytes, Bytes);

    /// Returns true if the table has no rules.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rules given as raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteRules {
    rules: Vec<(Bytes, Bytes)>,
}

impl ByteRules {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn add(&mut self, pattern: impl Into<Bytes>, replacement: impl Into<Bytes>) -> &mut Self {
        self.rules.push((pattern.into(), replacement.into()));
        self
    }
}

impl RuleTable for ByteRules {
    fn len(&self) -> usize {
        self.rules.len()
    }

    fn at(&self, index: usize) -> (Bytes, Bytes) {
        self.rules[index].clone()
    }
}

impl<P: Into<Bytes>, R: Into<Bytes>> FromIterator<(P, R)> for ByteRules {
    fn from_iter<I: IntoIterator<Item = (P, R)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(p, r)| (p.into(), r.into())).collect(),
        }
    }
}

/// Rules given as text; matched by their UTF-8 bytes.
///
/// # Example
///
/// ```
/// use replacers::{replace_all, transform_bytes, StringRules};
///
/// let mut rules = StringRules::new();
/// rules.add("Hello", "Hi").add("World", "Gophers");
///
/// let mut chain = replace_all(&rules);
/// assert_eq!(transform_bytes(&mut chain, b"Hello, World"), &b"Hi, Gophers"[..]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringRules {
    rules: Vec<(String, String)>,
}

impl StringRules {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn add(&mut self, pattern: impl Into<String>, replacement: impl Into<String>) -> &mut Self {
        self.rules.push((pattern.into(), replacement.into()));
        self
    }
}

impl RuleTable for StringRules {
    fn len(&self) -> usize {
        self.rules.len()
    }

    fn at(&self, index: usize) -> (Bytes, Bytes) {
        let (pattern, replacement) = &self.rules[index];
        (
            Bytes::copy_from_slice(pattern.as_bytes()),
            Bytes::copy_from_slice(replacement.as_bytes()),
        )
    }
}

impl<P: Into<String>, R: Into<String>> FromIterator<(P, R)> for StringRules {
    fn from_iter<I: IntoIterator<Item = (P, R)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(|(p, r)| (p.into(), r.into())).collect(),
        }
    }
}

/// Rules mapping one code point to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharRules {
    rules: Vec<(char, char)>,
}

impl CharRules {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn add(&mut self, pattern: char, replacement: char) -> &mut Self {
        self.rules.push((pattern, replacement));
        self
    }
}

impl RuleTable for CharRules {
    fn len(&self) -> usize {
        self.rules.len()
    }

    fn at(&self, index: usize) -> (Bytes, Bytes) {
        let (pattern, replacement) = self.rules[index];
        let mut buf = [0u8; 4];
        let pattern = Bytes::copy_from_slice(pattern.encode_utf8(&mut buf).as_bytes());
        let replacement = Bytes::copy_from_slice(replacement.encode_utf8(&mut buf).as_bytes());
        (pattern, replacement)
    }
}

impl FromIterator<(char, char)> for CharRules {
    fn from_iter<I: IntoIterator<Item = (char, char)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

/// Builds a chain with one fresh [`Replacer`] per rule, in table order.
pub fn replace_all<T: RuleTable + ?Sized>(table: &T) -> Chain<Replacer> {
    replace_all_with_config(table, &StreamConfig::default())
}

/// Like [`replace_all`], with link buffers sized by `config`.
pub fn replace_all_with_config<T: RuleTable + ?Sized>(
    table: &T,
    config: &StreamConfig,
) -> Chain<Replacer> {
    let stages = (0..table.len())
        .map(|i| {
            let (pattern, replacement) = table.at(i);
            Replacer::new(pattern, replacement)
        })
        .collect();
    Chain::with_link_capacity(stages, config.link_capacity())
}
