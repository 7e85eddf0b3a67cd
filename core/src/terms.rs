//! Term interning.
//!
//! Every distinct word of the corpus is stored once in the [`TermStore`]. The
//! forward and inverted halves of the index hold [`Term`] handles into that
//! storage. A handle is a shared pointer, so it stays valid for as long as
//! anyone holds it. The store counts how many live documents use each term and
//! drops its canonical copy when the last one is removed.

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Cheap, clonable handle to an interned word.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(Arc<str>);

impl Term {
    pub fn as_str(&self) -> &str { &self.0 }

    /// True if both handles point at the same interned allocation.
    pub fn ptr_eq(&self, other: &Term) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str { &self.0 }
}

impl Deref for Term {
    type Target = str;
    fn deref(&self) -> &str { &self.0 }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&*self.0, f) }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Owner of the canonical copy of each term, keyed by term with a count of
/// documents referencing it.
#[derive(Debug, Default)]
pub struct TermStore {
    terms: HashMap<Term, usize>,
}

impl TermStore {
    pub fn new() -> Self { Self::default() }

    /// Return the canonical handle for `word`, interning it on first use, and
    /// record one more document referencing it.
    pub fn acquire(&mut self, word: &str) -> Term {
        let term = match self.terms.get_key_value(word) {
            Some((term, _)) => term.clone(),
            None => Term(Arc::from(word)),
        };
        *self.terms.entry(term.clone()).or_insert(0) += 1;
        term
    }

    /// Record that one document no longer references `term`. The canonical copy
    /// is dropped once no document does.
    pub fn release(&mut self, term: &str) {
        if let Some(count) = self.terms.get_mut(term) {
            *count -= 1;
            if *count == 0 {
                self.terms.remove(term);
            }
        }
    }

    /// Canonical handle for `word`, if any live document contains it.
    pub fn get(&self, word: &str) -> Option<&Term> {
        self.terms.get_key_value(word).map(|(t, _)| t)
    }

    /// Number of live documents that reference `word`.
    pub fn ref_count(&self, word: &str) -> usize {
        self.terms.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}
