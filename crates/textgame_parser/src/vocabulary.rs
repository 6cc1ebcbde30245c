//! Synonym table.
//!
//! Maps each synonym to its canonical word. Lookups are exact and
//! case-sensitive; words without an entry are returned unchanged.

use std::collections::HashMap;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::stdlib;

/// Flat synonym → canonical word table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vocabulary {
    words: HashMap<String, String>,
}

impl Vocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vocabulary holding the default verb and noun synonyms.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut vocabulary = Self::new();
        vocabulary.use_default_synonyms();
        vocabulary
    }

    /// Adds the default verb and noun synonyms.
    pub fn use_default_synonyms(&mut self) {
        self.update_synonyms(stdlib::VERB_SYNONYMS.iter().map(|(w, s)| (*w, s.iter().copied())));
        self.update_synonyms(stdlib::NOUN_SYNONYMS.iter().map(|(w, s)| (*w, s.iter().copied())));
    }

    /// Defines synonyms, given as `word → [synonyms]` pairs.
    ///
    /// A synonym defined twice maps to the word defined last.
    pub fn update_synonyms<I, W, L, S>(&mut self, synonyms: I)
    where
        I: IntoIterator<Item = (W, L)>,
        W: AsRef<str>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (word, syns) in synonyms {
            for syn in syns {
                self.add_synonym(word.as_ref(), syn);
            }
        }
    }

    /// Makes `synonym` an alias of `word`.
    pub fn add_synonym(&mut self, word: &str, synonym: impl Into<String>) {
        let synonym = synonym.into();
        debug!("synonym {synonym:?} -> {word:?}");
        self.words.insert(synonym, word.to_string());
    }

    /// Removes a synonym. Returns the word it pointed to.
    pub fn remove_synonym(&mut self, synonym: &str) -> Option<String> {
        self.words.remove(synonym)
    }

    /// Returns the canonical word for `word`, or `word` itself if it has none.
    #[must_use]
    pub fn lookup<'a>(&'a self, word: &'a str) -> &'a str {
        self.words.get(word).map_or(word, String::as_str)
    }

    /// Returns the number of synonyms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no synonyms are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
