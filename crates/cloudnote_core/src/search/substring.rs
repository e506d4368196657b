//! Case-insensitive substring search.
//!
//! # Responsibility
//! - Match a query against note content and derived title.
//! - Yield matches lazily, in store order, without copying notes.
//!
//! # Invariants
//! - A blank query matches every note.
//! - Matching is Unicode case-insensitive; the query is treated literally.
//! - `NoteMatches` borrows the notes; a clone is an independent pass from
//!   the clone point, and `search_notes` always starts from the front.

use crate::model::note::Note;
use regex::{Regex, RegexBuilder};

/// Parsed search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    text: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    All,
    Pattern(Regex),
    // Fallback when the escaped literal exceeds regex size limits.
    Lowercase(String),
}

impl SearchQuery {
    /// Builds a query; a blank query matches everything, any other text
    /// is matched exactly as typed, spaces included.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let matcher = if text.trim().is_empty() {
            Matcher::All
        } else {
            match RegexBuilder::new(regex::escape(text.as_str()).as_str())
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => Matcher::Pattern(pattern),
                Err(_) => Matcher::Lowercase(text.to_lowercase()),
            }
        };
        Self { text, matcher }
    }

    /// Raw query text as entered.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Whether this query matches every note.
    pub fn is_match_all(&self) -> bool {
        matches!(self.matcher, Matcher::All)
    }

    /// Tests one note against content first, then its derived title.
    pub fn matches(&self, note: &Note) -> bool {
        match &self.matcher {
            Matcher::All => true,
            Matcher::Pattern(pattern) => {
                pattern.is_match(note.content.as_str()) || pattern.is_match(note.title().as_str())
            }
            Matcher::Lowercase(needle) => {
                note.content.to_lowercase().contains(needle.as_str())
                    || note.title().to_lowercase().contains(needle.as_str())
            }
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new("")
    }
}

/// Lazy iterator over notes matching a query.
#[derive(Debug, Clone)]
pub struct NoteMatches<'a> {
    notes: std::slice::Iter<'a, Note>,
    query: &'a SearchQuery,
}

impl<'a> Iterator for NoteMatches<'a> {
    type Item = &'a Note;

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query;
        self.notes.by_ref().find(|note| query.matches(note))
    }
}

/// Searches `notes` lazily in their given order.
pub fn search_notes<'a>(notes: &'a [Note], query: &'a SearchQuery) -> NoteMatches<'a> {
    NoteMatches {
        notes: notes.iter(),
        query,
    }
}
