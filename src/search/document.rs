//! Per-book search documents, rebuilt from current row state at query time.

use std::collections::HashMap;

use super::planner::SearchField;
use super::text::TextProfile;
use crate::model::Book;

/// Relevance weight class of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// Title.
    A,
    /// Author names.
    B,
    /// Genre labels.
    C,
}

impl Weight {
    pub fn value(self) -> f64 {
        match self {
            Weight::A => 1.0,
            Weight::B => 0.4,
            Weight::C => 0.2,
        }
    }
}

/// An occurrence of a term in a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence {
    pub position: u32,
    pub weight: Weight,
}

/// Positional, weighted term index over one or more text fields.
#[derive(Debug, Clone, Default)]
pub struct Document {
    terms: HashMap<String, Vec<Occurrence>>,
    next_position: u32,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str, weight: Weight, profile: TextProfile) -> Self {
        let mut document = Self::new();
        document.append(text, weight, profile);
        document
    }

    /// Append a field; its positions continue after the ones already indexed.
    pub fn append(&mut self, text: &str, weight: Weight, profile: TextProfile) {
        let base = self.next_position;
        for lexeme in profile.lexemes(text) {
            let position = base + lexeme.position;
            self.terms.entry(lexeme.term).or_default().push(Occurrence { position, weight });
            self.next_position = self.next_position.max(position + 1);
        }
    }

    /// Occurrences of `term`, in position order.
    pub fn occurrences(&self, term: &str) -> &[Occurrence] {
        self.terms.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_term_at(&self, term: &str, position: u32) -> bool {
        self.occurrences(term).iter().any(|o| o.position == position)
    }
}

/// The weighted fields of one book: title (A), authors (B), and the
/// concatenation of both with the genre labels (C).
#[derive(Debug, Clone)]
pub struct SearchDocument {
    title: Document,
    authors: Document,
    all: Document,
}

impl SearchDocument {
    /// `author_names` must be in credit order.
    pub fn build(book: &Book, author_names: &[String], profile: TextProfile) -> Self {
        let authors = author_names.join(" ");
        let genres = book
            .genres
            .iter()
            .map(|genre| genre.label())
            .collect::<Vec<_>>()
            .join(" ");

        let mut all = Document::new();
        all.append(&book.title, Weight::A, profile);
        all.append(&authors, Weight::B, profile);
        all.append(&genres, Weight::C, profile);

        Self {
            title: Document::from_text(&book.title, Weight::A, profile),
            authors: Document::from_text(&authors, Weight::B, profile),
            all,
        }
    }

    pub fn field(&self, field: SearchField) -> &Document {
        match field {
            SearchField::Title => &self.title,
            SearchField::Authors => &self.authors,
            SearchField::All => &self.all,
        }
    }
}
