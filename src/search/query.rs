//! Web-search style text queries: parsing, matching and cover-density ranking.
//!
//! Syntax, per field:
//!
//! - `domain design` - both words must occur
//! - `"domain design"` - the words must be adjacent, in order
//! - `fantasy or mystery` - either side may match
//! - `-vampire` - the word must not occur

use super::document::{Document, Weight};
use super::text::TextProfile;

/// A word or phrase of the query. Offsets are relative to the first term.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    negated: bool,
    terms: Vec<(u32, String)>,
}

/// Where a clause occurs in a document.
#[derive(Debug, Clone, Copy)]
struct Hit {
    start: u32,
    end: u32,
    weight: Weight,
    item: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    /// OR of AND-ed clause lists.
    alternatives: Vec<Vec<Clause>>,
}

impl TextQuery {
    pub fn parse(raw: &str, profile: TextProfile) -> Self {
        let mut alternatives: Vec<Vec<Clause>> = vec![Vec::new()];
        let mut chars = raw.chars().peekable();

        loop {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            let Some(&first) = chars.peek() else {
                break;
            };

            let mut negated = false;
            if first == '-' {
                chars.next();
                match chars.peek() {
                    Some(c) if !c.is_whitespace() => negated = true,
                    _ => continue,
                }
            }

            let quoted = chars.next_if_eq(&'"').is_some();
            let mut text = String::new();
            if quoted {
                for c in chars.by_ref() {
                    if c == '"' {
                        break;
                    }
                    text.push(c);
                }
            } else {
                while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '"') {
                    text.push(c);
                }
            }

            if !quoted && !negated && text.eq_ignore_ascii_case("or") {
                if alternatives.last().is_some_and(|alt| !alt.is_empty()) {
                    alternatives.push(Vec::new());
                }
                continue;
            }

            let lexemes = profile.lexemes(&text);
            let Some(base) = lexemes.first().map(|l| l.position) else {
                continue;
            };
            let terms = lexemes
                .into_iter()
                .map(|l| (l.position - base, l.term))
                .collect();
            if let Some(current) = alternatives.last_mut() {
                current.push(Clause { negated, terms });
            }
        }

        alternatives.retain(|alt| !alt.is_empty());
        Self { alternatives }
    }

    /// A query without any lexeme (e.g. only stop words) matches nothing.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.alternatives.iter().any(|alt| {
            alt.iter()
                .all(|clause| clause.occurs_in(document) != clause.negated)
        })
    }

    /// Cover-density relevance of `document`.
    ///
    /// A cover is a minimal position range in which the query holds. Each
    /// cover adds `w / (1 + noise)`, where `w` is the harmonic mean of the
    /// weights of the hits inside it and `noise` the number of positions in
    /// the range that no hit occupies. Negated clauses do not take part.
    pub fn rank(&self, document: &Document) -> f64 {
        let mut items: Vec<&Clause> = Vec::new();
        let mut required: Vec<Vec<usize>> = Vec::new();
        for alt in &self.alternatives {
            let mut needs = Vec::new();
            for clause in alt.iter().filter(|c| !c.negated) {
                needs.push(items.len());
                items.push(clause);
            }
            if !needs.is_empty() {
                required.push(needs);
            }
        }

        let mut hits: Vec<Hit> = items
            .iter()
            .enumerate()
            .flat_map(|(item, clause)| clause.hits(document, item))
            .collect();
        if hits.is_empty() {
            return 0.0;
        }
        hits.sort_by_key(|hit| (hit.start, hit.end));

        let covered = |begin: u32, end: u32| -> bool {
            let mut present = vec![false; items.len()];
            for hit in hits.iter().filter(|h| h.start >= begin && h.end <= end) {
                present[hit.item] = true;
            }
            required.iter().any(|needs| needs.iter().all(|&i| present[i]))
        };

        let mut ends: Vec<u32> = hits.iter().map(|h| h.end).collect();
        ends.sort_unstable();
        ends.dedup();

        let mut score = 0.0;
        let mut from = hits[0].start;
        loop {
            let Some(end) = ends.iter().copied().find(|&e| e >= from && covered(from, e)) else {
                break;
            };
            let Some(begin) = hits
                .iter()
                .rev()
                .map(|h| h.start)
                .filter(|&s| s >= from && s <= end)
                .find(|&s| covered(s, end))
            else {
                break;
            };

            score += cover_score(&hits, begin, end);
            from = begin + 1;
        }
        score
    }
}

impl Clause {
    fn hits(&self, document: &Document, item: usize) -> Vec<Hit> {
        let Some((_, head)) = self.terms.first() else {
            return Vec::new();
        };
        let span = self.terms.last().map(|(offset, _)| *offset).unwrap_or(0);

        document
            .occurrences(head)
            .iter()
            .filter(|occ| {
                self.terms
                    .iter()
                    .skip(1)
                    .all(|(offset, term)| document.has_term_at(term, occ.position + offset))
            })
            .map(|occ| Hit {
                start: occ.position,
                end: occ.position + span,
                weight: occ.weight,
                item,
            })
            .collect()
    }

    fn occurs_in(&self, document: &Document) -> bool {
        !self.hits(document, 0).is_empty()
    }
}

fn cover_score(hits: &[Hit], begin: u32, end: u32) -> f64 {
    let inside: Vec<&Hit> = hits
        .iter()
        .filter(|h| h.start >= begin && h.end <= end)
        .collect();

    let mut occupied: Vec<u32> = inside.iter().flat_map(|h| h.start..=h.end).collect();
    occupied.sort_unstable();
    occupied.dedup();

    let width = (end - begin + 1) as usize;
    let noise = width.saturating_sub(occupied.len());
    let inverse: f64 = inside.iter().map(|h| 1.0 / h.weight.value()).sum();
    let weight = inside.len() as f64 / inverse;

    weight / (1.0 + noise as f64)
}
