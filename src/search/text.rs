//! Text-search language profiles: how raw text turns into positioned lexemes.

use std::fmt;
use std::str::FromStr;

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "in",
    "into", "is", "it", "its", "of", "on", "or", "that", "the", "their", "this", "to", "was",
    "were", "will", "with",
];

/// Language profile applied to both documents and queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextProfile {
    /// Lower-cased alphanumeric words, nothing dropped.
    #[default]
    Simple,
    /// Like `Simple`, plus stop-word removal and light plural stemming.
    English,
}

/// A normalized word and its position in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub term: String,
    pub position: u32,
}

impl TextProfile {
    pub fn name(self) -> &'static str {
        match self {
            TextProfile::Simple => "simple",
            TextProfile::English => "english",
        }
    }

    /// Split `text` into lexemes. Stop words are dropped but still use up a position.
    pub fn lexemes(self, text: &str) -> Vec<Lexeme> {
        words(text)
            .enumerate()
            .filter_map(|(position, word)| {
                self.normalize(&word).map(|term| Lexeme {
                    term,
                    position: position as u32,
                })
            })
            .collect()
    }

    fn normalize(self, word: &str) -> Option<String> {
        match self {
            TextProfile::Simple => Some(word.to_string()),
            TextProfile::English => {
                if ENGLISH_STOP_WORDS.contains(&word) {
                    None
                } else {
                    Some(stem(word))
                }
            }
        }
    }
}

impl fmt::Display for TextProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(TextProfile::Simple),
            "english" => Ok(TextProfile::English),
            other => Err(format!("unknown text search profile: {}", other)),
        }
    }
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

fn stem(word: &str) -> String {
    let len = word.len();
    if len > 4 && word.ends_with("ies") {
        format!("{}y", &word[..len - 3])
    } else if len > 4 && word.ends_with("sses") {
        word[..len - 2].to_string()
    } else if len > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        word[..len - 1].to_string()
    } else {
        word.to_string()
    }
}
