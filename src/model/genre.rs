use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Fixed set of book genres. Serialized by code, searched by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum BookGenre {
    Fiction,
    NonFiction,
    Mystery,
    ScienceFiction,
    Fantasy,
    Biography,
    History,
    Children,
    Romance,
    SelfHelp,
}

impl BookGenre {
    pub const ALL: [BookGenre; 10] = [
        BookGenre::Fiction,
        BookGenre::NonFiction,
        BookGenre::Mystery,
        BookGenre::ScienceFiction,
        BookGenre::Fantasy,
        BookGenre::Biography,
        BookGenre::History,
        BookGenre::Children,
        BookGenre::Romance,
        BookGenre::SelfHelp,
    ];

    pub fn code(self) -> &'static str {
        match self {
            BookGenre::Fiction => "FICTION",
            BookGenre::NonFiction => "NON_FICTION",
            BookGenre::Mystery => "MYSTERY",
            BookGenre::ScienceFiction => "SCIENCE_FICTION",
            BookGenre::Fantasy => "FANTASY",
            BookGenre::Biography => "BIOGRAPHY",
            BookGenre::History => "HISTORY",
            BookGenre::Children => "CHILDREN",
            BookGenre::Romance => "ROMANCE",
            BookGenre::SelfHelp => "SELF_HELP",
        }
    }

    /// Human-readable name, used as the lowest-weight search field.
    pub fn label(self) -> &'static str {
        match self {
            BookGenre::Fiction => "Fiction",
            BookGenre::NonFiction => "Non-fiction",
            BookGenre::Mystery => "Mystery",
            BookGenre::ScienceFiction => "Science Fiction",
            BookGenre::Fantasy => "Fantasy",
            BookGenre::Biography => "Biography",
            BookGenre::History => "History",
            BookGenre::Children => "Children",
            BookGenre::Romance => "Romance",
            BookGenre::SelfHelp => "Self-help",
        }
    }
}

impl fmt::Display for BookGenre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BookGenre {
    type Err = CatalogError;

    /// Codes are matched ignoring case and surrounding whitespace.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = raw.trim().to_ascii_uppercase();
        BookGenre::ALL
            .into_iter()
            .find(|genre| genre.code() == code)
            .ok_or_else(|| CatalogError::BadRequest(format!("Unsupported genre: {}", raw.trim())))
    }
}

impl TryFrom<String> for BookGenre {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
