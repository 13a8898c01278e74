//! Core domain types for Bookcase.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: usize = 36;
pub const MAX_PAGE_SIZE: usize = 500;

/// Form value that stands for "no restriction" in author/genre dropdowns.
pub const ANY_VALUE: &str = "any";

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(BookId);
string_id!(AuthorId);
string_id!(GenreId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: AuthorId,
    pub genres: Vec<GenreId>,
    pub image: String,
    pub description: String,
    pub published: Timestamp,
}

impl Book {
    pub fn published_year(&self) -> i16 {
        self.published.to_zoned(TimeZone::UTC).year()
    }
}

/// Id to display-name table for authors or genres. Keeps entries in the order
/// they were inserted (or appeared in the source document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable<K: Ord> {
    entries: Vec<(K, String)>,
    index: BTreeMap<K, usize>,
}

impl<K: Ord> Default for LookupTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> FromIterator<(K, String)> for LookupTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, String)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (id, name) in iter {
            table.insert(id, name);
        }
        table
    }
}

impl<K: Ord + Clone> LookupTable<K> {
    /// Adds an entry at the end, or renames an existing id in place.
    pub fn insert(&mut self, id: K, name: String) {
        match self.index.get(&id) {
            Some(&pos) => self.entries[pos].1 = name,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, name));
            }
        }
    }

    pub fn name(&self, id: &K) -> Option<&str> {
        self.index
            .get(id)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &str)> {
        self.entries.iter().map(|(id, name)| (id, name.as_str()))
    }

    /// Options for a filter dropdown: the placeholder first, then every entry
    /// in table order.
    pub fn dropdown(&self, placeholder: &str) -> Vec<DropdownOption<K>> {
        let mut out = Vec::with_capacity(self.len() + 1);
        out.push(DropdownOption {
            choice: FilterChoice::Any,
            label: placeholder.to_string(),
        });
        out.extend(self.iter().map(|(id, name)| DropdownOption {
            choice: FilterChoice::Selected(id.clone()),
            label: name.to_string(),
        }));
        out
    }
}

impl<K: Ord + Serialize> Serialize for LookupTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(id, name)| (id, name)))
    }
}

impl<'de, K: Ord + Clone + Deserialize<'de>> Deserialize<'de> for LookupTable<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor<K>(PhantomData<K>);

        impl<'de, K: Ord + Clone + Deserialize<'de>> Visitor<'de> for TableVisitor<K> {
            type Value = LookupTable<K>;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of id to display name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut table = LookupTable::default();
                while let Some((id, name)) = map.next_entry::<K, String>()? {
                    table.insert(id, name);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption<K> {
    pub choice: FilterChoice<K>,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterChoice<K> {
    #[default]
    Any,
    Selected(K),
}

impl<K: From<String>> FilterChoice<K> {
    /// Decodes a submitted dropdown value; blank and `any` mean no restriction.
    pub fn from_form_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ANY_VALUE {
            Self::Any
        } else {
            Self::Selected(K::from(value.to_string()))
        }
    }
}

impl<K: AsRef<str>> FilterChoice<K> {
    pub fn form_value(&self) -> &str {
        match self {
            FilterChoice::Any => ANY_VALUE,
            FilterChoice::Selected(id) => id.as_ref(),
        }
    }
}

impl<K: PartialEq> FilterChoice<K> {
    pub fn admits(&self, value: &K) -> bool {
        match self {
            FilterChoice::Any => true,
            FilterChoice::Selected(wanted) => wanted == value,
        }
    }

    /// True when any of `values` is admitted; `Any` admits even an empty list.
    pub fn admits_any(&self, values: &[K]) -> bool {
        match self {
            FilterChoice::Any => true,
            FilterChoice::Selected(_) => values.iter().any(|value| self.admits(value)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub title: String,
    pub author: FilterChoice<AuthorId>,
    pub genre: FilterChoice<GenreId>,
}

impl FilterQuery {
    pub fn from_form(title: &str, author: &str, genre: &str) -> Self {
        Self {
            title: title.to_string(),
            author: FilterChoice::from_form_value(author),
            genre: FilterChoice::from_form_value(genre),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.title.trim().is_empty()
            && self.author == FilterChoice::Any
            && self.genre == FilterChoice::Any
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The two colour channels a renderer paints with: `dark` for text and
/// borders, `light` for backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub dark: Rgb,
    pub light: Rgb,
}

const INK: Rgb = Rgb(10, 10, 20);
const PAPER: Rgb = Rgb(255, 255, 255);

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Night } else { Theme::Day }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Day => ThemePalette {
                dark: INK,
                light: PAPER,
            },
            Theme::Night => ThemePalette {
                dark: PAPER,
                light: INK,
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Theme::Day),
            "night" => Ok(Theme::Night),
            _ => Err("unknown theme"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: usize,
    pub catalogue_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            catalogue_path: None,
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self.catalogue_path = self
            .catalogue_path
            .take()
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty());
    }
}

/// Catalogue data that violates the reference invariants. Fatal at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidData {
    #[error("book {book} references unknown author {author}")]
    UnknownAuthor { book: BookId, author: AuthorId },

    #[error("book {book} references unknown genre {genre}")]
    UnknownGenre { book: BookId, genre: GenreId },

    #[error("duplicate book id {0}")]
    DuplicateBook(BookId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no book with id {0}")]
pub struct NotFound(pub BookId);
