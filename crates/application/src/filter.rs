use bookcase_core::{Book, FilterQuery};

use crate::Catalogue;

/// Catalogue positions of the books that satisfied the last submitted query,
/// in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    positions: Vec<usize>,
}

impl MatchSet {
    pub fn all(catalogue: &Catalogue) -> Self {
        Self {
            positions: (0..catalogue.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn books<'a>(&'a self, catalogue: &'a Catalogue) -> impl Iterator<Item = &'a Book> + 'a {
        self.positions
            .iter()
            .filter_map(|idx| catalogue.books().get(*idx))
    }
}

struct Matcher<'q> {
    query: &'q FilterQuery,
    title: Option<String>,
}

impl<'q> Matcher<'q> {
    fn new(query: &'q FilterQuery) -> Self {
        // A whitespace-only title means "no title filter"; anything else is
        // matched as typed.
        let title = if query.title.trim().is_empty() {
            None
        } else {
            Some(query.title.to_lowercase())
        };
        Self { query, title }
    }

    fn matches(&self, book: &Book) -> bool {
        let title_ok = self
            .title
            .as_deref()
            .is_none_or(|needle| book.title.to_lowercase().contains(needle));

        title_ok
            && self.query.author.admits(&book.author)
            && self.query.genre.admits_any(&book.genres)
    }
}

pub fn matches(query: &FilterQuery, book: &Book) -> bool {
    Matcher::new(query).matches(book)
}

/// Runs `query` over the whole catalogue. Never narrows a previous result,
/// so relaxing a filter brings hidden books back.
pub fn apply(catalogue: &Catalogue, query: &FilterQuery) -> MatchSet {
    let matcher = Matcher::new(query);
    let positions = catalogue
        .books()
        .iter()
        .enumerate()
        .filter(|(_, book)| matcher.matches(book))
        .map(|(idx, _)| idx)
        .collect();
    MatchSet { positions }
}
