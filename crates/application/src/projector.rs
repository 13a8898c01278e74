use bookcase_core::BookId;

use crate::{Catalogue, MatchSet, PageState};

/// One grid cell. `id` travels with the cell so a click resolves straight to
/// the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewItem {
    pub id: BookId,
    pub title: String,
    pub author_name: String,
    pub image: String,
}

/// Render-ready view of the current match set and page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub items: Vec<PreviewItem>,
    pub remaining: usize,
    pub show_more_disabled: bool,
    pub total_matches: usize,
}

impl Projection {
    /// True when the filter matched nothing; renderers show a "no results"
    /// message instead of the grid.
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    pub fn show_more_label(&self) -> String {
        format!("Show more ({})", self.remaining)
    }
}

pub fn project(catalogue: &Catalogue, matches: &MatchSet, page: &PageState) -> Projection {
    let total = matches.len();
    let remaining = page.remaining(total);
    let items = matches
        .books(catalogue)
        .take(page.window_end(total))
        .map(|book| PreviewItem {
            id: book.id.clone(),
            title: book.title.clone(),
            author_name: catalogue.author_name(book).to_string(),
            image: book.image.clone(),
        })
        .collect();

    Projection {
        items,
        remaining,
        show_more_disabled: remaining < 1,
        total_matches: total,
    }
}
