use bookcase_core::{Book, BookId, FilterQuery, NotFound, Theme};
use tracing::debug;

use crate::{BookDetail, Catalogue, MatchSet, PageState, Projection, apply, project, resolve};

/// The browsing state of one user: last query, its match set, how many pages
/// are revealed, and the theme.
///
/// Every mutation happens inside a single `&mut self` call, so a projection
/// never sees a new match set with a stale page.
#[derive(Debug, Clone)]
pub struct BrowserSession {
    catalogue: Catalogue,
    query: FilterQuery,
    matches: MatchSet,
    page: PageState,
    theme: Theme,
}

impl BrowserSession {
    pub fn new(catalogue: Catalogue, page_size: usize, prefers_dark: bool) -> Self {
        let matches = MatchSet::all(&catalogue);
        Self {
            catalogue,
            query: FilterQuery::default(),
            matches,
            page: PageState::new(page_size),
            theme: Theme::from_prefers_dark(prefers_dark),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page.page()
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn projection(&self) -> Projection {
        project(&self.catalogue, &self.matches, &self.page)
    }

    pub fn submit_filter(&mut self, query: FilterQuery) -> Projection {
        self.matches = apply(&self.catalogue, &query);
        self.page.reset();
        debug!(
            title = %query.title,
            author = query.author.form_value(),
            genre = query.genre.form_value(),
            matches = self.matches.len(),
            "filter submitted"
        );
        self.query = query;
        self.projection()
    }

    pub fn show_more(&mut self) -> Projection {
        if self.page.advance(self.matches.len()) {
            debug!(page = self.page.page(), "page advanced");
        } else {
            debug!(page = self.page.page(), "show more ignored, nothing remaining");
        }
        self.projection()
    }

    pub fn select_item(&self, id: &BookId) -> Result<&Book, NotFound> {
        resolve(&self.catalogue, id)
    }

    pub fn detail(&self, id: &BookId) -> Result<BookDetail, NotFound> {
        let book = self.select_item(id)?;
        Ok(BookDetail::new(&self.catalogue, book))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        debug!(from = %self.theme, to = %theme, "theme set");
        self.theme = theme;
    }
}
