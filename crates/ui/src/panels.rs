use bookcase_application::BrowserSession;
use bookcase_core::{AuthorId, DropdownOption, FilterChoice, FilterQuery, GenreId, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SearchField {
    #[default]
    Title,
    Author,
    Genre,
}

impl SearchField {
    pub(crate) fn next(self) -> Self {
        match self {
            SearchField::Title => SearchField::Author,
            SearchField::Author => SearchField::Genre,
            SearchField::Genre => SearchField::Title,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            SearchField::Title => SearchField::Genre,
            SearchField::Author => SearchField::Title,
            SearchField::Genre => SearchField::Author,
        }
    }
}

/// Search form state. Edits stay local until submitted, so cancelling
/// leaves the session untouched.
#[derive(Debug, Default)]
pub(crate) struct SearchPanel {
    pub open: bool,
    pub focus: SearchField,
    pub title: String,
    pub authors: Vec<DropdownOption<AuthorId>>,
    pub genres: Vec<DropdownOption<GenreId>>,
    pub author_idx: usize,
    pub genre_idx: usize,
}

impl SearchPanel {
    /// Opens the form prefilled with the session's last submitted query.
    pub(crate) fn open_for(&mut self, session: &BrowserSession) {
        let query = session.query();
        self.authors = session.catalogue().author_options();
        self.genres = session.catalogue().genre_options();
        self.title = query.title.clone();
        self.author_idx = position_of(&self.authors, &query.author);
        self.genre_idx = position_of(&self.genres, &query.genre);
        self.focus = SearchField::Title;
        self.open = true;
    }

    pub(crate) fn query(&self) -> FilterQuery {
        FilterQuery {
            title: self.title.clone(),
            author: choice_at(&self.authors, self.author_idx),
            genre: choice_at(&self.genres, self.genre_idx),
        }
    }

    /// Steps the focused dropdown; no-op on the title field.
    pub(crate) fn cycle(&mut self, forward: bool) {
        match self.focus {
            SearchField::Title => {}
            SearchField::Author => {
                self.author_idx = step(self.author_idx, self.authors.len(), forward);
            }
            SearchField::Genre => {
                self.genre_idx = step(self.genre_idx, self.genres.len(), forward);
            }
        }
    }

    pub(crate) fn author_label(&self) -> &str {
        label_at(&self.authors, self.author_idx)
    }

    pub(crate) fn genre_label(&self) -> &str {
        label_at(&self.genres, self.genre_idx)
    }
}

#[derive(Debug)]
pub(crate) struct SettingsPanel {
    pub open: bool,
    pub theme: Theme,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self {
            open: false,
            theme: Theme::Day,
        }
    }
}

fn position_of<K: PartialEq>(options: &[DropdownOption<K>], choice: &FilterChoice<K>) -> usize {
    options
        .iter()
        .position(|option| &option.choice == choice)
        .unwrap_or(0)
}

fn choice_at<K: Clone>(options: &[DropdownOption<K>], idx: usize) -> FilterChoice<K> {
    options
        .get(idx)
        .map(|option| option.choice.clone())
        .unwrap_or(FilterChoice::Any)
}

fn label_at<K>(options: &[DropdownOption<K>], idx: usize) -> &str {
    options
        .get(idx)
        .map(|option| option.label.as_str())
        .unwrap_or_default()
}

fn step(idx: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    }
}
