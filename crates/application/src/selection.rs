use bookcase_core::{Book, BookId, NotFound};

use crate::Catalogue;

pub fn resolve<'a>(catalogue: &'a Catalogue, id: &BookId) -> Result<&'a Book, NotFound> {
    catalogue.get(id).ok_or_else(|| NotFound(id.clone()))
}

/// Content of the detail overlay for one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub id: BookId,
    pub title: String,
    /// `"<author> (<year>)"`.
    pub subtitle: String,
    pub description: String,
    pub image: String,
}

impl BookDetail {
    pub fn new(catalogue: &Catalogue, book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            subtitle: format!(
                "{} ({})",
                catalogue.author_name(book),
                book.published_year()
            ),
            description: book.description.clone(),
            image: book.image.clone(),
        }
    }
}
