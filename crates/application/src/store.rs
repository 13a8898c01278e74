use std::collections::HashMap;

use bookcase_core::{AuthorId, Book, BookId, DropdownOption, GenreId, InvalidData, LookupTable};
use tracing::debug;

/// The fixed, ordered list of books plus the author and genre tables.
///
/// Built once through [`Catalogue::load`], which enforces that every book
/// points at known authors and genres and that ids are unique. Never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct Catalogue {
    books: Vec<Book>,
    authors: LookupTable<AuthorId>,
    genres: LookupTable<GenreId>,
    positions: HashMap<BookId, usize>,
}

impl Catalogue {
    pub fn load(
        books: Vec<Book>,
        authors: LookupTable<AuthorId>,
        genres: LookupTable<GenreId>,
    ) -> Result<Self, InvalidData> {
        let mut positions = HashMap::with_capacity(books.len());
        for (idx, book) in books.iter().enumerate() {
            if positions.insert(book.id.clone(), idx).is_some() {
                return Err(InvalidData::DuplicateBook(book.id.clone()));
            }
            if !authors.contains(&book.author) {
                return Err(InvalidData::UnknownAuthor {
                    book: book.id.clone(),
                    author: book.author.clone(),
                });
            }
            if let Some(genre) = book.genres.iter().find(|g| !genres.contains(g)) {
                return Err(InvalidData::UnknownGenre {
                    book: book.id.clone(),
                    genre: genre.clone(),
                });
            }
        }

        debug!(
            books = books.len(),
            authors = authors.len(),
            genres = genres.len(),
            "catalogue loaded"
        );

        Ok(Self {
            books,
            authors,
            genres,
            positions,
        })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.positions.get(id).and_then(|idx| self.books.get(*idx))
    }

    pub fn authors(&self) -> &LookupTable<AuthorId> {
        &self.authors
    }

    pub fn genres(&self) -> &LookupTable<GenreId> {
        &self.genres
    }

    pub fn author_name(&self, book: &Book) -> &str {
        self.authors.name(&book.author).unwrap_or_default()
    }

    pub fn author_options(&self) -> Vec<DropdownOption<AuthorId>> {
        self.authors.dropdown("All Authors")
    }

    pub fn genre_options(&self) -> Vec<DropdownOption<GenreId>> {
        self.genres.dropdown("All Genres")
    }
}
