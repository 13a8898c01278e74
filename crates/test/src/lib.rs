//! Test helpers and fixtures.

use bookcase_application::Catalogue;
use bookcase_core::{AuthorId, Book, BookId, GenreId, LookupTable};

pub fn make_book(id: &str, title: &str, author: &str, genres: &[&str]) -> Book {
    Book {
        id: BookId::from(id),
        title: title.to_string(),
        author: AuthorId::from(author),
        genres: genres.iter().map(|g| GenreId::from(*g)).collect(),
        image: format!("https://covers.example.org/{id}.jpg"),
        description: format!("{title}, a fixture."),
        published: "1999-03-04T00:00:00.000Z"
            .parse()
            .expect("fixture timestamp parses"),
    }
}

pub fn make_authors() -> LookupTable<AuthorId> {
    [
        (AuthorId::from("herbert"), "Frank Herbert".to_string()),
        (AuthorId::from("leguin"), "Ursula K. Le Guin".to_string()),
        (AuthorId::from("butler"), "Octavia E. Butler".to_string()),
    ]
    .into_iter()
    .collect()
}

pub fn make_genres() -> LookupTable<GenreId> {
    [
        (GenreId::from("sf"), "Science Fiction".to_string()),
        (GenreId::from("fantasy"), "Fantasy".to_string()),
    ]
    .into_iter()
    .collect()
}

/// `count` filler books ("Volume N") cycling through the fixture authors.
pub fn make_catalogue(count: usize) -> Catalogue {
    make_catalogue_with(count, Vec::new())
}

/// Filler books followed by `extra`, all validated against the fixture tables.
pub fn make_catalogue_with(count: usize, extra: Vec<Book>) -> Catalogue {
    let authors = ["herbert", "leguin", "butler"];
    let mut books: Vec<Book> = (0..count)
        .map(|n| {
            let genre = if n % 2 == 0 { "sf" } else { "fantasy" };
            make_book(
                &format!("vol-{n}"),
                &format!("Volume {n}"),
                authors[n % authors.len()],
                &[genre],
            )
        })
        .collect();
    books.extend(extra);
    Catalogue::load(books, make_authors(), make_genres()).expect("fixture catalogue is valid")
}

#[cfg(test)]
mod tests {
    use bookcase_application::{BrowserSession, MatchSet, PageState, apply, project};
    use bookcase_core::{FilterChoice, FilterQuery, InvalidData, NotFound, Theme};

    use super::*;

    #[test]
    fn builds_catalogue() {
        let catalogue = make_catalogue(12);
        assert_eq!(catalogue.len(), 12);
    }

    #[test]
    fn twenty_five_books_first_page() {
        let session = BrowserSession::new(make_catalogue(25), 12, false);
        let projection = session.projection();
        assert_eq!(projection.items.len(), 12);
        assert_eq!(projection.remaining, 13);
        assert!(!projection.show_more_disabled);
    }

    #[test]
    fn twenty_five_books_after_two_show_mores() {
        let mut session = BrowserSession::new(make_catalogue(25), 12, false);
        session.show_more();
        let projection = session.show_more();
        assert_eq!(session.page(), 3);
        assert_eq!(projection.items.len(), 25);
        assert_eq!(projection.remaining, 0);
        assert!(projection.show_more_disabled);
    }

    #[test]
    fn show_more_advances_only_while_books_remain() {
        let mut session = BrowserSession::new(make_catalogue(30), 7, false);
        for _ in 0..10 {
            let before_page = session.page();
            let before_remaining = session.projection().remaining;
            session.show_more();
            if before_remaining > 0 {
                assert_eq!(session.page(), before_page + 1);
            } else {
                assert_eq!(session.page(), before_page);
            }
        }
        assert_eq!(session.page(), 5);
    }

    #[test]
    fn dune_found_in_any_case() {
        let dune = make_book("dune", "Dune", "herbert", &["sf"]);
        let catalogue = make_catalogue_with(20, vec![dune]);
        let mut session = BrowserSession::new(catalogue, 12, false);
        for title in ["dune", "Dune", "DUNE", "uN"] {
            let projection = session.submit_filter(FilterQuery::from_form(title, "any", "any"));
            assert_eq!(projection.total_matches, 1);
            assert_eq!(projection.items[0].id, BookId::from("dune"));
            assert_eq!(projection.items[0].author_name, "Frank Herbert");
        }
    }

    #[test]
    fn submit_always_returns_to_first_page() {
        let mut session = BrowserSession::new(make_catalogue(100), 10, false);
        let queries = [
            FilterQuery::default(),
            FilterQuery::from_form("", "leguin", "any"),
            FilterQuery::from_form("volume 1", "any", "sf"),
            FilterQuery::from_form("nothing here", "any", "any"),
        ];
        for query in queries {
            session.show_more();
            session.show_more();
            session.submit_filter(query);
            assert_eq!(session.page(), 1);
        }
    }

    #[test]
    fn genre_and_author_filters_combine() {
        let mut session = BrowserSession::new(make_catalogue(12), 36, false);
        let projection = session.submit_filter(FilterQuery {
            title: String::new(),
            author: FilterChoice::Selected(AuthorId::from("herbert")),
            genre: FilterChoice::Selected(GenreId::from("sf")),
        });
        // herbert writes volumes 0, 3, 6, 9; the even ones are sf.
        let ids: Vec<&str> = projection.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["vol-0", "vol-6"]);
    }

    #[test]
    fn identity_filter_returns_catalogue_order() {
        let catalogue = make_catalogue(17);
        let set = apply(&catalogue, &FilterQuery::from_form("", "any", "any"));
        assert_eq!(set, MatchSet::all(&catalogue));
        let titles: Vec<&str> = set.books(&catalogue).map(|b| b.title.as_str()).collect();
        let expected: Vec<&str> = catalogue.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn projection_is_stable_across_calls() {
        let catalogue = make_catalogue(40);
        let set = apply(&catalogue, &FilterQuery::from_form("1", "any", "any"));
        let page = PageState::new(5);
        assert_eq!(project(&catalogue, &set, &page), project(&catalogue, &set, &page));
    }

    #[test]
    fn unknown_selection_changes_nothing() {
        let mut session = BrowserSession::new(make_catalogue(25), 12, false);
        session.show_more();
        let page = session.page();
        let projection = session.projection();

        assert_eq!(
            session.select_item(&BookId::from("nonexistent-id")).unwrap_err(),
            NotFound(BookId::from("nonexistent-id"))
        );
        assert_eq!(session.page(), page);
        assert_eq!(session.projection(), projection);
    }

    #[test]
    fn invalid_catalogue_is_rejected() {
        let books = vec![make_book("x", "X", "tolkien", &["fantasy"])];
        let err = Catalogue::load(books, make_authors(), make_genres()).unwrap_err();
        assert!(matches!(err, InvalidData::UnknownAuthor { .. }));
    }

    #[test]
    fn bundled_catalogue_browses() -> anyhow::Result<()> {
        let catalogue = bookcase_storage::bundled_catalogue()?;
        let total = catalogue.len();
        let mut session = BrowserSession::new(catalogue, 36, true);
        assert_eq!(session.theme(), Theme::Night);

        let projection = session.projection();
        assert_eq!(projection.items.len(), 36);
        assert_eq!(projection.remaining, total - 36);

        let projection = session.submit_filter(FilterQuery::from_form("the", "any", "any"));
        assert!(projection.total_matches > 0);
        assert!(projection.total_matches < total);

        let projection = session.submit_filter(FilterQuery::from_form("", "wells", "scifi"));
        assert_eq!(projection.total_matches, 3);

        let detail = session.detail(&BookId::from("dracula"))?;
        assert_eq!(detail.subtitle, "Bram Stoker (1897)");

        session.set_theme(Theme::Day);
        assert_eq!(session.theme(), Theme::Day);
        Ok(())
    }
}
