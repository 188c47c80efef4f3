use crate::config::{BookFormat, Config};
use crate::library::book::{Book, Category};
use crate::library::query::{
    self, CategoryFilter, FormatFilter, Query, QueryParams, SortDirection, SortField, SortKey,
};
use crate::library::{Catalog, collate, fixture};
use crate::server::{AppState, create_router};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use std::cmp::Ordering;
use std::io::Write;
use tower::ServiceExt;

fn book(id: &str, title: &str, category: &str, format: BookFormat) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: "Anonymous".to_string(),
        description: String::new(),
        year: 1900,
        pages: 10,
        category: category.to_string(),
        format,
        cover_url: String::new(),
    }
}

/// Log sink shared between a test and its subscriber.
#[derive(Clone, Default)]
struct LogBuffer(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

fn ids(books: &[&Book]) -> Vec<String> {
    books.iter().map(|b| b.id.clone()).collect()
}

fn sample_queries() -> Vec<Query> {
    vec![
        Query::default(),
        Query {
            search: "the".to_string(),
            ..Query::default()
        },
        Query {
            category: CategoryFilter::Only("philosophy".to_string()),
            format: FormatFilter::Only(BookFormat::Pdf),
            sort: SortKey::new(SortField::Year, SortDirection::Desc),
            ..Query::default()
        },
        Query {
            search: "an".to_string(),
            format: FormatFilter::Only(BookFormat::Epub),
            sort: SortKey::new(SortField::Author, SortDirection::Asc),
            ..Query::default()
        },
    ]
}

fn test_state() -> AppState {
    AppState::new(Config::default(), Catalog::builtin())
}

async fn get(uri: &str) -> axum::response::Response {
    create_router(test_state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

// ============================================================================
// QUERY ENGINE
// ============================================================================

#[test]
fn engine_default_query_returns_everything_by_title() {
    let books = fixture::books();
    let result = query::evaluate(&books, &Query::default());

    assert_eq!(result.len(), books.len());
    for pair in result.windows(2) {
        assert_ne!(
            collate::compare(&pair[0].title, &pair[1].title),
            Ordering::Greater
        );
    }

    let mut seen: Vec<&str> = result.iter().map(|b| b.id.as_str()).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), books.len());
}

#[test]
fn engine_is_idempotent() {
    let books = fixture::books();

    for q in sample_queries() {
        let once: Vec<Book> = query::evaluate(&books, &q).into_iter().cloned().collect();
        let twice = query::evaluate(&once, &q);
        assert_eq!(ids(&twice), once.iter().map(|b| b.id.clone()).collect::<Vec<_>>());
    }
}

#[test]
fn engine_results_respect_filters() {
    let books = fixture::books();

    for q in sample_queries() {
        let needle = q.search.to_lowercase();
        for b in query::evaluate(&books, &q) {
            if let CategoryFilter::Only(id) = &q.category {
                assert_eq!(&b.category, id);
            }
            if let FormatFilter::Only(format) = q.format {
                assert_eq!(b.format, format);
            }
            if !needle.is_empty() {
                assert!(
                    b.title.to_lowercase().contains(&needle)
                        || b.author.to_lowercase().contains(&needle)
                        || b.description.to_lowercase().contains(&needle)
                );
            }
        }
    }
}

#[test]
fn engine_does_not_touch_input() {
    let books = fixture::books();
    let before = books.clone();

    let q = Query {
        sort: SortKey::new(SortField::Year, SortDirection::Desc),
        ..Query::default()
    };
    let result = query::evaluate(&books, &q);

    assert_eq!(books, before);
    assert!(std::ptr::eq(result[0], books.iter().max_by_key(|b| b.year).unwrap()));
}

#[test]
fn engine_text_filter_ignores_category_field() {
    let mut primer = book("primer", "A Primer", "history", BookFormat::Pdf);
    primer.description = "An introduction to philosophy for beginners.".to_string();
    let books = vec![primer, book("other", "Other", "philosophy", BookFormat::Pdf)];

    let q = Query::from_params(&QueryParams {
        search: Some("phil".to_string()),
        category: Some("all".to_string()),
        format: Some("all".to_string()),
        sort: None,
    });

    assert_eq!(ids(&query::evaluate(&books, &q)), vec!["primer"]);
}

#[test]
fn engine_unknown_category_matches_nothing() {
    let books = fixture::books();
    let q = Query {
        category: CategoryFilter::parse(Some("nonexistent-id")),
        ..Query::default()
    };

    assert!(query::evaluate(&books, &q).is_empty());
}

#[test]
fn engine_uncategorized_book_only_shows_under_all() {
    let books = vec![
        book("orphan", "Orphan", "poetry", BookFormat::Epub),
        book("known", "Known", "drama", BookFormat::Epub),
    ];

    let all = query::evaluate(&books, &Query::default());
    assert_eq!(ids(&all), vec!["known", "orphan"]);

    let drama = Query {
        category: CategoryFilter::Only("drama".to_string()),
        ..Query::default()
    };
    assert_eq!(ids(&query::evaluate(&books, &drama)), vec!["known"]);
}

#[test]
fn engine_category_match_is_case_sensitive() {
    let books = vec![book("1", "One", "drama", BookFormat::Pdf)];
    let q = Query {
        category: CategoryFilter::Only("Drama".to_string()),
        ..Query::default()
    };

    assert!(query::evaluate(&books, &q).is_empty());
}

#[test]
fn engine_empty_collection() {
    let books: Vec<Book> = Vec::new();
    for q in sample_queries() {
        assert!(query::evaluate(&books, &q).is_empty());
    }
}

#[test]
fn engine_title_sort_uses_collation() {
    let books = vec![
        book("z", "zebra", "x", BookFormat::Pdf),
        book("e", "Éclair", "x", BookFormat::Pdf),
        book("a", "Apple", "x", BookFormat::Pdf),
    ];

    assert_eq!(ids(&query::evaluate(&books, &Query::default())), vec!["a", "e", "z"]);

    let desc = Query {
        sort: SortKey::new(SortField::Title, SortDirection::Desc),
        ..Query::default()
    };
    assert_eq!(ids(&query::evaluate(&books, &desc)), vec!["z", "e", "a"]);
}

// ============================================================================
// CATALOG
// ============================================================================

#[test]
fn catalog_builtin_is_valid() {
    let catalog = Catalog::new(fixture::books(), fixture::categories()).unwrap();

    for b in catalog.books() {
        assert!(catalog.category(&b.category).is_some(), "{}", b.id);
    }
}

#[test]
fn catalog_rejects_duplicate_book_ids() {
    let books = vec![
        book("dup", "One", "drama", BookFormat::Pdf),
        book("dup", "Two", "drama", BookFormat::Pdf),
    ];

    assert!(Catalog::new(books, fixture::categories()).is_err());
}

#[test]
fn catalog_rejects_duplicate_category_ids() {
    let mut categories = fixture::categories();
    categories.push(categories[0].clone());

    assert!(Catalog::new(Vec::new(), categories).is_err());
}

#[test]
fn catalog_rejects_invalid_books() {
    let empty_title = book("1", "  ", "drama", BookFormat::Pdf);
    assert!(Catalog::new(vec![empty_title], Vec::new()).is_err());

    let mut no_author = book("2", "Title", "drama", BookFormat::Pdf);
    no_author.author = String::new();
    assert!(Catalog::new(vec![no_author], Vec::new()).is_err());

    let mut no_pages = book("3", "Title", "drama", BookFormat::Pdf);
    no_pages.pages = 0;
    assert!(Catalog::new(vec![no_pages], Vec::new()).is_err());
}

#[test]
fn catalog_accepts_unknown_book_category() {
    let books = vec![book("1", "One", "poetry", BookFormat::Pdf)];
    let catalog = Catalog::new(books, fixture::categories()).unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn catalog_live_counts_ignore_advertised_count() {
    let catalog = Catalog::builtin();
    let counts = catalog.live_counts();

    let (drama, live) = counts.iter().find(|(c, _)| c.id == "drama").unwrap();
    assert_eq!(*live, 3);
    assert_eq!(drama.count, 650);

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    assert_eq!(total, catalog.len());
}

#[test]
fn catalog_format_counts() {
    let catalog = Catalog::builtin();
    let total: usize = catalog.format_counts().iter().map(|(_, n)| n).sum();
    assert_eq!(total, catalog.len());
}

#[test]
fn catalog_load_from_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[categories]]
id = "poetry"
name = "Poetry"
icon = "🪶"
count = 40

[[books]]
id = "leaves-of-grass"
title = "Leaves of Grass"
author = "Walt Whitman"
description = "A collection celebrating the self and democracy."
year = 1855
pages = 95
category = "poetry"
format = "epub"

[[books]]
id = "odes"
title = "Odes"
author = "Horace"
year = -23
pages = 120
category = "poetry"
format = "pdf"
"#
    )
    .unwrap();

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.categories()[0].name, "Poetry");

    let odes = catalog.get_book("odes").unwrap();
    assert_eq!(odes.year_display(), "23 BC");
    assert_eq!(odes.description, "");
    assert_eq!(odes.format, BookFormat::Pdf);
}

#[test]
fn catalog_load_warns_about_unknown_category() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[books]]
id = "beowulf"
title = "Beowulf"
author = "Anonymous"
year = 1000
pages = 60
category = "epic"
format = "pdf"
"#
    )
    .unwrap();

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(crate::DEFAULT_LOG_FILTER))
        .with_writer(move || writer.clone())
        .finish();

    let catalog =
        tracing::subscriber::with_default(subscriber, || Catalog::load(file.path())).unwrap();
    assert_eq!(catalog.len(), 1);

    let output = logs.contents();
    assert!(output.contains("Book references unknown category"));
    assert!(output.contains("beowulf"));
}

#[test]
fn catalog_load_rejects_bad_format() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[books]]
id = "x"
title = "X"
author = "Y"
year = 1
pages = 1
category = "z"
format = "mobi"
"#
    )
    .unwrap();

    assert!(Catalog::load(file.path()).is_err());
}

#[test]
fn catalog_category_lookup() {
    let catalog = Catalog::builtin();
    let category: &Category = catalog.category("mythology").unwrap();
    assert_eq!(category.name, "Mythology");
    assert!(catalog.category("all").is_none());
}

// ============================================================================
// CONFIG
// ============================================================================

#[test]
fn config_parse_toml() {
    let toml = r#"
[server]
bind = "127.0.0.1:9090"
title = "Test Library"

[catalog]
path = "/srv/catalog.toml"

[cache]
query_entries = 16
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.server.bind.port(), 9090);
    assert_eq!(config.server.title, "Test Library");
    assert_eq!(
        config.catalog.path.as_deref(),
        Some(std::path::Path::new("/srv/catalog.toml"))
    );
    assert_eq!(config.cache.query_entries, 16);
}

#[test]
fn config_default_values() {
    let config = Config::default();
    assert_eq!(config.server.bind.port(), 8080);
    assert!(config.catalog.path.is_none());
    assert_eq!(config.cache.query_entries, 256);
}

#[test]
fn config_generated_default_parses() {
    let config: Config = toml::from_str(&Config::generate_default()).unwrap();
    assert_eq!(config.server.title, "Public Domain Library");
    assert!(config.catalog.path.is_none());
}

#[test]
fn config_load_missing_file_fails() {
    let path = std::path::PathBuf::from("/nonexistent/pdshelf.toml");
    assert!(Config::load(&path).is_err());
}

#[test]
fn book_format_tokens() {
    assert_eq!(BookFormat::from_token("pdf"), Some(BookFormat::Pdf));
    assert_eq!(BookFormat::from_token("epub"), Some(BookFormat::Epub));
    assert_eq!(BookFormat::from_token("PDF"), None);
    assert_eq!(BookFormat::Pdf.label(), "PDF");
}

// ============================================================================
// HTTP
// ============================================================================

#[tokio::test]
async fn http_home_lists_categories() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Browse by Category"));
    assert!(html.contains(r#"href="/library?category=mythology""#));
}

#[tokio::test]
async fn http_library_filters() {
    let response = get("/library?search=homer&category=all&sort=year-asc").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Showing 2 results for &quot;homer&quot;"));
    let iliad = html.find("The Iliad").unwrap();
    let odyssey = html.find("The Odyssey").unwrap();
    assert!(iliad < odyssey);
}

#[tokio::test]
async fn http_library_empty_state() {
    let html = body_string(get("/library?search=zzzz&sort=year-desc").await).await;
    assert!(html.contains("No books found matching your criteria."));
    assert!(html.contains(r#"href="/library?search=&amp;category=all&amp;sort=year-desc""#));
}

#[tokio::test]
async fn http_unknown_book_redirects_to_library() {
    let response = get("/book/no-such-book").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/library");
}

#[tokio::test]
async fn http_book_detail() {
    let response = get("/book/the-odyssey").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("700 BC"));
    assert!(html.contains("Public Domain Notice"));
    assert!(html.contains("/book/the-odyssey/read?page=1&amp;zoom=100"));
}

#[tokio::test]
async fn http_reader_clamps_page() {
    let html = body_string(get("/book/oedipus-rex/read?page=500&zoom=300").await).await;
    assert!(html.contains("Page 96 of 96"));
    assert!(html.contains("200%"));
}

#[tokio::test]
async fn http_reader_tolerates_malformed_params() {
    for uri in [
        "/book/hamlet/read?page=abc",
        "/book/hamlet/read?page=-3",
        "/book/hamlet/read?zoom=big",
    ] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);

        let html = body_string(response).await;
        assert!(html.contains("Page 1 of"), "{}", uri);
        assert!(html.contains("100%"), "{}", uri);
    }
}

#[tokio::test]
async fn http_cover_is_svg() {
    let response = get("/covers/dracula.svg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");

    assert_eq!(get("/covers/dracula.png").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_api_books_sorted_by_year() {
    let response = get("/api/books?category=drama&sort=year-asc").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["query"]["category"], "drama");
    assert_eq!(json["query"]["format"], "all");
    let ids: Vec<&str> = json["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["oedipus-rex", "hamlet", "a-dolls-house"]);
}

#[tokio::test]
async fn http_api_books_bad_sort_falls_back() {
    let json = body_json(get("/api/books?sort=pages-sideways&format=epub").await).await;
    assert_eq!(json["query"]["sort"], "title-asc");
    for b in json["books"].as_array().unwrap() {
        assert_eq!(b["format"], "epub");
    }
}

#[tokio::test]
async fn http_api_book_not_found() {
    assert_eq!(get("/api/books/missing").await.status(), StatusCode::NOT_FOUND);

    let json = body_json(get("/api/books/hamlet").await).await;
    assert_eq!(json["author"], "William Shakespeare");
}

#[tokio::test]
async fn http_api_categories_and_stats() {
    let categories = body_json(get("/api/categories").await).await;
    let mythology = categories
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == "mythology")
        .unwrap();
    assert_eq!(mythology["books"], 3);

    let stats = body_json(get("/api/stats").await).await;
    assert_eq!(stats["books"], Catalog::builtin().len());
    assert_eq!(stats["categories"], 9);
}

#[tokio::test]
async fn http_contact_form() {
    let app = create_router(test_state());
    let ok = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/about/contact")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "name=Ada&email=ada%40example.com&subject=Hi&message=Hello",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert!(body_string(ok).await.contains("Message Sent!"));

    let bad = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/about/contact")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=Ada&email=nope&subject=Hi&message=Hello"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_health() {
    let json = body_json(get("/health").await).await;
    assert_eq!(json["status"], "ok");
}
