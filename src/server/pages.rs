//! HTML pages.

use crate::config::BookFormat;
use crate::library::Catalog;
use crate::library::book::{Book, Category};
use crate::library::query::{CategoryFilter, FormatFilter, SortDirection, SortField, SortKey};
use crate::view::{LibraryView, ReaderView, ViewMode, ZOOM_MAX, ZOOM_MIN};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS: &str = r#"
:root { --bg: #0f1020; --card: #1a1b33; --muted: #9a9cc0; --fg: #ecebff; --primary: #8b7cf6; --pdf: #e4606d; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg); }
a { color: var(--primary); text-decoration: none; }
.container { max-width: 1100px; margin: 0 auto; padding: 1.5rem 1rem; }
.site-nav { display: flex; gap: 1.5rem; align-items: center; padding: 1rem; border-bottom: 1px solid #2a2b4a; }
.site-nav .brand { font-weight: 700; margin-right: auto; color: var(--fg); }
.site-nav a.active { color: var(--fg); border-bottom: 2px solid var(--primary); }
.muted { color: var(--muted); }
.button { display: inline-block; padding: 0.5rem 1rem; border-radius: 8px; background: var(--primary); color: #fff; border: 0; }
.button.outline { background: transparent; border: 1px solid var(--primary); color: var(--primary); }
.button[disabled], .button.disabled { opacity: 0.4; pointer-events: none; }
.search { display: flex; gap: 0.5rem; max-width: 640px; }
.search input { flex: 1; padding: 0.6rem 0.8rem; border-radius: 8px; border: 1px solid #2a2b4a; background: var(--card); color: var(--fg); }
.filters { display: flex; flex-wrap: wrap; gap: 0.75rem; align-items: center; margin: 1rem 0; }
.filters select { padding: 0.4rem; background: var(--card); color: var(--fg); border: 1px solid #2a2b4a; border-radius: 6px; }
.pills { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-bottom: 1.5rem; }
.pill { padding: 0.4rem 0.9rem; border-radius: 999px; background: var(--card); color: var(--muted); }
.pill.active { background: var(--primary); color: #fff; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 1rem; }
.list { display: flex; flex-direction: column; gap: 1rem; }
.card { display: block; background: var(--card); border-radius: 10px; overflow: hidden; color: var(--fg); }
.card img { width: 100%; display: block; }
.list .card { display: flex; gap: 1rem; }
.list .card img { width: 80px; }
.card .body { padding: 0.6rem 0.8rem; }
.badge { font-size: 0.7rem; text-transform: uppercase; padding: 0.15rem 0.5rem; border-radius: 999px; background: var(--primary); color: #fff; }
.badge.pdf { background: var(--pdf); }
.categories { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1rem; }
.category { background: var(--card); border-radius: 10px; padding: 1rem; color: var(--fg); }
.category .icon { font-size: 2rem; }
.empty { text-align: center; padding: 4rem 0; }
.notice { background: #1f3a2a; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.reader-page { background: #fdfbf4; color: #222; max-width: 700px; margin: 2rem auto; padding: 2.5rem; border-radius: 6px; transform-origin: top center; }
.reader-bar { display: flex; gap: 1rem; align-items: center; justify-content: space-between; padding: 0.75rem 1rem; background: var(--card); }
form.contact { display: grid; gap: 0.75rem; max-width: 560px; }
form.contact input, form.contact textarea { padding: 0.6rem; border-radius: 8px; border: 1px solid #2a2b4a; background: var(--card); color: var(--fg); }
"#;

/// Navigation entries: (href, label).
const NAV_LINKS: [(&str, &str); 3] = [("/", "Home"), ("/library", "Library"), ("/about", "About")];

fn base_document(site_title: &str, page_title: &str, current_path: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) " | " (site_title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                nav class="site-nav" {
                    a class="brand" href="/" { "📚 " (site_title) }
                    @for (href, label) in NAV_LINKS {
                        a href=(href) class=[(href == current_path).then_some("active")] { (label) }
                    }
                }
                main { (content) }
            }
        }
    }
}

fn search_form(value: &str, view: Option<&LibraryView>) -> Markup {
    html! {
        form class="search" method="get" action="/library" {
            input type="text" name="search" value=(value)
                placeholder="Search by title, author, or keyword...";
            @if let Some(view) = view {
                input type="hidden" name="category" value=(view.query.category.as_param());
                @if view.query.format != FormatFilter::All {
                    input type="hidden" name="format" value=(view.query.format.as_param());
                }
                @if view.query.sort != SortKey::default() {
                    input type="hidden" name="sort" value=(view.query.sort.to_string());
                }
                @if view.mode != ViewMode::Grid {
                    input type="hidden" name="view" value=(view.mode.as_str());
                }
            }
            button class="button" type="submit" { "Search" }
        }
    }
}

fn format_badge(format: BookFormat) -> Markup {
    html! {
        span class=(format!("badge {}", format.as_str())) { (format.as_str()) }
    }
}

fn book_card(book: &Book, mode: ViewMode) -> Markup {
    let href = format!("/book/{}", urlencoding::encode(&book.id));
    match mode {
        ViewMode::Grid => html! {
            a class="card" href=(href) {
                img src=(book.cover_url) alt=(book.title) loading="lazy";
                div class="body" {
                    (format_badge(book.format))
                    h3 { (book.title) }
                    p class="muted" { (book.author) }
                    p class="muted" { (book.year_display()) }
                }
            }
        },
        ViewMode::List => html! {
            a class="card" href=(href) {
                img src=(book.cover_url) alt=(book.title) loading="lazy";
                div class="body" {
                    h3 { (book.title) }
                    p class="muted" {
                        (book.author) " · " (book.year_display()) " · " (book.pages) " pages "
                        (format_badge(book.format))
                    }
                    p { (book.description) }
                }
            }
        },
    }
}

/// Home page.
pub fn home(site_title: &str, catalog: &Catalog) -> Markup {
    let content = html! {
        section class="container" {
            h1 { "Explore the Universe of Free Knowledge" }
            p class="muted" {
                "Discover public domain books, articles, and documents. "
                "From ancient philosophy to classic literature, all free to read and download."
            }
            (search_form("", None))
            p {
                a class="button" href="/library" { "Browse Library" }
                " "
                a class="button outline" href="/about" { "Learn More" }
            }
        }
        section class="container" {
            p {
                strong { (catalog.len()) } " books · "
                strong { (catalog.categories().len()) } " categories · "
                strong { "100%" } " free"
            }
        }
        section class="container" {
            h2 { "Browse by Category" }
            p class="muted" {
                "Explore our collection organized by genre. From timeless classics to scientific treatises."
            }
            div class="categories" {
                @for (category, live) in catalog.live_counts() {
                    (category_card(category, live))
                }
            }
        }
        section class="container" {
            h2 { "Start Your Literary Journey" }
            p class="muted" { "No sign-up required." }
            a class="button" href="/library" { "Enter the Library" }
        }
    };

    base_document(site_title, "Home", "/", content)
}

fn category_card(category: &Category, live: usize) -> Markup {
    let href = format!("/library?category={}", urlencoding::encode(&category.id));
    html! {
        a class="category" href=(href) {
            div class="icon" { (category.icon) }
            h3 { (category.name) }
            p class="muted" { (live) " books" }
        }
    }
}

/// Sort fields offered as pills on the library page.
const SORT_FIELDS: [(SortField, &str); 3] = [
    (SortField::Title, "Title"),
    (SortField::Author, "Author"),
    (SortField::Year, "Year"),
];

/// Library listing.
pub fn library(site_title: &str, catalog: &Catalog, view: &LibraryView, results: &[&Book]) -> Markup {
    let query = &view.query;

    let content = html! {
        section class="container" {
            h1 { "Library" }
            p class="muted" {
                "Browse our collection of " (catalog.len()) "+ public domain books"
            }

            (search_form(&query.search, Some(view)))

            form class="filters" method="get" action="/library" {
                input type="hidden" name="search" value=(query.search);
                @if view.mode != ViewMode::Grid {
                    input type="hidden" name="view" value=(view.mode.as_str());
                }
                select name="category" {
                    option value="all" selected[query.category == CategoryFilter::All] { "All Categories" }
                    @for category in catalog.categories() {
                        option value=(category.id)
                            selected[query.category == CategoryFilter::Only(category.id.clone())] {
                            (category.icon) " " (category.name)
                        }
                    }
                }
                select name="format" {
                    option value="all" selected[query.format == FormatFilter::All] { "All Formats" }
                    @for format in BookFormat::ALL {
                        option value=(format.as_str()) selected[query.format == FormatFilter::Only(format)] {
                            (format.label())
                        }
                    }
                }
                select name="sort" {
                    @for (key, label) in SortKey::OPTIONS {
                        option value=(key.to_string()) selected[query.sort == key] { (label) }
                    }
                }
                button class="button" type="submit" { "Apply" }
                span style="margin-left:auto" {
                    a.pill.active[view.mode == ViewMode::Grid]
                        href=(view.with_mode(ViewMode::Grid).href()) aria-label="Grid view" { "Grid" }
                    " "
                    a.pill.active[view.mode == ViewMode::List]
                        href=(view.with_mode(ViewMode::List).href()) aria-label="List view" { "List" }
                }
            }

            div class="pills" {
                a.pill.active[query.category == CategoryFilter::All]
                    href=(view.with_category(CategoryFilter::All).href()) { "All" }
                @for category in catalog.categories() {
                    @let filter = CategoryFilter::Only(category.id.clone());
                    a.pill.active[query.category == filter]
                        href=(view.with_category(filter.clone()).href()) {
                        (category.icon) " " (category.name)
                    }
                }
            }

            div class="pills" {
                a.pill.active[query.format == FormatFilter::All]
                    href=(view.with_format(FormatFilter::All).href()) { "All Formats" }
                @for format in BookFormat::ALL {
                    @let filter = FormatFilter::Only(format);
                    a.pill.active[query.format == filter]
                        href=(view.with_format(filter.clone()).href()) { (format.label()) }
                }
                span class="muted" style="margin-left:auto" { "Sort by" }
                @for (field, name) in SORT_FIELDS {
                    a.pill.active[query.sort.field == field]
                        href=(view.with_sort(query.sort.toggled(field)).href()) {
                        (name)
                        @if query.sort.field == field {
                            @match query.sort.direction {
                                SortDirection::Asc => { " ↑" }
                                SortDirection::Desc => { " ↓" }
                            }
                        }
                    }
                }
            }

            p class="muted" {
                "Showing " (results.len()) " results"
                @if !query.search.is_empty() {
                    " for \"" (query.search) "\" "
                    a href=(view.with_search("").href()) aria-label="Remove search text" { "×" }
                }
                @if !query.is_unfiltered() {
                    " · "
                    a href=(view.cleared().href()) { "Clear filters" }
                }
                " · "
                a href=(view.share_href()) { "Link to this search" }
            }

            @if results.is_empty() {
                div class="empty" {
                    p class="muted" { "No books found matching your criteria." }
                    a href=(view.cleared().href()) { "Clear filters" }
                }
            } @else {
                div class=(match view.mode { ViewMode::Grid => "grid", ViewMode::List => "list" }) {
                    @for book in results {
                        (book_card(book, view.mode))
                    }
                }
            }
        }
    };

    base_document(site_title, "Library", "/library", content)
}

/// Book detail page.
pub fn book_detail(site_title: &str, catalog: &Catalog, book: &Book) -> Markup {
    let category_name = catalog
        .category(&book.category)
        .map(|c| c.name.as_str())
        .unwrap_or(book.category.as_str());
    let read_href = ReaderView::new(book.pages).href(&book.id);

    let content = html! {
        section class="container" {
            p { a href="/library" { "← Back to Library" } }
            div style="display:flex;gap:2rem;flex-wrap:wrap" {
                div style="max-width:300px" {
                    img src=(book.cover_url) alt=(book.title) style="width:100%;border-radius:10px";
                    p {
                        a class="button" href=(read_href) { "Read Now" }
                        " "
                        button class="button outline" disabled title="Downloads are not available in this preview" {
                            "Download " (book.format.label())
                        }
                    }
                }
                div style="flex:1;min-width:280px" {
                    (format_badge(book.format))
                    h1 { (book.title) }
                    p class="muted" { "by " (book.author) }
                    p {
                        "Published: " (book.year_display()) " · "
                        (book.pages) " pages · "
                        "Category: " (category_name)
                    }
                    h2 { "About this book" }
                    p { (book.description) }
                    div class="notice" {
                        h3 { "Public Domain Notice" }
                        p {
                            "This work is in the public domain and free of known copyright restrictions. "
                            "You may copy, modify, and distribute this work, even for commercial purposes, "
                            "without asking permission."
                        }
                    }
                }
            }
        }
    };

    base_document(site_title, &book.title, "", content)
}

/// Closing words of the preview's theme sentence for a category.
pub fn theme_phrase(category: &str) -> &'static str {
    match category {
        "philosophy" => "wisdom, ethics, and the nature of existence.",
        "fiction" => "human nature, society, and storytelling.",
        "horror" => "fear, the unknown, and the dark corners of imagination.",
        "romance" => "love, relationships, and the human heart.",
        "mystery" => "intrigue, deduction, and solving the unsolvable.",
        "science" => "discovery, natural laws, and understanding our world.",
        "mythology" => "gods, heroes, and timeless legends.",
        "children" => "wonder, imagination, and youthful adventure.",
        "drama" => "conflict, emotion, and the human condition.",
        _ => "fascinating topics and ideas.",
    }
}

/// Reader page with simulated content.
pub fn reader(site_title: &str, book: &Book, reader: &ReaderView) -> Markup {
    let prev = reader.prev_page();
    let next = reader.next_page();
    let zoom_out = reader.zoom_out();
    let zoom_in = reader.zoom_in();
    let scale = format!("transform: scale({})", reader.zoom as f32 / 100.0);

    let content = html! {
        header class="reader-bar" {
            a href=(format!("/book/{}", urlencoding::encode(&book.id))) { "← Back" }
            strong { (book.title) }
            span {
                a.button.outline.disabled[reader.zoom <= ZOOM_MIN]
                    href=(zoom_out.href(&book.id)) aria-label="Zoom out" { "−" }
                " " (reader.zoom) "% "
                a.button.outline.disabled[reader.zoom >= ZOOM_MAX]
                    href=(zoom_in.href(&book.id)) aria-label="Zoom in" { "+" }
            }
        }
        div class="reader-page" style=(scale) {
            h2 { (book.title) }
            p {
                "This is a preview of \"" (book.title) "\" by " (book.author) ". "
                "In a full implementation, the actual " (book.format.label())
                " content would be rendered here."
            }
            p {
                "The book contains " (book.pages) " pages of rich content exploring themes of "
                (theme_phrase(&book.category))
            }
            p {
                "Published in " (book.year_display()) ", "
                "this work has stood the test of time and continues to inspire readers around the world."
            }
            p class="muted" { "[Page " (reader.page) " of " (reader.total_pages) "]" }
        }
        footer class="reader-bar" {
            a.button.outline.disabled[reader.at_first_page()]
                href=(prev.href(&book.id)) aria-label="Previous page" { "‹" }
            span { "Page " (reader.page) " of " (reader.total_pages) }
            a.button.outline.disabled[reader.at_last_page()]
                href=(next.href(&book.id)) aria-label="Next page" { "›" }
        }
    };

    base_document(site_title, &book.title, "", content)
}

/// About page. `sent` shows the contact confirmation.
pub fn about(site_title: &str, sent: bool) -> Markup {
    let content = html! {
        section class="container" {
            h1 { "About " (site_title) }
            p class="muted" {
                "We believe that knowledge should be free and accessible to everyone. "
                "Our mission is to preserve and share humanity's literary heritage."
            }
        }
        section class="container categories" {
            div class="category" {
                h3 { "Preserve Knowledge" }
                p class="muted" {
                    "We curate and digitize public domain works to ensure timeless literature "
                    "remains accessible for generations to come."
                }
            }
            div class="category" {
                h3 { "Free Forever" }
                p class="muted" {
                    "Every book in our library is copyright-free and available to read, "
                    "download, and share at no cost whatsoever."
                }
            }
            div class="category" {
                h3 { "Global Access" }
                p class="muted" {
                    "Our platform is designed to be accessible worldwide, breaking down barriers "
                    "to education and literature."
                }
            }
        }
        section class="container" {
            h2 { "Our Story" }
            p {
                "We focus exclusively on public domain and copyright-free content, including "
                "classic novels, philosophical treatises, scientific papers and historical documents."
            }
        }
        section class="container" id="contact" {
            h2 { "Get in Touch" }
            @if sent {
                div class="notice" {
                    strong { "Message Sent! " }
                    "Thank you for reaching out. We'll get back to you soon."
                }
            }
            form class="contact" method="post" action="/about/contact" {
                label for="name" { "Name" }
                input id="name" name="name" placeholder="Your name" required;
                label for="email" { "Email" }
                input id="email" name="email" type="email" placeholder="you@example.com" required;
                label for="subject" { "Subject" }
                input id="subject" name="subject" placeholder="What's this about?" required;
                label for="message" { "Message" }
                textarea id="message" name="message" rows="5" placeholder="Your message..." required {}
                button class="button" type="submit" { "Send Message" }
            }
        }
    };

    base_document(site_title, "About", "/about", content)
}
