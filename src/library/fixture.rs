//! Built-in collection served when no catalog file is configured.

use crate::config::BookFormat;
use crate::library::book::{Book, Category};

const CATEGORIES: &[(&str, &str, &str, u32)] = &[
    ("philosophy", "Philosophy", "📜", 1250),
    ("fiction", "Classic Fiction", "📖", 3400),
    ("horror", "Horror", "👻", 580),
    ("romance", "Romance", "💕", 920),
    ("mystery", "Mystery", "🔍", 760),
    ("science", "Science", "🔬", 840),
    ("mythology", "Mythology", "⚡", 430),
    ("children", "Children's", "🧸", 1100),
    ("drama", "Drama", "🎭", 650),
];

type Row = (
    &'static str,
    &'static str,
    &'static str,
    i32,
    u32,
    &'static str,
    BookFormat,
    &'static str,
);

const BOOKS: &[Row] = &[
    (
        "the-republic",
        "The Republic",
        "Plato",
        -375,
        416,
        "philosophy",
        BookFormat::Pdf,
        "A Socratic dialogue on justice, the order of the just city-state and the just man.",
    ),
    (
        "meditations",
        "Meditations",
        "Marcus Aurelius",
        180,
        254,
        "philosophy",
        BookFormat::Epub,
        "Private notes of a Roman emperor on Stoic discipline, duty and the mind.",
    ),
    (
        "the-art-of-war",
        "The Art of War",
        "Sun Tzu",
        -500,
        68,
        "philosophy",
        BookFormat::Pdf,
        "An ancient Chinese treatise on strategy, tactics and the conduct of conflict.",
    ),
    (
        "beyond-good-and-evil",
        "Beyond Good and Evil",
        "Friedrich Nietzsche",
        1886,
        240,
        "philosophy",
        BookFormat::Epub,
        "A critique of past thinkers and a prelude to a philosophy of the future.",
    ),
    (
        "the-prince",
        "The Prince",
        "Niccolò Machiavelli",
        1532,
        140,
        "philosophy",
        BookFormat::Pdf,
        "A handbook of political philosophy on acquiring and holding power.",
    ),
    (
        "pride-and-prejudice",
        "Pride and Prejudice",
        "Jane Austen",
        1813,
        432,
        "romance",
        BookFormat::Epub,
        "Elizabeth Bennet navigates manners, marriage and misjudgment in Regency England.",
    ),
    (
        "jane-eyre",
        "Jane Eyre",
        "Charlotte Brontë",
        1847,
        532,
        "romance",
        BookFormat::Pdf,
        "An orphaned governess finds love and independence at Thornfield Hall.",
    ),
    (
        "wuthering-heights",
        "Wuthering Heights",
        "Emily Brontë",
        1847,
        416,
        "romance",
        BookFormat::Epub,
        "A tale of passion and revenge on the Yorkshire moors.",
    ),
    (
        "moby-dick",
        "Moby-Dick",
        "Herman Melville",
        1851,
        635,
        "fiction",
        BookFormat::Epub,
        "Captain Ahab's obsessive hunt for the white whale.",
    ),
    (
        "great-expectations",
        "Great Expectations",
        "Charles Dickens",
        1861,
        505,
        "fiction",
        BookFormat::Pdf,
        "The orphan Pip rises from humble beginnings in Victorian England.",
    ),
    (
        "war-and-peace",
        "War and Peace",
        "Leo Tolstoy",
        1869,
        1225,
        "fiction",
        BookFormat::Epub,
        "Russian society during the Napoleonic wars, seen through five aristocratic families.",
    ),
    (
        "frankenstein",
        "Frankenstein",
        "Mary Shelley",
        1818,
        280,
        "horror",
        BookFormat::Pdf,
        "A young scientist creates a living being and is pursued by the consequences.",
    ),
    (
        "dracula",
        "Dracula",
        "Bram Stoker",
        1897,
        418,
        "horror",
        BookFormat::Epub,
        "The Count's attempt to move from Transylvania to England, told in letters and diaries.",
    ),
    (
        "jekyll-and-hyde",
        "Strange Case of Dr Jekyll and Mr Hyde",
        "Robert Louis Stevenson",
        1886,
        141,
        "horror",
        BookFormat::Pdf,
        "A London lawyer investigates the link between his friend and a violent recluse.",
    ),
    (
        "the-hound-of-the-baskervilles",
        "The Hound of the Baskervilles",
        "Arthur Conan Doyle",
        1902,
        256,
        "mystery",
        BookFormat::Epub,
        "Sherlock Holmes investigates a legendary hound on Dartmoor.",
    ),
    (
        "the-moonstone",
        "The Moonstone",
        "Wilkie Collins",
        1868,
        528,
        "mystery",
        BookFormat::Pdf,
        "A cursed Indian diamond vanishes from a Yorkshire country house.",
    ),
    (
        "on-the-origin-of-species",
        "On the Origin of Species",
        "Charles Darwin",
        1859,
        502,
        "science",
        BookFormat::Pdf,
        "The founding work of evolutionary biology and natural selection.",
    ),
    (
        "relativity",
        "Relativity: The Special and General Theory",
        "Albert Einstein",
        1916,
        168,
        "science",
        BookFormat::Epub,
        "A popular account of the theories of relativity by their author.",
    ),
    (
        "the-iliad",
        "The Iliad",
        "Homer",
        -750,
        704,
        "mythology",
        BookFormat::Pdf,
        "The wrath of Achilles during the final weeks of the Trojan War.",
    ),
    (
        "the-odyssey",
        "The Odyssey",
        "Homer",
        -700,
        541,
        "mythology",
        BookFormat::Epub,
        "Odysseus's ten-year journey home after the fall of Troy.",
    ),
    (
        "metamorphoses",
        "Metamorphoses",
        "Ovid",
        8,
        723,
        "mythology",
        BookFormat::Epub,
        "A poem of transformations from the creation of the world to Julius Caesar.",
    ),
    (
        "alice-in-wonderland",
        "Alice's Adventures in Wonderland",
        "Lewis Carroll",
        1865,
        200,
        "children",
        BookFormat::Epub,
        "A girl falls down a rabbit hole into a world of peculiar creatures.",
    ),
    (
        "peter-pan",
        "Peter Pan",
        "J. M. Barrie",
        1911,
        192,
        "children",
        BookFormat::Pdf,
        "The boy who wouldn't grow up takes the Darling children to Neverland.",
    ),
    (
        "hamlet",
        "Hamlet",
        "William Shakespeare",
        1603,
        342,
        "drama",
        BookFormat::Pdf,
        "The Prince of Denmark seeks revenge for his father's murder.",
    ),
    (
        "a-dolls-house",
        "A Doll's House",
        "Henrik Ibsen",
        1879,
        120,
        "drama",
        BookFormat::Epub,
        "Nora Helmer confronts the constraints of her marriage.",
    ),
    (
        "oedipus-rex",
        "Oedipus Rex",
        "Sophocles",
        -429,
        96,
        "drama",
        BookFormat::Pdf,
        "A king of Thebes uncovers the terrible truth of his origins.",
    ),
];

/// Built-in categories.
pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|&(id, name, icon, count)| Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            count,
        })
        .collect()
}

/// Built-in books. Covers are generated by the server.
pub fn books() -> Vec<Book> {
    BOOKS
        .iter()
        .map(
            |&(id, title, author, year, pages, category, format, description)| Book {
                id: id.to_string(),
                title: title.to_string(),
                author: author.to_string(),
                description: description.to_string(),
                year,
                pages,
                category: category.to_string(),
                format,
                cover_url: format!("/covers/{}.svg", id),
            },
        )
        .collect()
}
