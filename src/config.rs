use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Web library for browsing and reading public-domain books.
#[derive(Parser, Debug, Clone)]
#[command(name = "pdshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "PDSHELF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the server (default if no command given).
    Serve {
        /// Address to bind the server to.
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Path to a TOML catalog fixture (overrides the config file).
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Query the catalog from the command line.
    Search {
        /// Free text matched against title, author and description.
        #[arg(default_value = "")]
        text: String,
        /// Category id, or "all".
        #[arg(short, long)]
        category: Option<String>,
        /// Format filter: "all", "pdf" or "epub".
        #[arg(short, long)]
        format: Option<String>,
        /// Sort key, e.g. "title-asc" or "year-desc".
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// List categories with their live book counts.
    Categories,

    /// Show a single book.
    Show {
        /// Book id.
        id: String,
    },

    /// Create a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Catalog source configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Query cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Site title shown in the page chrome.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            title: default_title(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::new(
        std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        8080,
    )
}

fn default_title() -> String {
    "Public Domain Library".to_string()
}

/// Catalog source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML fixture with `[[books]]` and `[[categories]]` tables.
    /// The built-in fixture is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Query cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of memoized query results (0 to disable).
    #[serde(default = "default_query_entries")]
    pub query_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            query_entries: default_query_entries(),
        }
    }
}

fn default_query_entries() -> usize {
    256
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("pdshelf.toml"),
            dirs::config_dir()
                .map(|p| p.join("pdshelf").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/pdshelf/config.toml"),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# pdshelf configuration

[server]
bind = "0.0.0.0:8080"
title = "Public Domain Library"

[catalog]
# TOML file with [[categories]] and [[books]] tables.
# Leave unset to serve the built-in collection.
# path = "/etc/pdshelf/catalog.toml"

[cache]
# Memoized query results (0 to disable)
query_entries = 256
"#
        .to_string()
    }
}

/// Supported book formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookFormat {
    /// PDF format (Portable Document Format).
    Pdf,
    /// EPUB format (Electronic Publication).
    Epub,
}

impl BookFormat {
    /// Every supported format, in display order.
    pub const ALL: [BookFormat; 2] = [BookFormat::Pdf, BookFormat::Epub];

    /// Wire token, as used in URLs and fixtures.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "pdf",
            BookFormat::Epub => "epub",
        }
    }

    /// Upper-case label for badges and buttons.
    pub fn label(&self) -> &'static str {
        match self {
            BookFormat::Pdf => "PDF",
            BookFormat::Epub => "EPUB",
        }
    }

    /// Parse an exact wire token. Matching is case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "pdf" => Some(BookFormat::Pdf),
            "epub" => Some(BookFormat::Epub),
            _ => None,
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
