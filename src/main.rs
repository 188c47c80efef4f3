//! pdshelf server entry point.

use clap::Parser;
use pdshelf::{
    config::{Cli, Command, Config},
    library::{Catalog, query::Query, query::QueryParams},
    server,
};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| pdshelf::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    match cli.command {
        Some(Command::Init { force }) => cmd_init(force),
        Some(Command::Search {
            text,
            category,
            format,
            sort,
        }) => cmd_search(
            &config,
            QueryParams {
                search: Some(text),
                category,
                format,
                sort,
            },
        ),
        Some(Command::Categories) => cmd_categories(&config),
        Some(Command::Show { id }) => cmd_show(&config, &id),
        Some(Command::Serve { bind, catalog }) => cmd_serve(config, bind, catalog).await,
        None => {
            // Default: start server
            cmd_serve(config, None, None).await
        }
    }
}

/// Write a default config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());
    println!("\nEdit config.toml to configure your server.");
    println!("Then run: pdshelf serve");

    Ok(())
}

/// Load the catalog the config points at.
fn open_catalog(config: &Config) -> anyhow::Result<Catalog> {
    Ok(match &config.catalog.path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    })
}

/// Run a query and print the results.
fn cmd_search(config: &Config, params: QueryParams) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let query = Query::from_params(&params);
    let books = catalog.query(&query);

    if books.is_empty() {
        println!("No books found matching your criteria.");
        return Ok(());
    }

    println!("{:<32} {:<40} {:<24} {:>8} FORMAT", "ID", "TITLE", "AUTHOR", "YEAR");
    println!("{}", "-".repeat(116));
    for book in &books {
        println!(
            "{:<32} {:<40} {:<24} {:>8} {}",
            book.id,
            book.title,
            book.author,
            book.year_display(),
            book.format
        );
    }
    println!("\n{} results (sorted by {})", books.len(), query.sort.label());

    Ok(())
}

/// List categories.
fn cmd_categories(config: &Config) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;

    println!("{:<16} {:<24} {:>6} {:>10}", "ID", "NAME", "BOOKS", "ADVERTISED");
    println!("{}", "-".repeat(60));
    for (category, live) in catalog.live_counts() {
        println!(
            "{:<16} {:<24} {:>6} {:>10}",
            category.id,
            format!("{} {}", category.icon, category.name),
            live,
            category.count
        );
    }

    Ok(())
}

/// Print one book.
fn cmd_show(config: &Config, id: &str) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let Some(book) = catalog.get_book(id) else {
        anyhow::bail!("Book not found: {}", id);
    };

    let category = catalog
        .category(&book.category)
        .map(|c| c.name.as_str())
        .unwrap_or(book.category.as_str());

    println!("{}", book.title);
    println!("  Author:    {}", book.author);
    println!("  Published: {}", book.year_display());
    println!("  Pages:     {}", book.pages);
    println!("  Category:  {}", category);
    println!("  Format:    {}", book.format.label());
    println!("\n{}", book.description);

    Ok(())
}

/// Start the server.
async fn cmd_serve(
    mut config: Config,
    bind: Option<std::net::SocketAddr>,
    catalog: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Override from CLI
    if let Some(addr) = bind {
        config.server.bind = addr;
    }
    if catalog.is_some() {
        config.catalog.path = catalog;
    }

    tracing::info!(
        bind = %config.server.bind,
        title = %config.server.title,
        "Starting pdshelf server"
    );

    let bind = config.server.bind;
    let state = server::AppState::from_config(config)?;

    tracing::info!(
        books = state.catalog.len(),
        categories = state.catalog.categories().len(),
        "Catalog ready"
    );

    let app = server::create_router(state);

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(address = %bind, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
