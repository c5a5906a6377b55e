//! book-alchemy entry point.

use book_alchemy::{
    config::{AuthorCommand, BookCommand, Cli, Command, Config},
    db::{Database, SortBy},
    forms::{AuthorForm, BookForm},
    server,
};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    match cli.command {
        Some(Command::Init { force }) => cmd_init(force),
        Some(Command::Author { action }) => cmd_author(action, &config),
        Some(Command::Book { action }) => cmd_book(action, &config),
        Some(Command::Serve { bind }) => cmd_serve(config, bind).await,
        None => cmd_serve(config, None).await,
    }
}

/// Write default config and create the database.
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

    let config = Config::default();
    let _db = Database::open(&config.database.path)?;
    println!("Initialized database: {}", config.database.path.display());

    println!("\nAdd an author: book-alchemy author add \"Jane Austen\" --birth-date 1775-12-16");
    println!("Then start the server: book-alchemy serve");

    Ok(())
}

/// Author management commands.
fn cmd_author(action: AuthorCommand, config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.database.path)?;

    match action {
        AuthorCommand::Add {
            name,
            birth_date,
            date_of_death,
        } => {
            let input = AuthorForm {
                name,
                birth_date,
                date_of_death,
            }
            .validate()?;
            let author = db.add_author(&input)?;
            println!("Added author: {} (id: {})", author.name, author.id);
        }

        AuthorCommand::List => {
            let authors = db.list_authors()?;
            if authors.is_empty() {
                println!("No authors found.");
            } else {
                println!("{:<6} {:<40} {:<12} DIED", "ID", "NAME", "BORN");
                println!("{}", "-".repeat(72));
                for author in authors {
                    let born = author
                        .birth_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let died = author
                        .date_of_death
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("{:<6} {:<40} {:<12} {}", author.id, author.name, born, died);
                }
            }
        }
    }

    Ok(())
}

/// Book management commands.
fn cmd_book(action: BookCommand, config: &Config) -> anyhow::Result<()> {
    let db = Database::open(&config.database.path)?;

    match action {
        BookCommand::Add {
            title,
            isbn,
            year,
            author_id,
        } => {
            let input = BookForm {
                title,
                isbn,
                publication_year: year,
                author_id,
            }
            .validate()?;
            let book = db.add_book(&input)?;
            println!("Added book: {} (id: {})", book.title, book.id);
        }

        BookCommand::List { sort, search } => {
            let sort_by = sort.as_deref().and_then(SortBy::parse);
            let books = db.list_books(sort_by, search.as_deref())?;
            if books.is_empty() {
                println!("No books found.");
            } else {
                println!("{:<6} {:<40} {:<30} YEAR", "ID", "TITLE", "AUTHOR");
                println!("{}", "-".repeat(84));
                for entry in books {
                    let year = entry
                        .book
                        .publication_year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<6} {:<40} {:<30} {}",
                        entry.book.id, entry.book.title, entry.author_name, year
                    );
                }
            }
        }

        BookCommand::Del { id } => {
            let deleted = db.delete_book(id)?;
            println!("Deleted book: {}", deleted.book.title);
            if deleted.author_removed {
                println!(
                    "Removed author {} (no remaining books)",
                    deleted.book.author_id
                );
            }
        }
    }

    Ok(())
}

/// Start the server.
async fn cmd_serve(mut config: Config, bind: Option<std::net::SocketAddr>) -> anyhow::Result<()> {
    // Override bind address if specified
    if let Some(addr) = bind {
        config.server.bind = addr;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_alchemy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::open(&config.database.path)?;

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.path.display(),
        "Starting book-alchemy server"
    );

    let bind = config.server.bind;
    let state = server::AppState::new(config, db);
    let app = server::create_router(state);

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(address = %bind, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
