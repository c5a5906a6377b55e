use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Library catalog for books and authors.
#[derive(Parser, Debug, Clone)]
#[command(name = "book-alchemy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "BOOK_ALCHEMY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server (default if no command given).
    Serve {
        /// Address to bind the server to.
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },

    /// Author management commands.
    Author {
        /// Author subcommand action.
        #[command(subcommand)]
        action: AuthorCommand,
    },

    /// Book management commands.
    Book {
        /// Book subcommand action.
        #[command(subcommand)]
        action: BookCommand,
    },

    /// Create default config and initialize the database.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Author management subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AuthorCommand {
    /// Add a new author.
    Add {
        /// Author name.
        name: String,
        /// Birth date (YYYY-MM-DD).
        #[arg(short, long)]
        birth_date: String,
        /// Date of death (YYYY-MM-DD).
        #[arg(short, long)]
        date_of_death: Option<String>,
    },

    /// List all authors.
    List,
}

/// Book management subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum BookCommand {
    /// Add a new book.
    Add {
        /// Book title.
        title: String,
        /// ISBN.
        #[arg(short, long)]
        isbn: String,
        /// Publication year.
        #[arg(short, long)]
        year: String,
        /// ID of an existing author.
        #[arg(short, long)]
        author_id: String,
    },

    /// List books.
    List {
        /// Sort order: "title" or "author".
        #[arg(short, long)]
        sort: Option<String>,
        /// Only books whose title contains this text.
        #[arg(long)]
        search: Option<String>,
    },

    /// Delete a book (and its author if it was their last book).
    Del {
        /// Book ID.
        id: i64,
    },
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Title shown on every page.
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
        5000,
    )
}

fn default_title() -> String {
    "Book Alchemy".to_string()
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/library.sqlite")
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
            PathBuf::from("book-alchemy.toml"),
            dirs::config_dir()
                .map(|p| p.join("book-alchemy").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/book-alchemy/config.toml"),
        ];

        candidates
            .into_iter()
            .find(|p| !p.as_os_str().is_empty() && p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# book-alchemy configuration

[server]
bind = "0.0.0.0:5000"
title = "Book Alchemy"

[database]
path = "data/library.sqlite"
"#
        .to_string()
    }
}
