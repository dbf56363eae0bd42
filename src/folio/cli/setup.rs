use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "folio", bin_name = "folio", version = get_version())]
#[command(
    about = "Static blog and portfolio generator",
    long_about = "Validates Markdown content, then builds filtered list pages, post pages, \
                  an RSS feed and social preview images."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Site root holding folio.toml (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logging, list written files)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate all content without writing anything
    #[command(display_order = 1)]
    Check,

    /// List posts or projects, optionally filtered
    #[command(alias = "ls", display_order = 2)]
    List {
        #[command(subcommand)]
        what: ListTarget,
    },

    /// Build the site
    #[command(display_order = 3)]
    Build {
        /// Output directory (overrides out_dir from folio.toml)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Include draft posts in list and post pages
        #[arg(long)]
        drafts: bool,
    },

    /// Print the RSS feed to stdout
    #[command(display_order = 4)]
    Feed,

    /// Render one post's social preview image
    #[command(display_order = 5)]
    Preview {
        /// Post slug (the file name without extension)
        slug: String,

        /// Where to write the PNG (defaults to <out_dir>/og/<slug>.png)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    #[command(display_order = 6)]
    Config {
        /// Print a commented folio.toml with every key and its default instead
        #[arg(long)]
        template: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListTarget {
    /// Blog posts, newest first
    Posts {
        /// Pillar id, or `all`
        #[arg(short, long, value_name = "PILLAR")]
        filter: Option<String>,

        /// Include drafts
        #[arg(long)]
        drafts: bool,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Portfolio projects, in sort order
    Projects {
        /// Status id, or `all`
        #[arg(short, long, value_name = "STATUS")]
        filter: Option<String>,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
}
