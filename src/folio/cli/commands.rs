//! Command dispatch for the CLI.
//!
//! `run()` parses arguments, sets up logging, opens the API on the site root and hands each
//! subcommand to a `handle_*` function. Handlers call one API method and print the result.
//! Documents (feed XML, config) go to stdout untouched so they can be redirected.

use super::render::{print_messages, render_listing, render_written};
use super::setup::{Cli, Commands, ListTarget};
use clap::Parser;
use folio::api::{CmdResult, ConfigAction, FolioApi};
use folio::error::Result;
use folio::store::fs::FileStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: FolioApi<FileStore>,
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    tracing::debug!(root = %root.display(), "opening site");
    let ctx = AppContext {
        api: FolioApi::open(root)?,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Check => handle_check(&ctx),
        Commands::List { what } => match what {
            ListTarget::Posts {
                filter,
                drafts,
                json,
            } => handle_list(ctx.api.list_posts(filter.as_deref(), drafts)?, json),
            ListTarget::Projects { filter, json } => {
                handle_list(ctx.api.list_projects(filter.as_deref())?, json)
            }
        },
        Commands::Build { out, drafts } => handle_build(&ctx, out, drafts),
        Commands::Feed => handle_document(ctx.api.feed()?),
        Commands::Preview { slug, output } => handle_preview(&ctx, &slug, output),
        Commands::Config { template } => handle_config(&ctx, template),
    }
}

/// Logs go to stderr. `RUST_LOG` wins; otherwise warnings only, or folio debug with `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "warn,folio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (only possible in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_check(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.check()?;
    print_messages(&result.messages)?;
    Ok(())
}

fn handle_list(result: CmdResult, json: bool) -> Result<()> {
    let Some(listing) = result.listing else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", render_listing(&listing)?);
    }
    print_messages(&result.messages)?;
    Ok(())
}

fn handle_build(ctx: &AppContext, out: Option<PathBuf>, drafts: bool) -> Result<()> {
    let result = ctx.api.build(out, drafts)?;
    if ctx.verbose {
        print!("{}", render_written(&result.written)?);
    }
    print_messages(&result.messages)?;
    Ok(())
}

fn handle_preview(ctx: &AppContext, slug: &str, output: Option<PathBuf>) -> Result<()> {
    let result = ctx.api.preview(slug, output)?;
    print_messages(&result.messages)?;
    Ok(())
}

fn handle_config(ctx: &AppContext, template: bool) -> Result<()> {
    let action = if template {
        ConfigAction::Template
    } else {
        ConfigAction::Show
    };
    let result = ctx.api.show_config(action)?;
    if let Some(config) = &result.config {
        println!("{}", serde_json::to_string_pretty(config)?);
    }
    handle_document(result)
}

fn handle_document(result: CmdResult) -> Result<()> {
    if let Some(document) = &result.document {
        print!("{}", document);
        if !document.ends_with('\n') {
            println!();
        }
    }
    print_messages(&result.messages)?;
    Ok(())
}
