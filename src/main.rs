//! Folio - blog manifest extractor and reader.

mod cli;
mod config;
mod content;
mod detail;
mod extract;
mod listing;
mod logger;
mod manifest;
mod scaffold;
mod serve;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use detail::load_post;
use extract::extract_manifest;
use listing::Paginator;
use manifest::Manifest;
use scaffold::scaffold_posts;
use serve::serve_site;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build => extract_manifest(&config).map(|_| ()),
        Commands::List { page, .. } => list_posts(&config, *page),
        Commands::Show { slug } => show_post(&config, slug),
        Commands::Scaffold => scaffold_posts(&config).map(|_| ()),
        Commands::Serve { .. } => serve_site(&config),
    }
}

/// Print the listing as it looks after `pages` "load more" steps.
fn list_posts(config: &SiteConfig, pages: usize) -> Result<()> {
    let manifest = Manifest::load(&config.build.manifest_path())?;
    let sorted = manifest.sorted_by_date();
    let mut paginator = Paginator::new(&sorted, config.listing.per_page);
    let pages = pages.max(1);

    let mut end_of_list = false;
    for _ in 0..pages {
        if paginator.load_more().end_of_list {
            end_of_list = true;
            break;
        }
    }

    for entry in paginator.loaded() {
        log!("list"; "{}  {}  {}", entry.date, entry.slug, entry.title);
    }
    if end_of_list || paginator.remaining() == 0 {
        log!("list"; "end of list ({} posts)", sorted.len());
    } else {
        log!("list"; "{} more, use --page {}", paginator.remaining(), pages + 1);
    }

    Ok(())
}

/// Print one post with its body.
fn show_post(config: &SiteConfig, slug: &str) -> Result<()> {
    let post = load_post(config, slug)?;

    log!("show"; "{} ({} min read)", post.entry.title, post.reading_minutes);
    if !post.entry.date.is_empty() {
        log!("show"; "{}", post.entry.date);
    }
    if !post.entry.description.is_empty() {
        log!("show"; "{}", post.entry.description);
    }
    println!("\n{}", post.body.trim_end());

    if !post.recommended.is_empty() {
        let titles: Vec<_> = post.recommended.iter().map(|e| e.slug.as_str()).collect();
        log!("show"; "see also: {}", titles.join(", "));
    }

    Ok(())
}
