use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use homedir::my_home;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod analysis;
mod bookmarks;
mod cli;
mod config;
mod fetch;
mod storage;
#[cfg(test)]
mod tests;

use analysis::Engine;
use bookmarks::JsonBookmarkStore;
use config::Config;
use fetch::ReqwestFetcher;

pub fn parse_tags(tags: String) -> Vec<String> {
    tags.split(',')
        .flat_map(|value| value.split(' ').filter(|value| !value.is_empty()))
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
}

fn base_path() -> anyhow::Result<String> {
    if let Ok(base_path) = std::env::var("SMARTMARK_BASE_PATH") {
        return Ok(base_path);
    }

    let home = my_home()
        .context("could not determine home directory")?
        .context("home directory path is empty")?;
    Ok(format!("{}/.local/share/smartmark", home.to_string_lossy()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    let base_path = base_path()?;
    let config = Config::load_with(&base_path)?;
    let fetcher = ReqwestFetcher::new(&config.fetch)?;
    let engine = Engine::new(Arc::new(fetcher), &config);

    match args.command {
        cli::Command::Extract { url } => print_json(&engine.extract(&url)?),

        cli::Command::Summarize { url } => print_json(&engine.analyze(&url)?),

        cli::Command::SuggestTags {
            url,
            title,
            description,
            existing,
            scores,
        } => {
            let existing = existing.map(parse_tags).unwrap_or_default();
            let (title, description) = (title.as_deref(), description.as_deref());

            if scores {
                print_json(&engine.suggest_tags_scored(&url, title, description, &existing)?)
            } else {
                print_json(&engine.suggest_tags(&url, title, description, &existing)?)
            }
        }

        cli::Command::Recommend {
            url,
            title,
            description,
            owner,
            limit,
        } => {
            let store = JsonBookmarkStore::new(&base_path)?;
            let candidates = engine.recommend(
                &store,
                &url,
                title.as_deref(),
                description.as_deref(),
                owner,
                limit,
            )?;
            print_json(&candidates)
        }
    }
}
