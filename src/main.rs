mod cli;

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use cinescope::{
    services::{
        queries::trailer_embed_url, stats::export_file_name, CatalogAdapter, CatalogService,
        ExportDocument, PreferenceStats, TvMazeProvider,
    },
    store::{FileStorage, PreferenceStore},
    Config,
};
use clap::Parser;
use cli::{Cli, Command};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cinescope=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let provider = TvMazeProvider::new(config.catalog_api_url.clone(), config.request_timeout())
        .context("Failed to build catalog client")?;
    let adapter = CatalogAdapter::new(Arc::new(provider), config.catalog_limit);
    let service = CatalogService::new(adapter, config.page_size)?;

    let storage = FileStorage::open(&config.preferences_path).with_context(|| {
        format!(
            "Failed to open preferences at {}",
            config.preferences_path.display()
        )
    })?;
    let mut preferences = PreferenceStore::new(storage);

    match cli.command {
        Command::Trending { page } => print_json(&service.list_trending(page).await)?,
        Command::Top { page } => print_json(&service.list_top_rated(page).await)?,
        Command::Search { query } => print_json(&service.browse(&query.join(" ")).await)?,
        Command::Genre { name } => {
            print_json(&service.list_by_genre(&name.join(" "), 1).await)?
        }
        Command::Genres => print_json(&service.fetch_genres())?,
        Command::Movie { id } => match service.load_detail_page(id).await {
            Ok(page) => print_json(&json!({
                "trailer": trailer_embed_url(&page.movie.title),
                "detail": page,
                "favorite": preferences.is_favorite(id),
                "userRating": preferences.get_user_rating(id),
            }))?,
            Err(e) => {
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        },
        Command::Similar { id } => print_json(&service.fetch_similar(id).await)?,
        Command::Random => print_json(&service.random_pick().await?)?,
        Command::Cast { id } => print_json(&service.fetch_cast(id).await)?,
        Command::Person { id } => print_json(&service.fetch_person_details(id).await)?,
        Command::Favorite { id } => {
            let movie = service.fetch_movie_details(id).await?;
            preferences.add_to_favorites(&movie)?;
            print_json(&json!({ "favorite": true, "id": id, "title": movie.title }))?;
        }
        Command::Unfavorite { id } => {
            preferences.remove_from_favorites(id)?;
            print_json(&json!({ "favorite": false, "id": id }))?;
        }
        Command::Rate { id, rating } => {
            preferences.set_user_rating(id, rating)?;
            print_json(&json!({ "id": id, "rating": rating }))?;
        }
        Command::Favorites => print_json(&preferences.get_favorites())?,
        Command::Stats => {
            let stats = PreferenceStats::from_preferences(&preferences.load());
            print_json(&json!({
                "stats": stats,
                "topGenres": stats.top_genres,
            }))?;
        }
        Command::Export => {
            let now = chrono::Utc::now();
            let document = ExportDocument::build(&preferences.load(), now);
            let file_name = export_file_name(now.date_naive());
            std::fs::write(&file_name, serde_json::to_string_pretty(&document)?)
                .with_context(|| format!("Failed to write {}", file_name))?;
            tracing::info!(file = %file_name, "Exported preferences");
            print_json(&json!({ "exported": file_name }))?;
        }
    }

    if let Some(origin) = service.adapter().catalog_origin() {
        tracing::debug!(%origin, "Catalog origin");
    }

    Ok(())
}
