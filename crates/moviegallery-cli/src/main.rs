//! moviegallery - browse trending movies and search TMDB from the terminal.

/// Application configuration (TOML) and saved pagination state.
mod config;
/// Log-based gallery rendering.
mod view;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{
    API_KEY_ENV, AppConfig, config_file, load_state, resolve_config_dir, save_state, state_file,
};
use crate::view::{LogView, log_detail, log_movies};
use moviegallery_api::gallery::{MovieQueryClient, PaginationState};
use moviegallery_api::tmdb::TmdbClient;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Response language (overrides config, e.g. "en-US").
    #[arg(long, global = true)]
    language: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Show this week's trending movies.
    Trending(TrendingArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Jump to a page of the last search (or trending list).
    Page(PageArgs),
    /// Show details and cast of one movie.
    Movie(MovieArgs),
    /// Store TMDB settings in the config file.
    Config(ConfigArgs),
}

/// Arguments for the `trending` subcommand.
#[derive(clap::Args)]
struct TrendingArgs {
    /// Page number (starting at 1).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "dune").
    #[arg(long, required = true)]
    query: String,
    /// Page number (starting at 1).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `page` subcommand.
#[derive(clap::Args)]
struct PageArgs {
    /// Page number to show.
    #[arg(required = true)]
    number: u32,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigArgs {
    /// TMDB v3 API key.
    #[arg(long)]
    api_key: Option<String>,
    /// API base URL (e.g. a local mock server).
    #[arg(long)]
    base_url: Option<String>,
}

/// Gallery client used by every subcommand.
type GalleryClient = MovieQueryClient<TmdbClient, LogView>;

/// Loads config, applies environment overrides and builds the gallery client.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, no API key is
/// configured, the base URL is invalid, or the HTTP client fails to build.
#[instrument(skip_all)]
fn build_gallery_client(config_dir: &Path, language: Option<&str>) -> Result<GalleryClient> {
    let config = AppConfig::load(&config_file(config_dir))
        .context("failed to load config")?
        .with_env(|name| std::env::var(name).ok());

    let Some(api_key) = config.tmdb.api_key else {
        bail!(
            "TMDB API key is not configured: set {API_KEY_ENV} or tmdb.api_key in {}",
            config_file(config_dir).display()
        );
    };

    let mut builder = TmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(raw) = config.tmdb.base_url.as_deref() {
        let url = Url::parse(raw).with_context(|| format!("invalid TMDB base URL: {raw}"))?;
        builder = builder.base_url(url);
    }
    let api = builder.build().context("failed to build TMDB client")?;

    let language = language.map_or(config.tmdb.language, String::from);
    Ok(MovieQueryClient::new(api, LogView).language(language))
}

/// Runs the `config` subcommand.
///
/// Only the given settings change; the rest of the file is kept.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the config cannot be
/// loaded or saved.
#[instrument(skip_all)]
fn run_config(args: ConfigArgs, language: Option<String>, config_dir: &Path) -> Result<()> {
    let path = config_file(config_dir);
    let mut config = AppConfig::load(&path).context("failed to load config")?;

    if let Some(raw) = args.base_url.as_deref() {
        Url::parse(raw).with_context(|| format!("invalid TMDB base URL: {raw}"))?;
    }
    if let Some(api_key) = args.api_key {
        config.tmdb.api_key = Some(api_key);
    }
    if let Some(base_url) = args.base_url {
        config.tmdb.base_url = Some(base_url);
    }
    if let Some(language) = language {
        config.tmdb.language = language;
    }

    config.save(&path).context("failed to save config")?;
    tracing::info!("Saved config to {}", path.display());
    Ok(())
}

/// Runs the `trending` subcommand.
///
/// Starts a fresh pagination state so later `page` calls browse trending.
///
/// # Errors
///
/// Returns an error if the query fails or the state cannot be saved.
#[instrument(skip_all)]
async fn run_trending(client: &GalleryClient, args: &TrendingArgs, config_dir: &Path) -> Result<()> {
    let mut state = PaginationState::default();
    let result = client
        .fetch_trending(&mut state, args.page)
        .await
        .context("trending query failed")?;

    log_movies(&result.items);
    tracing::info!("Total results: {}", result.total_results);
    save_state(&state_file(config_dir), &state).context("failed to save pagination state")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query fails or the state cannot be saved.
#[instrument(skip_all)]
async fn run_search(client: &GalleryClient, args: &SearchArgs, config_dir: &Path) -> Result<()> {
    let path = state_file(config_dir);
    let mut state = load_state(&path).context("failed to load pagination state")?;
    search_page(client, &mut state, &args.query, args.page).await?;
    save_state(&path, &state).context("failed to save pagination state")
}

/// Searches and logs one page. Empty searches are rendered by the view's fallback.
async fn search_page(
    client: &GalleryClient,
    state: &mut PaginationState,
    query: &str,
    page: u32,
) -> Result<()> {
    let result = client
        .fetch_query(state, query, page)
        .await
        .context("search query failed")?;

    if !result.is_empty() {
        log_movies(&result.items);
        tracing::info!("Total results: {}", result.total_results);
    }
    Ok(())
}

/// Runs the `page` subcommand.
///
/// Continues the last search if one was saved, otherwise pages through
/// trending movies.
///
/// # Errors
///
/// Returns an error if the page is out of range, the query fails, or the
/// state cannot be loaded or saved.
#[instrument(skip_all)]
async fn run_page(client: &GalleryClient, args: &PageArgs, config_dir: &Path) -> Result<()> {
    let path = state_file(config_dir);
    let mut state = load_state(&path).context("failed to load pagination state")?;

    // The saved page count always belongs to the query `last_query` selects.
    if state.total_pages() > 0 && !state.has_page(args.number) {
        bail!(
            "page {} is out of range (1..={})",
            args.number,
            state.total_pages()
        );
    }

    if let Some(query) = state.last_query().map(String::from) {
        tracing::info!("Continuing search: {query}");
        search_page(client, &mut state, &query, args.number).await?;
    } else {
        let result = client
            .fetch_trending(&mut state, args.number)
            .await
            .context("trending query failed")?;
        log_movies(&result.items);
    }

    save_state(&path, &state).context("failed to save pagination state")
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the lookup fails.
#[instrument(skip_all)]
async fn run_movie(client: &GalleryClient, args: &MovieArgs) -> Result<()> {
    let detail = client
        .fetch_by_id(&args.id)
        .await
        .context("movie lookup failed")?;
    log_detail(&detail);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let config_dir =
        resolve_config_dir(cli.dir.as_deref()).context("failed to resolve config directory")?;
    if let Commands::Config(args) = cli.command {
        return run_config(args, cli.language, &config_dir);
    }
    let client = build_gallery_client(&config_dir, cli.language.as_deref())?;

    match cli.command {
        Commands::Trending(args) => run_trending(&client, &args, &config_dir).await,
        Commands::Search(args) => run_search(&client, &args, &config_dir).await,
        Commands::Page(args) => run_page(&client, &args, &config_dir).await,
        Commands::Movie(args) => run_movie(&client, &args).await,
        // Handled before the client is built.
        Commands::Config(_) => Ok(()),
    }
}
