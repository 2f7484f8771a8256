use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use fanart_client::{
    ArtworkKind, CancellationToken, Context, FanartClient, FieldError, Image, Movie,
};
use fanart_config::{load as load_config, AppConfig};
use tracing::{info, warn};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Debug, Parser)]
#[command(name = "fanart-cli")]
#[command(version, about = "Look up fanart.tv artwork for a movie")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TMDB or IMDB id of the movie
    movie_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = init_tracing();

    let config = load_config(cli.config.as_deref())?;
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        set_log_level(&filter, &config.telemetry.log_level)?;
    }

    let client = build_client(&config)?;

    let token = CancellationToken::new();
    tokio::spawn(cancel_on_interrupt(token.clone()));
    let ctx = Context::background().with_cancellation(token);

    let movie = client
        .get_movie(&ctx, &cli.movie_id, &[])
        .await
        .with_context(|| format!("failed to fetch movie {}", cli.movie_id))?;

    print!("{}", render_movie(&movie)?);
    Ok(())
}

/// Install the subscriber before anything logs. The filter starts from
/// `RUST_LOG` (or `info`) and can be swapped once configuration is known.
fn init_tracing() -> FilterHandle {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
    handle
}

fn set_log_level(filter: &FilterHandle, level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level {level:?}"))?;
    filter.reload(env_filter)?;
    Ok(())
}

fn build_client(config: &AppConfig) -> Result<FanartClient> {
    let fanart = &config.fanart;
    let mut builder = FanartClient::builder().timeout(fanart.timeout());

    match fanart.api_key.as_deref() {
        Some(key) => builder = builder.api_key(key),
        None => warn!(target: "cli", "no API key configured (FANART_FANART__API_KEY)"),
    }
    if let Some(key) = fanart.client_key.as_deref() {
        builder = builder.client_key(key);
    }

    Ok(builder.build()?)
}

async fn cancel_on_interrupt(token: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(target: "cli", "interrupt received, cancelling request");
        token.cancel();
    }
}

/// Absent fields become `None`; shape errors still fail.
fn optional<T>(result: Result<T, FieldError>) -> Result<Option<T>, FieldError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

fn most_liked(images: &[Image]) -> Option<&Image> {
    images.iter().max_by_key(|image| {
        image
            .likes()
            .ok()
            .and_then(|likes| likes.parse::<u64>().ok())
            .unwrap_or(0)
    })
}

fn render_movie(movie: &Movie) -> Result<String> {
    let mut out = String::new();
    let name = optional(movie.name())?.unwrap_or_else(|| "(untitled)".to_string());
    let tmdb = optional(movie.tmdb_id())?.unwrap_or_else(|| "-".to_string());
    let imdb = optional(movie.imdb_id())?.unwrap_or_else(|| "-".to_string());
    writeln!(out, "{name} (tmdb {tmdb}, imdb {imdb})")?;

    for kind in ArtworkKind::ALL {
        let Some(images) = optional(movie.images(kind))? else {
            continue;
        };
        let Some(top) = most_liked(&images) else {
            continue;
        };
        writeln!(
            out,
            "  {:<16} {:>3} image(s), top: {}",
            kind.field_name(),
            images.len(),
            top.url()?
        )?;
    }

    Ok(out)
}
