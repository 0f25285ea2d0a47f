mod cli;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use mx_core::config::{self, Config};
use mx_core::validate::parse_movie_id;
use mx_core::{MovieDetailView, SearchPage, SearchQuery};
use mx_server::service::MovieService;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting movie explorer");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    mx_server::start(config).await?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "movie_explorer=trace,mx_core=trace,mx_tmdb=trace,mx_server=trace,tower_http=debug"
                .to_string()
        } else {
            "movie_explorer=info,mx_core=info,mx_tmdb=info,mx_server=info,tower_http=info"
                .to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Search { query, page, json } => {
            let query = SearchQuery::parse(Some(query.as_str()), page.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(search(&query, cli.config.as_deref(), json))
        }
        Commands::Movie { id, json } => {
            let id = parse_movie_id(&id)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(movie(id, cli.config.as_deref(), json))
        }
        Commands::Config { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(show_configuration(cli.config.as_deref(), json))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("movie-explorer {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_service(config_path: Option<&Path>) -> Result<MovieService> {
    let config = config::load_config_or_default(config_path)?;
    Ok(mx_server::build_service(&config)?)
}

async fn search(query: &SearchQuery, config_path: Option<&Path>, json: bool) -> Result<()> {
    let service = load_service(config_path)?;
    let page = service.search(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_search_page(&page);
    }
    Ok(())
}

fn print_search_page(page: &SearchPage) {
    println!(
        "Page {} of {} ({} results)",
        page.page, page.total_pages, page.total_results
    );
    for movie in &page.results {
        let year = movie.release_date.get(..4).unwrap_or("----");
        println!(
            "  [{}] {} ({}) {:.1}",
            movie.id, movie.title, year, movie.vote_average
        );
    }
}

async fn movie(id: u64, config_path: Option<&Path>, json: bool) -> Result<()> {
    let service = load_service(config_path)?;
    let movie = service.movie_detail(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&movie)?);
    } else {
        print_movie(&movie);
    }
    Ok(())
}

fn print_movie(movie: &MovieDetailView) {
    println!("{} [{}]", movie.title, movie.id);
    println!("Released: {}", movie.release_date);
    println!("Runtime: {} min", movie.runtime);
    println!("Rating: {:.1}", movie.vote_average);
    if !movie.genres.is_empty() {
        println!("Genres: {}", movie.genres.join(", "));
    }
    if let Some(ref url) = movie.poster_url {
        println!("Poster: {url}");
    }
    println!("\n{}", movie.overview);

    if !movie.cast.is_empty() {
        println!("\nCast:");
        for member in &movie.cast {
            println!("  {} as {}", member.name, member.character);
        }
    }

    if !movie.trailers.is_empty() {
        println!("\nTrailers:");
        for trailer in &movie.trailers {
            println!("  https://www.youtube.com/watch?v={}", trailer.key);
        }
    }
}

async fn show_configuration(config_path: Option<&Path>, json: bool) -> Result<()> {
    let service = load_service(config_path)?;
    let display = service.display_configuration().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&display)?);
    } else {
        println!("Image base URL: {}", display.images.secure_base_url);
        println!("Poster sizes: {}", display.images.poster_sizes.join(", "));
        println!("Backdrop sizes: {}", display.images.backdrop_sizes.join(", "));
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {}", p.display());
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, searching default locations");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    print_config_summary(&config);
    Ok(())
}

fn print_config_summary(config: &Config) {
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Upstream: {}", config.tmdb.api_base_url);
    println!("  Language: {}", config.tmdb.language);
    println!(
        "  Configuration TTL: {}s",
        config.cache.configuration_ttl_secs
    );
    println!(
        "  Image presets: poster {}, backdrop {}, profile {}",
        config.images.poster_size, config.images.backdrop_size, config.images.profile_size
    );
    if let Some(ref dir) = config.server.static_dir {
        println!("  Static UI: {}", dir.display());
    }
}
