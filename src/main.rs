use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use bikolpo::api::{set_silent, HttpCatalogSource};
use bikolpo::cache::{CatalogLoader, FileStore};
use bikolpo::config::{self, Settings, DEFAULT_DEBOUNCE_MS, DEFAULT_HOST, DEFAULT_PORT};
use bikolpo::models::{AppState, CatalogStats, OriginFilter, Product, Verdict};
use bikolpo::routes::build_router;
use bikolpo::search::{Debouncer, IndexSnapshot, SearchIndex};
use bikolpo::services::{check_product, filter_by_origin, ProductReport};
use bikolpo::session::SearchSession;
use bikolpo::utils::{new_table, product_table, related_table};

type Loader = CatalogLoader<HttpCatalogSource, FileStore>;

#[derive(Parser)]
#[command(
    name = "bikolpo",
    author,
    version,
    about = "Check where a product comes from and find local alternatives",
    long_about = r#"Bikolpo looks products up in the BikOlpoo catalog, tells you whether they originate from India or Bangladesh, and lists locally made alternatives.

The catalog is cached on disk for 24 hours (CACHE_TTL_SECS). Configuration comes from environment variables or a .env file; use `--env-file` to point at a specific one.

Examples:
  bikolpo search "milk"
  bikolpo check "Milk Powder"
  bikolpo list --origin BD
  bikolpo serve --port 8080
"#,
    after_help = "Use `bikolpo <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fuzzy-search the catalog by name, barcode, category or details
    Search {
        query: String,
        /// Maximum number of suggestions to show
        #[arg(long, short = 'n')]
        limit: Option<usize>,
    },
    /// Show a product's origin and its alternatives
    #[command(about = "Check a product by exact name", long_about = "Look a product up by its exact name (falling back to a case-insensitive name or barcode match), print whether it is flagged and list related alternatives.")]
    Check { name: String },
    /// List catalog products
    List {
        /// Origin filter: all, BD or IN
        #[arg(long, default_value = "all")]
        origin: String,
    },
    /// Show product counts per origin
    Stats,
    /// Type queries line by line and pick suggestions with `:N`
    #[command(about = "Interactive lookup", long_about = "Read queries from stdin. Suggestions appear once typing pauses; enter `:N` to select the N-th suggestion and `:q` to quit.")]
    Interactive,
    /// Inspect or clear the local catalog cache
    Cache {
        #[command(subcommand)]
        sub: CacheCommands,
    },
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Validate configuration and catalog connectivity
    CheckConfig,
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show when the catalog was last fetched
    Status,
    /// Delete the cached catalog
    Clear,
}

fn build_loader(settings: &Settings) -> Loader {
    let source = match HttpCatalogSource::new(&settings.catalog_url, settings.fetch_timeout) {
        Ok(s) => s.with_retries(settings.fetch_retries, settings.retry_backoff),
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::new("Failed to create HTTP client").red(), e);
            process::exit(1);
        }
    };
    CatalogLoader::new(source, FileStore::new(&settings.cache_dir), settings.cache_ttl)
}

async fn load_or_exit(loader: &Loader) -> Vec<Product> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading products...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = loader.load().await;
    spinner.finish_and_clear();
    match result {
        Ok(products) => products,
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new("Failed to load products").red(), e);
            process::exit(1);
        }
    }
}

fn verdict_line(verdict: Verdict) -> String {
    match verdict {
        Verdict::Flagged => yansi::Paint::new(format!("{} Made in India", verdict.symbol())).red().bold().to_string(),
        Verdict::Alternative => yansi::Paint::new(format!("{} Made in Bangladesh", verdict.symbol())).green().bold().to_string(),
        Verdict::Unknown => yansi::Paint::new(format!("{} Origin unknown", verdict.symbol())).yellow().to_string(),
    }
}

fn print_report(report: &ProductReport) {
    let p = &report.product;
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Name", p.name.as_str()]);
    table.add_row(vec!["Origin Country", p.origin.display_name()]);
    table.add_row(vec!["Category", p.category.as_str()]);
    table.add_row(vec!["Barcode", p.barcode.as_deref().unwrap_or("N/A")]);
    table.add_row(vec!["Details", p.details.as_deref().unwrap_or("No additional details")]);
    println!("\n{table}");
    println!("{}\n", verdict_line(report.verdict));

    if report.related.is_empty() {
        println!("{}", yansi::Paint::new("No related products found.").dim());
    } else {
        println!("{}", yansi::Paint::new("Related Products:").bold().underline());
        println!("{}", related_table(&report.related));
    }
}

fn print_suggestions(suggestions: &[Product]) {
    if suggestions.is_empty() {
        println!("{}", yansi::Paint::new("(no suggestions)").dim());
        return;
    }
    for (i, p) in suggestions.iter().enumerate() {
        let verdict = p.verdict();
        let name = match verdict {
            Verdict::Flagged => yansi::Paint::new(p.name.as_str()).red().to_string(),
            Verdict::Alternative => yansi::Paint::new(p.name.as_str()).green().to_string(),
            Verdict::Unknown => p.name.clone(),
        };
        println!("  {:>2}. {} {}", i + 1, name, yansi::Paint::new(format!("[{}]", p.origin)).dim());
    }
}

async fn run_interactive(products: Vec<Product>, settings: &Settings) {
    let index = Arc::new(SearchIndex::build(&products));
    let mut session = SearchSession::new(index.clone(), settings.related_approval);
    let debouncer = Debouncer::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<(String, Vec<Product>)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "{}",
        yansi::Paint::new(format!("{} products loaded. Type to search, `:N` to select, `:q` to quit.", index.len())).cyan()
    );

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Flush the last pending query before leaving.
                        if debouncer.is_pending() {
                            if let Ok(Some((query, hits))) = tokio::time::timeout(debouncer.delay() * 2, rx.recv()).await {
                                if session.apply_suggestions(&query, hits) {
                                    print_suggestions(session.suggestions());
                                }
                            }
                        }
                        break;
                    }
                    Err(e) => {
                        tracing::error!(%e, "Failed to read stdin");
                        break;
                    }
                };

                let trimmed = line.trim();
                if trimmed == ":q" {
                    break;
                }
                if let Some(cmd) = trimmed.strip_prefix(':') {
                    match cmd.parse::<usize>() {
                        Ok(n) if n >= 1 => {
                            debouncer.cancel();
                            match session.select_suggestion(n - 1) {
                                Some(report) => print_report(report),
                                None => println!("{}", yansi::Paint::new(format!("No suggestion #{}", n)).yellow()),
                            }
                        }
                        _ => println!("{}", yansi::Paint::new("Unknown command; use :N or :q").yellow()),
                    }
                    continue;
                }

                session.on_input(&line);
                let index = index.clone();
                let tx = tx.clone();
                let limit = settings.suggest_limit;
                debouncer.call(move || {
                    let hits = index
                        .suggest_scored(&line, Some(limit))
                        .into_iter()
                        .map(|s| s.product)
                        .collect();
                    let _ = tx.send((line, hits));
                });
            }
            Some((query, hits)) = rx.recv() => {
                if session.apply_suggestions(&query, hits) {
                    print_suggestions(session.suggestions());
                }
            }
        }
    }
}

async fn start_server(loader: Loader, settings: &Settings, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::new("Invalid host/port format").red(), e);
            process::exit(1);
        }
    };
    let state = AppState {
        catalog: Arc::new(loader),
        related_approval: settings.related_approval,
        suggest_limit: settings.suggest_limit,
        search_index: Arc::new(IndexSnapshot::new()),
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting Bikolpo server");
    println!("{} {}", yansi::Paint::new("Web server running on").green(), yansi::Paint::new(format!("http://{}", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", yansi::Paint::new(format!("Failed to bind to {}", addr)).red(), e, yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    // RUST_LOG may come from the env file.
    config::load_env_file(cli.env_file.as_deref());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        set_silent(true);
    }

    let settings = Settings::from_env();
    let loader = build_loader(&settings);

    match cli.command {
        Commands::Search { query, limit } => {
            let products = load_or_exit(&loader).await;
            let index = SearchIndex::build(&products);
            let hits: Vec<Product> = index
                .suggest_scored(&query, Some(limit.unwrap_or(settings.suggest_limit)))
                .into_iter()
                .map(|s| s.product)
                .collect();
            if hits.is_empty() {
                println!("{}", yansi::Paint::new(format!("No products match '{}'", query.trim())).yellow());
                return;
            }
            println!("\n{}", product_table(&hits));
        }
        Commands::Check { name } => {
            let products = load_or_exit(&loader).await;
            match check_product(&products, &name, settings.related_approval) {
                Ok(report) => print_report(&report),
                Err(e) => {
                    eprintln!("{}", yansi::Paint::new(e.to_string()).red());
                    process::exit(1);
                }
            }
        }
        Commands::List { origin } => {
            let products = load_or_exit(&loader).await;
            let filter: OriginFilter = origin.parse().unwrap_or_default();
            let shown = filter_by_origin(&products, &filter);
            println!("\n{}", product_table(&shown));
            println!(
                "{}\n",
                yansi::Paint::new(format!("Showing {} of {} products (origin: {})", shown.len(), products.len(), filter.as_param())).dim()
            );
        }
        Commands::Stats => {
            let products = load_or_exit(&loader).await;
            let stats = CatalogStats::from_products(&products);
            let mut table = new_table();
            table.set_header(vec!["Total Products", "Bangladesh Products", "Indian Products", "Other"]);
            table.add_row(vec![
                stats.total.to_string(),
                stats.bangladesh.to_string(),
                stats.india.to_string(),
                stats.other.to_string(),
            ]);
            println!("\n{table}\n");
        }
        Commands::Interactive => {
            let products = load_or_exit(&loader).await;
            run_interactive(products, &settings).await;
        }
        Commands::Cache { sub } => match sub {
            CacheCommands::Status => {
                let status = loader.cache_status();
                match status.fetched_at_millis.and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis) {
                    Some(at) => {
                        let state = if status.fresh {
                            yansi::Paint::new("fresh").green().to_string()
                        } else {
                            yansi::Paint::new("expired").red().to_string()
                        };
                        let age = status.age.map(|a| format!("{}m", a.as_secs() / 60)).unwrap_or_else(|| "?".into());
                        println!("Catalog fetched at {} ({} ago, {})", at.to_rfc3339(), age, state);
                    }
                    None => println!("{}", yansi::Paint::new("No cached catalog").dim()),
                }
                println!("Cache TTL: {}s", loader.ttl().as_secs());
                println!("Cache directory: {}", settings.cache_dir.display());
            }
            CacheCommands::Clear => {
                if let Err(e) = loader.invalidate() {
                    eprintln!("{}: {}", yansi::Paint::new("Failed to clear cache").red(), e);
                    process::exit(1);
                }
                println!("{}", yansi::Paint::new("Catalog cache cleared").green());
            }
        },
        Commands::Serve { host, port } => {
            start_server(loader, &settings, &host, port).await;
        }
        Commands::CheckConfig => {
            println!("Catalog URL:     {}", settings.catalog_url);
            println!("Cache directory: {}", settings.cache_dir.display());
            println!("Cache TTL:       {}s", settings.cache_ttl.as_secs());
            println!("Fetch timeout:   {}s (retries: {})", settings.fetch_timeout.as_secs(), settings.fetch_retries);
            println!("Related gate:    {:?}", settings.related_approval);
            match loader.load().await {
                Ok(products) => {
                    println!("{}", yansi::Paint::new(format!("Configuration looks valid ({} products available)", products.len())).green());
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e);
                    process::exit(1);
                }
            }
        }
    }
}
