mod commands;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use lingua_catalog::resolver::{load_table, ResolverBuilder};
use lingua_catalog::source::ServerHandlers;
use lingua_catalog::tracker::CallCounter;
use lingua_core::config::{self, TrackingMode};
use lingua_core::{locale::Locale, params::ParamValue};

#[derive(Parser)]
#[command(
    name = "lingua",
    version,
    about = "Lingua: localized message resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "lingua.toml")]
    config: String,

    /// Directory of `<locale>.json` tables (overrides the config).
    #[arg(long)]
    catalog: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a message key.
    Resolve {
        /// The message key, e.g. `dashboard_daysAgo`.
        key: String,
        /// Explicit locale; defaults to the configured default locale.
        #[arg(short, long)]
        locale: Option<Locale>,
        /// Template parameter as `name=value` (repeatable).
        #[arg(short, long = "param", value_parser = commands::parse_param)]
        params: Vec<(String, ParamValue)>,
    },
    /// Detect the locale of a request.
    Detect {
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        cookie: Option<String>,
        /// `Accept-Language` header value.
        #[arg(long)]
        header: Option<String>,
    },
    /// List message keys.
    Keys {
        /// Only keys starting with this prefix.
        #[arg(long)]
        prefix: Option<String>,
    },
    /// List supported locales.
    Locales,
    /// Report translation coverage and catalog issues.
    Check {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    if let Some(dir) = cli.catalog {
        cfg.locale.catalog_dir = Some(dir);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.lingua.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "source={:?} tracking={:?} base={} default={}",
        cfg.source.kind,
        cfg.tracking.mode,
        cfg.locale.base,
        cfg.locale.default
    );

    match cli.command {
        Commands::Resolve {
            key,
            locale,
            params,
        } => {
            let mut builder = ResolverBuilder::from_config(&cfg, ServerHandlers::new())?;
            let counter = match cfg.tracking.mode {
                TrackingMode::Count => {
                    let counter = Arc::new(CallCounter::new());
                    builder = builder.tracker(counter.clone());
                    Some(counter)
                }
                _ => None,
            };
            let resolver = builder.build()?;
            let params = params.into_iter().collect();
            println!("{}", resolver.resolve(&key, locale, &params));
            if let Some(counter) = counter {
                eprint!("{}", commands::call_counts(&counter));
            }
        }
        Commands::Detect {
            path,
            query,
            cookie,
            header,
        } => {
            let locale = commands::detect(
                path.as_deref(),
                query.as_deref(),
                cookie.as_deref(),
                header.as_deref(),
                cfg.locale.default,
            );
            println!("{locale}");
        }
        Commands::Keys { prefix } => {
            let table = load_table(&cfg)?;
            for key in commands::keys(&table, prefix.as_deref()) {
                println!("{key}");
            }
        }
        Commands::Locales => {
            print!("{}", commands::locales(&cfg.locale));
        }
        Commands::Check { json } => {
            let table = load_table(&cfg)?;
            let issues = table.issues();
            if json {
                let report = serde_json::json!({
                    "coverage": table.coverage(),
                    "issues": issues,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", commands::check_report(&table.coverage(), &issues));
            }
            if issues.iter().any(|i| i.is_error()) {
                anyhow::bail!("catalog has placeholder mismatches");
            }
        }
    }

    Ok(())
}
