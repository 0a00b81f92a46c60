use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modkit::{ModuleEntry, ModuleRegistry, RunOptions, ShutdownOptions};
use runtime::{AppConfig, AppConfigProvider, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use api_ingress::ApiIngress;
use users_admin::UsersAdmin;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Module sections this binary reads from `modules:`.
const HOSTED_MODULES: [&str; 2] = ["api_ingress", UsersAdmin::NAME];

fn unread_module_sections(config: &AppConfig) -> Vec<&str> {
    let mut names: Vec<&str> = config
        .modules
        .keys()
        .map(String::as_str)
        .filter(|name| !HOSTED_MODULES.contains(name))
        .collect();
    names.sort_unstable();
    names
}

// Adapter to make AppConfigProvider implement modkit::ConfigProvider
struct ModkitConfigAdapter(Arc<AppConfigProvider>);

impl modkit::ConfigProvider for ModkitConfigAdapter {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.0.get_module_config(module_name)
    }
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// DSN with the password masked, for logs.
fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => dsn.to_string(),
    }
}

/// BlogDesk Server - blog administration backend
#[derive(Parser)]
#[command(name = "blogdesk-server")]
#[command(about = "BlogDesk Server - blog administration backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database seeded with demo users
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);
    prepare_module_configs(&mut config, &args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "BlogDesk Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Fill module sections derived from the global ones.
///
/// `api_ingress.bind_addr` follows `server.host:port` unless the section sets
/// it explicitly; `--port` always wins. `--mock` seeds demo users.
fn prepare_module_configs(config: &mut AppConfig, args: &CliArgs) {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let timeout_sec = config.server.timeout_sec;

    let ingress = config
        .modules
        .entry("api_ingress".to_string())
        .or_insert_with(|| json!({}));
    if let Some(section) = ingress.as_object_mut() {
        if args.port.is_some() || !section.contains_key("bind_addr") {
            section.insert("bind_addr".into(), Value::from(bind_addr));
        }
        if timeout_sec > 0 && !section.contains_key("request_timeout_secs") {
            section.insert("request_timeout_secs".into(), Value::from(timeout_sec));
        }
    }

    if args.mock {
        let users = config
            .modules
            .entry(UsersAdmin::NAME.to_string())
            .or_insert_with(|| json!({}));
        if let Some(section) = users.as_object_mut() {
            section.insert("seed_demo".into(), Value::Bool(true));
        }
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;

    match url.scheme() {
        "sqlite" => Ok("sqlite"),
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

async fn connect_db(db_cfg: &DatabaseConfig, home_dir: &Path) -> Result<DatabaseConnection> {
    let backend = detect_from_dsn(db_cfg)?;

    let mut dsn = db_cfg.url.trim().to_string();
    // Absolutize sqlite DSNs to avoid cwd issues
    if dsn.starts_with("sqlite://") {
        dsn = absolutize_sqlite_dsn(&dsn, home_dir, true)?;
    }

    let mut opts = ConnectOptions::new(dsn.clone());
    if let Some(n) = db_cfg.max_conns {
        opts.max_connections(n);
    }
    if let Some(ms) = db_cfg.acquire_timeout_ms {
        opts.acquire_timeout(Duration::from_millis(ms));
    }
    opts.sqlx_logging(false);

    tracing::info!(backend, dsn = %redact_dsn(&dsn), "Connecting to database");
    Database::connect(opts)
        .await
        .with_context(|| format!("failed to connect to {}", redact_dsn(&dsn)))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let db_cfg = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("Database URL not configured"))?;

    let db = match connect_db(&db_cfg, &config.home_dir()).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Cannot reach the user store; exiting");
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };

    tracing::info!("Initializing modules...");
    let config_provider = Arc::new(ModkitConfigAdapter(Arc::new(AppConfigProvider::new(
        config,
    ))));

    let users = Arc::new(UsersAdmin::default());
    let host = Arc::new(ApiIngress::default().with_openapi(users_admin::api_doc()));
    let registry = ModuleRegistry::new()
        .with(ModuleEntry::new("api_ingress", host.clone()))
        .with(ModuleEntry::new(UsersAdmin::NAME, users.clone()).db(users.clone()).rest(users));

    modkit::run(RunOptions {
        registry,
        host,
        db: Some(db),
        modules_cfg: config_provider,
        shutdown: ShutdownOptions::Signals,
    })
    .await
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    if let Some(db) = &config.database {
        detect_from_dsn(db)?;
    }
    for name in unread_module_sections(&config) {
        tracing::warn!(module = name, "config section is not read by any hosted module");
    }

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
