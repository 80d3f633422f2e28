use anyhow::Context;
use clap::Parser;
use mocker_http::proxy::create_http_client;
use mocker_http::{Config, Dispatcher, MockServer, RouteTable};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serve canned, forwarded and recorded HTTP responses from a route table
#[derive(Parser, Debug)]
#[command(name = "mocker", author, version, about)]
struct Args {
    /// Route configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long, env = "MOCKER_CONFIG", default_value = "mocker.yaml")]
    config: PathBuf,

    /// Override the listen host from the config file
    #[arg(long, env = "MOCKER_HOST")]
    host: Option<String>,

    /// Override the listen port from the config file
    #[arg(short, long, env = "MOCKER_PORT")]
    port: Option<u16>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Load and check the routes, print them, and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    if let Some(host) = args.host {
        config.listen.host = host;
    }
    if let Some(port) = args.port {
        config.listen.port = port;
    }

    let routes = RouteTable::from_definitions(&config.routes).context("Failed to load routes")?;

    if args.check {
        println!("{} routes OK", routes.len());
        for route in routes.routes() {
            println!(
                "  {:<8} {:<30} {:?}/{:?} format={} delay={}ms  {}",
                route.method(),
                route.path(),
                route.status,
                route.strategy,
                route.format_label(),
                route.wait.duration_ms(),
                route.name
            );
        }
        return Ok(());
    }

    let client = create_http_client(&config.upstream).context("Failed to build HTTP client")?;
    let dispatcher = Dispatcher::new(routes, client);

    let server = MockServer::bind(config.listen.address(), dispatcher)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen.address()))?;
    let shutdown = server.shutdown_handle();

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl-C");
        let _ = shutdown.send(());
    });

    server.run().await;
    Ok(())
}
