use anyhow::Result;
use clap::Parser;
use linkshrink::config::{Config, Environment};
use tracing_subscriber::EnvFilter;

/// URL shortening service.
#[derive(Parser)]
#[command(name = "linkshrink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bind address, overrides `LISTEN`
    #[arg(long)]
    listen: Option<String>,

    /// Deployment environment (local, staging, production), overrides `APP_ENV`
    #[arg(long)]
    environment: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }
    if let Some(environment) = cli.environment {
        config.environment = environment.parse::<Environment>()?;
    }
    config.validate()?;

    init_tracing(&config);
    config.print_summary();

    linkshrink::server::run(config).await
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
