mod chat;
mod cli;
mod dotenv;
mod repl;
mod setup;

use agentloom_config::AgentloomConfig;
use agentloom_session::HttpTransport;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

fn init_logging(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: cli::Args, config: AgentloomConfig) -> agentloom_common::Result<()> {
    let http_config = setup::transport_config(&config.transport, args.url.as_deref());
    let transport = HttpTransport::new(http_config)?;
    tracing::info!(url = %transport.config().stream_url(), "using agent endpoint");

    let mut session = setup::build_session(
        &config.session,
        args.agent.as_deref(),
        args.context.as_deref(),
    );

    chat::run(&mut session, &transport).await?;

    if session.in_flight_count() > 0 {
        tracing::debug!(
            in_flight = session.in_flight_count(),
            "exiting with replies still streaming"
        );
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::load();

    let args = cli::parse();

    // Logging depends on the config's level, so load problems are
    // reported once the subscriber exists.
    let loaded = match args.config {
        Some(ref path) => agentloom_config::load_config_from(path),
        None => agentloom_config::load_config(),
    };
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (AgentloomConfig::default(), Some(e)),
    };

    init_logging(&setup::log_directive(&args, &config));
    tracing::info!("agentloom v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    if let Err(e) = run(args, config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
