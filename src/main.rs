use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use teammate_gate::config::Config;
use teammate_gate::entitlement::{Offering, Offerings};
use teammate_gate::lobby::{wait_for_spawn, LobbyReducer, LobbyStatus};
use teammate_gate::logging::init_tracing;
use teammate_gate::mvi::Reducer;
use teammate_gate::provider::{
    bootstrap, InMemoryProvider, Platform, ProviderError, ScriptedPurchase,
};
use teammate_gate::router::TracingRouter;
use teammate_gate::session::SessionOrchestrator;

/// Run one gated session against the in-memory store sandbox.
#[derive(Debug, Parser)]
#[command(name = "teammate-gate", version)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store platform whose key is used to initialize the provider.
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,

    /// Start with the entitlement already active.
    #[arg(long)]
    entitled: bool,

    /// Offer to buy from the paywall (e.g. "monthly", "yearly").
    #[arg(long)]
    buy: Option<String>,

    /// How the sandbox settles the purchase.
    #[arg(long, value_enum, default_value_t = OutcomeArg::Grant)]
    outcome: OutcomeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Ios,
    Android,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Android => Platform::Android,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutcomeArg {
    Grant,
    Cancel,
    Fail,
    NoEntitlement,
}

impl From<OutcomeArg> for ScriptedPurchase {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Grant => ScriptedPurchase::Grant,
            OutcomeArg::Cancel => ScriptedPurchase::Cancel,
            OutcomeArg::Fail => {
                ScriptedPurchase::Fail(ProviderError::Network("sandbox offline".to_string()))
            }
            OutcomeArg::NoEntitlement => ScriptedPurchase::GrantWithoutEntitlement,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;

    init_tracing(config.provider.debug_logs);

    let platform = cli.platform.map(Platform::from).unwrap_or_else(Platform::current);
    // The sandbox accepts any key; fill in a placeholder so a fresh
    // install runs without a config file.
    let key = match platform {
        Platform::Ios => &mut config.provider.ios_api_key,
        Platform::Android => &mut config.provider.android_api_key,
    };
    key.get_or_insert_with(|| format!("sandbox_{platform}"));

    let catalog = Offerings::with_current(Offering {
        identifier: "default".to_string(),
        packages: config.offers.clone(),
    });
    let mut sandbox = InMemoryProvider::new(&config.entitlement.id, catalog);
    if cli.entitled {
        sandbox = sandbox.entitled();
    }
    sandbox.set_next_purchase(cli.outcome.into());
    let provider = Arc::new(sandbox);

    bootstrap(provider.as_ref(), &config.provider, platform)
        .await
        .context("failed to initialize entitlement provider")?;

    let mut session = SessionOrchestrator::from_config(
        provider.clone(),
        &config,
        Box::new(TracingRouter::default()),
    );

    session.on_enter().await;
    if session.state().is_home() {
        session.request_access();
    }
    if let Some(offer) = cli.buy.as_deref() {
        session.select_offer(offer).await;
    }

    println!("screen: {}", session.state().screen());
    if let Some(notice) = session.state().notice() {
        println!("notice: {} - {}", notice.title, notice.message);
    }

    if session.state().is_granted() {
        let mut lobby = LobbyStatus::default();
        println!("lobby: {}", lobby.message());
        let handle = session.lifecycle_handle();
        if let Some(intent) = wait_for_spawn(config.lobby.spawn_delay(), &handle).await {
            lobby = LobbyReducer::reduce(lobby, intent);
        }
        println!("lobby: {}", lobby.message());
    }

    for event in session.events().events() {
        println!("event: {:?}", event.kind);
    }

    let calls = provider.calls();
    tracing::debug!(
        status_calls = calls.entitlement_status,
        offering_calls = calls.current_offerings,
        purchase_calls = calls.purchase,
        "Provider call counts"
    );

    session.tear_down();
    Ok(())
}
