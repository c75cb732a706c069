//! Courseflow - Canvas LMS sync daemon.
//!
//! Main entry point: loads configuration, wires the transport, sync
//! service, cache, advisor, and API server together, and drives the
//! periodic refresh and deadline-reminder loops.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use courseflow_advisor::AdvisorClient;
use courseflow_api::{ApiConfig, ApiServer, AppState};
use courseflow_cache::{FilePrefsStore, FileSnapshotStore};
use courseflow_client::{CanvasClient, HttpTransport};
use courseflow_config::{Config, ConfigLoader, NotificationFrequency};
use courseflow_protocols::PlanFocus;
use courseflow_sync::{deadlines, digest, SyncService};

/// Courseflow CLI.
#[derive(Parser)]
#[command(name = "courseflow")]
#[command(about = "Canvas LMS sync daemon with cached snapshots and study-plan suggestions")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "courseflow.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon in the foreground (default)
    Run {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one refresh cycle and print the report
    Refresh,

    /// Generate a study plan from the cached snapshot and print it
    Plan {
        #[arg(long, value_enum, default_value_t = FocusArg::Sidepanel)]
        focus: FocusArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FocusArg {
    Sidepanel,
    Dashboard,
}

impl From<FocusArg> for PlanFocus {
    fn from(value: FocusArg) -> Self {
        match value {
            FocusArg::Sidepanel => PlanFocus::Sidepanel,
            FocusArg::Dashboard => PlanFocus::Dashboard,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.validate().context("invalid configuration")?;

    let state = build_state(&config).await?;

    match cli.command.unwrap_or(Commands::Run {
        host: None,
        port: None,
    }) {
        Commands::Run { host, port } => run_daemon(config, state, host, port).await,
        Commands::Refresh => run_refresh(state).await,
        Commands::Plan { focus } => run_plan(state, focus.into()).await,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("courseflow=info,warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let transport =
        HttpTransport::new(&config.canvas.base_url, config.canvas.session_cookie.clone())
            .context("failed to build Canvas transport")?;
    let client = Arc::new(CanvasClient::new(
        Arc::new(transport),
        config.canvas.base_url.clone(),
        config.canvas.page_size,
    ));

    let store = FileSnapshotStore::new(&config.sync.storage_path)
        .await
        .context("failed to open snapshot store")?;
    let prefs = FilePrefsStore::new(&config.sync.storage_path)
        .await
        .context("failed to open preference store")?;

    let advisor = if config.advisor.api_key.is_empty() {
        None
    } else {
        Some(AdvisorClient::new(
            config.advisor.api_url.clone(),
            config.advisor.api_key.clone(),
            config.advisor.model.clone(),
            config.advisor.temperature,
        ))
    };

    let sync = Arc::new(SyncService::new(client, Arc::new(store)));
    Ok(Arc::new(AppState::new(sync, Arc::new(prefs), advisor)))
}

async fn run_daemon(
    config: Config,
    state: Arc<AppState>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if state.sync.restore().await {
        info!("serving restored snapshot while the first refresh runs");
    }

    spawn_refresh_loop(state.clone(), config.sync.refresh_interval_minutes);
    if config.notifications.enabled {
        spawn_deadline_loop(state.clone(), &config);
        spawn_daily_summary_loop(state.clone());
    }

    let api_config = ApiConfig::new(
        host.unwrap_or(config.server.host),
        port.unwrap_or(config.server.port),
    );
    let server = ApiServer::new(api_config, state);
    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {e}"))
}

async fn run_refresh(state: Arc<AppState>) -> anyhow::Result<()> {
    state.sync.restore().await;
    let report = state.sync.refresh().await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run_plan(state: Arc<AppState>, focus: PlanFocus) -> anyhow::Result<()> {
    let Some(advisor) = state.advisor.clone() else {
        anyhow::bail!("no advisor API key configured");
    };

    state.sync.restore().await;
    let (snapshot, _) = state.sync.get_data().await;
    if snapshot.all_assignments.is_empty() {
        let report = state.sync.refresh().await;
        if !report.any_applied() {
            warn!("refresh applied nothing, planning from an empty snapshot");
        }
    }

    let prefs = state.prefs.load().await;
    let (snapshot, _) = state.sync.get_data().await;
    let digest = digest::assignments_digest(
        &snapshot.all_assignments,
        Utc::now(),
        prefs.weeks_before,
        prefs.weeks_after,
    );

    let plan = advisor
        .generate_plan(&digest, focus, Utc::now())
        .await
        .context("plan generation failed")?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

/// Periodic background refresh, sharing the same refresh path as a
/// user-triggered one. The auto-refresh preference is consulted on every
/// tick so toggling it needs no restart.
fn spawn_refresh_loop(state: Arc<AppState>, interval_minutes: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_minutes * 60));
        loop {
            ticker.tick().await;
            if !state.prefs.load().await.auto_refresh {
                continue;
            }
            let report = state.sync.refresh().await;
            info!(applied = report.any_applied(), "periodic refresh completed");
        }
    });
}

/// Hourly deadline check against the cached snapshot.
fn spawn_deadline_loop(state: Arc<AppState>, config: &Config) {
    let notifications = config.notifications.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(3600));
        // The first tick completes immediately; reminders start an hour in.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let now = Utc::now();
            if deadlines::in_quiet_hours(
                now,
                &notifications.quiet_hours_start,
                &notifications.quiet_hours_end,
            ) {
                continue;
            }

            let (snapshot, _) = state.sync.get_data().await;
            let buckets = deadlines::deadline_buckets(&snapshot.all_assignments, now);
            let frequency = map_frequency(notifications.frequency);
            for notice in deadlines::plan_notices(&buckets, frequency, now) {
                info!(title = %notice.title, "deadline reminder");
                state.notify(notice.title, notice.body, notice.priority);
            }
        }
    });
}

/// Morning digest at 08:00 UTC.
fn spawn_daily_summary_loop(state: Arc<AppState>) {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let wait = (next_eight_am(now) - now)
                .to_std()
                .unwrap_or(Duration::from_secs(60));
            tokio::time::sleep(wait).await;

            let (snapshot, _) = state.sync.get_data().await;
            let buckets = deadlines::deadline_buckets(&snapshot.all_assignments, Utc::now());
            let summary = deadlines::daily_summary(&buckets);
            info!(body = %summary.body, "daily summary");
            state.notify(summary.title, summary.body, summary.priority);
        }
    });
}

fn next_eight_am(now: DateTime<Utc>) -> DateTime<Utc> {
    let today_eight =
        Utc.from_utc_datetime(&now.date_naive().and_hms_opt(8, 0, 0).expect("valid time"));
    if today_eight > now {
        today_eight
    } else {
        today_eight + chrono::Duration::days(1)
    }
}

fn map_frequency(frequency: NotificationFrequency) -> deadlines::Frequency {
    match frequency {
        NotificationFrequency::Minimal => deadlines::Frequency::Minimal,
        NotificationFrequency::Balanced => deadlines::Frequency::Balanced,
        NotificationFrequency::Aggressive => deadlines::Frequency::Aggressive,
    }
}
