mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use repo_dashboard::activity::DateWindow;
use repo_dashboard::config::{Config, LogFormat};
use repo_dashboard::{CommitScope, GithubClient, Snapshot, StatsSource, report};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, env_file_errors) = Config::load();
    init_tracing(&config);
    for (file, err) in env_file_errors {
        warn!(file, error = %err, "Ignoring unreadable env file");
    }

    if let Some(token) = cli.token.clone() {
        config.token = Some(token);
    }

    match cli.command {
        Commands::Fetch { days, compact } => {
            let client = GithubClient::new(&config)?;
            let scope = match days {
                Some(days) => CommitScope::Since(DateWindow::ending(Utc::now(), days).from),
                None => CommitScope::default(),
            };
            let stats = client.repository_stats(&cli.owner, &cli.repo, scope).await?;
            let json = if compact {
                serde_json::to_string(&stats)?
            } else {
                serde_json::to_string_pretty(&stats)?
            };
            println!("{json}");
        }

        Commands::Snapshot { output, days } => {
            info!("Fetching repository snapshot data (last {days} days)");
            let client = GithubClient::new(&config)?;
            let snapshot = Snapshot::fetch(&client, &cli.owner, &cli.repo, Utc::now(), days).await?;
            snapshot.write(&output)?;

            let info = &snapshot.snapshot_info;
            println!("Snapshot saved to {}", output.display());
            println!("  Snapshot date: {}", snapshot.snapshot_date.to_rfc3339());
            println!("  Commits fetched: {}", info.commits_count);
            println!("  Date range: {}", info.data_range.date_span());
        }

        Commands::Summary { snapshot, days } => {
            let (source, client) = match snapshot {
                Some(path) => (StatsSource::Snapshot(path), None),
                None => (
                    StatsSource::Live {
                        owner: cli.owner.clone(),
                        repo: cli.repo.clone(),
                        scope: CommitScope::Since(DateWindow::ending(Utc::now(), days).from),
                    },
                    Some(GithubClient::new(&config)?),
                ),
            };
            let stats = source
                .load(client.as_ref())
                .await
                .context("Failed to load dashboard data")?;
            print!("{}", report::render_text(&stats, Utc::now().date_naive(), days));
        }
    }

    Ok(())
}

/// Logs go to stderr so `fetch` output stays pipeable.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
