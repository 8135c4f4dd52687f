//! CLI argument parsing and command dispatch for slurmrest.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use slurmrest::types::{
    AccountListOptions, JobListOptions, JobState, JobSubmission, NodeListOptions,
    PartitionListOptions,
};
use slurmrest::{ClientConfig, ConfigError, RequestContext, SlurmClient, WatchConfig};
use slurmrest_parsers::{minutes_from_duration, parse_duration};
use std::io::Write;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "slurmrest")]
#[command(about = "Query and drive a Slurm cluster through slurmrestd")]
pub struct Args {
    /// JSON config file
    #[arg(long, short)]
    pub config: Option<Utf8PathBuf>,

    /// slurmrestd base URL
    #[arg(long)]
    pub url: Option<String>,

    /// API version: latest, stable, auto or vX.Y.Z
    #[arg(long = "api-version")]
    pub api_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// User name sent with the JWT
    #[arg(long)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Ping the controllers
    Ping,
    /// Show what the selected API version supports
    Capabilities,
    /// List jobs
    Jobs {
        #[arg(long)]
        user: Vec<String>,
        #[arg(long)]
        account: Vec<String>,
        #[arg(long)]
        partition: Vec<String>,
        /// PENDING, RUNNING, ...
        #[arg(long)]
        state: Vec<String>,
        #[arg(long, default_value = "0")]
        limit: usize,
        #[arg(long, default_value = "0")]
        offset: usize,
    },
    /// Show one job
    Job { job_id: u32 },
    /// Submit a batch script
    Submit {
        script: Utf8PathBuf,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        partition: Option<String>,
        #[arg(long)]
        account: Option<String>,
        /// Minutes, or D-HH:MM:SS / HH:MM:SS
        #[arg(long, value_parser = parse_time_limit)]
        time_limit: Option<u32>,
    },
    /// Cancel a job
    Cancel { job_id: u32 },
    /// List nodes
    Nodes {
        #[arg(long)]
        partition: Vec<String>,
    },
    /// List partitions
    Partitions,
    /// List accounts
    Accounts {
        #[arg(long)]
        name: Vec<String>,
    },
    /// Print job state changes until interrupted
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value = "5")]
        interval: u64,
        #[arg(long)]
        user: Vec<String>,
        /// Watch node states instead of jobs
        #[arg(long)]
        nodes: bool,
    },
}

impl Args {
    /// Config file, then environment, then flags.
    pub fn client_config(&self) -> std::result::Result<ClientConfig, ConfigError> {
        self.client_config_from(|var| std::env::var(var).ok())
    }

    pub fn client_config_from<F>(&self, lookup: F) -> std::result::Result<ClientConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config.with_env(lookup)?;
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(version) = &self.api_version {
            config.api_version = version.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(user) = &self.user {
            config.user_name = Some(user.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Bare numbers are minutes, as with `sbatch --time`.
pub fn parse_time_limit(s: &str) -> std::result::Result<u32, String> {
    if let Ok(minutes) = s.trim().parse::<u32>() {
        return Ok(minutes);
    }
    parse_duration(s.trim())
        .map(minutes_from_duration)
        .ok_or_else(|| format!("invalid time limit {:?}", s))
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).into_diagnostic()?;
    writeln!(out).into_diagnostic()
}

fn read_script(path: &Utf8Path) -> Result<String> {
    std::fs::read_to_string(path)
        .into_diagnostic()
        .map_err(|e| e.wrap_err(format!("Failed to read script {}", path)))
}

/// Run one command, writing results to `out`.
pub async fn run<W: Write>(client: &SlurmClient, command: Command, out: &mut W) -> Result<()> {
    let ctx = RequestContext::new();
    match command {
        Command::Ping => {
            let report = client.standalone().ping(&ctx).await.into_diagnostic()?;
            print_json(out, &report)
        }
        Command::Capabilities => print_json(out, client.capabilities()),
        Command::Jobs {
            user,
            account,
            partition,
            state,
            limit,
            offset,
        } => {
            let opts = JobListOptions {
                users: user,
                accounts: account,
                partitions: partition,
                states: state
                    .iter()
                    .map(|s| JobState::parse(s))
                    .collect(),
                limit,
                offset,
                ..Default::default()
            };
            let jobs = client
                .jobs()
                .into_diagnostic()?
                .list(&ctx, &opts)
                .await
                .into_diagnostic()?;
            print_json(out, &jobs)
        }
        Command::Job { job_id } => {
            let job = client
                .jobs()
                .into_diagnostic()?
                .get(&ctx, job_id)
                .await
                .into_diagnostic()?;
            print_json(out, &job)
        }
        Command::Submit {
            script,
            name,
            partition,
            account,
            time_limit,
        } => {
            let submission = JobSubmission {
                name,
                partition,
                account,
                time_limit,
                ..JobSubmission::new(read_script(&script)?)
            };
            let response = client
                .jobs()
                .into_diagnostic()?
                .submit(&ctx, &submission)
                .await
                .into_diagnostic()?;
            print_json(out, &response)
        }
        Command::Cancel { job_id } => {
            client
                .jobs()
                .into_diagnostic()?
                .cancel(&ctx, job_id)
                .await
                .into_diagnostic()?;
            writeln!(out, "Cancelled job {}", job_id).into_diagnostic()
        }
        Command::Nodes { partition } => {
            let opts = NodeListOptions {
                partitions: partition,
                ..Default::default()
            };
            let nodes = client
                .nodes()
                .into_diagnostic()?
                .list(&ctx, &opts)
                .await
                .into_diagnostic()?;
            print_json(out, &nodes)
        }
        Command::Partitions => {
            let partitions = client
                .partitions()
                .into_diagnostic()?
                .list(&ctx, &PartitionListOptions::default())
                .await
                .into_diagnostic()?;
            print_json(out, &partitions)
        }
        Command::Accounts { name } => {
            let opts = AccountListOptions {
                names: name,
                ..Default::default()
            };
            let accounts = client
                .accounts()
                .into_diagnostic()?
                .list(&ctx, &opts)
                .await
                .into_diagnostic()?;
            print_json(out, &accounts)
        }
        Command::Watch {
            interval,
            user,
            nodes,
        } => {
            let stop = ctx.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop.cancel();
                }
            });

            let poll_interval = Duration::from_secs(interval);
            if nodes {
                let config = WatchConfig {
                    poll_interval,
                    ..Default::default()
                };
                let watcher = client.watch_nodes(config, ctx.clone()).into_diagnostic()?;
                let (handle, mut events) = watcher.start();
                while let Some(event) = events.recv().await {
                    writeln!(out, "{}", event).into_diagnostic()?;
                }
                return handle.await.into_diagnostic();
            }

            let config = WatchConfig {
                poll_interval,
                filter: JobListOptions {
                    users: user,
                    ..Default::default()
                },
                ..Default::default()
            };
            let watcher = client.watch_jobs(config, ctx.clone()).into_diagnostic()?;
            let (handle, mut events) = watcher.start();
            while let Some(event) = events.recv().await {
                writeln!(out, "{}", event).into_diagnostic()?;
            }
            handle.await.into_diagnostic()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("slurmrest").chain(args.iter().copied())).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_parse_jobs_filters() {
        let args = parse(&["jobs", "--user", "alice", "--user", "bob", "--state", "RUNNING"]);
        assert_eq!(
            args.command,
            Command::Jobs {
                user: vec!["alice".to_string(), "bob".to_string()],
                account: vec![],
                partition: vec![],
                state: vec!["RUNNING".to_string()],
                limit: 0,
                offset: 0,
            }
        );
    }

    #[test]
    fn test_parse_time_limit() {
        assert_eq!(parse_time_limit("90"), Ok(90));
        assert_eq!(parse_time_limit("1-00:00:00"), Ok(1440));
        assert_eq!(parse_time_limit("00:30:30"), Ok(31));
        assert!(parse_time_limit("soon").is_err());

        let args = parse(&["submit", "job.sh", "--time-limit", "2:00:00"]);
        assert!(matches!(
            args.command,
            Command::Submit {
                time_limit: Some(120),
                ..
            }
        ));
    }

    #[test]
    fn test_parse_watch_nodes() {
        let args = parse(&["watch", "--nodes", "--interval", "30"]);
        assert_eq!(
            args.command,
            Command::Watch {
                interval: 30,
                user: vec![],
                nodes: true,
            }
        );
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(Args::try_parse_from(["slurmrest"]).is_err());
        assert!(Args::try_parse_from(["slurmrest", "job", "abc"]).is_err());
    }

    #[test]
    fn test_flags_override_env() {
        let args = parse(&[
            "--url",
            "https://ctl:6820",
            "--api-version",
            "v0.0.41",
            "--timeout",
            "9",
            "ping",
        ]);
        let config = args
            .client_config_from(env(&[
                ("SLURM_REST_URL", "http://other:6820"),
                ("SLURM_API_VERSION", "latest"),
                ("SLURM_JWT", "jwt"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "https://ctl:6820");
        assert_eq!(config.api_version, "v0.0.41");
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("slurmrest.json")).unwrap();
        std::fs::write(&path, r#"{"base_url": "http://file:6820", "timeout_secs": 12}"#).unwrap();

        let args = parse(&["--config", path.as_str(), "--user", "carol", "partitions"]);
        let config = args.client_config_from(env(&[])).unwrap();
        assert_eq!(config.base_url, "http://file:6820");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.user_name.as_deref(), Some("carol"));
    }

    #[test]
    fn test_invalid_flag_value_rejected() {
        let args = parse(&["--api-version", "v0.0.12", "ping"]);
        assert!(args.client_config_from(env(&[])).is_err());
    }

    #[tokio::test]
    async fn test_capabilities_output() {
        let config = ClientConfig {
            api_version: "v0.0.40".to_string(),
            ..Default::default()
        };
        let client = SlurmClient::from_config(&config).await.unwrap();
        let mut out = Vec::new();
        run(&client, Command::Capabilities, &mut out).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["version"], "v0.0.40");
        assert_eq!(value["features"]["watch"], false);
    }

    #[tokio::test]
    async fn test_submit_missing_script() {
        let client = SlurmClient::from_config(&ClientConfig::default())
            .await
            .unwrap();
        let command = Command::Submit {
            script: Utf8PathBuf::from("/nonexistent/job.sh"),
            name: None,
            partition: None,
            account: None,
            time_limit: None,
        };
        let err = run(&client, command, &mut Vec::new()).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/job.sh"));
    }
}
