//! 命令行参数定义

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use route53_shift_core::types::EndpointPair;
use route53_shift_core::{CoreResult, RunConfig, ZoneConfig};

/// Bulk-repoint Route 53 alias records and adjust weighted routing.
#[derive(Parser, Debug)]
#[command(name = "route53-shift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print the run report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every work item of a configuration file (TOML or JSON)
    Run {
        /// Configuration file path
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Repoint alias records from one load-balancer endpoint to another
    Repoint {
        /// Hosted zone ID
        #[arg(long, env = "ROUTE53_SHIFT_ZONE_ID")]
        zone: String,

        /// Alias DNS name currently in use
        #[arg(long, value_name = "DNS_NAME")]
        old: String,

        /// Alias DNS name to switch to
        #[arg(long, value_name = "DNS_NAME")]
        new: String,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Set the weight of weighted alias records pointing at an endpoint
    Weight {
        /// Hosted zone ID
        #[arg(long, env = "ROUTE53_SHIFT_ZONE_ID")]
        zone: String,

        /// Alias DNS name whose records get the new weight
        #[arg(long, value_name = "DNS_NAME")]
        target: String,

        /// New weight (0-255)
        #[arg(long, allow_negative_numbers = true)]
        weight: i64,

        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Flags that take precedence over configuration file values.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    /// Maximum changes per submitted batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Build and report changes without submitting them
    #[arg(long)]
    pub dry_run: bool,

    /// Comment attached to every change batch
    #[arg(long)]
    pub comment: Option<String>,

    /// Number of batches in flight at once
    #[arg(long)]
    pub max_concurrent_batches: Option<usize>,
}

impl Overrides {
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        // 只能打开，不能通过命令行关闭配置文件中的 dry_run
        if self.dry_run {
            config.dry_run = true;
        }
        if let Some(comment) = &self.comment {
            config.comment = Some(comment.clone());
        }
        if let Some(n) = self.max_concurrent_batches {
            config.max_concurrent_batches = n;
        }
    }
}

impl Command {
    /// Resolve the subcommand into a run configuration, reading the file for `run`.
    pub fn into_config(self) -> CoreResult<RunConfig> {
        let (mut config, overrides) = match self {
            Self::Run { config, overrides } => (RunConfig::load(&config)?, overrides),
            Self::Repoint {
                zone,
                old,
                new,
                overrides,
            } => (
                single(ZoneConfig::Repoint {
                    zone_id: zone,
                    pairs: vec![EndpointPair::new(old, new)],
                }),
                overrides,
            ),
            Self::Weight {
                zone,
                target,
                weight,
                overrides,
            } => (
                single(ZoneConfig::Weight {
                    zone_id: zone,
                    target,
                    weight,
                }),
                overrides,
            ),
        };
        overrides.apply(&mut config);
        Ok(config)
    }
}

fn single(zone: ZoneConfig) -> RunConfig {
    RunConfig {
        zones: vec![zone],
        ..RunConfig::default()
    }
}
