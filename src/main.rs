use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sixpool_agent::policy::{describe_policies, policy_manifest_entries};
use sixpool_agent::runner::{run_policy, write_report};
use sixpool_agent::sweep::sweep_policy;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sixpool", about = "Six-pool rush agent against the built-in match harness.")]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run one match and print the report as JSON.
    Run {
        #[arg(long, default_value = "sixpool")]
        policy: String,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        #[arg(long, default_value_t = 5_000)]
        max_frames: u32,
        /// Also write the report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// List available policies.
    Roster,
    /// Print the policy manifest (ids, families, config hashes, configs).
    Manifest {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run one policy across a seed range in parallel.
    Sweep {
        #[arg(long, default_value = "sixpool")]
        policy: String,
        #[arg(long, default_value_t = 0)]
        seed_start: u64,
        #[arg(long, default_value_t = 16)]
        seeds: u32,
        #[arg(long, default_value_t = 5_000)]
        max_frames: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Cmd::Run {
            policy,
            seed,
            max_frames,
            report,
        } => {
            let run = run_policy(&policy, seed, max_frames)?;
            log::info!(
                "{}: seed={} frames={} winner={} rejected={}",
                run.metrics.policy_id,
                run.metrics.seed,
                run.metrics.frame_count,
                run.metrics.winner,
                run.metrics.rejected_commands
            );
            if let Some(path) = report {
                write_report(&path, &run)?;
            }
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
        Cmd::Roster => {
            for (id, description) in describe_policies() {
                println!("{id:16} {description}");
            }
        }
        Cmd::Manifest { out } => {
            let manifest = policy_manifest_entries();
            let encoded = serde_json::to_string_pretty(&manifest)?;
            match out {
                Some(path) => fs::write(&path, encoded)
                    .with_context(|| format!("failed writing {}", path.display()))?,
                None => println!("{encoded}"),
            }
        }
        Cmd::Sweep {
            policy,
            seed_start,
            seeds,
            max_frames,
        } => {
            let summary = sweep_policy(&policy, seed_start, seeds, max_frames)?;
            log::info!(
                "{}: {}/{} wins over seeds {}..{}",
                summary.policy_id,
                summary.wins,
                summary.seed_count,
                summary.seed_start,
                summary.seed_start + summary.seed_count as u64
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
