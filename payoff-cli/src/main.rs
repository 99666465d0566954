use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use payoff_core::{
    DebtRepository, InMemoryDebtRepository, PayoffSimulator, PlanResult, Strategy,
    StrategyComparison,
};
use payoff_ingest::load_repository;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod config;
mod logging;
mod report;
mod state;

#[derive(Parser, Debug)]
#[command(name = "payoff", version, about = "Debt payoff planner (avalanche / snowball)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate paying off a debt list with a fixed monthly budget
    Plan {
        /// Debt list (.json or .csv)
        #[arg(long)]
        debts: PathBuf,

        /// Total money available for debts each month
        #[arg(long)]
        budget: f64,

        /// avalanche or snowball (default from config)
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Month cap before giving up (default from config)
        #[arg(long)]
        max_months: Option<u32>,

        /// Date of the first payment (YYYY-MM-DD), to print a payoff date
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Print the full plan as JSON
        #[arg(long)]
        json: bool,

        /// Exit successfully even if the debts are not paid off within the cap
        #[arg(long)]
        allow_partial: bool,
    },

    /// Run avalanche and snowball side by side
    Compare {
        /// Debt list (.json or .csv)
        #[arg(long)]
        debts: PathBuf,

        /// Total money available for debts each month
        #[arg(long)]
        budget: f64,

        /// Month cap before giving up (default from config)
        #[arg(long)]
        max_months: Option<u32>,

        /// Print both plans as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.payoff/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            debts,
            budget,
            strategy,
            max_months,
            start,
            json,
            allow_partial,
        } => {
            let cfg = config::load_config()?;
            let repo = load_debt_file(&debts)?;
            let strategy = strategy.unwrap_or(cfg.planner.strategy);
            let simulator = cfg.simulator(max_months);

            let plan = simulator
                .simulate(&repo.list(), budget, strategy)
                .context("simulating payoff plan")?;

            if json || cfg.output.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", report::render_plan(&plan, &repo.list(), start));
            }

            if !allow_partial {
                plan.into_converged()?;
            }
        }

        Command::Compare {
            debts,
            budget,
            max_months,
            json,
        } => {
            let cfg = config::load_config()?;
            let repo = load_debt_file(&debts)?;
            let simulator = cfg.simulator(max_months);

            let cmp = compare_concurrently(simulator, &repo, budget).await?;

            if json || cfg.output.json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                print!("{}", report::render_comparison(&cmp));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::Path => println!("{}", config::config_path()?.display()),
        },
    }

    Ok(())
}

fn load_debt_file(path: &Path) -> Result<InMemoryDebtRepository> {
    if !path.exists() {
        bail!("debt file not found: {} (pass --debts <path>)", path.display());
    }
    let repo = load_repository(path)?;
    info!(count = repo.len(), path = %path.display(), "loaded debts");
    Ok(repo)
}

/// Each strategy runs on its own blocking worker.
async fn compare_concurrently(
    simulator: PayoffSimulator,
    repo: &InMemoryDebtRepository,
    budget: f64,
) -> Result<StrategyComparison> {
    let spawn = move |strategy: Strategy| {
        let debts = repo.list();
        tokio::task::spawn_blocking(move || -> Result<PlanResult> {
            debug!(%strategy, "worker started");
            Ok(simulator.simulate(&debts, budget, strategy)?)
        })
    };

    let (avalanche, snowball) =
        tokio::try_join!(spawn(Strategy::Avalanche), spawn(Strategy::Snowball))
            .context("simulation worker panicked")?;

    Ok(StrategyComparison::new(avalanche?, snowball?))
}
