mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use parcelgrid_cli::input::ScenarioSource;
use parcelgrid_cli::output::OutputFormat;
use parcelgrid_lib::{AssignmentPolicy, Coord, Strategy};

use commands::compare::{handle_compare, CompareCommandArgs};
use commands::path::{handle_path, PathCommandArgs};
use commands::solve::{handle_solve, SolveCommandArgs};
use commands::validate::handle_validate;

#[derive(Parser, Debug)]
#[command(author, version, about = "Grid delivery search and truck assignment")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assign every customer to a truck and print the delivery plan.
    Solve(SolveArgs),
    /// Search a single route between two cells.
    Path(PathArgs),
    /// Plan the scenario once per strategy and tabulate the totals.
    Compare(CompareArgs),
    /// Check that a scenario loads and report its size.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct SolveArgs {
    #[command(flatten)]
    source: ScenarioSource,
    /// Strategy code: BF, DF, ID, UC, GR1, GR2, AS1 or AS2.
    #[arg(long, value_name = "CODE")]
    strategy: Option<Strategy>,
    /// Truck policy: unique or reusable.
    #[arg(long)]
    policy: Option<AssignmentPolicy>,
    /// Per-step lower bound for the traffic-aware heuristic.
    #[arg(long)]
    min_traffic: Option<u32>,
    /// Build the cost matrix on the calling thread only.
    #[arg(long)]
    serial: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct PathArgs {
    #[command(flatten)]
    source: ScenarioSource,
    /// Start cell as `x,y`.
    #[arg(long = "from", value_name = "X,Y")]
    from: Coord,
    /// Goal cell as `x,y`.
    #[arg(long = "to", value_name = "X,Y")]
    to: Coord,
    #[arg(long, value_name = "CODE", default_value_t = Strategy::default())]
    strategy: Strategy,
    #[arg(long)]
    min_traffic: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[command(flatten)]
    source: ScenarioSource,
    #[arg(long)]
    policy: Option<AssignmentPolicy>,
    #[arg(long)]
    min_traffic: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    source: ScenarioSource,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve(args) => handle_solve(&SolveCommandArgs {
            source: args.source,
            strategy: args.strategy,
            policy: args.policy,
            min_traffic: args.min_traffic,
            serial: args.serial,
            format: args.format,
        }),
        Command::Path(args) => handle_path(&PathCommandArgs {
            source: args.source,
            from: args.from,
            to: args.to,
            strategy: args.strategy,
            min_traffic: args.min_traffic,
            format: args.format,
        }),
        Command::Compare(args) => handle_compare(&CompareCommandArgs {
            source: args.source,
            policy: args.policy,
            min_traffic: args.min_traffic,
            format: args.format,
        }),
        Command::Validate(args) => handle_validate(&args.source, args.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
