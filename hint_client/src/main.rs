use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use codenames::{HintState, Team, WordPool};
use hint_client::{ClientConfig, Command, HttpHintService, Recorder, Shell};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL of the hint service, overrides the config file
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Seconds to wait for the hint service, overrides the config file
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Word list with one word per line, instead of the bundled one
    #[arg(short, long)]
    word_pool: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record the exchanges with the hint service as JSON files into this directory
    #[arg(short, long)]
    record_to_directory: Option<PathBuf>,

    /// Randomize a board, request hints once, print them and exit
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once, the team to generate hints for instead of the starting team
    #[arg(short, long)]
    team: Option<Team>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    }
    .with_overrides(args.endpoint, args.timeout_secs, args.word_pool);

    let pool = match &config.word_pool {
        Some(path) => WordPool::load(path)?,
        None => WordPool::embedded(),
    };
    info!(words = pool.len(), "Loaded word pool");

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    let recorder = if let Some(dir_path) = args.record_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let service =
        HttpHintService::new(&config.endpoint, Duration::from_secs(config.timeout_secs));
    info!(endpoint = %service.endpoint(), timeout_secs = config.timeout_secs, "Using hint service");
    let mut shell = Shell::new(pool, rng, service, recorder);
    let mut stdout = std::io::stdout().lock();

    if args.once {
        let mut commands = vec![Command::RandomizeWords, Command::RandomizeSetup];
        if let Some(team) = args.team {
            commands.push(Command::Team(team));
        }
        commands.extend([Command::Hint, Command::Wait]);
        for cmd in commands {
            shell.execute(cmd, &mut stdout)?;
        }
        if shell.game.hints.state() == HintState::Failure {
            if let Some(err) = shell.game.hints.error() {
                anyhow::bail!("{}", err);
            }
        }
        return Ok(());
    }

    shell.run(std::io::stdin().lock(), &mut stdout)
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
