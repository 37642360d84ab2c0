use netdrill_cli::{run, Command, Config, DrillError, JsonScoreStore, ScoreBoard};
use std::env;
use std::io;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = try_main(&args) {
        print_error(&e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn try_main(args: &[String]) -> Result<(), DrillError> {
    let command = Command::parse(args)?;
    let config = Config::from_env()?;
    debug!(?command, score_file = %config.score_file.display(), "starting");

    let board = ScoreBoard::new(JsonScoreStore::new(&config.score_file), config.top_n);
    let stdin = io::stdin();
    run(&command, &config, &board, stdin.lock(), io::stdout())
}

fn print_error(error: &DrillError) {
    match error {
        DrillError::Usage(msg) => eprintln!("{}", msg),
        DrillError::Config(e) => {
            eprintln!("✗ Configuration error:");
            eprintln!("    {}", e);
        }
        other => eprintln!("✗ {}", other),
    }
}
