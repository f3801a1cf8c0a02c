use clap::Parser;
use std::{
    error::Error,
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

use delve_pacer::{
    config::{ConfigStore, FileConfigStore},
    display::StdoutSink,
    format::ticks_to_time_display,
    runtime::{Runner, TranscriptSource},
    tracker::PaceTracker,
};

/// replay a host-event transcript through the deep delve pace tracker
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "Replays a recorded transcript of game events (chat announcements, ticks, login transitions, region changes) through the pace tracker and prints each estimate update, ending with a session summary."
)]
struct Cli {
    /// transcript file to replay; reads stdin when omitted
    transcript: Option<PathBuf>,

    /// override the delve arena region id from config
    #[clap(long)]
    region_id: Option<u32>,

    /// override the forced-logout tick budget from config
    #[clap(long)]
    max_ticks: Option<u32>,

    /// log at debug level instead of warn
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = FileConfigStore::new().load();
    if let Some(region_id) = cli.region_id {
        config.delve_region_id = region_id;
    }
    if let Some(max_ticks) = cli.max_ticks {
        config.max_login_ticks = max_ticks;
    }

    let mut runner = Runner::new(PaceTracker::new(config, StdoutSink::default()));

    match cli.transcript {
        Some(path) => {
            let mut source = TranscriptSource::new(BufReader::new(File::open(path)?));
            runner.run(&mut source)?;
        }
        None => {
            let stdin = io::stdin();
            let mut source = TranscriptSource::new(stdin.lock());
            runner.run(&mut source)?;
        }
    }

    let tracker = &runner.tracker;
    match tracker.current_estimate() {
        Some(est) => {
            println!(
                "final: level {} projected after {} ticks (average {}, best {})",
                est.projected_final_level,
                tracker.state.ticks_since_login,
                ticks_to_time_display(est.average_ticks),
                ticks_to_time_display(f64::from(est.best_ticks)),
            );
        }
        None => println!(
            "no deep delve completed in {} ticks",
            tracker.state.ticks_since_login
        ),
    }

    Ok(())
}
