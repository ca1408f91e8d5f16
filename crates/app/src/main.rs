use std::io;
use std::sync::Arc;

use playground_core::Topic;
use services::{PlaygroundSummary, Playgrounds};
use storage::{InMemoryStore, JsonFileStore, KeyValueStore, UnavailableStore};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod args;
mod play;
mod render;

use args::{Args, Command, STORE_ENV, StoreChoice, print_usage};

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(choice: &StoreChoice) -> Arc<dyn KeyValueStore> {
    match choice {
        StoreChoice::Memory => Arc::new(InMemoryStore::new()),
        StoreChoice::File(path) => match JsonFileStore::open(path) {
            Ok(store) => Arc::new(store),
            Err(err) => {
                // Sessions over an unavailable store run memory-only and report it.
                tracing::warn!(path = %path.display(), error = %err, "cannot open progress file");
                Arc::new(UnavailableStore)
            }
        },
    }
}

fn print_summaries(summaries: &[PlaygroundSummary]) {
    for summary in summaries {
        let progress = summary.progress;
        println!(
            "{:<14} {:<12} {:<26} {}/{}",
            summary.topic.slug(),
            summary.step,
            summary.title,
            progress.shown,
            progress.total
        );
        println!("{:<14} {}", "", summary.description);
    }
}

fn play_topic(playgrounds: &mut Playgrounds, topic: Topic) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    match topic {
        Topic::BugSpotting => play::play(playgrounds.bug_spotting_mut(), &mut input, &mut out),
        Topic::Prediction => play::play(playgrounds.prediction_mut(), &mut input, &mut out),
        Topic::ApiDecoder => play::play(playgrounds.api_decoder_mut(), &mut input, &mut out),
        Topic::BugReport => play::play(playgrounds.bug_report_mut(), &mut input, &mut out),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), std::env::var(STORE_ENV).ok())
        .inspect_err(|_| print_usage())?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let store = open_store(&args.store);
    let mut playgrounds = Playgrounds::open_builtin(store)?;
    if !playgrounds.is_persistent() {
        eprintln!("warning: progress cannot be saved this run");
    }

    match args.command {
        Command::List => print_summaries(&playgrounds.summaries()),
        Command::Play(topic) => play_topic(&mut playgrounds, topic)?,
        Command::Reset(Some(topic)) => {
            playgrounds.restart(topic);
            println!("Reset {topic}.");
        }
        Command::Reset(None) => {
            playgrounds.restart_all();
            println!("Reset all playgrounds.");
        }
        Command::Help => {}
    }
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn unreadable_progress_file_is_replaced_on_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, r#"{"x": 1}"#).unwrap();
        let choice = StoreChoice::File(path.clone());

        let mut playgrounds = Playgrounds::open_builtin(open_store(&choice)).unwrap();
        assert!(playgrounds.is_persistent());
        playgrounds.bug_report_mut().reveal(());
        drop(playgrounds);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("\"x\""));
        assert!(raw.contains("qa-playground:bug-report:shown-ids"));

        let playgrounds = Playgrounds::open_builtin(open_store(&choice)).unwrap();
        assert_eq!(playgrounds.summary(Topic::BugReport).progress.shown, 1);
    }

    #[test]
    fn store_that_cannot_be_opened_runs_memory_only() {
        let dir = tempfile::tempdir().unwrap();
        let choice = StoreChoice::File(dir.path().to_path_buf());

        let mut playgrounds = Playgrounds::open_builtin(open_store(&choice)).unwrap();
        assert!(!playgrounds.is_persistent());

        assert!(playgrounds.bug_report_mut().reveal(()));
        assert_eq!(playgrounds.summary(Topic::BugReport).progress.shown, 1);
    }
}
