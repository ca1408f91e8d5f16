use std::path::PathBuf;

use playground_core::Topic;
use thiserror::Error;

pub const STORE_ENV: &str = "PLAYGROUND_STORE";
pub const DEFAULT_STORE: &str = "playgrounds.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("unknown subcommand: {0}")]
    UnknownCommand(String),
    #[error("play needs a playground: one of {}", slugs())]
    MissingTopic,
    #[error("unknown playground {raw:?}; expected one of {}", slugs())]
    InvalidTopic { raw: String },
    #[error("invalid --store value: {raw:?}")]
    InvalidStore { raw: String },
}

fn slugs() -> String {
    Topic::ALL.map(Topic::slug).join(", ")
}

/// Where progress is kept between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChoice {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Play(Topic),
    /// `None` resets every playground.
    Reset(Option<Topic>),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub store: StoreChoice,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app list                 [--store <path> | --memory]");
    eprintln!("  app play <playground>    [--store <path> | --memory]");
    eprintln!("  app reset [<playground>|all] [--store <path> | --memory]");
    eprintln!();
    eprintln!("Playgrounds:");
    for topic in Topic::ALL {
        eprintln!("  {:<14} {}", topic.slug(), topic.title());
    }
    eprintln!("  A finished playground starts a new shuffle the next time it is opened.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --store {DEFAULT_STORE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {STORE_ENV}   progress file path");
    eprintln!("  RUST_LOG           log filter (default: warn)");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_topic(raw: &str) -> Result<Topic, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidTopic {
        raw: raw.to_owned(),
    })
}

impl Args {
    /// Parse command-line arguments (without the program name).
    ///
    /// `store_env` is the value of `PLAYGROUND_STORE`, if set; a `--store` or
    /// `--memory` flag wins over it.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown commands, flags or playgrounds.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        store_env: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut store = store_env
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| StoreChoice::File(DEFAULT_STORE.into()), |value| {
                StoreChoice::File(value.into())
            });
        let mut positional = Vec::new();

        let mut args = argv.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--store" => {
                    let value = require_value(&mut args, "--store")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidStore { raw: value });
                    }
                    store = StoreChoice::File(value.into());
                }
                "--memory" => store = StoreChoice::Memory,
                "--help" | "-h" => {
                    return Ok(Self {
                        command: Command::Help,
                        store,
                    });
                }
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("list") => Command::List,
            Some("play") => {
                let raw = positional.next().ok_or(ArgsError::MissingTopic)?;
                Command::Play(parse_topic(&raw)?)
            }
            Some("reset") => match positional.next().as_deref() {
                None | Some("all") => Command::Reset(None),
                Some(raw) => Command::Reset(Some(parse_topic(raw)?)),
            },
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Self { command, store })
    }
}
