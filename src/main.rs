/*!
# jupdate - A Daily Journal

jupdate keeps one journal entry per day in a local SQLite database, each tagged
with a mood, and reports writing statistics such as streaks, mood distribution
and tag usage.

This file contains the main application flow: it parses arguments, sets up
logging, opens the journal, checks the PIN when one is set and hands off to the
matching operation in `jupdate::ops`.

## Usage

```text
jupdate [OPTIONS] <COMMAND>

Commands:
  write   Write (or replace) the entry for a day
  show    Show a single entry
  list    List recent entries, newest first
  delete  Permanently delete an entry
  tags    List every tag in use
  moods   List the mood catalog
  stats   Show writing statistics
  missed  List days without an entry
  pin     Manage the journal PIN
  theme   Show or change the theme

Options:
  -v, --verbose                  Print verbose output (debug-level logs)
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `JUPDATE_DIR`: directory holding `journal.db` (defaults to `~/.jupdate`)
- `JUPDATE_PIN`: PIN used instead of an interactive prompt
- `RUST_LOG`: log filter, overridden by `--verbose`
*/

use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use jupdate::auth::{self, Session};
use jupdate::cli::{CliArgs, Commands, PinAction};
use jupdate::config::Config;
use jupdate::constants;
use jupdate::errors::AppResult;
use jupdate::journal::Journal;
use jupdate::ops::{self, EntrySelector};
use std::io::{self, Read};
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn init_logging(args: &CliArgs) {
    let filter = if args.verbose {
        EnvFilter::new(constants::VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if args.log_format == constants::LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_content(inline: Option<&str>) -> AppResult<String> {
    match inline {
        Some(text) => Ok(text.to_string()),
        None => {
            debug!("Reading entry content from stdin");
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn run(args: CliArgs, today: NaiveDate, now: chrono::DateTime<Utc>) -> AppResult<()> {
    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration loaded: {:?}", config);

    let journal = Journal::open(&config)?;

    let mut session = Session::new();
    if args.command.requires_unlock() {
        session.unlock_or_prompt(journal.database())?;
        session.require_access(journal.database())?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Commands::Write(write) => {
            let content = read_content(write.content.as_deref())?;
            ops::write_entry(&journal, &write, content, today, now, &mut out)?;
        }
        Commands::Show { date, id } => {
            let selector = match id {
                Some(id) => EntrySelector::Id(id),
                None => EntrySelector::Date(date.unwrap_or(today)),
            };
            ops::show_entry(&journal, selector, &mut out)?;
        }
        Commands::List { recent, all } => {
            ops::list_entries(&journal, if all { None } else { Some(recent) }, &mut out)?;
        }
        Commands::Delete { id } => ops::delete_entry(&journal, id, &mut out)?,
        Commands::Tags => ops::list_tags(&journal, &mut out)?,
        Commands::Moods => ops::list_moods(&journal, &mut out)?,
        Commands::Stats(stats) => {
            ops::show_stats(&journal, &stats, today, &mut out)?;
        }
        Commands::Missed { from, to } => {
            ops::show_missed_days(&journal, from, to.unwrap_or(today), &mut out)?;
        }
        Commands::Pin { action } => match action {
            PinAction::Set => {
                let new_pin = auth::prompt_for_new_pin()?;
                ops::set_pin(&journal, new_pin, &mut out)?;
            }
            PinAction::Clear => ops::clear_pin(&journal, &mut out)?,
            PinAction::Status => {
                ops::show_pin_status(&journal, &mut out)?;
            }
            PinAction::Verify => {
                ops::verify_pin(&journal, auth::prompt_for_pin, &mut out)?;
            }
        },
        Commands::Theme { name, custom_data } => {
            ops::show_or_set_theme(&journal, name.as_deref(), custom_data, &mut out)?;
        }
    }

    Ok(())
}

/// The main entry point for the jupdate application.
///
/// Reads the clock once, so every operation in an invocation agrees on what
/// "today" and "now" are, then runs the requested command inside a root span
/// carrying a fresh correlation id.
///
/// # Errors
///
/// Returns configuration, database, journal and PIN errors unchanged; they
/// are printed once and the process exits non-zero.
fn main() -> AppResult<()> {
    let current_datetime = Local::now();
    let today = current_datetime.date_naive();
    let now = current_datetime.with_timezone(&Utc);

    let args = CliArgs::parse();
    init_logging(&args);

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        constants::TRACING_ROOT_SPAN_NAME,
        service = constants::TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting {}", constants::APP_NAME);
    debug!("CLI arguments: {:?}", args);

    run(args, today, now)
}
