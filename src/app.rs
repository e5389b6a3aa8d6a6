//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! validates the root, and runs the interactive menu loop.

use anyhow::{Context as _, Result};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use file_manager::cli::Args;
use file_manager::menu::{self, MenuChoice, Response};
use file_manager::output as out;
use file_manager::{default_config_path, load_config, shutdown, Config, FileManager};

use crate::logging::init_tracing;

/// Tab completion over the entries of the managed root.
struct EntryCompleter {
    entries: Vec<String>,
}

impl EntryCompleter {
    fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    fn set_entries(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }
}

/// Start of the word under the cursor and the entries it prefixes.
fn candidates(entries: &[String], line: &str, pos: usize) -> (usize, Vec<String>) {
    let head = &line[..pos];
    let start = head.rfind(char::is_whitespace).map_or(0, |i| i + 1);
    let prefix = &head[start..];
    let matches = entries
        .iter()
        .filter(|e| e.starts_with(prefix))
        .cloned()
        .collect();
    (start, matches)
}

impl Completer for EntryCompleter {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        Ok(candidates(&self.entries, line, pos))
    }
}

impl Hinter for EntryCompleter {
    type Hint = String;
}

impl Highlighter for EntryCompleter {}

impl Validator for EntryCompleter {}

impl Helper for EntryCompleter {}

type LineEditor = Editor<EntryCompleter, DefaultHistory>;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Config file (optional), then CLI overrides.
    let mut cfg = load_config()?.unwrap_or_default();
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e}")))?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; shutting down...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!(?args, "starting file manager");

    let result = (|| -> Result<()> {
        cfg.validate()?;
        let mut fm = FileManager::from_config(&cfg)?;
        info!(root = %fm.root().display(), max_attempts = cfg.max_attempts, "session started");
        session(&mut fm)
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location() {
    if let Ok(cfg_env) = std::env::var(file_manager::config::CONFIG_ENV) {
        out::print_info(&format!("Using FMS_CONFIG (explicit):\n  {cfg_env}\n"));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
    let defaults = Config::default();
    if let Some(log) = defaults.log_file {
        out::print_info(&format!("Default log file:\n  {}", log.display()));
    }
}

/// Interactive loop: menu, choice, argument prompts, result.
fn session(fm: &mut FileManager) -> Result<()> {
    let mut rl: LineEditor = Editor::new().context("Failed to create line editor")?;
    rl.set_helper(Some(EntryCompleter::new(fm.list_files())));

    out::print_user(menu::WELCOME);
    loop {
        if shutdown::is_requested() {
            info!("shutdown requested; leaving session");
            break;
        }
        out::print_user(&menu::menu_text());

        let line = match rl.readline("Enter your choice: ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                out::print_user(menu::GOODBYE);
                break;
            }
            Err(e) => return Err(e).context("read menu choice"),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        let Some(choice) = MenuChoice::parse(&line) else {
            out::print_error(menu::INVALID_CHOICE);
            continue;
        };
        let Some(args) = collect_args(&mut rl, choice)? else {
            out::print_warn("Operation cancelled.");
            continue;
        };

        match menu::dispatch(fm, choice, &args) {
            Response::Result(res) => out::print_result(&res),
            Response::Listing { title, items } => out::print_list(&title, &items),
            Response::Text(text) => out::print_user(&text),
            Response::Exit => {
                out::print_user(menu::GOODBYE);
                break;
            }
        }
        if let Some(h) = rl.helper_mut() {
            h.set_entries(fm.snapshot().list());
        }
    }
    Ok(())
}

/// Ask each prompt of `choice` in turn. None when the user backs out.
fn collect_args(rl: &mut LineEditor, choice: MenuChoice) -> Result<Option<Vec<String>>> {
    let mut args = Vec::with_capacity(choice.prompts().len());
    for (i, prompt) in choice.prompts().iter().enumerate() {
        match rl.readline(prompt) {
            Ok(line) => args.push(choice.argument(i, &line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e).context("read argument"),
        }
    }
    Ok(Some(args))
}
