//! User-facing printing.
//!
//! Consistent prefixes for results and notices. Colors are enabled only when
//! the stream is a TTY, so piped sessions stay plain.

use owo_colors::OwoColorize;

use crate::outcome::OperationResult;

fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain line (no prefix).
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Show an operation's message. Failures go to stderr.
pub fn print_result(res: &OperationResult) {
    if res.is_success() {
        print_success(&res.message);
    } else {
        print_error(&res.message);
    }
}

/// Print a titled listing, one entry per line.
pub fn print_list(title: &str, items: &[String]) {
    print_user(title);
    if items.is_empty() {
        print_user("  (empty)");
        return;
    }
    for item in items {
        if stdout_is_tty() {
            println!("  {}", item.bold());
        } else {
            println!("  {}", item);
        }
    }
}
