//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("layouts"; "loaded {} layouts", count);
//! log!("error"; "{:#}", err);
//! ```
//!
//! Output goes to stdout, one line per call, truncated to the terminal width.
//! `error` lines are never truncated. Calls from rayon workers are serialized
//! by the stdout lock.

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{IsTerminal, Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Fallback width when stdout is not a terminal (pipes, test harness).
const FALLBACK_WIDTH: u16 = 120;

/// `[` + `]` + trailing space around the module name.
const PREFIX_OVERHEAD: usize = 3;

fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(FALLBACK_WIDTH))
}

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Write one prefixed line to stdout.
pub fn log(module: &str, message: &str) {
    let line = format_line(module, message, get_terminal_width() as usize);

    let mut stdout = stdout().lock();
    if stdout.is_terminal() {
        execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    }
    writeln!(stdout, "{line}").ok();
    stdout.flush().ok();
}

/// Prefix `message` and fit it into `width` columns.
///
/// Error and multiline messages (error chains) are kept whole, since the
/// tail of a chain names the page or layout at fault.
fn format_line(module: &str, message: &str, width: usize) -> String {
    let prefix = colorize_prefix(module);
    if message.contains('\n') || module.eq_ignore_ascii_case("error") {
        return format!("{prefix} {message}");
    }
    let max_msg_len = width.saturating_sub(module.len() + PREFIX_OVERHEAD);
    format!("{prefix} {}", truncate_str(message, max_msg_len))
}

/// Pick the prefix color from the module name.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "build" => prefix.bright_green().bold(),
        "static" => prefix.bright_blue().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
