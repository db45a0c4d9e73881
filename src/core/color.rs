//! ANSI color selection and terminal negotiation
//!
//! Colors are on or off process-wide. The first query probes the terminal
//! (and on Windows asks the console to honor escape sequences); a failed
//! probe leaves colors off instead of failing.

use super::log_level::LogLevel;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// SGR reset sequence
pub const RESET: &str = "\x1b[0m";

static COLORS_ENABLED: OnceLock<AtomicBool> = OnceLock::new();

fn state() -> &'static AtomicBool {
    COLORS_ENABLED.get_or_init(|| AtomicBool::new(enable_terminal_colors()))
}

/// Whether color output is currently enabled for the process
pub fn colors_enabled() -> bool {
    state().load(Ordering::Relaxed)
}

/// Turn color output on or off for the process
pub fn set_colors_enabled(enabled: bool) {
    state().store(enabled, Ordering::Relaxed);
}

/// Opening SGR sequence for `level`, `None` when the level is unstyled
pub fn sgr_prefix(level: LogLevel) -> Option<String> {
    level
        .color_code()
        .map(|color| format!("\x1b[{};1m", color.to_fg_str()))
}

/// Wrap `text` in the escape sequences for `level`. A trailing newline
/// stays outside the colored span.
pub fn paint(level: LogLevel, text: &[u8]) -> Vec<u8> {
    let Some(prefix) = sgr_prefix(level) else {
        return text.to_vec();
    };
    let (body, newline) = match text.strip_suffix(b"\n") {
        Some(body) => (body, true),
        None => (text, false),
    };

    let mut out = Vec::with_capacity(prefix.len() + text.len() + RESET.len());
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(body);
    out.extend_from_slice(RESET.as_bytes());
    if newline {
        out.push(b'\n');
    }
    out
}

#[cfg(windows)]
fn enable_terminal_colors() -> bool {
    if colored::control::set_virtual_terminal(true).is_err() {
        eprintln!("[LOGGER WARNING] Console does not accept virtual terminal mode, colors disabled");
        return false;
    }
    colored::control::SHOULD_COLORIZE.should_colorize()
}

#[cfg(not(windows))]
fn enable_terminal_colors() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgr_sequences() {
        assert_eq!(sgr_prefix(LogLevel::Error).as_deref(), Some("\x1b[31;1m"));
        assert_eq!(sgr_prefix(LogLevel::Warn).as_deref(), Some("\x1b[33;1m"));
        assert_eq!(sgr_prefix(LogLevel::Info).as_deref(), Some("\x1b[36;1m"));
        assert_eq!(sgr_prefix(LogLevel::Debug), None);
    }

    #[test]
    fn test_paint() {
        assert_eq!(paint(LogLevel::Error, b"boom"), b"\x1b[31;1mboom\x1b[0m".to_vec());
        assert_eq!(paint(LogLevel::Debug, b"quiet"), b"quiet".to_vec());
        assert_eq!(
            paint(LogLevel::Warn, b"slow\n"),
            b"\x1b[33;1mslow\x1b[0m\n".to_vec()
        );
    }
}
