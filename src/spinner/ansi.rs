//! Terminal control sequences written by the render loop.

use crossterm::Command;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{Clear, ClearType};

fn ansi(command: impl Command, out: &mut String) {
    // Writing into a String cannot fail
    let _ = command.write_ansi(out);
}

/// Sequence emitted once when the render loop starts.
pub fn begin() -> String {
    let mut out = String::new();
    ansi(Hide, &mut out);
    out
}

/// One animation tick: return to column 0, then frame, space, message.
///
/// The previous line is overwritten in place, not cleared.
pub fn tick_line(frame: &str, message: &str) -> String {
    format!("\r{frame} {message}")
}

/// Sequence emitted when the render loop stops: wipe the line and show the
/// cursor again.
pub fn finish() -> String {
    let mut out = String::from("\r");
    ansi(Clear(ClearType::UntilNewLine), &mut out);
    ansi(Show, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_hides_cursor() {
        assert_eq!(begin(), "\x1b[?25l");
    }

    #[test]
    fn test_finish_clears_line_and_shows_cursor() {
        assert_eq!(finish(), "\r\x1b[K\x1b[?25h");
    }

    #[test]
    fn test_tick_line_has_no_newline() {
        let line = tick_line("⠋", "Loading");
        assert_eq!(line, "\r⠋ Loading");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_output_reduces_to_visible_text() {
        let raw = format!("{}{}{}", begin(), tick_line("*", "work"), finish());
        assert_eq!(console::strip_ansi_codes(&raw), "\r* work\r");
    }
}
