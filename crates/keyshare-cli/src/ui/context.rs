//! Terminal capabilities and output preferences for one invocation.

use std::io::IsTerminal;

use super::mode::{FormatFlag, OutputMode};

#[derive(Debug, Clone)]
pub struct UiContext {
    /// Colour escapes allowed on stdout
    pub color: bool,
    /// Unicode symbols and table borders allowed
    pub unicode: bool,
    pub mode: OutputMode,
    /// Suppress informational lines; results and errors still print
    pub quiet: bool,
}

impl UiContext {
    /// Colour is off for `--no-color`, `NO_COLOR`, `TERM=dumb` or a non-terminal stdout.
    pub fn from_env(json: bool, format: FormatFlag, no_color: bool, ascii: bool, quiet: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self {
            color: is_tty && !no_color && !no_color_env && !term_is_dumb,
            unicode: !ascii,
            mode: OutputMode::resolve(json, format, is_tty, term_is_dumb),
            quiet,
        }
    }

    /// Plain, uncoloured context for rendering tests.
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
            mode: OutputMode::Plain,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag() {
        let ctx = UiContext::from_env(true, FormatFlag::Auto, false, false, false);
        assert!(ctx.mode.is_json());
    }

    #[test]
    fn test_ascii_and_no_color() {
        let ctx = UiContext::from_env(false, FormatFlag::Plain, true, true, true);
        assert!(!ctx.unicode);
        assert!(!ctx.color);
        assert!(ctx.quiet);
    }
}
