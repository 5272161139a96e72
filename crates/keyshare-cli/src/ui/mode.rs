//! Output mode routing.

use clap::ValueEnum;

/// Value of `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatFlag {
    /// Pretty on a terminal, plain otherwise
    #[default]
    Auto,
    /// Tables and colour
    Pretty,
    /// Stable `key=value` and space-separated lines
    Plain,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON only
    Json,
    #[default]
    Plain,
    /// Human-friendly, terminal only
    Pretty,
}

impl OutputMode {
    /// `--json` wins over `--format`; `auto` picks pretty only on a capable terminal.
    pub fn resolve(json: bool, format: FormatFlag, is_tty: bool, term_is_dumb: bool) -> Self {
        if json {
            return Self::Json;
        }
        match format {
            FormatFlag::Plain => Self::Plain,
            FormatFlag::Pretty => Self::Pretty,
            FormatFlag::Auto if is_tty && !term_is_dumb => Self::Pretty,
            FormatFlag::Auto => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_exclusive() {
        let mode = OutputMode::resolve(true, FormatFlag::Pretty, true, false);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn test_auto_follows_terminal() {
        assert_eq!(
            OutputMode::resolve(false, FormatFlag::Auto, true, false),
            OutputMode::Pretty
        );
        assert_eq!(
            OutputMode::resolve(false, FormatFlag::Auto, false, false),
            OutputMode::Plain
        );
        assert_eq!(
            OutputMode::resolve(false, FormatFlag::Auto, true, true),
            OutputMode::Plain
        );
    }

    #[test]
    fn test_explicit_format_overrides_terminal() {
        assert_eq!(
            OutputMode::resolve(false, FormatFlag::Pretty, false, false),
            OutputMode::Pretty
        );
        assert_eq!(
            OutputMode::resolve(false, FormatFlag::Plain, true, false),
            OutputMode::Plain
        );
    }
}
