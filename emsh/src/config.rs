// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Construction-time tunables for the [`Shell`] engine.
//!
//! All capacities are fixed at construction; the engine allocates its block
//! pool and line storage once in [`Shell::new`] and never again while bytes
//! are being fed.
//!
//! [`Shell`]: crate::Shell
//! [`Shell::new`]: crate::Shell::new

/// Prompt text written after start and after each committed line.
pub const DEFAULT_PROMPT: &str = "> ";

/// Byte sequence written for a line break (some transports want `"\r\n"`).
pub const DEFAULT_NEWLINE: &str = "\n";

/// Number of history blocks, including the draft slot.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Maximum line length in bytes (fits an 80-column terminal with the default
/// prompt and one column to spare).
pub const DEFAULT_LINE_CAPACITY: usize = 80 - 1 - 2;

/// Maximum number of arguments a committed line may split into.
pub const DEFAULT_MAX_ARGS: usize = 10;

/// Engine configuration. Use [`ShellConfig::default`] and override fields as
/// needed:
///
/// ```
/// use emsh::ShellConfig;
///
/// let config = ShellConfig {
///     prompt: "emsh$ ".into(),
///     ..ShellConfig::default()
/// };
/// assert_eq!(config.history_capacity, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prompt literal. Its byte length is used for caret positioning, so it
    /// must not contain escape sequences or control characters.
    pub prompt: String,

    /// Newline emitted on commit and in diagnostics.
    pub newline: String,

    /// History ring capacity (blocks), draft included. Must be at least 1.
    pub history_capacity: usize,

    /// Line buffer capacity in bytes. Must be at least 1.
    pub line_capacity: usize,

    /// Argument count limit for the tokenizer. Must be at least 1.
    pub max_args: usize,

    /// When a printable byte arrives and the line is full, emit a BEL byte
    /// instead of staying silent.
    pub bell_on_overflow: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.into(),
            newline: DEFAULT_NEWLINE.into(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            line_capacity: DEFAULT_LINE_CAPACITY,
            max_args: DEFAULT_MAX_ARGS,
            bell_on_overflow: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = ShellConfig::default();
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.newline, "\n");
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.line_capacity, 77);
        assert_eq!(config.max_args, 10);
        assert!(!config.bell_on_overflow);
    }
}
