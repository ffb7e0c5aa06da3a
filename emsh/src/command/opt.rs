// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! POSIX `getopt(3)`-style option scanner.
//!
//! The classic interface keeps its state in process-wide globals
//! (`optind`, `optarg`, `opterr`, `optopt`); here the whole of it lives in
//! [`OptScanner`], owned by the engine and lent to the executor for the
//! duration of one command. The external contract is unchanged:
//!
//! - `optstring` lists single-letter options; a trailing `:` marks an
//!   option that consumes the next argv element as its argument; a leading
//!   `:` selects silent-error mode.
//! - Each call returns `Some(option)` for a recognized option, `Some('?')`
//!   for an unknown option or (in loud mode) a missing argument,
//!   `Some(':')` for a missing argument in silent mode, and `None` at the
//!   end of options (`--` is consumed as an end marker).
//! - Diagnostics look like `name: message -- c` and go to the terminal
//!   writer; `opterr = false` suppresses them.
//!
//! Scanning state persists across calls within one command: grouped options
//! like `-abc` are walked one letter per call. The engine rewinds the
//! scanner before every exec.

use std::io::{self, Write};

use crate::config::DEFAULT_NEWLINE;

#[derive(Debug)]
pub struct OptScanner {
    /// Next argv index to inspect.
    pub optind: usize,
    /// Print diagnostics for scanning errors.
    pub opterr: bool,
    /// Last offending option character.
    pub optopt: char,
    /// argv index of the current option argument.
    optarg: Option<usize>,
    /// Sub-position within the current argv element (letter being scanned).
    optpos: usize,
    newline: String,
}

impl Default for OptScanner {
    fn default() -> Self { Self::new(DEFAULT_NEWLINE) }
}

impl OptScanner {
    #[must_use]
    pub fn new(newline: &str) -> Self {
        Self {
            optind: 1,
            opterr: true,
            optopt: '\0',
            optarg: None,
            optpos: 1,
            newline: newline.into(),
        }
    }

    /// Restart scanning at `argv[1]`; called by the engine before each exec.
    pub fn rewind(&mut self) {
        self.optind = 1;
        self.optpos = 1;
    }

    /// The argument consumed by the last option that takes one, resolved
    /// against the same argv that was scanned.
    #[must_use]
    pub fn optarg<'a>(&self, argv: &'a [&'a str]) -> Option<&'a str> {
        self.optarg.and_then(|index| argv.get(index).copied())
    }

    /// Scan the next option from `argv`. See the module docs for the return
    /// contract.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing a diagnostic to `term` fails.
    pub fn getopt(
        &mut self,
        term: &mut dyn Write,
        argv: &[&str],
        optstring: &str,
    ) -> io::Result<Option<char>> {
        let Some(element) = argv.get(self.optind) else {
            return Ok(None);
        };
        let bytes = element.as_bytes();
        if bytes.first() != Some(&b'-') || bytes.len() == 1 {
            return Ok(None);
        }
        if *element == "--" {
            self.optind += 1;
            return Ok(None);
        }

        let Some(&byte) = bytes.get(self.optpos) else {
            return Ok(None);
        };
        let mut option = char::from(byte);

        self.optpos += 1;
        let mut last = false;
        if bytes.get(self.optpos).is_none() {
            self.optind += 1;
            self.optpos = 1;
            last = true;
        }

        let silent = optstring.starts_with(':');
        match optstring.as_bytes().iter().position(|&b| b == byte) {
            Some(found) => {
                if optstring.as_bytes().get(found + 1) == Some(&b':') {
                    if last && self.optind < argv.len() {
                        self.optarg = Some(self.optind);
                        self.optind += 1;
                    } else {
                        self.optopt = option;
                        if silent {
                            option = ':';
                        } else {
                            option = '?';
                            self.write_error(term, argv[0], "option requires an argument")?;
                        }
                    }
                }
            }
            None => {
                self.optopt = option;
                option = '?';
                if !silent {
                    self.write_error(term, argv[0], "illegal option")?;
                }
            }
        }

        Ok(Some(option))
    }

    fn write_error(&self, term: &mut dyn Write, name: &str, message: &str) -> io::Result<()> {
        if self.opterr {
            write!(term, "{name}: {message} -- {}{}", self.optopt, self.newline)?;
        }
        Ok(())
    }
}
