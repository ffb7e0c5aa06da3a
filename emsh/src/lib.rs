// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # emsh
//!
//! An embedded interactive line editor and mini-shell engine for
//! resource-constrained hosts. The engine is byte-driven and cooperatively
//! scheduled: the application reads one byte from its terminal (in raw mode)
//! and hands it to [`Shell::feed`]; the engine edits the current line,
//! renders the change as a minimal ECMA-48 byte stream (erase-in-line plus
//! horizontal cursor motion, never a full repaint), and on LF tokenizes the
//! line and dispatches it to an application-supplied [`Executor`].
//!
//! There are no internal threads, no async runtime and no heap allocation
//! after [`Shell::new`]; everything finishes before `feed` returns.
//!
//! ## Quick start
//!
//! ```
//! use emsh::{ExecArgs, ExecOutcome, Executor, Shell, ShellConfig};
//! use std::io::{self, Write};
//!
//! struct Echo;
//!
//! impl Executor for Echo {
//!     fn exec(&mut self, term: &mut dyn Write, args: ExecArgs<'_>) -> io::Result<ExecOutcome> {
//!         writeln!(term, "{}", args.argv.join(" "))?;
//!         Ok(ExecOutcome::Done)
//!     }
//! }
//!
//! # fn main() -> io::Result<()> {
//! let mut term: Vec<u8> = vec![];
//! let mut shell = Shell::new(ShellConfig::default(), Echo);
//! shell.start(&mut term)?;
//! for byte in b"hi there\n" {
//!     shell.feed(*byte, &mut term)?;
//! }
//! let output = String::from_utf8(term).expect("ascii");
//! assert!(output.contains("hi there"));
//! assert_eq!(shell.history().len(), 2); // draft + the committed line
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! | Module    | Responsibility                                            |
//! |-----------|-----------------------------------------------------------|
//! | `core`    | Byte classifiers, decimal codec, slot lists, byte deque   |
//! | `ctl_seq` | ECMA-48 control-sequence recognizer                       |
//! | `history` | Bounded history ring with a draft slot                    |
//! | `editor`  | Caret, edit primitives, incremental CSI redraws           |
//! | `command` | In-place tokenizer and POSIX-style option scanner         |
//! | `shell`   | Façade and per-byte input dispatch                        |
//!
//! Long-running commands never block the engine: `exec` returns
//! [`ExecOutcome::Continue`], the engine stops itself, and the driver pumps
//! the command's own task step until done before calling [`Shell::start`]
//! again. See the `emsh-console` crate for a complete driver.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach.
pub mod command;
pub mod config;
pub mod core;
pub mod ctl_seq;
pub mod editor;
pub mod history;
pub mod shell;

// Re-export.
pub use command::*;
pub use config::*;
pub use ctl_seq::*;
pub use editor::*;
pub use history::*;
pub use self::core::*;
pub use shell::*;
