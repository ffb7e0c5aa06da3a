// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The engine façade: construct, start, feed bytes, stop.
//!
//! The engine is strictly synchronous and byte-driven. The surrounding
//! driver owns the terminal: it reads one byte at a time (raw mode, no echo)
//! and hands each to [`Shell::feed`] together with a writer; everything the
//! engine wants to display is written before `feed` returns, in order.
//!
//! ```text
//! driver byte ──▶ feed ──▶ control-sequence recognizer (ctl_seq)
//!                   │
//!                   ├─ plain keystroke ──▶ line editor (edits the draft)
//!                   ├─ CSI final       ──▶ editor / history navigation
//!                   └─ LF              ──▶ tokenize ─▶ Executor::exec ─▶ history commit
//! ```
//!
//! Long-running commands cooperate instead of blocking: `exec` returns
//! [`ExecOutcome::Continue`], the engine clears its running flag, and the
//! driver, observing [`Shell::is_running`] turn false, pumps the command's
//! own step function until it is done, then calls [`Shell::start`] again.
//! All allocation happens in [`Shell::new`]; feeding bytes is
//! allocation-free.

// Connect to source file.
pub mod dispatch;

#[cfg(feature = "getopt")]
use crate::command::OptScanner;
use crate::config::ShellConfig;
use crate::ctl_seq::CtlSeqRecognizer;
use crate::editor::LineEditor;
use crate::history::History;
use std::io::{self, Write};

/// What the executor wants the engine to do after a command was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The command completed synchronously; prompt for the next line.
    Done,
    /// The command needs cooperative time: the engine stops itself and the
    /// driver takes over until the command's own task loop finishes.
    Continue,
}

/// Everything a command implementation gets to see for one invocation.
///
/// `argv` entries point into the engine's line storage and are valid only
/// until `exec` returns; copy what must outlive the call.
#[derive(Debug)]
pub struct ExecArgs<'a> {
    pub argv: &'a [&'a str],
    /// Option scanner, already rewound to `argv[1]`.
    #[cfg(feature = "getopt")]
    pub opts: &'a mut OptScanner,
}

/// Application-side command dispatch, invoked on every committed non-empty
/// line.
pub trait Executor {
    /// # Errors
    ///
    /// Returns an error if writing command output to `term` fails; the
    /// engine propagates it out of [`Shell::feed`].
    fn exec(&mut self, term: &mut dyn Write, args: ExecArgs<'_>) -> io::Result<ExecOutcome>;
}

/// The line-editor / mini-shell engine. See the [module docs](self) for the
/// data flow and the driver contract.
#[derive(Debug)]
pub struct Shell<X: Executor> {
    pub(crate) executor: X,
    pub(crate) running: bool,
    pub(crate) hist: History,
    pub(crate) editor: LineEditor,
    pub(crate) ctl_seq: CtlSeqRecognizer,
    pub(crate) newline: String,
    pub(crate) max_args: usize,
    #[cfg(feature = "getopt")]
    pub(crate) opt_scanner: OptScanner,
}

impl<X: Executor> Shell<X> {
    /// Allocate the history pool and line storage per `config` and seed the
    /// ring with one empty draft. This is the only allocating call.
    ///
    /// # Panics
    ///
    /// Panics if any capacity in `config` is zero.
    pub fn new(config: ShellConfig, executor: X) -> Self {
        let ShellConfig {
            prompt,
            newline,
            history_capacity,
            line_capacity,
            max_args,
            bell_on_overflow,
        } = config;
        assert!(max_args > 0, "max_args must be non-zero");

        let hist = History::new(history_capacity, line_capacity);
        let mut editor = LineEditor::new(prompt, newline.clone(), bell_on_overflow);
        editor.attach(hist.current());

        Self {
            executor,
            running: false,
            hist,
            editor,
            ctl_seq: CtlSeqRecognizer::new(),
            #[cfg(feature = "getopt")]
            opt_scanner: OptScanner::new(&newline),
            newline,
            max_args,
        }
    }

    /// Set running and write the prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the prompt fails.
    pub fn start(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.running = true;
        self.editor.write_prompt(term)
    }

    /// Clear running. Bytes fed afterwards are still parsed and edited, but
    /// no prompt reappears after a commit until [`Shell::start`].
    pub fn stop(&mut self) { self.running = false; }

    #[must_use]
    pub fn is_running(&self) -> bool { self.running }

    #[must_use]
    pub fn executor(&self) -> &X { &self.executor }

    pub fn executor_mut(&mut self) -> &mut X { &mut self.executor }

    #[must_use]
    pub fn history(&self) -> &History { &self.hist }

    /// The line currently under edit (the focused history block).
    #[must_use]
    pub fn line(&self) -> &[u8] { self.hist.current().as_slice() }

    /// Caret position within [`Shell::line`].
    #[must_use]
    pub fn caret(&self) -> usize { self.editor.caret() }
}
