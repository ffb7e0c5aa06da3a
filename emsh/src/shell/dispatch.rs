// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-byte input dispatch.
//!
//! Every byte goes through the control-sequence recognizer first. When the
//! recognizer lands back in `Init` the byte was not part of an unfinished
//! sequence and is handled as a plain keystroke; otherwise only a completed
//! sequence (a `Final` event) triggers an action, chosen from the remembered
//! first parameter and intermediate bytes. Malformed sequences are dropped
//! without ceremony.
//!
//! Plain keystrokes:
//!
//! | Byte            | Action                          |
//! |-----------------|---------------------------------|
//! | CR              | ignored                         |
//! | LF              | commit the line                 |
//! | BS, DEL         | backspace                       |
//! | Ctrl+A / Ctrl+E | caret to start / end            |
//! | Ctrl+B / Ctrl+F | caret left / right              |
//! | Ctrl+D          | erase under caret               |
//! | Ctrl+P / Ctrl+N | history older / newer           |
//! | printable       | insert at caret                 |
//! | anything else   | ignored                         |
//!
//! Completed sequences: CUU/CUD navigate history, CUF/CUB move the caret,
//! and the keypad family `CSI 1~`/`3~`/`4~` maps to home/delete/end
//! (`CSI 2~`, overwrite mode, is recognized but deliberately does nothing).
//! Sequences with an intermediate byte are accepted and ignored.

use super::{ExecArgs, ExecOutcome, Executor, Shell};
use crate::command::tokenize::{self, ArgRanges};
use crate::config::DEFAULT_MAX_ARGS;
use crate::core::ascii;
use crate::ctl_seq::byte_class::{FINAL_CUB, FINAL_CUD, FINAL_CUF, FINAL_CUU, FINAL_TILDE,
                                 INTERM_MAP_1};
use crate::ctl_seq::{CtlSeqEvent, CtlSeqState, CtlSeqStep, SeenByte};
use smallvec::SmallVec;
use std::io::{self, Write};

const CTRL_A: u8 = ascii::ctrl(b'A');
const CTRL_B: u8 = ascii::ctrl(b'B');
const CTRL_D: u8 = ascii::ctrl(b'D');
const CTRL_E: u8 = ascii::ctrl(b'E');
const CTRL_F: u8 = ascii::ctrl(b'F');
const CTRL_N: u8 = ascii::ctrl(b'N');
const CTRL_P: u8 = ascii::ctrl(b'P');

/// Diagnostic for an over-long argument list (newline appended separately).
const ARG_OVERFLOW_DIAGNOSTIC: &str = "emsh: Argument list too long.";

impl<X: Executor> Shell<X> {
    /// Consume one input byte. All display output caused by the byte is
    /// written to `term` before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `term` (or the executor) fails.
    pub fn feed(&mut self, byte: u8, term: &mut dyn Write) -> io::Result<()> {
        let step = self.ctl_seq.feed(byte);
        if step.event == CtlSeqEvent::Ilseq {
            tracing::trace!(byte, "malformed control sequence dropped");
        }

        if self.ctl_seq.state() == CtlSeqState::Init {
            self.on_plain_byte(byte, term)
        } else {
            self.on_ctl_seq_byte(byte, step, term)
        }
    }

    fn on_plain_byte(&mut self, byte: u8, term: &mut dyn Write) -> io::Result<()> {
        match byte {
            ascii::CR => Ok(()),
            ascii::LF => self.commit(term),
            ascii::BS | ascii::DEL => self.do_backspace(term),
            CTRL_A => self.do_caret_home(term),
            CTRL_B => self.do_caret_left(term),
            CTRL_D => self.do_erase(term),
            CTRL_E => self.do_caret_end(term),
            CTRL_F => self.do_caret_right(term),
            CTRL_N => self.do_history_forward(term),
            CTRL_P => self.do_history_backward(term),
            _ if ascii::is_print(byte) => self.do_insert(byte, term),
            _ => Ok(()),
        }
    }

    fn on_ctl_seq_byte(
        &mut self,
        byte: u8,
        step: CtlSeqStep,
        term: &mut dyn Write,
    ) -> io::Result<()> {
        if step.event != CtlSeqEvent::Final {
            return Ok(());
        }

        match self.ctl_seq.interm_byte() {
            SeenByte::None => match byte {
                FINAL_CUU => self.do_history_backward(term),
                FINAL_CUD => self.do_history_forward(term),
                FINAL_CUF => self.do_caret_right(term),
                FINAL_CUB => self.do_caret_left(term),
                FINAL_TILDE => match self.ctl_seq.param_byte() {
                    SeenByte::One(b'1') => self.do_caret_home(term),
                    // Overwrite mode: recognized, intentionally not acted on.
                    SeenByte::One(b'2') => Ok(()),
                    SeenByte::One(b'3') => self.do_erase(term),
                    SeenByte::One(b'4') => self.do_caret_end(term),
                    _ => Ok(()),
                },
                _ => Ok(()),
            },
            // Sequences from the single-intermediate table (ECMA-48 Table 4)
            // are accepted but nothing is mapped to them.
            SeenByte::One(INTERM_MAP_1) => Ok(()),
            _ => Ok(()),
        }
    }

    fn do_insert(&mut self, byte: u8, term: &mut dyn Write) -> io::Result<()> {
        let Self { editor, hist, .. } = self;
        editor.insert(hist.current_mut(), byte, term)
    }

    fn do_erase(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let Self { editor, hist, .. } = self;
        editor.erase_at_caret(hist.current_mut(), term)
    }

    fn do_backspace(&mut self, term: &mut dyn Write) -> io::Result<()> {
        let Self { editor, hist, .. } = self;
        editor.backspace(hist.current_mut(), term)
    }

    fn do_caret_left(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.editor.caret_left(term)
    }

    fn do_caret_right(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.editor.caret_right(self.hist.current(), term)
    }

    fn do_caret_home(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.editor.caret_home(term)
    }

    fn do_caret_end(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.editor.caret_end(self.hist.current(), term)
    }

    fn do_history_backward(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.hist.move_backward();
        let Self { editor, hist, .. } = self;
        editor.refresh_line(hist.current(), term)
    }

    fn do_history_forward(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.hist.move_forward();
        let Self { editor, hist, .. } = self;
        editor.refresh_line(hist.current(), term)
    }

    /// LF: run the line through tokenize → exec → history commit.
    ///
    /// A blank line keeps the draft and just reprints the prompt. An
    /// over-long argument list prints a diagnostic and drops the line:
    /// the executor is not called and the ring does not advance, but the
    /// draft text is restored so nothing typed is lost.
    fn commit(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.editor.write_newline(term)?;

        let mut ranges = ArgRanges::new();
        let argc = tokenize::split(
            self.hist.current_mut().as_mut_slice(),
            self.max_args,
            &mut ranges,
        );

        let mut committed = false;
        if argc == 0 {
            // Blank line: nothing to run, nothing to remember.
        } else if argc <= self.max_args {
            #[cfg(feature = "getopt")]
            let mut opts = std::mem::take(&mut self.opt_scanner);
            #[cfg(feature = "getopt")]
            opts.rewind();

            let outcome = {
                let line = self.hist.current().as_slice();
                let argv: SmallVec<[&str; DEFAULT_MAX_ARGS]> = ranges
                    .iter()
                    .filter_map(|range| std::str::from_utf8(&line[range.clone()]).ok())
                    .collect();
                tracing::debug!(
                    command = argv.first().copied().unwrap_or_default(),
                    argc,
                    "dispatching command"
                );

                #[cfg(feature = "getopt")]
                let args = ExecArgs {
                    argv: &argv,
                    opts: &mut opts,
                };
                #[cfg(not(feature = "getopt"))]
                let args = ExecArgs { argv: &argv };

                self.executor.exec(term, args)?
            };

            #[cfg(feature = "getopt")]
            {
                self.opt_scanner = opts;
            }

            tokenize::restore(self.hist.current_mut().as_mut_slice());
            if outcome == ExecOutcome::Continue {
                tracing::debug!("executor requested cooperative continuation");
                self.stop();
            }
            committed = true;
        } else {
            tracing::debug!(max_args = self.max_args, "argument list overflow");
            term.write_all(ARG_OVERFLOW_DIAGNOSTIC.as_bytes())?;
            term.write_all(self.newline.as_bytes())?;
            tokenize::restore(self.hist.current_mut().as_mut_slice());
        }

        if committed {
            self.hist.commit();
            self.editor.attach(self.hist.current());
        }
        if self.running {
            self.editor.write_prompt(term)?;
        }
        Ok(())
    }
}
