// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Caret management, edit primitives and minimal redraws.
//!
//! The editor never owns line storage: it edits the history ring's focused
//! block in place (the caller lends it per call), so committed entries and
//! the draft keep whatever edits were made to them. Redraws are incremental
//! (erase-to-end plus the tail text plus a cursor-back) rather than full
//! repaints; only history navigation rewrites the whole line.
//!
//! Invariant: `caret <= line.len() <= line.capacity()` at every observable
//! step. [`LineEditor::attach`] must be called whenever the focused block
//! changes (navigation, commit) to re-establish it.

use super::csi_out::CsiSequence;
use crate::core::{ByteArray, ascii};
use std::io::{self, Write};

#[derive(Debug)]
pub struct LineEditor {
    caret: usize,
    prompt: String,
    newline: String,
    bell_on_overflow: bool,
}

impl LineEditor {
    #[must_use]
    pub fn new(prompt: String, newline: String, bell_on_overflow: bool) -> Self {
        Self {
            caret: 0,
            prompt,
            newline,
            bell_on_overflow,
        }
    }

    /// Caret position within the line, 0 ≤ caret ≤ length.
    #[must_use]
    pub fn caret(&self) -> usize { self.caret }

    #[must_use]
    pub fn prompt(&self) -> &str { &self.prompt }

    /// Point the editor at a (possibly different) line; the caret lands at
    /// the end, where typing resumes.
    pub fn attach(&mut self, line: &ByteArray) { self.caret = line.len(); }

    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails. (Same for every
    /// emitting method below.)
    pub fn write_prompt(&self, term: &mut dyn Write) -> io::Result<()> {
        term.write_all(self.prompt.as_bytes())
    }

    pub fn write_newline(&self, term: &mut dyn Write) -> io::Result<()> {
        term.write_all(self.newline.as_bytes())
    }

    /// Insert a printable byte at the caret. When the line is full the byte
    /// is dropped: silently by default, with a BEL when configured.
    pub fn insert(&mut self, line: &mut ByteArray, byte: u8, term: &mut dyn Write) -> io::Result<()> {
        if line.room() == 0 {
            tracing::trace!(byte, "line full, dropping insert");
            if self.bell_on_overflow {
                term.write_all(&[ascii::BEL])?;
            }
            return Ok(());
        }

        line.insert(self.caret, byte);
        term.write_all(&[byte])?;
        self.caret += 1;
        if self.caret != line.len() {
            self.refresh_tail(line, term)?;
        }
        Ok(())
    }

    /// Erase the byte under the caret (Delete); no-op at end of line.
    pub fn erase_at_caret(&mut self, line: &mut ByteArray, term: &mut dyn Write) -> io::Result<()> {
        if self.caret == line.len() {
            return Ok(());
        }
        line.erase(self.caret);
        self.refresh_tail(line, term)
    }

    /// Erase the byte before the caret (Backspace); no-op at start of line.
    pub fn backspace(&mut self, line: &mut ByteArray, term: &mut dyn Write) -> io::Result<()> {
        if self.caret == 0 {
            return Ok(());
        }
        self.caret_left(term)?;
        self.erase_at_caret(line, term)
    }

    pub fn caret_left(&mut self, term: &mut dyn Write) -> io::Result<()> {
        if self.caret > 0 {
            self.caret -= 1;
            CsiSequence::CursorBackward(1).write_to(term)?;
        }
        Ok(())
    }

    pub fn caret_right(&mut self, line: &ByteArray, term: &mut dyn Write) -> io::Result<()> {
        if self.caret < line.len() {
            self.caret += 1;
            CsiSequence::CursorForward(1).write_to(term)?;
        }
        Ok(())
    }

    pub fn caret_home(&mut self, term: &mut dyn Write) -> io::Result<()> {
        self.set_caret(0, term)
    }

    pub fn caret_end(&mut self, line: &ByteArray, term: &mut dyn Write) -> io::Result<()> {
        self.set_caret(line.len(), term)
    }

    /// Absolute caret move: CR, then forward over the prompt plus `pos`.
    fn set_caret(&mut self, pos: usize, term: &mut dyn Write) -> io::Result<()> {
        term.write_all(&[ascii::CR])?;
        CsiSequence::CursorForward(self.prompt.len() + pos).write_to(term)?;
        self.caret = pos;
        Ok(())
    }

    /// Redraw from the caret to end of line, then park the cursor back at
    /// the caret.
    pub fn refresh_tail(&self, line: &ByteArray, term: &mut dyn Write) -> io::Result<()> {
        let tail = &line.as_slice()[self.caret..];
        CsiSequence::EraseLine(0).write_to(term)?;
        term.write_all(tail)?;
        CsiSequence::CursorBackward(tail.len()).write_to(term)
    }

    /// Redraw the whole line (prompt included); used when navigation swaps
    /// the content out from under the display.
    pub fn refresh_line(&mut self, line: &ByteArray, term: &mut dyn Write) -> io::Result<()> {
        self.attach(line);
        term.write_all(&[ascii::CR])?;
        CsiSequence::EraseLine(0).write_to(term)?;
        self.write_prompt(term)?;
        term.write_all(line.as_slice())
    }
}
