// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scoped raw-mode acquisition.
//!
//! The engine expects one byte per keypress: no local canonicalization, no
//! echo, no CR→LF translation. That is the driver's job, so the guard
//! enables raw mode on construction and restores the previous terminal
//! state on every exit path, including panics, via `Drop`.

use miette::IntoDiagnostic;

#[derive(Debug)]
pub struct RawModeGuard;

impl RawModeGuard {
    /// # Errors
    ///
    /// Returns an error if the terminal attributes cannot be changed (for
    /// example when stdin is not a tty).
    pub fn new() -> miette::Result<Self> {
        crossterm::terminal::enable_raw_mode().into_diagnostic()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(error) = crossterm::terminal::disable_raw_mode() {
            tracing::warn!(%error, "failed to restore terminal mode");
        }
    }
}
