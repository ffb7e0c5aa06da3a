// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test fixtures shared by unit and integration tests.

use std::io::{Result, Write};

/// Captures everything the engine writes so tests can assert on the exact
/// emitted byte stream (prompts, echoes, CSI sequences).
#[derive(Debug, Default, Clone)]
pub struct StdoutMock {
    buffer: Vec<u8>,
}

impl StdoutMock {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn get_copy_of_buffer(&self) -> Vec<u8> { self.buffer.clone() }

    /// # Panics
    ///
    /// Panics if the captured bytes are not valid UTF-8. The engine only
    /// emits ASCII, so this indicates a test bug.
    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        String::from_utf8(self.buffer.clone()).expect("utf8")
    }

    pub fn clear(&mut self) { self.buffer.clear(); }
}

impl Write for StdoutMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}
