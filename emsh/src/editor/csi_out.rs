// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Builder for the small set of CSI sequences the renderer emits.
//!
//! The editor redraws with erase-in-line and horizontal cursor motion only
//! (plus bare CR), so this covers EL / CUF / CUB. Parameters follow the
//! terminal convention for minimal output: a count of 1 is elided, a count
//! of 0 emits nothing at all (`CSI 0 C` would still move one column on real
//! terminals), and larger counts are formatted decimal via the
//! allocation-free codec into a stack buffer.

use crate::core::decimal::{self, MAX_FORMATTED_LEN};
use crate::ctl_seq::byte_class::{CSI_1, CSI_2, FINAL_CUB, FINAL_CUF, FINAL_EL};
use std::io::{self, Write};

/// Largest sequence: CSI + decimal parameter + final byte.
const SEQ_BUF_LEN: usize = 2 + MAX_FORMATTED_LEN + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CsiSequence {
    /// Erase in Line (EL) - ESC [ n K, n in 0..=2 (0 elided).
    EraseLine(u8),
    /// Cursor Forward (CUF) - ESC [ n C.
    CursorForward(usize),
    /// Cursor Backward (CUB) - ESC [ n D.
    CursorBackward(usize),
}

impl CsiSequence {
    pub(crate) fn write_to(self, term: &mut dyn Write) -> io::Result<()> {
        match self {
            CsiSequence::EraseLine(mode) => {
                debug_assert!(mode <= 2, "EL parameter is 0, 1 or 2");
                match mode {
                    0 => term.write_all(&[CSI_1, CSI_2, FINAL_EL]),
                    _ => term.write_all(&[CSI_1, CSI_2, b'0' + mode, FINAL_EL]),
                }
            }
            CsiSequence::CursorForward(count) => write_motion(term, count, FINAL_CUF),
            CsiSequence::CursorBackward(count) => write_motion(term, count, FINAL_CUB),
        }
    }
}

fn write_motion(term: &mut dyn Write, count: usize, final_byte: u8) -> io::Result<()> {
    match count {
        0 => Ok(()),
        1 => term.write_all(&[CSI_1, CSI_2, final_byte]),
        _ => {
            let mut buf = [0_u8; SEQ_BUF_LEN];
            buf[0] = CSI_1;
            buf[1] = CSI_2;
            let mut len = 2;
            len += decimal::format_unsigned(&mut buf[len..], count as u64);
            buf[len] = final_byte;
            len += 1;
            term.write_all(&buf[..len])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_fixtures::StdoutMock;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn emit(sequence: CsiSequence) -> String {
        let mut stdout_mock = StdoutMock::default();
        sequence.write_to(&mut stdout_mock).unwrap();
        stdout_mock.get_copy_of_buffer_as_string()
    }

    #[test_case(CsiSequence::EraseLine(0), "\x1b[K" ; "el to end elides zero")]
    #[test_case(CsiSequence::EraseLine(1), "\x1b[1K" ; "el to start")]
    #[test_case(CsiSequence::EraseLine(2), "\x1b[2K" ; "el whole line")]
    #[test_case(CsiSequence::CursorForward(0), "" ; "cuf zero is silent")]
    #[test_case(CsiSequence::CursorForward(1), "\x1b[C" ; "cuf one elides parameter")]
    #[test_case(CsiSequence::CursorForward(12), "\x1b[12C" ; "cuf many")]
    #[test_case(CsiSequence::CursorBackward(0), "" ; "cub zero is silent")]
    #[test_case(CsiSequence::CursorBackward(1), "\x1b[D" ; "cub one elides parameter")]
    #[test_case(CsiSequence::CursorBackward(77), "\x1b[77D" ; "cub many")]
    fn test_emitted_bytes(sequence: CsiSequence, expected: &str) {
        assert_eq!(emit(sequence), expected);
    }
}
