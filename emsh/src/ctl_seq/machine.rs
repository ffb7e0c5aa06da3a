// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Strict per-byte recognizer for ECMA-48 control sequences.
//!
//! [`CtlSeqState::advance`] is the pure transition function: one byte in,
//! one event out, fully determined by (state, byte). Every unexpected byte
//! drops the sequence and returns to [`CtlSeqState::Init`] with
//! [`CtlSeqEvent::Ilseq`]; there is no partial recovery.
//!
//! [`CtlSeqRecognizer`] layers the per-sequence memory on top: the first
//! parameter byte and the first intermediate byte, each collapsing to
//! [`SeenByte::Many`] when a second one arrives. That is all the dispatcher
//! needs: the keypad sequences it handles carry a single-digit parameter,
//! and anything longer is deliberately ignored rather than buffered.

use super::byte_class::{CSI_1, CSI_2, PARAM_SEPARATOR, is_final_byte, is_interm_byte,
                        is_param_byte};

/// Recognizer state. `Init` doubles as "not inside a sequence"; `Final` folds
/// back to `Init` when the next byte arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
pub enum CtlSeqState {
    Init,
    Esc,
    Csi,
    Param,
    Interm,
    Final,
}

impl Default for CtlSeqState {
    fn default() -> Self { Self::Init }
}

/// Event produced for one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum CtlSeqEvent {
    /// Nothing notable: either an ordinary byte outside a sequence, or a
    /// continuation byte within the current phase.
    None,
    /// Start of an escape sequence.
    Esc,
    /// The introducer completed (`ESC [`).
    Csi,
    /// First parameter byte.
    Param,
    /// First intermediate byte.
    Interm,
    /// Final byte; the sequence is complete.
    Final,
    /// Malformed sequence, dropped.
    Ilseq,
}

/// Outcome of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtlSeqStep {
    pub state: CtlSeqState,
    pub event: CtlSeqEvent,
    /// A parameter sub-string terminated on this byte: an explicit `;`, a
    /// leading `;` (empty first sub-string), or implicit termination when
    /// the parameter phase ends.
    pub param_sep: bool,
}

impl CtlSeqStep {
    const fn new(state: CtlSeqState, event: CtlSeqEvent) -> Self {
        Self {
            state,
            event,
            param_sep: false,
        }
    }

    const fn with_param_sep(mut self, param_sep: bool) -> Self {
        self.param_sep = param_sep;
        self
    }
}

impl CtlSeqState {
    /// Advance by one byte. A `Final` state is reset to `Init` first, then
    /// the byte is processed as if from `Init`.
    #[must_use]
    pub fn advance(self, byte: u8) -> CtlSeqStep {
        use self::{CtlSeqEvent as Ev, CtlSeqState as St};

        let state = match self {
            St::Final => St::Init,
            other => other,
        };

        match state {
            St::Init => {
                if byte == CSI_1 {
                    CtlSeqStep::new(St::Esc, Ev::Esc)
                } else {
                    CtlSeqStep::new(St::Init, Ev::None)
                }
            }

            St::Esc => {
                if byte == CSI_2 {
                    CtlSeqStep::new(St::Csi, Ev::Csi)
                } else {
                    CtlSeqStep::new(St::Init, Ev::Ilseq)
                }
            }

            St::Csi => {
                if is_param_byte(byte) {
                    // A leading `;` means an empty first parameter sub-string.
                    CtlSeqStep::new(St::Param, Ev::Param)
                        .with_param_sep(byte == PARAM_SEPARATOR)
                } else if is_interm_byte(byte) {
                    CtlSeqStep::new(St::Interm, Ev::Interm)
                } else if is_final_byte(byte) {
                    CtlSeqStep::new(St::Final, Ev::Final)
                } else {
                    CtlSeqStep::new(St::Init, Ev::Ilseq)
                }
            }

            St::Param => {
                if is_param_byte(byte) {
                    CtlSeqStep::new(St::Param, Ev::None)
                        .with_param_sep(byte == PARAM_SEPARATOR)
                } else if is_interm_byte(byte) {
                    CtlSeqStep::new(St::Interm, Ev::Interm).with_param_sep(true)
                } else if is_final_byte(byte) {
                    CtlSeqStep::new(St::Final, Ev::Final).with_param_sep(true)
                } else {
                    CtlSeqStep::new(St::Init, Ev::Ilseq).with_param_sep(true)
                }
            }

            St::Interm => {
                if is_interm_byte(byte) {
                    CtlSeqStep::new(St::Interm, Ev::None)
                } else if is_final_byte(byte) {
                    CtlSeqStep::new(St::Final, Ev::Final)
                } else {
                    CtlSeqStep::new(St::Init, Ev::Ilseq)
                }
            }

            St::Final => unreachable!("folded to Init above"),
        }
    }
}

/// First occurrence of a byte within one sequence phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeenByte {
    /// No byte of this class seen yet.
    #[default]
    None,
    /// Exactly one, remembered.
    One(u8),
    /// More than one; the dispatcher treats such sequences as unrecognized.
    Many,
}

/// Stateful recognizer: the transition function plus the remembered first
/// parameter and first intermediate byte of the sequence in flight.
#[derive(Debug, Default)]
pub struct CtlSeqRecognizer {
    state: CtlSeqState,
    param_byte: SeenByte,
    interm_byte: SeenByte,
}

impl CtlSeqRecognizer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn state(&self) -> CtlSeqState { self.state }

    #[must_use]
    pub fn param_byte(&self) -> SeenByte { self.param_byte }

    #[must_use]
    pub fn interm_byte(&self) -> SeenByte { self.interm_byte }

    /// Feed one byte; updates the state and per-sequence memory.
    pub fn feed(&mut self, byte: u8) -> CtlSeqStep {
        let step = self.state.advance(byte);
        self.state = step.state;

        match step.event {
            CtlSeqEvent::Esc => {
                self.param_byte = SeenByte::None;
                self.interm_byte = SeenByte::None;
            }
            CtlSeqEvent::Param => self.param_byte = SeenByte::One(byte),
            CtlSeqEvent::Interm => self.interm_byte = SeenByte::One(byte),
            CtlSeqEvent::None => match self.state {
                CtlSeqState::Param => self.param_byte = SeenByte::Many,
                CtlSeqState::Interm => self.interm_byte = SeenByte::Many,
                _ => {}
            },
            CtlSeqEvent::Csi | CtlSeqEvent::Final | CtlSeqEvent::Ilseq => {}
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::CtlSeqEvent as Ev;
    use super::CtlSeqState as St;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(St::Init, 0x1B, St::Esc, Ev::Esc, false ; "init esc")]
    #[test_case(St::Init, b'a', St::Init, Ev::None, false ; "init plain byte")]
    #[test_case(St::Esc, b'[', St::Csi, Ev::Csi, false ; "esc bracket")]
    #[test_case(St::Esc, b'a', St::Init, Ev::Ilseq, false ; "esc unexpected")]
    #[test_case(St::Csi, b'3', St::Param, Ev::Param, false ; "csi digit")]
    #[test_case(St::Csi, 0x3B, St::Param, Ev::Param, true ; "csi leading separator")]
    #[test_case(St::Csi, 0x20, St::Interm, Ev::Interm, false ; "csi intermediate")]
    #[test_case(St::Csi, b'A', St::Final, Ev::Final, false ; "csi final")]
    #[test_case(St::Csi, 0x07, St::Init, Ev::Ilseq, false ; "csi unexpected")]
    #[test_case(St::Param, b'4', St::Param, Ev::None, false ; "param digit")]
    #[test_case(St::Param, 0x3B, St::Param, Ev::None, true ; "param separator")]
    #[test_case(St::Param, 0x20, St::Interm, Ev::Interm, true ; "param to intermediate")]
    #[test_case(St::Param, b'~', St::Final, Ev::Final, true ; "param to final")]
    #[test_case(St::Param, 0x07, St::Init, Ev::Ilseq, true ; "param unexpected")]
    #[test_case(St::Interm, 0x2F, St::Interm, Ev::None, false ; "interm continuation")]
    #[test_case(St::Interm, b'K', St::Final, Ev::Final, false ; "interm to final")]
    #[test_case(St::Interm, b'0', St::Init, Ev::Ilseq, false ; "interm param byte is illegal")]
    #[test_case(St::Final, 0x1B, St::Esc, Ev::Esc, false ; "final folds then esc")]
    #[test_case(St::Final, b'x', St::Init, Ev::None, false ; "final folds then plain")]
    fn test_transitions(
        from: CtlSeqState,
        byte: u8,
        expected_state: CtlSeqState,
        expected_event: CtlSeqEvent,
        expected_param_sep: bool,
    ) {
        let step = from.advance(byte);
        assert_eq!(step.state, expected_state);
        assert_eq!(step.event, expected_event);
        assert_eq!(step.param_sep, expected_param_sep);
    }

    /// Every prefix of an unfinished sequence stays in one of the in-flight
    /// states, and the final byte produces exactly one `Final` event.
    #[test]
    fn test_full_sequence_emits_final_once() {
        let mut recognizer = CtlSeqRecognizer::new();
        let mut final_events = 0;
        for &byte in b"\x1b[12;34 ~" {
            let step = recognizer.feed(byte);
            if step.event == Ev::Final {
                final_events += 1;
            } else {
                assert!(matches!(
                    step.state,
                    St::Esc | St::Csi | St::Param | St::Interm
                ));
            }
        }
        assert_eq!(final_events, 1);
        assert_eq!(recognizer.state(), St::Final);
    }

    #[test]
    fn test_recognizer_remembers_first_bytes_only() {
        let mut recognizer = CtlSeqRecognizer::new();
        for &byte in b"\x1b[1" {
            recognizer.feed(byte);
        }
        assert_eq!(recognizer.param_byte(), SeenByte::One(b'1'));
        assert_eq!(recognizer.interm_byte(), SeenByte::None);

        recognizer.feed(b'2');
        assert_eq!(recognizer.param_byte(), SeenByte::Many);

        recognizer.feed(0x20);
        assert_eq!(recognizer.interm_byte(), SeenByte::One(0x20));
        recognizer.feed(0x21);
        assert_eq!(recognizer.interm_byte(), SeenByte::Many);
    }

    #[test]
    fn test_new_sequence_clears_memory() {
        let mut recognizer = CtlSeqRecognizer::new();
        for &byte in b"\x1b[5~" {
            recognizer.feed(byte);
        }
        assert_eq!(recognizer.param_byte(), SeenByte::One(b'5'));

        // The next ESC starts fresh.
        recognizer.feed(0x1B);
        assert_eq!(recognizer.param_byte(), SeenByte::None);
        assert_eq!(recognizer.interm_byte(), SeenByte::None);
        assert_eq!(recognizer.state(), St::Esc);
    }

    #[test]
    fn test_ilseq_returns_to_init() {
        let mut recognizer = CtlSeqRecognizer::new();
        recognizer.feed(0x1B);
        let step = recognizer.feed(b'x');
        assert_eq!(step.event, Ev::Ilseq);
        assert_eq!(recognizer.state(), St::Init);
    }

    /// The event is fully determined by (state, byte): exhaustively check
    /// that advance always lands in exactly one of the six states.
    #[test]
    fn test_advance_is_total() {
        use strum::IntoEnumIterator;

        for state in St::iter() {
            for byte in 0..=0xFF_u8 {
                let step = state.advance(byte);
                assert!(matches!(
                    step.state,
                    St::Init | St::Esc | St::Csi | St::Param | St::Interm | St::Final
                ));
            }
        }
    }
}
