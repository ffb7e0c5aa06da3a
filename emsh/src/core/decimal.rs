// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Allocation-free decimal codec for unsigned integers.
//!
//! Both directions operate on caller-provided byte slices so they can run on
//! the hot redraw path: CSI parameters are formatted through
//! [`format_unsigned`] into a stack buffer, and command implementations parse
//! numeric arguments with [`parse_unsigned`] without touching the heap.

use thiserror::Error;

/// Enough room to format any `u64` as decimal (no terminator).
pub const MAX_FORMATTED_LEN: usize = 20;

/// Errors surfaced by [`parse_unsigned`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    /// The input does not start with a decimal digit.
    #[error("input does not start with a decimal digit")]
    IllegalSequence,

    /// The parsed value would exceed the caller's maximum.
    #[error("value exceeds the permitted maximum")]
    Range,
}

/// Write the decimal representation of `value` into the front of `dst` and
/// return the number of bytes written. Zero formats as `"0"`.
///
/// # Panics
///
/// Panics if `dst` is shorter than the formatted value. Callers size their
/// buffer with [`MAX_FORMATTED_LEN`].
pub fn format_unsigned(dst: &mut [u8], value: u64) -> usize {
    if value == 0 {
        dst[0] = b'0';
        return 1;
    }

    let mut remaining = value;
    let mut count = 0;
    while remaining != 0 {
        dst[count] = b'0' + u8::try_from(remaining % 10).unwrap_or(0);
        remaining /= 10;
        count += 1;
    }
    dst[..count].reverse();
    count
}

/// Greedily consume decimal digits from the start of `src`, rejecting values
/// above `max`. On success returns the value and the count of digits
/// consumed; trailing non-digit bytes are left for the caller.
///
/// # Errors
///
/// - [`DecimalError::IllegalSequence`] when `src` does not start with a digit.
/// - [`DecimalError::Range`] when the value would exceed `max`.
pub fn parse_unsigned(src: &[u8], max: u64) -> Result<(u64, usize), DecimalError> {
    let mut value: u64 = 0;
    let mut consumed = 0;

    for &byte in src {
        if !byte.is_ascii_digit() {
            break;
        }
        // Overflow checks against `max` before each step, so the
        // accumulator itself can never wrap.
        if value > max / 10 {
            return Err(DecimalError::Range);
        }
        value *= 10;
        let digit = u64::from(byte - b'0');
        if value > max - digit {
            return Err(DecimalError::Range);
        }
        value += digit;
        consumed += 1;
    }

    if consumed == 0 {
        return Err(DecimalError::IllegalSequence);
    }
    Ok((value, consumed))
}
