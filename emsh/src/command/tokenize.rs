// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-place argument splitting for a committed line.
//!
//! The line is split on spaces (runs collapse, quoting is not supported) by
//! writing NUL over each separator and recording token ranges; no copying.
//! Because the line lives in the history ring, [`restore`] must run after
//! the executor returns so that history keeps the original text; the byte
//! stream round-trips exactly because only injected NULs exist (the editor
//! admits printable bytes only).
//!
//! An over-long argument list is reported as `max_args + 1`, which callers
//! treat as "diagnose and drop" without any token being lost from storage.

use crate::config::DEFAULT_MAX_ARGS;
use crate::core::ascii;
use smallvec::SmallVec;
use std::ops::Range;

/// Token ranges into the line; inline up to the default argument limit.
pub type ArgRanges = SmallVec<[Range<usize>; DEFAULT_MAX_ARGS]>;

/// Split `data` in place. Returns the argument count: 0 for a blank line,
/// `max_args + 1` when tokens remain after the limit (overflow sentinel).
/// At most `max_args` ranges are recorded.
pub fn split(data: &mut [u8], max_args: usize, ranges: &mut ArgRanges) -> usize {
    ranges.clear();

    let size = data.len();
    let mut argc = 0;
    let mut pos = 0;

    // Skip leading spaces.
    while pos < size && data[pos] == ascii::SP {
        pos += 1;
    }
    if pos == size {
        return 0;
    }

    // Split arguments.
    while pos < size {
        if argc == max_args {
            argc += 1;
            break;
        }

        let start = pos;
        while pos < size && data[pos] != ascii::SP {
            pos += 1;
        }
        ranges.push(start..pos);
        argc += 1;

        if pos < size {
            data[pos] = ascii::NUL;
            pos += 1;
            while pos < size && data[pos] == ascii::SP {
                pos += 1;
            }
        }
    }

    argc
}

/// Rewrite the injected NULs back to spaces, restoring the original line.
pub fn restore(data: &mut [u8]) {
    for byte in data.iter_mut() {
        if *byte == ascii::NUL {
            *byte = ascii::SP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens<'a>(data: &'a [u8], ranges: &ArgRanges) -> Vec<&'a [u8]> {
        ranges.iter().map(|range| &data[range.clone()]).collect()
    }

    #[test]
    fn test_split_simple_words() {
        let mut data = *b"greet -m World";
        let mut ranges = ArgRanges::new();
        let argc = split(&mut data, 10, &mut ranges);

        assert_eq!(argc, 3);
        assert_eq!(
            tokens(&data, &ranges),
            vec![b"greet".as_slice(), b"-m", b"World"]
        );
        // Separators were NUL-ed in place.
        assert_eq!(&data, b"greet\0-m\0World");
    }

    #[test]
    fn test_split_collapses_space_runs_and_leading_spaces() {
        let mut data = *b"   a   bb c";
        let mut ranges = ArgRanges::new();
        let argc = split(&mut data, 10, &mut ranges);

        assert_eq!(argc, 3);
        assert_eq!(tokens(&data, &ranges), vec![b"a".as_slice(), b"bb", b"c"]);
    }

    #[test]
    fn test_blank_line_yields_zero_args() {
        for text in [b"".as_slice(), b"   "] {
            let mut data = text.to_vec();
            let mut ranges = ArgRanges::new();
            assert_eq!(split(&mut data, 10, &mut ranges), 0);
            assert!(ranges.is_empty());
        }
    }

    #[test]
    fn test_overflow_sets_sentinel_and_keeps_max_ranges() {
        let mut data = *b"a b c d";
        let mut ranges = ArgRanges::new();
        let argc = split(&mut data, 3, &mut ranges);

        assert_eq!(argc, 4);
        assert_eq!(ranges.len(), 3);
        assert_eq!(tokens(&data, &ranges), vec![b"a".as_slice(), b"b", b"c"]);
    }

    #[test]
    fn test_trailing_space_does_not_create_an_empty_token() {
        let mut data = *b"ls ";
        let mut ranges = ArgRanges::new();
        let argc = split(&mut data, 10, &mut ranges);

        assert_eq!(argc, 1);
        assert_eq!(tokens(&data, &ranges), vec![b"ls".as_slice()]);
    }

    #[test]
    fn test_split_then_restore_round_trips() {
        let originals: &[&[u8]] = &[
            b"greet -m -c Hello World",
            b"  spaced   out  ",
            b"single",
            b"a b c d e f g h i j k l",
        ];
        for original in originals {
            let mut data = original.to_vec();
            let mut ranges = ArgRanges::new();
            split(&mut data, 10, &mut ranges);
            restore(&mut data);
            assert_eq!(&data, original);
        }
    }
}
