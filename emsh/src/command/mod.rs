// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Command-line processing for a committed line: in-place argument
//! splitting, and (with the `getopt` feature) POSIX-style option scanning.

// Connect to source file.
#[cfg(feature = "getopt")]
pub mod opt;
pub mod tokenize;

// Re-export.
#[cfg(feature = "getopt")]
pub use opt::*;
pub use tokenize::ArgRanges;
