// Copyright 2025-2026 Neil Henderson
//
//! The `target` module defines the [Target] word-width configuration and the [Word] value type.

use std::fmt;

/// The canonical B value type.
///
/// Every value a B program manipulates is a word: integers, data addresses and function addresses alike.
/// The front end always computes with 64 bits and truncates through [Target::truncate] when the target
/// word is narrower.
pub type Word = i64;

/// The word-width configuration of the compilation target.
///
/// B is word oriented: the word is the pointer-sized signed integer of the target, and addresses are
/// represented as *word indices* (byte address divided by the number of bytes per word). The only
/// degree of freedom the front end needs is that byte count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Target {
    bytes_per_word: u32,
}

impl Target {
    /// Creates a target with the given number of bytes per word. Only 4 and 8 byte words are supported.
    pub fn new(bytes_per_word: u32) -> Self {
        assert!(bytes_per_word == 4 || bytes_per_word == 8, "unsupported word size: {bytes_per_word}");
        Self { bytes_per_word }
    }

    /// A target whose word matches the host's pointer width.
    pub fn host() -> Self {
        Self::new(size_of::<usize>() as u32)
    }

    /// The number of bytes in a word.
    pub fn bytes_per_word(&self) -> u32 {
        self.bytes_per_word
    }

    /// The number of bits in a word.
    pub fn bits(&self) -> u32 {
        self.bytes_per_word * 8
    }

    /// Truncates `value` to the target word width, sign extending back into a [Word].
    ///
    /// All B arithmetic wraps in two's complement at the word width.
    pub fn truncate(&self, value: Word) -> Word {
        if self.bytes_per_word == 8 { value } else { value as i32 as Word }
    }

    /// The largest nonnegative value a word can hold.
    pub fn max_word(&self) -> u64 {
        if self.bytes_per_word == 8 { i64::MAX as u64 } else { i32::MAX as u64 }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-bit words", self.bits())
    }
}
