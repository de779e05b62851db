// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `core` module defines functionality which is shared by all of the compiler stages.

mod file_position;
mod internal_error;
mod source_location;
mod target;

pub use file_position::FilePosition;
pub use source_location::SourceLocation;
pub use target::{Target, Word};
