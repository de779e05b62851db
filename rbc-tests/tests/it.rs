// Copyright 2025-2026 Neil Henderson

//! End-to-end tests: compile B programs and execute them through the reference interpreter.

mod it {
    mod invalid_programs;
    mod properties;
    mod valid_programs;
}
