// Copyright 2025-2026 Neil Henderson

//! Property tests over generated B programs.

use proptest::prelude::*;

use rbc_tests::output_of;

proptest! {
    /// Emitting and executing `putnumb(n)` prints `n` back, for any word the literal grammar
    /// can express.
    #[test]
    fn constant_round_trip(n in 0i64..=i32::MAX as i64) {
        let source = format!("main() {{ extrn putnumb; putnumb({n}); }}");
        prop_assert_eq!(output_of(&source), n.to_string());
    }

    /// A two-character literal packs its first character into the least significant byte.
    #[test]
    fn character_packing(a in b'a'..=b'z', b in b'A'..=b'Z') {
        let expected = a as i64 + 256 * b as i64;
        let source = format!("main() {{ extrn putnumb; putnumb('{}{}'); }}", a as char, b as char);
        prop_assert_eq!(output_of(&source), expected.to_string());
    }

    /// `v[i]` is word-stride indexing: it selects exactly the i-th initializer.
    #[test]
    fn word_stride(values in proptest::collection::vec(-1000i64..1000, 1..8), index in 0usize..8) {
        let index = index % values.len();
        let ivals: Vec<String> = values.iter().map(|v| v.to_string()).collect();

        let source = format!(
            "v[] {}; main() {{ extrn v, putnumb; putnumb(v[{index}]); }}",
            ivals.join(", ")
        );
        prop_assert_eq!(output_of(&source), values[index].to_string());
    }

    /// Assignment returns the stored value: `putnumb(a = n)` and `putnumb(a)` agree.
    #[test]
    fn assignment_has_the_stored_value(n in -100000i64..100000) {
        let source = format!("main() {{ extrn putnumb; auto a; putnumb(a = {n}); putnumb(a); }}");
        let expected = format!("{n}{n}");
        prop_assert_eq!(output_of(&source), expected);
    }
}
