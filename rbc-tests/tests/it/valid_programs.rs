// Copyright 2025-2026 Neil Henderson

//! Programs that compile and run; each asserts on the program's standard output.

use rbc_tests::{output_of, run_b, run_b_with_input};

// Hello worlds
// ============

#[test]
fn putstr_hello() {
    let out = output_of(
        r#"
        main() {
            extrn putstr;
            putstr("hello!*n");
        }
        "#,
    );
    assert_eq!(out, "hello!\n");
}

#[test]
fn putstr_concatenates() {
    let out = output_of(
        r#"
        main() {
            extrn putstr;
            putstr("hello, "); putstr("world!"); putstr("*n");
        }
        "#,
    );
    assert_eq!(out, "hello, world!\n");
}

#[test]
fn putchar_packs_several_characters() {
    let out = output_of(
        r#"
        main() {
            extrn putchar;
            putchar('hell');
            putchar('o, w');
            putchar('orld');
        }
        "#,
    );
    assert_eq!(out, "hello, world");
}

#[test]
fn strings_held_in_autos() {
    let out = output_of(
        r#"
        main() {
            extrn putstr;
            auto s1, s2;
            s1 = "hello, "; s2 = "world!*n";
            putstr(s1); putstr(s2);
        }
        "#,
    );
    assert_eq!(out, "hello, world!\n");
}

#[test]
fn strings_held_in_externals() {
    let out = output_of(
        r#"
        main() {
            extrn putstr, s1, s2;
            putstr(s1); putstr(s2);
        }
        s1 "hello, "; s2 "world!*n";
        "#,
    );
    assert_eq!(out, "hello, world!\n");
}

// Expressions
// ===========

#[test]
fn constants_round_trip_through_putnumb() {
    assert_eq!(output_of("main() { extrn putnumb; putnumb(25); }"), "25");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(0); }"), "0");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(2147483647); }"), "2147483647");
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(output_of("main() { extrn putnumb; putnumb(2-3-4); }"), "-5");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(20/5/2); }"), "2");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(2*4+5*3); }"), "23");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(2*(4+5)*3); }"), "54");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(4+10*2); }"), "24");
}

#[test]
fn relational_operators_yield_truth_words() {
    let out = output_of(
        r#"
        main() {
            extrn putnumb;
            putnumb(6>5); putnumb(5>5); putnumb(4>5);
            putnumb(4>=5); putnumb(5>=5); putnumb(6>=5);
            putnumb(4<5); putnumb(5<5); putnumb(6<5);
            putnumb(4<=5); putnumb(5<=5); putnumb(6<=5);
            putnumb(5==5); putnumb(6==5);
            putnumb(6!=5); putnumb(5!=5);
        }
        "#,
    );
    assert_eq!(out, "1000111001100101");
}

#[test]
fn bitwise_operators_are_eager_words() {
    assert_eq!(output_of("main() { extrn putnumb; putnumb(5 & 2); }"), "0");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(7 & 2); }"), "2");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(5 | 2); }"), "7");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(5 ^ 3); }"), "6");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(1 << 4); }"), "16");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(16 >> 2); }"), "4");
}

#[test]
fn bitwise_and_or_evaluate_both_sides() {
    // No short-circuiting: both calls happen even when the left side decides.
    let out = output_of(
        r#"
        side(x) {
            extrn putnumb;
            putnumb(x);
            return (x);
        }
        main() {
            extrn putnumb;
            putnumb(side(0) & side(1));
            putnumb(side(1) | side(0));
        }
        "#,
    );
    assert_eq!(out, "010101");
}

#[test]
fn unary_operators() {
    assert_eq!(output_of("main() { extrn putnumb; putnumb(-5); }"), "-5");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(-0); }"), "0");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(-~0); }"), "1");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(!5); }"), "0");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(!-1); }"), "0");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(!0); }"), "1");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(~0); }"), "-1");
}

#[test]
fn character_constants() {
    assert_eq!(output_of("main() { extrn putnumb; putnumb(''); }"), "0");
    assert_eq!(output_of("main() { extrn putnumb; putnumb('A'); }"), "65");

    // The first character occupies the least significant byte: 97 + 98*256.
    assert_eq!(output_of("main() { extrn putnumb; putnumb('ab'); }"), "25185");
    assert_eq!(output_of("main() { extrn putnumb; putnumb('*''); }"), "39");
}

#[test]
fn escape_expansion_through_putchar() {
    let run = run_b("main() { extrn putchar; putchar('*n'); }");
    assert_eq!(run.stdout, vec![0x0A]);

    let run = run_b("main() { extrn putchar; putchar('*t'); }");
    assert_eq!(run.stdout, vec![0x09]);
}

#[test]
fn assignment_operators() {
    let check = |op: &str, expected: &str| {
        let source = format!("main() {{ extrn putnumb; auto a; a = 10; a {op} 2; putnumb(a); }}");
        assert_eq!(output_of(&source), expected, "operator {op}");
    };

    check("=", "2");
    check("=-", "8");
    check("=+", "12");
    check("=*", "20");
    check("=/", "5");
    check("=%", "0");
    check("=<<", "40");
    check("=>>", "2");
    check("=|", "10");
    check("=&", "2");
    check("=^", "8");
    check("===", "0");
    check("=!=", "1");
    check("=<", "0");
    check("=>", "1");
}

#[test]
fn assignment_yields_the_stored_value() {
    let out = output_of(
        r#"
        main() {
            extrn a, putnumb;
            auto b, c;
            putnumb(c=b=(a==23));
            putnumb(c);
            putnumb(b);
            putnumb(a);
        }
        a 23;
        "#,
    );
    assert_eq!(out, "11123");
}

#[test]
fn whitespace_decides_assign_minus() {
    // `a=-b` subtracts; `a = -b` assigns the negation.
    let out = output_of(
        r#"
        main() {
            extrn putnumb;
            auto a, b;
            b = 3;
            a = 10; a=-b;  putnumb(a);
            a = 10; a = -b; putnumb(a);
        }
        "#,
    );
    assert_eq!(out, "7-3");
}

#[test]
fn conditional_expression() {
    assert_eq!(output_of("main() { extrn putnumb; putnumb(5>6?2:3); }"), "3");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(5<6?2:3); }"), "2");
    assert_eq!(output_of("main() { extrn putnumb; putnumb(0?2:3?4:5); }"), "4");
}

#[test]
fn conditional_evaluates_one_side() {
    let out = output_of(
        r#"
        main() {
            1<2 ? f(10):f(11);
            5>9 ? f(20):f(21);
        }
        f(x) {
            extrn putnumb;
            putnumb(x);
            return (x);
        }
        "#,
    );
    assert_eq!(out, "1021");
}

#[test]
fn increment_and_decrement() {
    assert_eq!(output_of("main() { extrn putnumb; auto i; i=4; putnumb(++i); putnumb(i); }"), "55");
    assert_eq!(output_of("main() { extrn putnumb; auto i; i=4; putnumb(--i); putnumb(i); }"), "33");
    assert_eq!(output_of("main() { extrn putnumb; auto i; i=4; putnumb(i++); putnumb(i); }"), "45");
    assert_eq!(output_of("main() { extrn putnumb; auto i; i=4; putnumb(i--); putnumb(i); }"), "43");
}

#[test]
fn builtin_bytes_per_word() {
    let out = output_of(
        r#"
        main() {
            extrn putnumb, __bytes_per_word;
            putnumb(__bytes_per_word);
        }
        "#,
    );
    let value: i64 = out.parse().expect("numeric output");
    assert_eq!(value, size_of::<usize>() as i64);
}

// References and dereferences
// ===========================

#[test]
fn address_identity() {
    assert_eq!(output_of("x; main() { extrn x, putnumb; putnumb(&x == &x); }"), "1");
}

#[test]
fn deref_of_reference_is_identity() {
    assert_eq!(output_of("main() { extrn putnumb; auto x; x = 31; putnumb(*(&x)); }"), "31");
}

#[test]
fn references_pass_between_functions() {
    let out = output_of(
        r#"
        main() {
            extrn putnumb;
            auto i;
            i = 56;
            putataddr(&i);
            putnumb(i);
        }
        putataddr(addr) { extrn putnumb; putnumb(*addr); *addr=0; }
        "#,
    );
    assert_eq!(out, "560");
}

#[test]
fn swap_through_pointers() {
    let out = output_of(
        r#"
        flip(x, y) { auto t; t = *y; *y = *x; *x = t; }
        main() {
            extrn putnumb;
            auto a, b;
            a = 10; b = 20;
            putnumb(a); putnumb(b);
            flip(&a, &b);
            putnumb(a); putnumb(b);
        }
        "#,
    );
    assert_eq!(out, "10202010");
}

// Control flow
// ============

#[test]
fn if_tests_word_truth() {
    let out = output_of(
        r#"
        main(){
            extrn putnumb;
            if(0) putnumb(1);
            if(1) putnumb(2);
            if(-1) putnumb(3);
            if(42) putnumb(4);
            if(-42) putnumb(5);
        }
        "#,
    );
    assert_eq!(out, "2345");
}

#[test]
fn if_else() {
    let out = output_of(
        r#"
        putargmax(a,b) {
            extrn putnumb;
            if(a>=b) putnumb(0); else putnumb(1);
        }
        main() {
            putargmax(10, 10);
            putargmax(10, 11);
            putargmax(5, 4);
        }
        "#,
    );
    assert_eq!(out, "010");
}

#[test]
fn else_binds_to_inner_if() {
    let out = output_of(
        r#"
        posnegzero(a) {
            if(a != 0) if(a > 0) return (1); else return(-1);
            return(0);
        }
        main() {
            extrn putnumb;
            putnumb(posnegzero(-2));
            putnumb(posnegzero(-1));
            putnumb(posnegzero( 0));
            putnumb(posnegzero( 1));
            putnumb(posnegzero( 2));
        }
        "#,
    );
    assert_eq!(out, "-1-1011");
}

#[test]
fn while_loop_counts() {
    let out = output_of(
        r#"
        main() {
            auto i;
            i = 0;
            while (i < 3) {
                i =+ 1;
            }
            extrn putnumb;
            putnumb(i);
        }
        "#,
    );
    assert_eq!(out, "3");
}

#[test]
fn while_condition_false_never_runs() {
    assert_eq!(output_of("main(){while(0);}"), "");
}

#[test]
fn countdown() {
    let out = output_of(
        r#"
        countdown(num) {
            extrn putnumb;
            while(num > 0) { putnumb(num); num =- 1; }
        }
        main() {
            countdown(5);
        }
        "#,
    );
    assert_eq!(out, "54321");
}

#[test]
fn break_leaves_the_loop() {
    let out = output_of(
        r#"
        main() {
            auto i;
            extrn putchar;
            i = 0; while(i < 100) {
                putchar('.');
                if(++i >= 4)
                    break;
            }
        }
        "#,
    );
    assert_eq!(out, "....");
}

#[test]
fn goto_backward() {
    let out = output_of(
        r#"
        main() {
            auto i;
            extrn putchar;
            putchar('X');
            i = 0;
        loop:
            putchar('.');
            if(++i != 5) goto loop;
            putchar('Y');
        }
        "#,
    );
    assert_eq!(out, "X.....Y");
}

#[test]
fn goto_forward() {
    let out = output_of(
        r#"
        main() {
            auto i;
            extrn putchar;
            putchar('X');
            i = 0;
        loop:
            putchar('.');
            if(++i == 5) goto exit;
            goto loop;
        exit:
            putchar('Z');
        }
        "#,
    );
    assert_eq!(out, "X.....Z");
}

#[test]
fn switch_dispatches_and_breaks() {
    let out = output_of(
        r#"
        main() {
            extrn putchar;;
            auto i;
            i = 0; while(i <= 4) {
                describe(i);
                putchar('*n');
                ++i;
            }
        }
        describe(val) {
            extrn putstr, putnumb;
            putnumb(val); putstr(" is ");
            switch(val) {
                case 0: putstr("zero"); break;
                case 1: putstr("one"); break;
                default: putstr("many"); break;
            }
        }
        "#,
    );
    assert_eq!(out, "0 is zero\n1 is one\n2 is many\n3 is many\n4 is many\n");
}

#[test]
fn switch_cases_fall_through() {
    let out = output_of(
        r#"
        main() {
            extrn putchar;;
            auto i;
            i = 0; while(i <= 4) {
                describe(i);
                putchar('*n');
                ++i;
            }
        }
        describe(val) {
            extrn putstr, putnumb;
            putnumb(val); putstr(" is ");
            switch(val) {
                case 0: putstr("zero");
                case 1: putstr("one"); break;
                default: putstr("many");
            }
        }
        "#,
    );
    assert_eq!(out, "0 is zeroone\n1 is one\n2 is many\n3 is many\n4 is many\n");
}

#[test]
fn switch_without_matching_case_skips_the_body() {
    let out = output_of(
        r#"
        main() {
            extrn putnumb;
            switch(9) {
                case 1: putnumb(1);
                case 2: putnumb(2);
            }
            putnumb(7);
        }
        "#,
    );
    assert_eq!(out, "7");
}

// Functions
// =========

#[test]
fn function_calls_and_arguments() {
    let out = output_of(
        r#"
        main() { extrn putnumb; putnumb(sub(3,4)); }
        sub(a, b) { return (a-b); }
        "#,
    );
    assert_eq!(out, "-1");
}

#[test]
fn forward_references_resolve_lazily() {
    let out = output_of(
        r#"
        main() {
            extrn f, putnumb;
            putnumb(f());
        }
        f() return(42);
        "#,
    );
    assert_eq!(out, "42");
}

#[test]
fn recursion() {
    let out = output_of(
        r#"
        fact(n) return(n==0?1:n*fact(n-1));
        main() {
            extrn putnumb, fact;
            putnumb(fact(5));
        }
        "#,
    );
    assert_eq!(out, "120");
}

#[test]
fn recursion_with_if() {
    let out = output_of(
        r#"
        fact(n) if(n == 0) return(1); else return (n*fact(n-1));
        check(a, b) {
            extrn putchar;
            if(a != b)
                putchar('x');
            else
                putchar('.');
        }
        main() {
            check(fact(0), 1);
            check(fact(1), 1);
            check(fact(2), 2);
            check(fact(3), 6);
            check(fact(4), 24);
        }
        "#,
    );
    assert_eq!(out, ".....");
}

#[test]
fn functions_are_word_values() {
    // A function's value is its address; it passes through variables and calls.
    let out = output_of(
        r#"
        twice(f, x) return(f(f(x)));
        add3(x) return(x + 3);
        main() {
            extrn putnumb;
            putnumb(twice(add3, 10));
        }
        "#,
    );
    assert_eq!(out, "16");
}

#[test]
fn empty_function_body_returns_zero() {
    assert_eq!(output_of("f(){} main() { extrn putnumb; putnumb(f()); }"), "0");
}

#[test]
fn falling_off_the_end_returns_zero() {
    assert_eq!(output_of("f(a) a + 1; main() { extrn putnumb; putnumb(f(9)); }"), "0");
}

// Vectors
// =======

#[test]
fn word_stride_indexing() {
    let out = output_of(
        r#"
        v[3] 10, 20, 30, 40;
        main() {
            extrn v, putnumb;
            putnumb(v[2]);
        }
        "#,
    );
    assert_eq!(out, "30");
}

#[test]
fn vector_sum_with_postincrement() {
    let out = output_of(
        r#"
        v[2] 1,2,3;
        main() {
            extrn v, putnumb;
            auto s, i;
            s=0; i=0;
            while(i<3){ s=+v[i++]; }
            putnumb(s);
        }
        "#,
    );
    assert_eq!(out, "6");
}

#[test]
fn indexing_is_deref_of_sum() {
    let out = output_of(
        r#"
        main() {
            extrn v, putnumb;
            putnumb(*(v+1));
            putnumb(1[v]);
        }
        v[] 1, 2, 3;
        "#,
    );
    assert_eq!(out, "22");
}

#[test]
fn auto_vectors() {
    let out = output_of(
        r#"
        main() {
            extrn putchar;
            auto v[2], i;
            v[0] = 'a';
            v[1] = 's';
            v[2] = 't';
            i = 0;
            while(i <= 2) {
                putchar(v[i]); i =+ 1;
            }
        }
        "#,
    );
    assert_eq!(out, "ast");
}

#[test]
fn auto_vectors_hold_strings() {
    let out = output_of(
        r#"
        main() {
            extrn greeting, putstr;
            auto v[2], i;
            v[0] = greeting;
            v[1] = ", ";
            v[2] = "world!*n";
            i = 0;
            while(i <= 2) {
                putstr(v[i]); i =+ 1;
            }
        }
        greeting "hello";
        "#,
    );
    assert_eq!(out, "hello, world!\n");
}

#[test]
fn external_vectors_are_writable() {
    let out = output_of(
        r#"
        main() {
            extrn v, putnumb;
            auto i;
            i = 0;
            v[2] = 8;
            while(i <= 4) { putnumb(v[i]); i =+ 1; }
        }
        v[4] 12, 34;
        "#,
    );
    assert_eq!(out, "1234800");
}

#[test]
fn vector_of_strings() {
    let out = output_of(
        r#"
        main() {
            extrn v, putstr;
            auto i;
            i = 0;
            while(i <= 2) { putstr(v[i]); i =+ 1; }
        }
        v[2] "one", "two", "three";
        "#,
    );
    assert_eq!(out, "onetwothree");
}

#[test]
fn vector_initialized_by_names() {
    let out = output_of(
        r#"
        a 11; b 22;
        v[1] a, b;
        main() {
            extrn v, putnumb;
            putnumb(*v[0] + *v[1]);
        }
        "#,
    );
    assert_eq!(out, "33");
}

// Runtime library
// ===============

#[test]
fn char_indexes_string_bytes() {
    let out = output_of(
        r#"
        main() {
            extrn char, putchar, s;
            auto i;
            i = 0; while(i <=4) {
                putchar('>'); putchar(char(s, i)); putchar('<');
                ++i;
            }
        }
        s "hello";
        "#,
    );
    assert_eq!(out, ">h<>e<>l<>l<>o<");
}

#[test]
fn lchar_builds_strings() {
    let out = output_of(
        r#"
        main() {
            extrn lchar, putstr;
            auto s[3];
            lchar(s, 0, 'X');
            lchar(s, 1, 'Y');
            lchar(s, 2, 'Z');
            lchar(s, 3, '*e');
            putstr(s);
        }
        "#,
    );
    assert_eq!(out, "XYZ");
}

#[test]
fn zero_valued_external_defaults() {
    assert_eq!(output_of("main() { extrn a, putnumb; putnumb(a + 5); } a;"), "5");
}

#[test]
fn copies_stdin_until_eot() {
    let run = run_b_with_input(
        r#"
        main() {
            extrn getchar, putchar;
            auto c;
            while((c=getchar())!='*e') putchar(c);
        }
        "#,
        b"abc\x04",
    );
    assert_eq!(run.stdout_text(), "abc");
}

#[test]
fn exit_stops_the_program() {
    let out = output_of(
        r#"
        main() {
            extrn putnumb, exit;
            putnumb(1);
            exit();
            putnumb(2);
        }
        "#,
    );
    assert_eq!(out, "1");
}

#[test]
fn comments_are_ignored() {
    let out = output_of(
        r#"
        main() {
            extrn putchar;
            /* a comment */
            putchar('a');
            /* a
            multi * line
            comment **/
        }
        "#,
    );
    assert_eq!(out, "a");
}

#[test]
fn names_may_contain_odd_characters() {
    assert_eq!(output_of("m\u{8}y.func() return(3); main() { extrn putnumb; putnumb(m\u{8}y.func()); }"), "3");
}
