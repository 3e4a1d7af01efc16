mod common;
use common::*;

#[test]
fn test_keywords_are_case_insensitive() {
    let mut r = runtime("pRiNt 1\nlet a=2\nPrInT A\n");
    assert_eq!(exec(&mut r), "1\n2\n");
}

#[test]
fn test_keywords_allow_interleaved_spaces() {
    let mut r = runtime("10 PRINT 1\n20 END\nG O T O 1 0\n");
    assert_eq!(exec(&mut r), "1\n");
}

#[test]
fn test_spaces_matter_only_inside_strings() {
    let mut r = runtime("PRINT \"A  B\" ; 1 + 2\n");
    assert_eq!(exec(&mut r), "A  B3\n");
}

#[test]
fn test_unterminated_string_is_an_error() {
    let mut r = runtime("PRINT \"AB\n");
    assert_eq!(exec(&mut r), "SYNTAX ERROR; PRINT \"AB\n");
}

#[test]
fn test_trailing_junk_is_an_error() {
    let mut r = runtime("RUN RUN\n10 END END\nLIST\n");
    assert_eq!(
        exec(&mut r),
        "SYNTAX ERROR; RUN RUN\nSYNTAX ERROR; 10 END END\n"
    );
}

#[test]
fn test_failed_if_is_one_error_for_the_whole_line() {
    let mut r = runtime("10 IF 1=1 THEN FOO 1\nLIST\n");
    assert_eq!(exec(&mut r), "SYNTAX ERROR; 10 IF 1=1 THEN FOO 1\n");
}

#[test]
fn test_numbers_may_embed_spaces() {
    let mut r = runtime("PRINT 1 2 3+1\n");
    assert_eq!(exec(&mut r), "124\n");
}

#[test]
fn test_wrapped_literal_lists_as_unsigned_twin() {
    let mut r = runtime("10 LET A=9223372036854775808\nLIST\n");
    assert_eq!(exec(&mut r), "10 LET A = 9223372036854775808\n");
}

#[test]
fn test_let_keyword_is_required() {
    let mut r = runtime("A=1\n");
    assert_eq!(exec(&mut r), "SYNTAX ERROR; A=1\n");
}

#[test]
fn test_rem_without_text() {
    let mut r = runtime("10 REM\nLIST\n");
    assert_eq!(exec(&mut r), "10 REM\n");
}

#[test]
fn test_equal_prefix_relops_are_not_recognized() {
    let mut r = runtime("IF 1 => 0 THEN PRINT 1\n");
    assert_eq!(exec(&mut r), "SYNTAX ERROR; IF 1 => 0 THEN PRINT 1\n");
}
