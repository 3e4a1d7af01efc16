mod common;
use common::*;

#[test]
fn test_hello_world_list_and_run() {
    let mut r = runtime("10 PRINT \"Hello, world\"\nLIST\nRUN\n");
    assert_eq!(
        exec(&mut r),
        "10 PRINT \"Hello, world\"\n\
         Hello, world\n\
         END OF PROGRAM WITHOUT END IN 10\n\
         PROGRAM TERMINATED\n"
    );
}

#[test]
fn test_let_and_print_sum() {
    let mut r = runtime("10 LET A=2\n20 LET B=3\n30 PRINT A+B\n40 END\nRUN\n");
    assert_eq!(exec(&mut r), "5\n");
}

#[test]
fn test_gosub_return_order() {
    let mut r = runtime(
        "10 GOSUB 100\n20 PRINT \"done\"\n30 END\n100 PRINT \"in sub\"\n110 RETURN\nRUN\n",
    );
    assert_eq!(exec(&mut r), "in sub\ndone\n");
}

#[test]
fn test_nested_gosubs_unwind_in_reverse() {
    let mut r = runtime(
        "10 GOSUB 100\n20 PRINT \"A\"\n30 END\n\
         100 GOSUB 200\n110 PRINT \"B\"\n120 RETURN\n\
         200 PRINT \"C\"\n210 RETURN\nRUN\n",
    );
    assert_eq!(exec(&mut r), "C\nB\nA\n");
}

#[test]
fn test_goto_missing_line_aborts_to_idle() {
    let mut r = runtime("GOTO 999\nPRINT 1\n");
    assert_eq!(exec(&mut r), "UNDEFINED LINE 999\n1\n");
}

#[test]
fn test_goto_missing_line_in_program_names_both_lines() {
    let mut r = runtime("10 GOTO 999\nRUN\n");
    assert_eq!(
        exec(&mut r),
        "UNDEFINED LINE 999 IN 10\nPROGRAM TERMINATED\n"
    );
}

#[test]
fn test_immediate_goto_starts_the_program() {
    let mut r = runtime("10 PRINT \"X\"\n20 END\nGOTO 10\n");
    assert_eq!(exec(&mut r), "X\n");
}

#[test]
fn test_return_without_gosub() {
    let mut r = runtime("10 RETURN\nRUN\n");
    assert_eq!(
        exec(&mut r),
        "RETURN WITHOUT GOSUB IN 10\nPROGRAM TERMINATED\n"
    );
}

#[test]
fn test_run_with_no_program() {
    let mut r = runtime("RUN\n");
    assert_eq!(exec(&mut r), "NO PROGRAM\n");
}

#[test]
fn test_run_resets_variables() {
    let mut r = runtime("10 PRINT A\n20 END\nLET A=7\nPRINT A\nRUN\n");
    assert_eq!(exec(&mut r), "7\n0\n");
}

#[test]
fn test_if_true_and_false() {
    let mut r = runtime("IF 1<2 THEN PRINT \"yes\"\nIF 2<1 THEN PRINT \"no\"\n");
    assert_eq!(exec(&mut r), "yes\n");
}

#[test]
fn test_if_nested_consequent() {
    let mut r = runtime("10 LET A=RND(10)\n20 IF A>=0 THEN IF A<10 THEN PRINT \"OK\"\n30 END\nRUN\n");
    assert_eq!(exec(&mut r), "OK\n");
}

#[test]
fn test_print_separators() {
    let mut r = runtime("PRINT 1,2;3\nPRINT\nPRINT 9;\nPRINT 8\n");
    assert_eq!(exec(&mut r), "1\t23\n\n98\n");
}

#[test]
fn test_dim_and_wrapped_subscripts() {
    let mut r = runtime("10 DIM @(5)\n20 LET @(7)=3\n30 PRINT @(2),@(0-3)\n40 END\nRUN\n");
    assert_eq!(exec(&mut r), "3\t3\n");
}

#[test]
fn test_negative_dim_aborts() {
    let mut r = runtime("10 DIM @(0-1)\nRUN\n");
    assert_eq!(
        exec(&mut r),
        "ILLEGAL FUNCTION CALL IN 10; NEGATIVE ARRAY SIZE\nPROGRAM TERMINATED\n"
    );
}

#[test]
fn test_dim_discards_old_contents() {
    let mut r = runtime("LET @(0)=7\nDIM @(4)\nPRINT @(0)\n");
    assert_eq!(exec(&mut r), "0\n");
}

#[test]
fn test_clear_wipes_everything() {
    let mut r = runtime("10 PRINT 1\nLET A=5\nCLEAR\nLIST\nPRINT A\nRUN\n");
    assert_eq!(exec(&mut r), "0\nNO PROGRAM\n");
}

#[test]
fn test_delete_and_replace_lines() {
    let mut r = runtime("10 PRINT 1\n20 END\n10 PRINT 2\n30 END\n20\nLIST\n");
    assert_eq!(exec(&mut r), "10 PRINT 2\n30 END\n");
}

#[test]
fn test_list_ranges() {
    let mut r = runtime("10 END\n20 END\n30 END\nLIST 20\nLIST 20,30\n");
    assert_eq!(exec(&mut r), "20 END\n20 END\n30 END\n");
}

#[test]
fn test_syntax_error_is_reported_not_stored() {
    let mut r = runtime("10 PRINTT 1\nLIST\n");
    assert_eq!(exec(&mut r), "SYNTAX ERROR; 10 PRINTT 1\n");
}

#[test]
fn test_rem_and_blank_lines() {
    let mut r = runtime("10 REM says nothing\n\n   \n20 END\nRUN\nLIST\n");
    assert_eq!(exec(&mut r), "10 REM says nothing\n20 END\n");
}

#[test]
fn test_tron_traces_line_numbers() {
    let mut r = runtime("10 PRINT 1\n20 END\nTRON\nRUN\nTROFF\nRUN\n");
    assert_eq!(exec(&mut r), "[10]\n1\n[20]\n1\n");
}

#[test]
fn test_running_off_the_end_aborts() {
    let mut r = runtime("10 LET A=1\nRUN\n");
    assert_eq!(
        exec(&mut r),
        "END OF PROGRAM WITHOUT END IN 10\nPROGRAM TERMINATED\n"
    );
}

#[test]
fn test_bye_ends_the_session() {
    let mut r = runtime("BYE\nPRINT 1\n");
    assert_eq!(exec(&mut r), "");
    assert!(r.io().bye_called);
}

#[test]
fn test_help_mentions_statements() {
    let mut r = runtime("HELP\n");
    let output = exec(&mut r);
    assert!(output.contains("statements:"));
    assert!(output.contains("GOSUB"));
}

#[test]
fn test_save_load_round_trip() {
    let mut r = runtime("10 PRINT \"HI\"\n20 END\nSAVE \"demo\"\nCLEAR\nLOAD \"demo\"\nLIST\nRUN\n");
    assert_eq!(
        exec(&mut r),
        "10 PRINT \"HI\"\n20 END\nHI\n"
    );
    assert_eq!(r.io().files.get("demo").unwrap(), "10 PRINT \"HI\"\n20 END\n");
}

#[test]
fn test_load_missing_file() {
    let mut r = runtime("LOAD \"nope\"\n");
    assert_eq!(exec(&mut r), "FILE NOT FOUND; nope\n");
}

#[test]
fn test_files_lists_saved_names() {
    let mut r = runtime("10 END\nSAVE \"b\"\nSAVE \"a\"\nFILES\n");
    assert_eq!(exec(&mut r), "a\nb\n");
}

#[test]
fn test_clipboard_round_trip() {
    let mut r = runtime("10 PRINT 5\n20 END\nCLIPSAVE\nCLEAR\nCLIPLOAD\nRUN\n");
    assert_eq!(exec(&mut r), "5\n");
}

#[test]
fn test_clipload_with_empty_clipboard() {
    let mut r = runtime("CLIPLOAD\n");
    assert_eq!(exec(&mut r), "CLIPBOARD ERROR; NO TEXT ON THE CLIPBOARD\n");
}

#[test]
fn test_break_reports_interrupted_line() {
    let mut r = interactive_runtime("10 INPUT A\nRUN\n");
    let output = exec(&mut r);
    assert!(output.ends_with("? "), "{:?}", output);
    r.break_execution();
    r.io_mut().push_text("PRINT 9\n");
    assert_eq!(exec(&mut r), "? BREAK IN 10\n9\n");
}

#[test]
fn test_run_until_end_of_input_drives_playback() {
    let mut r = runtime("10 PRINT 1\n20 END\nRUN\n");
    r.run_until_end_of_input();
    assert_eq!(r.io().output, "1\n");
}

#[test]
fn test_break_outside_a_run_is_ignored() {
    let mut r = interactive_runtime("");
    exec(&mut r);
    r.break_execution();
    r.io_mut().push_text("PRINT 1\n");
    assert_eq!(exec(&mut r), "1\n");
}
