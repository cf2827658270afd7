mod common;
use common::*;

#[test]
fn test_run_prints_and_ends() {
    let mut b = Basic::new();
    b.enter(r#"10 PRINT "HI""#);
    assert_eq!(exec(&mut b), "");
    b.enter("RUN");
    assert_eq!(exec(&mut b), "HI\nOK\n");
}

#[test]
fn test_list() {
    let mut b = Basic::new();
    b.program(&[r#"10 PRINT "HI""#]);
    b.enter("LIST");
    assert_eq!(exec(&mut b), "10 PRINT \"HI\"\nOK\n");
}

#[test]
fn test_list_ranges() {
    let mut b = Basic::new();
    b.program(&["30 PRINT 3", "10 PRINT 1", "20 PRINT 2"]);
    b.enter("LIST 20");
    assert_eq!(exec(&mut b), "20 PRINT 2\nOK\n");
    b.enter("LIST 20-");
    assert_eq!(exec(&mut b), "20 PRINT 2\n30 PRINT 3\nOK\n");
    b.enter("LIST -20");
    assert_eq!(exec(&mut b), "10 PRINT 1\n20 PRINT 2\nOK\n");
    b.enter("LIST 10-20");
    assert_eq!(exec(&mut b), "10 PRINT 1\n20 PRINT 2\nOK\n");
    b.enter("LIST 30-10");
    assert_eq!(exec(&mut b), "OK\n");
}

#[test]
fn test_replace_and_delete_lines() {
    let mut b = Basic::new();
    b.program(&["10 PRINT 1", "20 PRINT 2", "10 PRINT 9"]);
    b.enter("LIST");
    assert_eq!(exec(&mut b), "10 PRINT 9\n20 PRINT 2\nOK\n");
    b.enter("10");
    b.enter("LIST");
    assert_eq!(exec(&mut b), "20 PRINT 2\nOK\n");
}

#[test]
fn test_new_clears_program() {
    let mut b = Basic::new();
    b.program(&["10 PRINT 1", "A=5"]);
    b.enter("NEW");
    assert_eq!(exec(&mut b), "OK\n");
    b.enter("LIST");
    assert_eq!(exec(&mut b), "OK\n");
    b.enter("PRINT A");
    assert_eq!(exec(&mut b), "0\n");
}

#[test]
fn test_for_loop() {
    let mut b = Basic::new();
    b.program(&["10 FOR I=1 TO 3", "20 PRINT I", "30 NEXT I"]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "1\n2\n3\nOK\n");
}

#[test]
fn test_for_loop_always_runs_once() {
    let mut b = Basic::new();
    b.program(&["10 FOR I=3 TO 0", "20 PRINT I", "30 NEXT I", "40 PRINT I"]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "3\n4\nOK\n");
}

#[test]
fn test_nested_for_loops() {
    let mut b = Basic::new();
    b.program(&[
        "10 FOR I=1 TO 2",
        "20 FOR J=1 TO 2",
        "30 PRINT I*10+J",
        "40 NEXT J",
        "50 NEXT I",
    ]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "11\n12\n21\n22\nOK\n");
}

#[test]
fn test_bare_next() {
    let mut b = Basic::new();
    b.program(&["10 FOR I=1 TO 2", "20 PRINT I", "30 NEXT"]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "1\n2\nOK\n");
}

#[test]
fn test_for_same_variable_replaces_frame() {
    let mut b = Basic::new();
    b.program(&[
        "10 FOR I=1 TO 2",
        "20 PRINT I",
        "30 FOR I=5 TO 6",
        "40 PRINT I",
        "50 NEXT I",
        "60 NEXT I",
    ]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "1\n5\n6\n?NEXT WITHOUT FOR IN 60\nOK\n");
}

#[test]
fn test_breaking_out_of_for_loop_with_goto() {
    let mut b = Basic::new();
    b.program(&[
        "10 FOR Y=1 TO 2",
        "20 FOR X=8 TO 9",
        "30 PRINT Y;X",
        "40 GOTO 60",
        "50 NEXT X",
        "60 NEXT Y",
    ]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "18\n28\nOK\n");
}

#[test]
fn test_next_without_for() {
    let mut b = Basic::new();
    b.program(&["10 NEXT I", "20 PRINT 1"]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "?NEXT WITHOUT FOR IN 10\nOK\n");
}

#[test]
fn test_gosub_nesting() {
    let mut b = Basic::new();
    b.program(&[
        "10 GOSUB 100",
        r#"20 PRINT "DONE""#,
        "30 END",
        r#"100 PRINT "A""#,
        "110 GOSUB 200",
        "120 RETURN",
        r#"200 PRINT "B""#,
        "210 RETURN",
    ]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "A\nB\nDONE\nOK\n");
}

#[test]
fn test_return_without_gosub() {
    let mut b = Basic::new();
    b.program(&["10 RETURN", "20 PRINT 1"]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "?RETURN WITHOUT GOSUB IN 10\nOK\n");
}

#[test]
fn test_direct_gosub_returns_to_prompt() {
    let mut b = Basic::new();
    b.program(&[r#"100 PRINT "SUB""#, "110 RETURN", r#"120 PRINT "NO""#]);
    b.enter("GOSUB 100");
    assert_eq!(exec(&mut b), "SUB\nOK\n");
    assert!(!b.runtime.is_running());
}

#[test]
fn test_goto_undefined_line() {
    let mut b = Basic::new();
    b.program(&["10 GOTO 999", r#"20 PRINT "NO""#]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "?UNDEFINED LINE IN 10\nOK\n");
}

#[test]
fn test_goto_skips_lines() {
    let mut b = Basic::new();
    b.program(&["10 GOTO 30", "20 PRINT 2", "30 PRINT 3"]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "3\nOK\n");
}

#[test]
fn test_direct_goto_keeps_variables() {
    let mut b = Basic::new();
    b.program(&["10 PRINT A"]);
    b.enter("A=7");
    b.enter("GOTO 10");
    assert_eq!(exec(&mut b), "7\nOK\n");
    b.enter("RUN");
    assert_eq!(exec(&mut b), "0\nOK\n");
}

#[test]
fn test_run_from_line() {
    let mut b = Basic::new();
    b.program(&["10 PRINT 1", "20 PRINT 2"]);
    b.enter("RUN 20");
    assert_eq!(exec(&mut b), "2\nOK\n");
    b.enter("RUN 15");
    assert_eq!(exec(&mut b), "?UNDEFINED LINE\n");
}

#[test]
fn test_end_stops_program() {
    let mut b = Basic::new();
    b.program(&["10 PRINT 1", "20 END", "30 PRINT 2"]);
    b.enter("RUN");
    assert_eq!(exec(&mut b), "1\nOK\n");
}

#[test]
fn test_run_empty_program() {
    let mut b = Basic::new();
    b.enter("RUN");
    assert_eq!(exec(&mut b), "OK\n");
}

#[test]
fn test_print_separators() {
    let mut b = Basic::new();
    b.enter("PRINT 1,2;3");
    assert_eq!(exec(&mut b), "1 23\n");
    b.enter(r#"PRINT "A";"#);
    assert_eq!(exec(&mut b), "A");
    b.enter("PRINT");
    assert_eq!(exec(&mut b), "\n");
    b.enter(r#"PRINT "X=";2+3"#);
    assert_eq!(exec(&mut b), "X=5\n");
}

#[test]
fn test_let_forms() {
    let mut b = Basic::new();
    b.enter("LET A=5");
    b.enter("B = A*2");
    b.enter(r#"N$="TEXT""#);
    b.enter("PRINT A;B;N$");
    assert_eq!(exec(&mut b), "510TEXT\n");
    b.enter("C 5");
    assert_eq!(exec(&mut b), "?SYNTAX ERROR; EXPECTED =\n");
}

#[test]
fn test_illegal_direct() {
    let mut b = Basic::new();
    b.enter("FOR I=1 TO 2");
    assert_eq!(exec(&mut b), "?ILLEGAL DIRECT\n");
    b.enter("NEXT I");
    assert_eq!(exec(&mut b), "?ILLEGAL DIRECT\n");
}

#[test]
fn test_commands_not_allowed_in_program() {
    let mut b = Basic::new();
    b.program(&["10 LIST", "20 PRINT 1"]);
    b.enter("RUN");
    assert_eq!(
        exec(&mut b),
        "?SYNTAX ERROR IN 10; COMMAND NOT ALLOWED IN PROGRAM\nOK\n"
    );
}

#[test]
fn test_invalid_line_number() {
    let mut b = Basic::new();
    b.enter("70000 PRINT 1");
    assert_eq!(exec(&mut b), "?OVERFLOW; INVALID LINE NUMBER\n");
    b.enter("LIST");
    assert_eq!(exec(&mut b), "OK\n");
}

#[test]
fn test_interrupt() {
    let mut b = Basic::new();
    b.program(&["10 GOTO 10"]);
    b.enter("RUN");
    let s = exec_n(&mut b, 10);
    assert!(s.ends_with("Execution cycles exceeded.\n"));
    b.runtime.interrupt();
    assert_eq!(exec(&mut b), "BREAK IN 10\nOK\n");
    assert!(!b.runtime.is_running());
}

#[test]
fn test_infinite_loop_yields() {
    let mut b = Basic::new();
    b.program(&["10 A=A+1", "20 GOTO 10"]);
    b.enter("RUN");
    assert_eq!(
        b.runtime.execute(100, &mut b.io),
        altair::mach::Event::Running
    );
    assert_eq!(b.runtime.var().fetch("A").number(), Ok(50.0));
}

#[test]
fn test_print_text_before_expression() {
    let mut b = Basic::new();
    b.enter("X=5");
    b.enter(r#"PRINT "X=" X"#);
    assert_eq!(exec(&mut b), "X=5\n");
    b.enter(r#"PRINT "A" "B""#);
    assert_eq!(exec(&mut b), "AB\n");
    b.enter(r#"PRINT "A" "B" X*2, "C""#);
    assert_eq!(exec(&mut b), "AB10 C\n");
}
