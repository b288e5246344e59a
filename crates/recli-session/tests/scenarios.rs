//! End-to-end session scenarios combining the grammar-text parser with the
//! session state machine (spec §8 S3, S4).

use recli_core::permission::Rule;
use recli_core::NoDatatypes;
use recli_parser::parse_file;
use recli_session::context::{Frame, Stack};
use recli_session::{ProcessOutcome, Session};

fn no_datatypes(_: &str) -> bool {
    false
}

fn session(grammar_text: &str, rules: Vec<Rule>) -> Session {
    let grammar = parse_file(grammar_text, &no_datatypes).unwrap();
    let frame = Frame::root(grammar, None, None, "recli> ".to_string());
    Session::new(Stack::new(frame), rules, "recli ...> ".to_string())
}

#[test]
fn s3_partial_command_pushes_then_completes() {
    let mut s = session("show interface ethernet\nshow interface wifi\n", vec![]);

    assert_eq!(s.process_line("show", &NoDatatypes), ProcessOutcome::Pushed);
    assert_eq!(s.stack.depth(), 1);

    assert_eq!(s.process_line("interface", &NoDatatypes), ProcessOutcome::Pushed);
    assert_eq!(s.stack.depth(), 2);

    match s.process_line("ethernet", &NoDatatypes) {
        ProcessOutcome::Ready { argv, .. } => {
            assert_eq!(argv, vec!["show".to_string(), "interface".to_string(), "ethernet".to_string()]);
        }
        other => panic!("expected Ready, got {other:?}"),
    }
}

#[test]
fn s4_permission_denies_a_fully_matched_command() {
    let rules = vec![Rule::new(false, vec!["configure".into(), "*".into()])];
    let mut s = session("configure terminal\nshow version\n", rules);

    assert_eq!(s.process_line("configure terminal", &NoDatatypes), ProcessOutcome::PermissionDenied);
    assert!(matches!(s.process_line("show version", &NoDatatypes), ProcessOutcome::Ready { .. }));
}

#[test]
fn end_builtin_pops_every_frame() {
    let mut s = session("show interface ethernet\n", vec![]);
    s.process_line("show", &NoDatatypes);
    s.process_line("interface", &NoDatatypes);
    assert_eq!(s.stack.depth(), 2);

    assert_eq!(s.process_line("end", &NoDatatypes), ProcessOutcome::AllFramesPopped);
    assert_eq!(s.stack.depth(), 0);
}

#[test]
fn help_builtin_is_recognized_without_dispatch() {
    let mut s = session("show interface\n", vec![]);
    assert_eq!(s.process_line("help show", &NoDatatypes), ProcessOutcome::Help(vec!["show".to_string()]));
}
