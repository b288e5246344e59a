//! Scenario tests that exercise the grammar-text parser together with
//! `recli-core`'s matching (spec §8 S1, S2, S5).

use recli_core::grammar::{check, match_max, prefix_words, print_grammar, CheckVerdict};
use recli_core::NoDatatypes;
use recli_parser::parse_file;

fn no_datatypes(_: &str) -> bool {
    false
}

fn words(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn s1_merge_with_factoring() {
    let text = "show interface ethernet\nshow interface wifi\n";
    let g = parse_file(text, &no_datatypes).unwrap();
    assert_eq!(print_grammar(&g), "show interface (ethernet | wifi)");
}

#[test]
fn s2_optional_factoring() {
    let text = "show route\nshow route detail\n";
    let g = parse_file(text, &no_datatypes).unwrap();
    assert_eq!(print_grammar(&g), "show route [detail]");
}

#[test]
fn s5_completion() {
    let text = "show interface\nshow route\n";
    let g = parse_file(text, &no_datatypes).unwrap();

    let residual = match_max(&g, &words(&["show"]), &NoDatatypes);
    let completions = prefix_words(&residual, Some("i"), 10);
    assert_eq!(completions, vec!["interface".to_string()]);
}

#[test]
fn full_command_is_runnable() {
    let text = "show interface\n";
    let g = parse_file(text, &no_datatypes).unwrap();
    let argv = words(&["show", "interface"]);
    let (verdict, _) = check(&g, &argv, &NoDatatypes);
    assert_eq!(verdict, CheckVerdict::Matched(2));
}
