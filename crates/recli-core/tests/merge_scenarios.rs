//! End-to-end merge scenarios S1 and S2 (spec §8), expressed directly over
//! constructors since the grammar-text parser lives in `recli-parser`.

use recli_core::grammar::{concat, keyword, merge_all, print_grammar};

fn kw(name: &str) -> recli_core::grammar::Node {
    keyword(name, false, false).unwrap()
}

#[test]
fn s1_merge_with_factoring() {
    let line1 = concat(kw("show"), concat(kw("interface"), kw("ethernet")));
    let line2 = concat(kw("show"), concat(kw("interface"), kw("wifi")));

    let merged = merge_all([line1, line2]).unwrap();
    assert_eq!(print_grammar(&merged), "show interface (ethernet | wifi)");
}

#[test]
fn s2_optional_factoring() {
    let line1 = concat(kw("show"), kw("route"));
    let line2 = concat(kw("show"), concat(kw("route"), kw("detail")));

    let merged = merge_all([line1, line2]).unwrap();
    assert_eq!(print_grammar(&merged), "show route [detail]");
}
