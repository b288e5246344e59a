//! Invariant 8: the store returns to its prior size once temporary nodes
//! are dropped (spec §8).

use recli_core::grammar::{concat, keyword, live_count, merge};

#[test]
fn dropping_a_merged_grammar_frees_its_nodes() {
    let before = live_count();

    {
        let a = concat(keyword("show", false, false).unwrap(), keyword("route", false, false).unwrap());
        let b = concat(keyword("show", false, false).unwrap(), keyword("interface", false, false).unwrap());
        let merged = merge(&a, &b).unwrap();
        assert!(live_count() > before);
        drop(merged);
        drop(a);
        drop(b);
    }

    assert_eq!(live_count(), before);
}

#[test]
fn identical_keywords_share_one_node() {
    let before = live_count();
    let a = keyword("configure", false, false).unwrap();
    let b = keyword("configure", false, false).unwrap();
    assert_eq!(a, b);
    assert_eq!(live_count(), before + 1);
}
