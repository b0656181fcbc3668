//! Tests for query resolution and complement placement

use super::helpers::{bare_context, context_with, run_units, state_with, ScriptedVocabulary};
use crate::interpreter::{Node, NO_MATCH};
use crate::localization::{Messages, MISSING_TABLE};
use crate::vocabulary::{Carrier, CarrierComponentType, Query, Term};

fn units(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_missing_vocabulary_prints_placeholder() {
    let mut ctx = bare_context();
    let out = run_units(&Node::query(Query::new("noun")), &mut ctx);
    let placeholder = Messages::default().get(MISSING_TABLE).to_string();
    assert_eq!(out, vec![placeholder]);
}

#[test]
fn test_missing_vocabulary_takes_precedence_over_erase() {
    let carrier = Carrier::new().with(CarrierComponentType::Match, "x");
    let state = state_with(&[(CarrierComponentType::Match, "x")]);
    let mut ctx = bare_context().with_carrier_state(state);

    let out = run_units(&Node::query(Query::erase(carrier)), &mut ctx);

    assert_eq!(out, vec![Messages::default().get(MISSING_TABLE).to_string()]);
    assert!(ctx.carrier_state().contains(CarrierComponentType::Match, "x"));
}

#[test]
fn test_missing_vocabulary_skips_complement() {
    let mut ctx = bare_context();
    let node = Node::query(Query::new("noun").with_complement(Node::text("never")));
    let out = run_units(&node, &mut ctx);
    assert_eq!(out.len(), 1);
    assert!(!out.contains(&"never".to_string()));
}

#[test]
fn test_no_match_prints_marker() {
    let vocab = ScriptedVocabulary::answering(None);
    let mut ctx = context_with(vocab.clone());
    let out = run_units(&Node::query(Query::new("noun")), &mut ctx);
    assert_eq!(ctx.output().as_string(), "[No Match]");
    assert_eq!(out, units(&[NO_MATCH]));
    assert_eq!(vocab.calls(), 1);
}

#[test]
fn test_no_match_skips_complement() {
    let vocab = ScriptedVocabulary::answering(None);
    let mut ctx = context_with(vocab);
    let node = Node::query(Query::new("noun").with_complement(Node::text("never")));
    assert_eq!(run_units(&node, &mut ctx), units(&[NO_MATCH]));
}

#[test]
fn test_whole_term_without_complement() {
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::whole("dog"))));
    assert_eq!(run_units(&Node::query(Query::new("noun")), &mut ctx), units(&["dog"]));
}

#[test]
fn test_whole_term_with_complement_follows_after_space() {
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::whole("run"))));
    let node = Node::query(Query::new("verb").with_complement(Node::text("fast")));
    assert_eq!(run_units(&node, &mut ctx), units(&["run", " ", "fast"]));
}

#[test]
fn test_split_mid_seam_with_complement() {
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::split("understand", 5))));
    let node = Node::query(Query::new("verb").with_complement(Node::text("really")));
    assert_eq!(
        run_units(&node, &mut ctx),
        units(&["under", " ", "really", " ", "stand"])
    );
}

#[test]
fn test_split_left_anchored_with_complement() {
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::split("go", 0))));
    let node = Node::query(Query::new("verb").with_complement(Node::text("please")));
    assert_eq!(run_units(&node, &mut ctx), units(&["please", " ", "go"]));
}

#[test]
fn test_split_right_anchored_with_complement() {
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::split("go", 2))));
    let node = Node::query(Query::new("verb").with_complement(Node::text("now")));
    assert_eq!(run_units(&node, &mut ctx), units(&["go", " ", "now"]));
}

#[test]
fn test_split_without_complement_renders_seam_as_space() {
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::split("ab", 1))));
    assert_eq!(
        run_units(&Node::query(Query::new("x")), &mut ctx),
        units(&["a", " ", "b"])
    );

    for (index, expected) in [(0, units(&["", " ", "ab"])), (2, units(&["ab", " ", ""]))] {
        let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::split("ab", index))));
        assert_eq!(run_units(&Node::query(Query::new("x")), &mut ctx), expected);
    }
}

#[test]
fn test_split_index_counts_chars() {
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::split("ümlaut", 1))));
    let node = Node::query(Query::new("x").with_complement(Node::text("-")));
    assert_eq!(run_units(&node, &mut ctx), units(&["ü", " ", "-", " ", "mlaut"]));
}

#[test]
fn test_complement_output_is_interleaved_in_place() {
    // The complement is itself a query with a complement; its output lands
    // inside the outer seam.
    let mut ctx = context_with(ScriptedVocabulary::answering(Some(Term::split("ab", 1))));
    let inner = Node::query(Query::new("x").with_complement(Node::text("c")));
    let node = Node::sequence(vec![
        Node::text("<"),
        Node::query(Query::new("x").with_complement(inner)),
        Node::text(">"),
    ]);
    run_units(&node, &mut ctx);
    assert_eq!(ctx.output().as_string(), "<a a c b b>");
}

#[test]
fn test_same_tree_runs_identically_twice() {
    let node = Node::query(Query::new("verb").with_complement(Node::text("really")));
    let vocab = ScriptedVocabulary::answering(Some(Term::split("understand", 5)));
    let mut first = context_with(vocab.clone());
    let mut second = context_with(vocab.clone());
    assert_eq!(run_units(&node, &mut first), run_units(&node, &mut second));
    assert_eq!(vocab.calls(), 2);
}
