//! Tests for the carrier erase form of queries

use super::helpers::{context_with, run_units, state_with, ScriptedVocabulary};
use crate::interpreter::Node;
use crate::vocabulary::{Carrier, CarrierComponentType, Query, Term};

#[test]
fn test_erase_removes_exactly_named_components() {
    let state = state_with(&[
        (CarrierComponentType::Match, "x"),
        (CarrierComponentType::Rhyme, "y"),
        (CarrierComponentType::Match, "y"),
        (CarrierComponentType::Unique, "z"),
    ]);
    let vocab = ScriptedVocabulary::answering(Some(Term::whole("unused")));
    let mut ctx = context_with(vocab.clone()).with_carrier_state(state);

    let carrier = Carrier::new()
        .with(CarrierComponentType::Match, "x")
        .with(CarrierComponentType::Rhyme, "y");
    let out = run_units(&Node::query(Query::erase(carrier)), &mut ctx);

    assert!(out.is_empty());
    assert!(ctx.output().is_empty());
    let state = ctx.carrier_state();
    assert!(!state.contains(CarrierComponentType::Match, "x"));
    assert!(!state.contains(CarrierComponentType::Rhyme, "y"));
    assert!(state.contains(CarrierComponentType::Match, "y"));
    assert!(state.contains(CarrierComponentType::Unique, "z"));
    assert_eq!(state.len(), 2);
    assert_eq!(vocab.calls(), 0);
}

#[test]
fn test_erase_of_absent_entries_is_silent() {
    let vocab = ScriptedVocabulary::answering(None);
    let mut ctx = context_with(vocab);
    let carrier = Carrier::new().with(CarrierComponentType::Unique, "never-set");
    let out = run_units(&Node::query(Query::erase(carrier)), &mut ctx);
    assert!(out.is_empty());
    assert!(ctx.carrier_state().is_empty());
}

#[test]
fn test_erase_ignores_complement() {
    let vocab = ScriptedVocabulary::answering(Some(Term::whole("w")));
    let mut ctx = context_with(vocab);
    let carrier = Carrier::new().with(CarrierComponentType::Match, "m");
    let node = Node::query(Query::erase(carrier).with_complement(Node::text("never")));
    assert!(run_units(&node, &mut ctx).is_empty());
}

#[test]
fn test_erase_releases_constraint_for_later_queries() {
    let vocab = ScriptedVocabulary::answering(Some(Term::whole("w")));
    let mut ctx = context_with(vocab);
    let carrier = Carrier::new().with(CarrierComponentType::Match, "m");
    let program = Node::sequence(vec![
        Node::query(Query::new("noun").with_carrier(carrier.clone())),
        Node::query(Query::erase(carrier)),
    ]);

    run_units(&program, &mut ctx);

    assert_eq!(ctx.output().as_string(), "w");
    assert!(ctx.carrier_state().is_empty());
}
