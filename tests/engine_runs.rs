//! End-to-end runs through the engine with an in-memory vocabulary

use phrasal_core::{
    Carrier, CarrierComponentType, Engine, MemoryVocabulary, Messages, Node, Program, Query,
};

const VOCABULARY: &str = r#"
    [[tables]]
    name = "noun"
    subtypes = ["singular", "plural"]

    [[tables.entries]]
    terms = ["fox", "foxes"]
    classes = ["animal"]

    [[tables.entries]]
    terms = ["owl", "owls"]
    classes = ["animal", "bird"]

    [[tables.entries]]
    terms = ["lamp", "lamps"]
    classes = ["object"]

    [[tables]]
    name = "verb"

    [[tables.entries]]
    terms = ["give|up"]
"#;

fn engine() -> Engine {
    Engine::new(Messages::default())
        .with_vocabulary(MemoryVocabulary::from_toml_str(VOCABULARY).unwrap())
}

fn program() -> Program {
    let carrier = Carrier::new().with(CarrierComponentType::Match, "hero");
    Program::new(Node::sequence(vec![
        Node::text("The "),
        Node::query(Query::new("noun").with_carrier(carrier.clone())),
        Node::text(" met two "),
        Node::query(Query::new("noun").with_subtype("plural").with_carrier(carrier)),
        Node::text("."),
    ]))
}

#[test]
fn test_match_carrier_links_queries_in_one_run() {
    let output = engine().run(&program(), Some(3)).as_string();
    let singular = output
        .strip_prefix("The ")
        .and_then(|rest| rest.split(' ').next())
        .unwrap()
        .to_string();
    let plural = if singular == "fox" { "foxes".to_string() } else { format!("{singular}s") };
    assert_eq!(output, format!("The {singular} met two {plural}."));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let engine = engine();
    let program = program();
    let a = engine.run(&program, Some(11));
    let b = engine.run(&program, Some(11));
    assert_eq!(a, b);
}

#[test]
fn test_split_term_wraps_complement() {
    let program = Program::new(Node::query(
        Query::new("verb").with_complement(Node::text("it")),
    ));
    assert_eq!(engine().run(&program, None).as_string(), "give it up");
}

#[test]
fn test_unique_carrier_exhausts_then_no_match() {
    let carrier = Carrier::new().with(CarrierComponentType::Unique, "u");
    let query = || Node::query(Query::new("noun").with_carrier(carrier.clone()));
    let program = Program::new(Node::sequence(vec![
        query(),
        Node::text(","),
        query(),
        Node::text(","),
        query(),
        Node::text(","),
        query(),
    ]));
    let output = engine().run(&program, Some(5)).as_string();
    let words: Vec<&str> = output.split(',').collect();
    assert_eq!(words.len(), 4);
    assert_eq!(words[3], "[No Match]");
    let mut seen = words[..3].to_vec();
    seen.sort_unstable();
    assert_eq!(seen, ["fox", "lamp", "owl"]);
}

#[test]
fn test_erase_lets_unique_scope_start_over() {
    let carrier = Carrier::new().with(CarrierComponentType::Unique, "u");
    let query = || Node::query(Query::new("noun").with_carrier(carrier.clone()));
    let mut children = Vec::new();
    for _ in 0..3 {
        children.push(query());
    }
    children.push(Node::query(Query::erase(carrier.clone())));
    children.push(query());
    let output = engine().run(&Program::new(Node::sequence(children)), Some(8));
    assert!(!output.as_string().contains("[No Match]"));
}

#[test]
fn test_runs_do_not_share_carrier_state() {
    let engine = engine();
    let carrier = Carrier::new().with(CarrierComponentType::Unique, "u");
    let program = Program::new(Node::query(Query::new("noun").with_carrier(carrier)));
    for seed in 0..10 {
        assert_ne!(engine.run(&program, Some(seed)).as_string(), "[No Match]");
    }
}

#[test]
fn test_concurrent_runs_share_program_and_engine() {
    let engine = engine();
    let program = program();
    let expected: Vec<String> = (0..8)
        .map(|seed| engine.run(&program, Some(seed)).as_string())
        .collect();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|seed| {
                let engine = &engine;
                let program = &program;
                scope.spawn(move || engine.run(program, Some(seed)).as_string())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outputs, expected);
}

#[test]
fn test_compiled_program_runs_like_source_tree() {
    let engine = engine();
    let program = program();
    let loaded = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();
    assert_eq!(
        engine.run(&loaded, Some(21)).as_string(),
        engine.run(&program, Some(21)).as_string()
    );
}
