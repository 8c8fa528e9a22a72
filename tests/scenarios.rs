//! End-to-end proof searches over small knowledge bases.

use hornlog::{Clause, Engine, GrammarError};

fn lottery() -> Engine {
    Engine::new([
        "lucky(john)<-",
        "happy(*X)<-pass(*X,history)^win(*X,lottery)",
        "pass(*Y,*Z)<-study(*Y)",
        "pass(*W,*V)<-lucky(*W)",
        "win(*U,lottery)<-lucky(*U)",
    ])
    .unwrap()
}

fn resolvents(engine: &Engine, query: &str) -> Option<Vec<String>> {
    engine.proof(query).unwrap().map(|proof| {
        proof
            .iter()
            .map(|step| step.resolvent.to_string())
            .collect()
    })
}

#[test]
fn test_happy_john_is_proved() {
    let proof = lottery().proof("<-happy(john)").unwrap().unwrap();
    assert_eq!(proof.len(), 5);
    assert_eq!(
        proof.steps()[0].rule.to_string(),
        "happy(*X)<-pass(*X,history)^win(*X,lottery)"
    );
    assert_eq!(proof.conclusion().unwrap(), &"<-".parse::<Clause>().unwrap());
}

#[test]
fn test_rich_john_has_no_proof() {
    assert!(lottery().proof("<-rich(john)").unwrap().is_none());
}

#[test]
fn test_happy_jane_has_no_proof() {
    assert!(lottery().proof("<-happy(jane)").unwrap().is_none());
}

#[test]
fn test_query_variable_is_bound_by_fact() {
    assert_eq!(
        resolvents(&lottery(), "<-happy(*who)"),
        Some(vec![
            "<-pass(*who,history)^win(*who,lottery)".to_string(),
            "<-lucky(*who)^win(*who,lottery)".to_string(),
            "<-win(john,lottery)".to_string(),
            "<-lucky(john)".to_string(),
            "<-".to_string(),
        ])
    );
}

#[test]
fn test_conjunctive_query() {
    let proof = lottery()
        .proof("<- win(john, lottery) ^ lucky(john)")
        .unwrap()
        .unwrap();
    // the fact is declared first, so lucky(john) goes before win is expanded
    let rules: Vec<String> = proof.iter().map(|step| step.rule.to_string()).collect();
    assert_eq!(
        rules,
        vec!["lucky(john)<-", "win(*U,lottery)<-lucky(*U)", "lucky(john)<-"]
    );
}

#[test]
fn test_rule_chain() {
    let engine = Engine::new(["a(*x)<-b(*x)", "b(*y)<-c(*y)", "c(k)<-"]).unwrap();
    assert_eq!(
        resolvents(&engine, "<-a(k)"),
        Some(vec![
            "<-b(k)".to_string(),
            "<-c(k)".to_string(),
            "<-".to_string()
        ])
    );
    assert_eq!(resolvents(&engine, "<-a(j)"), None);
}

#[test]
fn test_search_backtracks_to_later_rules() {
    let engine = Engine::new([
        "reach(*x)<-road(*x)",
        "reach(*x)<-ferry(*x)",
        "ferry(island)<-",
    ])
    .unwrap();
    let proof = engine.proof("<-reach(island)").unwrap().unwrap();
    assert_eq!(proof.steps()[0].rule.to_string(), "reach(*x)<-ferry(*x)");
}

#[test]
fn test_first_successful_rule_wins() {
    let engine = Engine::new([
        "reach(*x)<-road(*x)",
        "reach(*x)<-ferry(*x)",
        "road(island)<-",
        "ferry(island)<-",
    ])
    .unwrap();
    let proof = engine.proof("<-reach(island)").unwrap().unwrap();
    assert_eq!(proof.steps()[0].rule.to_string(), "reach(*x)<-road(*x)");
    assert_eq!(proof.steps()[1].rule.to_string(), "road(island)<-");
}

#[test]
fn test_grammar_errors_surface() {
    assert!(matches!(
        Engine::new(["lucky(john)"]),
        Err(GrammarError::Clause { .. })
    ));
    assert!(matches!(
        lottery().proof("happy(john)<-"),
        Err(GrammarError::HeadedQuery { .. })
    ));
}

#[test]
fn test_proof_leaves_library_untouched() {
    let engine = lottery();
    let before: Vec<Clause> = engine.rules().to_vec();
    let _ = engine.proof("<-happy(john)").unwrap();
    let _ = engine.proof("<-happy(*who)").unwrap();
    assert_eq!(engine.rules(), before.as_slice());
}
