//! Property-based tests for parsing and unification using proptest.

use hornlog::{Arg, Clause, Literal, Substitution};
use proptest::prelude::*;

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,5}"
}

/// Argument names come from a small pool so that variables collide often
fn arb_arg() -> impl Strategy<Value = Arg> {
    (any::<bool>(), "[a-d]").prop_map(|(universal, name)| {
        if universal {
            Arg::universal(name)
        } else {
            Arg::bound(name)
        }
    })
}

fn arb_literal() -> impl Strategy<Value = Literal> {
    (arb_name(), prop::collection::vec(arb_arg(), 1..5))
        .prop_map(|(name, args)| Literal::new(name, args).unwrap())
}

/// Two literals with the same name and arity
fn arb_compatible_pair() -> impl Strategy<Value = (Literal, Literal)> {
    (arb_name(), 1..5usize).prop_flat_map(|(name, arity)| {
        (
            prop::collection::vec(arb_arg(), arity),
            prop::collection::vec(arb_arg(), arity),
        )
            .prop_map(move |(left, right)| {
                (
                    Literal::new(name.clone(), left).unwrap(),
                    Literal::new(name.clone(), right).unwrap(),
                )
            })
    })
}

proptest! {
    #[test]
    fn canonical_text_round_trips(literal in arb_literal()) {
        let text = literal.to_string();
        let parsed: Literal = text.parse().unwrap();
        prop_assert_eq!(parsed.to_string(), text);
        prop_assert_eq!(parsed, literal);
    }

    #[test]
    fn whitespace_around_tokens_is_ignored(literal in arb_literal()) {
        let args: Vec<String> = literal.args().iter().map(ToString::to_string).collect();
        let spaced = format!("  {} (  {} ) ", literal.name(), args.join(" ,  "));
        let parsed: Literal = spaced.parse().unwrap();
        prop_assert_eq!(parsed, literal);
    }

    #[test]
    fn clause_text_round_trips(head in proptest::option::of(arb_literal()),
                               body in prop::collection::vec(arb_literal(), 0..4)) {
        let clause = Clause::new(head, body);
        let parsed: Clause = clause.to_string().parse().unwrap();
        prop_assert_eq!(parsed, clause);
    }

    #[test]
    fn unify_is_deterministic((pattern, instance) in arb_compatible_pair()) {
        let first = pattern.unify(&instance);
        for _ in 0..3 {
            prop_assert_eq!(pattern.unify(&instance), first.clone());
        }
    }

    #[test]
    fn literal_unifies_with_itself(literal in arb_literal()) {
        prop_assert!(literal.unify(&literal).is_some());
    }

    #[test]
    fn name_mismatch_never_unifies((pattern, instance) in arb_compatible_pair()) {
        let renamed = Literal::new(format!("{}_x", instance.name()), instance.args().to_vec()).unwrap();
        prop_assert!(pattern.unify(&renamed).is_none());
    }

    #[test]
    fn pattern_unifies_with_its_ground_instances(pattern in arb_literal()) {
        let grounding: Substitution = pattern
            .args()
            .iter()
            .filter(|arg| arg.is_universal())
            .map(|arg| (arg.clone(), Arg::bound("k")))
            .collect();
        let ground = pattern.substitute(&grounding);
        prop_assert!(ground.is_ground());

        let unifier = pattern.unify(&ground).unwrap();
        prop_assert!(unifier.instance.is_empty());
        prop_assert_eq!(pattern.substitute(&unifier.pattern), ground.clone());
        prop_assert!(ground.is_subsumed_by(&pattern));
    }
}
