use agm::{
    belief::store::{BeliefStore, Contraction, Expansion, Repair, Revision},
    config::{Config, ExpansionPolicy, Priority},
    error::LimitExceeded,
    explanation::{DiscardedExplanation, Explanation},
};

fn store_with(policy: ExpansionPolicy, beliefs: &[(&str, Priority)]) -> BeliefStore {
    let mut store = BeliefStore::with_config(Config::default().with_expansion(policy));

    for &(formula, priority) in beliefs {
        store
            .expand(formula, priority, &mut DiscardedExplanation)
            .unwrap();
    }

    store
}

fn entails(store: &BeliefStore, query: &str) -> bool {
    store.entails(query, &mut DiscardedExplanation).unwrap()
}

#[test]
fn entailment() {
    let store = store_with(ExpansionPolicy::Guarded, &[("A", 0), ("A => B", 0)]);

    let test_cases = [
        ("B", true),
        ("C", false),
        ("A", true),
        ("A & B", true),
        ("~B", false),
        ("B | C", true),
        ("False", false),
    ];

    for (query, expected) in test_cases {
        assert_eq!(entails(&store, query), expected, "entails({query:?})");
    }
}

#[test]
fn beliefs_are_ordered_by_priority_then_insertion() {
    let store = store_with(
        ExpansionPolicy::Guarded,
        &[("C", 0), ("A", 2), ("B", 2), ("D", 1), ("E", 0)],
    );

    assert_eq!(store.formulas(), vec!["A", "B", "D", "C", "E"]);
}

#[test]
fn formulas_are_stored_normalized() {
    let mut store = store_with(ExpansionPolicy::Guarded, &[("A -> B", 0)]);

    assert_eq!(store.formulas(), vec!["A=>B"]);
    assert!(store.base().contains("A => B"));
    assert_eq!(
        store.expand("A=>B", 3, &mut DiscardedExplanation),
        Ok(Expansion::AlreadyPresent)
    );
    assert_eq!(store.base().get("A=>B").map(|belief| belief.priority()), Some(0));
}

#[test]
fn guarded_expansion() {
    let mut store = store_with(ExpansionPolicy::Guarded, &[("A", 0), ("A => B", 0)]);

    let test_cases = [
        ("C", Expansion::Added),
        ("C", Expansion::AlreadyPresent),
        ("~B", Expansion::Rejected),
        ("~A", Expansion::Rejected),
        ("A | D", Expansion::Added),
    ];

    for (formula, expected) in test_cases {
        assert_eq!(
            store.expand_default(formula, &mut DiscardedExplanation),
            Ok(expected),
            "expand({formula:?})"
        );
    }

    assert_eq!(store.formulas(), vec!["A", "A=>B", "C", "A|D"]);
    assert!(store.is_consistent(&mut DiscardedExplanation).unwrap());
}

#[test]
fn guarded_expansion_is_idempotent() {
    let test_cases = ["A", "B|C", "~D", "A<=>E"];

    for formula in test_cases {
        let mut store = store_with(ExpansionPolicy::Guarded, &[("A", 1), ("B => C", 0)]);

        store.expand_default(formula, &mut DiscardedExplanation).unwrap();
        let once = store.formulas().join(", ");

        store.expand_default(formula, &mut DiscardedExplanation).unwrap();
        let twice = store.formulas().join(", ");

        assert_eq!(once, twice, "expanding twice by {formula:?}");
    }
}

#[test]
fn permissive_expansion_flags_inconsistency() {
    let mut store = store_with(ExpansionPolicy::Permissive, &[("A", 0)]);

    assert_eq!(
        store.expand_default("~A", &mut DiscardedExplanation),
        Ok(Expansion::AddedInconsistent)
    );
    assert_eq!(store.formulas(), vec!["A", "~A"]);
    assert!(!store.is_consistent(&mut DiscardedExplanation).unwrap());
    assert!(entails(&store, "Z"));
}

#[test]
fn removing_a_belief() {
    let mut store = store_with(ExpansionPolicy::Guarded, &[("A", 0), ("B", 0)]);

    let removed = store.remove_belief("A").map(|belief| belief.formula().to_owned());
    assert_eq!(removed, Some("A".to_owned()));
    assert_eq!(store.remove_belief("A"), None);
    assert_eq!(store.formulas(), vec!["B"]);
}

#[test]
fn contraction_withdraws_the_least_entrenched_belief() {
    let mut store = store_with(ExpansionPolicy::Guarded, &[("A", 1), ("A => B", 0)]);
    assert!(entails(&store, "B"));

    match store.contract("B", &mut DiscardedExplanation).unwrap() {
        Contraction::Withdrew(belief) => assert_eq!(belief.formula(), "A=>B"),
        outcome => panic!("unexpected contraction outcome {outcome:?}"),
    }

    assert_eq!(store.formulas(), vec!["A"]);
    assert!(!entails(&store, "B"));
}

#[test]
fn contraction_prefers_earlier_beliefs_on_ties() {
    let mut store = store_with(ExpansionPolicy::Guarded, &[("A", 0), ("A => B", 0)]);

    match store.contract("B", &mut DiscardedExplanation).unwrap() {
        Contraction::Withdrew(belief) => assert_eq!(belief.formula(), "A"),
        outcome => panic!("unexpected contraction outcome {outcome:?}"),
    }
}

#[test]
fn contraction_outcomes() {
    let test_cases: [(&[(&str, Priority)], &str, Option<&str>); 4] = [
        (&[("A", 0)], "B", None),
        (&[("A", 0), ("B", 1)], "A & B", Some("A")),
        (&[("A", 2), ("A => B", 1), ("B => C", 0)], "C", Some("B=>C")),
        (&[("A", 0), ("~~A", 0)], "A", None),
    ];

    for (beliefs, formula, withdrawn) in test_cases {
        let mut store = store_with(ExpansionPolicy::Guarded, beliefs);
        let before = store.len();

        let outcome = store.contract(formula, &mut DiscardedExplanation).unwrap();
        assert!(store.len() <= before, "contract({formula:?}) grew the base");

        match (outcome, withdrawn) {
            (Contraction::Withdrew(belief), Some(expected)) => {
                assert_eq!(belief.formula(), expected, "contract({formula:?})");
                assert!(!entails(&store, formula), "contract({formula:?})");
            }
            (Contraction::NotEntailed, None) => assert!(!entails(&store, formula)),
            (Contraction::Exhausted, None) => {
                assert!(entails(&store, formula));
                assert_eq!(store.len(), before);
            }
            (outcome, _) => panic!("unexpected outcome {outcome:?} for contract({formula:?})"),
        }
    }
}

#[test]
fn revision_scenario() {
    let mut store = store_with(ExpansionPolicy::Guarded, &[("A", 1), ("A => B", 0)]);
    assert!(entails(&store, "B"));

    store.contract("B", &mut DiscardedExplanation).unwrap();
    assert!(!entails(&store, "B"));

    assert_eq!(
        store.revise_default("~B", &mut DiscardedExplanation),
        Ok(Revision {
            contraction: Contraction::NotEntailed,
            expansion: Expansion::Added,
        })
    );
    assert!(entails(&store, "~B"));

    let revision = store.revise_default("B", &mut DiscardedExplanation).unwrap();
    match revision.contraction {
        Contraction::Withdrew(belief) => assert_eq!(belief.formula(), "~B"),
        outcome => panic!("unexpected contraction outcome {outcome:?}"),
    }
    assert_eq!(revision.expansion, Expansion::Added);
    assert!(entails(&store, "B"));
    assert_eq!(store.formulas(), vec!["A", "B"]);
}

#[test]
fn permissive_expansion_restores_entailment() {
    let mut store = store_with(ExpansionPolicy::Permissive, &[("A", 1), ("A => B", 0)]);

    store.contract("B", &mut DiscardedExplanation).unwrap();
    store.revise_default("~B", &mut DiscardedExplanation).unwrap();

    assert_eq!(
        store.expand_default("B", &mut DiscardedExplanation),
        Ok(Expansion::AddedInconsistent)
    );
    assert!(entails(&store, "B"));
}

#[test]
fn revision_makes_the_formula_entailed() {
    let test_cases: [(&[(&str, Priority)], &str); 4] = [
        (&[("A", 0), ("A => B", 1)], "~B"),
        (&[("A", 1), ("B", 0)], "~B"),
        (&[("A | B", 0), ("~A", 1)], "~B"),
        (&[("C", 0)], "C => D"),
    ];

    for (beliefs, formula) in test_cases {
        let mut store = store_with(ExpansionPolicy::Guarded, beliefs);

        let revision = store.revise_default(formula, &mut DiscardedExplanation).unwrap();
        assert!(revision.expansion.is_added(), "revise({formula:?}): {revision:?}");
        assert!(entails(&store, formula), "revise({formula:?})");
        assert!(store.is_consistent(&mut DiscardedExplanation).unwrap());
    }
}

#[test]
fn auto_fix() {
    let mut store = store_with(ExpansionPolicy::Permissive, &[("A", 0), ("~A", 0), ("B", 1)]);
    assert!(!store.is_consistent(&mut DiscardedExplanation).unwrap());

    match store.auto_fix(&mut DiscardedExplanation).unwrap() {
        Repair::Repaired(removed) => {
            let removed = removed.iter().map(|belief| belief.formula()).collect::<Vec<_>>();
            assert_eq!(removed, vec!["A"]);
        }
        outcome => panic!("unexpected repair outcome {outcome:?}"),
    }

    assert_eq!(store.formulas(), vec!["B", "~A"]);
    assert!(store.is_consistent(&mut DiscardedExplanation).unwrap());

    assert_eq!(
        store.auto_fix(&mut DiscardedExplanation),
        Ok(Repair::AlreadyConsistent)
    );
}

#[test]
fn auto_fix_reports_failure() {
    let mut store = store_with(
        ExpansionPolicy::Permissive,
        &[("A", 0), ("~A", 0), ("B", 0), ("~B", 0)],
    );

    assert_eq!(
        store.auto_fix(&mut DiscardedExplanation),
        Ok(Repair::Failed { removed: vec![] })
    );
    assert_eq!(store.len(), 4);
}

#[test]
fn resolution_limit() {
    let config = Config::default().with_resolution_limit(Some(1));
    let mut store = BeliefStore::with_config(config);
    store.expand_default("A | B", &mut DiscardedExplanation).unwrap();

    assert_eq!(
        store.entails("B", &mut DiscardedExplanation),
        Err(LimitExceeded::Resolution { limit: 1 })
    );
}

#[test]
fn entailment_is_explained() {
    let store = store_with(ExpansionPolicy::Guarded, &[("A", 0), ("A => B", 0)]);
    let mut explanation = Explanation::new("entails");

    assert_eq!(store.entails("B", &mut explanation), Ok(true));

    let steps = explanation.steps();
    assert!(steps.iter().any(|step| step.contains("Round 1")), "{explanation}");
    assert!(steps.iter().any(|step| step.ends_with(" is entailed")), "{explanation}");
}
