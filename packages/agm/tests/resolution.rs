use agm::{
    error::LimitExceeded,
    explanation::DiscardedExplanation,
    propositional_logic::{
        normal_forms::{to_cnf, Clause, ConjunctiveNormalForm, Literal},
        parser::parse_proposition,
        solvers::{
            resolution::{resolution, resolve, ResolutionSolver},
            solve::{Solve, SolverResult},
            truth_table::TruthTableSolver,
        },
    },
};
use itertools::Itertools;

fn clause(literals: &[&str]) -> Clause {
    literals
        .iter()
        .map(|literal| match literal.strip_prefix('~') {
            Some(name) => Literal::negative(name),
            None => Literal::positive(*literal),
        })
        .collect()
}

fn cnf(clauses: &[&[&str]]) -> ConjunctiveNormalForm {
    clauses.iter().map(|literals| clause(literals)).collect()
}

#[test]
fn resolvents_of_two_clauses() {
    let test_cases: [(&[&str], &[&str], Vec<Clause>); 5] = [
        (&["A", "B"], &["~A", "C"], vec![clause(&["B", "C"])]),
        (&["A"], &["~A"], vec![clause(&[])]),
        (&["A", "B"], &["~A", "~B"], vec![]),
        (&["A", "B"], &["C"], vec![]),
        (&["A", "~B"], &["~A", "~B"], vec![clause(&["~B"])]),
    ];

    for (left, right, expected) in test_cases {
        assert_eq!(
            resolve(&clause(left), &clause(right)),
            expected,
            "resolve({left:?}, {right:?})"
        );
    }
}

#[test]
fn refutation() {
    let test_cases: [(ConjunctiveNormalForm, bool); 6] = [
        (cnf(&[&["A"], &["~A"]]), true),
        (cnf(&[&["A", "B"]]), false),
        (cnf(&[&["A"], &["~A", "B"], &["~B"]]), true),
        (cnf(&[&["A", "B"], &["~A", "B"], &["A", "~B"], &["~A", "~B"]]), true),
        (cnf(&[&["A", "B"], &["~A", "C"], &["~C"]]), false),
        (cnf(&[]), false),
    ];

    for (clauses, expected) in test_cases {
        assert_eq!(
            resolution(clauses.clone(), None, &mut DiscardedExplanation),
            Ok(expected),
            "resolution({clauses})"
        );
    }

    assert_eq!(
        resolution(cnf(&[&[]]), None, &mut DiscardedExplanation),
        Ok(true)
    );
}

#[test]
fn logical_consequence() {
    let premises = [
        parse_proposition("A").unwrap(),
        parse_proposition("A=>B").unwrap(),
    ];

    let test_cases = [("B", true), ("C", false), ("A&B", true), ("B|C", true), ("~A", false)];

    for (conclusion, expected) in test_cases {
        let conclusion = parse_proposition(conclusion).unwrap();
        assert_eq!(
            ResolutionSolver::new().implies(&premises, &conclusion, &mut DiscardedExplanation),
            Ok(expected),
            "A, A=>B entails {conclusion}"
        );
    }
}

#[test]
fn agrees_with_the_truth_table() {
    let test_cases = [
        "A&~A",
        "A|~A",
        "(A=>B)&A&~B",
        "(A<=>B)&(B<=>~A)",
        "(A|B)&(~A|C)&(~B|C)&~C",
        "(A|B|C)&(~A|~B)&(~B|~C)&(~A|~C)",
        "~((A=>B)=>((B=>C)=>(A=>C)))",
        "False",
        "~False",
    ];

    for formula in test_cases {
        let proposition = parse_proposition(formula).unwrap();

        let by_resolution = ResolutionSolver::new()
            .check_satisfiability(&proposition, &mut DiscardedExplanation)
            .unwrap();
        let by_truth_table = TruthTableSolver::new()
            .check_satisfiability(&proposition, &mut DiscardedExplanation)
            .unwrap();

        assert_eq!(
            by_resolution.value(),
            by_truth_table.value(),
            "satisfiability of {formula:?}"
        );
        assert_eq!(
            by_truth_table.model().is_some(),
            by_truth_table.value(),
            "model of {formula:?}"
        );
    }
}

#[test]
fn clause_limit() {
    let clauses = cnf(&[&["A", "B"], &["~A", "C"], &["~C"]]);

    assert_eq!(
        resolution(clauses.clone(), Some(1), &mut DiscardedExplanation),
        Err(LimitExceeded::Resolution { limit: 1 })
    );
    assert_eq!(
        resolution(clauses, Some(100), &mut DiscardedExplanation),
        Ok(false)
    );
}

#[test]
fn clause_limit_covers_the_initial_clause_set() {
    let test_cases = [
        (Some(1), Err(LimitExceeded::Resolution { limit: 1 })),
        (Some(3), Err(LimitExceeded::Resolution { limit: 3 })),
        (Some(4), Ok(false)),
        (None, Ok(false)),
    ];

    for (limit, expected) in test_cases {
        assert_eq!(
            resolution(
                to_cnf("A&B&C&D", &mut DiscardedExplanation),
                limit,
                &mut DiscardedExplanation
            ),
            expected,
            "resolution with limit {limit:?}"
        );
    }
}

#[test]
fn truth_table_variable_limit() {
    let wide = (0..64).map(|i| format!("a{i}")).join("|");
    let proposition = parse_proposition(&format!("~({wide})")).unwrap();

    assert_eq!(
        TruthTableSolver::new()
            .check_satisfiability(&proposition, &mut DiscardedExplanation)
            .map(|result| result.value()),
        Err(LimitExceeded::Variables {
            limit: 24,
            variables: 64
        })
    );
    let narrow = parse_proposition("a|b|c").unwrap();
    assert_eq!(
        TruthTableSolver::with_limit(2)
            .check_satisfiability(&narrow, &mut DiscardedExplanation)
            .map(|result| result.value()),
        Err(LimitExceeded::Variables {
            limit: 2,
            variables: 3
        })
    );
    assert_eq!(
        ResolutionSolver::new()
            .check_satisfiability(&proposition, &mut DiscardedExplanation)
            .map(|result| result.value()),
        Ok(true)
    );
}

#[test]
fn solver_statistics() {
    let result = ResolutionSolver::new()
        .solve(to_cnf("A&~A", &mut DiscardedExplanation), &mut DiscardedExplanation)
        .unwrap();

    assert!(!result.value());
    assert_eq!(result.rounds(), 1);
    assert_eq!(result.clause_count(), 2);
}
