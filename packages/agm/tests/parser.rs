use agm::propositional_logic::{
    parser::{negate, normalize, parse_lenient, parse_proposition},
    types::Proposition,
};

fn atom(name: &str) -> Proposition {
    Proposition::atom(name)
}

#[test]
fn normalize_rewrites_aliases() {
    let test_cases = [
        ("A -> B", "A=>B"),
        ("A <-> B", "A<=>B"),
        ("¬A", "~A"),
        (" ( A & B ) | C ", "(A&B)|C"),
        ("A => B", "A=>B"),
        ("A<=>B", "A<=>B"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(normalize(input), expected, "normalize({input:?})");
    }
}

#[test]
fn negate_toggles_the_marker() {
    let test_cases = [
        ("A", "~A"),
        ("~A", "A"),
        ("~ A", "A"),
        ("p12", "~p12"),
        ("A&B", "~(A&B)"),
        ("~(A&B)", "A&B"),
        ("~(A)|B", "~(~(A)|B)"),
        ("A -> B", "~(A=>B)"),
    ];

    for (formula, expected) in test_cases {
        assert_eq!(negate(formula), expected, "negate({formula:?})");
    }
}

#[test]
fn negating_twice_gives_back_the_formula() {
    let test_cases = [
        "A",
        "~A",
        "A&B",
        "~(A|B)",
        "A=>B",
        "~(A<=>B)",
        "(A|B)&C",
        "~(A)|B",
        "False",
    ];

    for formula in test_cases {
        assert_eq!(negate(&negate(formula)), formula, "negate(negate({formula:?}))");
    }
}

#[test]
fn precedence_and_associativity() {
    let (a, b, c) = (atom("A"), atom("B"), atom("C"));

    let test_cases = [
        ("A|B&C", a.clone().or(b.clone().and(c.clone()))),
        ("A&B|C", a.clone().and(b.clone()).or(c.clone())),
        ("A=>B=>C", a.clone().implies(b.clone().implies(c.clone()))),
        ("A&B&C", a.clone().and(b.clone()).and(c.clone())),
        ("~A&B", a.negated().and(b.clone())),
        ("~(A&B)", a.clone().and(b.clone()).negated()),
        ("A|B=>C", a.clone().or(b.clone()).implies(c.clone())),
        ("A=>B<=>C", a.clone().implies(b.clone()).iff(c.clone())),
        ("A <-> B", a.clone().iff(b.clone())),
        ("¬¬A", a.negated().negated()),
        ("False", Proposition::Contradiction),
        ("~False", Proposition::Contradiction.negated()),
        ("p_1", atom("p_1")),
    ];

    for (input, expected) in test_cases {
        assert_eq!(
            parse_proposition(input),
            Ok(expected),
            "parse_proposition({input:?})"
        );
    }
}

#[test]
fn display_parses_back_to_the_same_tree() {
    let test_cases = [
        "A|B&C",
        "(A|B)&C",
        "A=>(B=>C)",
        "(A=>B)=>C",
        "A|(B|C)",
        "~(A<=>B)&~C",
        "~~A",
        "(A<=>B)<=>C",
    ];

    for input in test_cases {
        let proposition = parse_proposition(input).unwrap();
        let displayed = proposition.to_string();

        assert_eq!(
            parse_proposition(&displayed),
            Ok(proposition),
            "{input:?} displayed as {displayed:?}"
        );
    }
}

#[test]
fn malformed_input_is_an_error() {
    let test_cases = ["", "A&", "(A", "A)", "A&&B", "=>A", "A|(B"];

    for input in test_cases {
        let error = parse_proposition(input).unwrap_err();
        assert_eq!(error.input, input, "parse_proposition({input:?})");
    }
}

#[test]
fn lenient_parsing_degrades_to_an_atom() {
    let test_cases = [
        ("A&&B", atom("A&&B")),
        ("~(A&&B)", atom("A&&B").negated()),
        ("(A", atom("(A")),
        ("A -> B", atom("A").implies(atom("B"))),
        ("~A", atom("A").negated()),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse_lenient(input), expected, "parse_lenient({input:?})");
    }
}
