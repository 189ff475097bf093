use std::fmt::Display;

use indexmap::IndexSet;
use termtree::Tree;

/// The surface name of the distinguished falsehood literal.
pub const CONTRADICTION: &str = "False";

#[derive(Debug, Hash, PartialEq, Eq, Clone, PartialOrd, Ord)]
pub struct PropositionalVariable(pub String);

impl PropositionalVariable {
    pub fn new(name: impl Into<String>) -> Self {
        PropositionalVariable(name.into())
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Proposition {
    Contradiction,
    Atomic(PropositionalVariable),
    Negation(Box<Proposition>),
    Conjunction(Box<Proposition>, Box<Proposition>),
    Disjunction(Box<Proposition>, Box<Proposition>),
    Implication(Box<Proposition>, Box<Proposition>),
    Equivalence(Box<Proposition>, Box<Proposition>),
}

impl From<PropositionalVariable> for Proposition {
    fn from(p: PropositionalVariable) -> Self {
        Proposition::Atomic(p)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariableSet(pub IndexSet<PropositionalVariable>);

impl Display for VariableSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variable_list = self
            .0
            .iter()
            .map(|variable| variable.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{{{}}}", variable_list)
    }
}

impl Proposition {
    pub fn atom(name: impl Into<String>) -> Self {
        Proposition::Atomic(PropositionalVariable::new(name))
    }

    pub fn symbol(&self) -> &str {
        match self {
            Proposition::Contradiction => CONTRADICTION,
            Proposition::Atomic(p) => &p.0,
            Proposition::Negation(_) => "~",
            Proposition::Conjunction(_, _) => "&",
            Proposition::Disjunction(_, _) => "|",
            Proposition::Implication(_, _) => "=>",
            Proposition::Equivalence(_, _) => "<=>",
        }
    }

    pub fn is_compound(&self) -> bool {
        !matches!(self, Proposition::Contradiction | Proposition::Atomic(_))
    }

    pub fn negated(&self) -> Self {
        Proposition::Negation(Box::new(self.clone()))
    }

    pub fn and(self, other: Proposition) -> Self {
        Proposition::Conjunction(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Proposition) -> Self {
        Proposition::Disjunction(Box::new(self), Box::new(other))
    }

    pub fn implies(self, other: Proposition) -> Self {
        Proposition::Implication(Box::new(self), Box::new(other))
    }

    pub fn iff(self, other: Proposition) -> Self {
        Proposition::Equivalence(Box::new(self), Box::new(other))
    }

    pub fn get_tree(&self) -> Tree<String> {
        let symbol = self.symbol().to_owned();

        match self {
            Proposition::Contradiction | Proposition::Atomic(_) => Tree::new(symbol),
            Proposition::Negation(p) => Tree::new(symbol).with_leaves(vec![p.get_tree()]),
            Proposition::Conjunction(left, right)
            | Proposition::Disjunction(left, right)
            | Proposition::Implication(left, right)
            | Proposition::Equivalence(left, right) => {
                Tree::new(symbol).with_leaves(vec![left.get_tree(), right.get_tree()])
            }
        }
    }

    pub fn get_variables(&self) -> VariableSet {
        let mut variables = VariableSet::default();
        self.collect_variables(&mut variables.0);
        variables
    }

    fn collect_variables(&self, variables: &mut IndexSet<PropositionalVariable>) {
        match self {
            Proposition::Contradiction => {}
            Proposition::Atomic(p) => {
                variables.insert(p.clone());
            }
            Proposition::Negation(p) => p.collect_variables(variables),
            Proposition::Conjunction(left, right)
            | Proposition::Disjunction(left, right)
            | Proposition::Implication(left, right)
            | Proposition::Equivalence(left, right) => {
                left.collect_variables(variables);
                right.collect_variables(variables);
            }
        }
    }

    // Binding strength used to decide where Display needs parentheses.
    fn precedence(&self) -> u8 {
        match self {
            Proposition::Equivalence(_, _) => 0,
            Proposition::Implication(_, _) => 1,
            Proposition::Disjunction(_, _) => 2,
            Proposition::Conjunction(_, _) => 3,
            Proposition::Negation(_) | Proposition::Contradiction | Proposition::Atomic(_) => 4,
        }
    }

    fn fmt_operand(&self, operand: &Proposition, tighter: bool) -> String {
        let needs_parentheses = if tighter {
            operand.precedence() <= self.precedence()
        } else {
            operand.precedence() < self.precedence()
        };

        if needs_parentheses {
            format!("({operand})")
        } else {
            operand.to_string()
        }
    }
}

impl Display for PropositionalVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Writes the formula back in the ascii surface syntax, with the fewest
/// parentheses that parse back to the same tree.
impl Display for Proposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Proposition::Contradiction => write!(f, "{CONTRADICTION}"),
            Proposition::Atomic(p) => write!(f, "{p}"),
            Proposition::Negation(p) => write!(f, "~{}", self.fmt_operand(p, false)),
            // `&` and `|` are parsed left-associatively, `=>` and `<=>` right-associatively.
            Proposition::Conjunction(left, right) | Proposition::Disjunction(left, right) => {
                write!(
                    f,
                    "{}{}{}",
                    self.fmt_operand(left, false),
                    self.symbol(),
                    self.fmt_operand(right, true)
                )
            }
            Proposition::Implication(left, right) | Proposition::Equivalence(left, right) => {
                write!(
                    f,
                    "{}{}{}",
                    self.fmt_operand(left, true),
                    self.symbol(),
                    self.fmt_operand(right, false)
                )
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogicalConsequence {
    pub premises: Vec<Proposition>,
    pub conclusion: Proposition,
}

impl Display for LogicalConsequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ⊨ {}",
            self.premises
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            self.conclusion
        )
    }
}
