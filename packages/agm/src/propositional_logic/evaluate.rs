use std::fmt::Display;

use indexmap::IndexMap;

use crate::propositional_logic::{
    normal_forms::{Clause, ConjunctiveNormalForm, Literal},
    types::{Proposition, PropositionalVariable, VariableSet},
};

/// An assignment of truth values. Variables it does not mention are false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation(pub IndexMap<PropositionalVariable, TruthValue>);

impl Interpretation {
    /// Every interpretation of `variables`, counting up from all false with
    /// the last variable flipping fastest.
    pub fn generate_all(variables: VariableSet) -> impl Iterator<Item = Interpretation> {
        let first = vec![false; variables.0.len()];

        std::iter::successors(Some(first), |values| next_assignment(values)).map(
            move |values| {
                Interpretation(
                    variables
                        .0
                        .iter()
                        .cloned()
                        .zip(values.into_iter().map(TruthValue))
                        .collect(),
                )
            },
        )
    }

    pub fn value_of(&self, variable: &PropositionalVariable) -> TruthValue {
        self.0.get(variable).copied().unwrap_or(TruthValue(false))
    }
}

fn next_assignment(values: &[bool]) -> Option<Vec<bool>> {
    let mut next = values.to_vec();

    for value in next.iter_mut().rev() {
        if *value {
            *value = false;
        } else {
            *value = true;
            return Some(next);
        }
    }

    None
}

impl Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut variables = self.0.keys().collect::<Vec<_>>();
        variables.sort_by_key(|v| &v.0);

        let variable_list = variables
            .iter()
            .map(|&variable| {
                let prefix = if self.value_of(variable).0 { "" } else { "~" };
                format!("{prefix}{variable}")
            })
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{{{}}}", variable_list)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TruthValue(pub bool);

impl Display for TruthValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.0 { "T" } else { "F" })
    }
}

pub trait Evaluate {
    fn evaluate(&self, interpretation: &Interpretation) -> TruthValue;
}

impl Evaluate for Proposition {
    fn evaluate(&self, interpretation: &Interpretation) -> TruthValue {
        let value = |p: &Proposition| p.evaluate(interpretation).0;

        TruthValue(match self {
            Proposition::Contradiction => false,
            Proposition::Atomic(p) => interpretation.value_of(p).0,
            Proposition::Negation(p) => !value(p),
            Proposition::Conjunction(left, right) => value(left) && value(right),
            Proposition::Disjunction(left, right) => value(left) || value(right),
            Proposition::Implication(left, right) => !value(left) || value(right),
            Proposition::Equivalence(left, right) => value(left) == value(right),
        })
    }
}

impl Evaluate for Literal {
    fn evaluate(&self, interpretation: &Interpretation) -> TruthValue {
        TruthValue(interpretation.value_of(&self.0).0 == self.1)
    }
}

impl Evaluate for Clause {
    fn evaluate(&self, interpretation: &Interpretation) -> TruthValue {
        TruthValue(
            self.0
                .iter()
                .any(|literal| literal.evaluate(interpretation).0),
        )
    }
}

impl Evaluate for ConjunctiveNormalForm {
    fn evaluate(&self, interpretation: &Interpretation) -> TruthValue {
        TruthValue(self.0.iter().all(|clause| clause.evaluate(interpretation).0))
    }
}

impl ConjunctiveNormalForm {
    pub fn get_variables(&self) -> VariableSet {
        VariableSet(
            self.0
                .iter()
                .flat_map(|clause| clause.0.iter().map(|literal| literal.0.clone()))
                .collect(),
        )
    }
}
