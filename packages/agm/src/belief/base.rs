use std::fmt::Display;

use colored::Colorize;

use crate::{
    config::Priority,
    explanation::Explain,
    propositional_logic::{
        normal_forms::{to_cnf, ConjunctiveNormalForm},
        parser::{normalize, parse_lenient},
        types::Proposition,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Belief {
    priority: Priority,
    formula: String,
    // Insertion stamp; breaks ties between equal priorities.
    sequence: u64,
}

impl Belief {
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The normalized formula text.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn proposition(&self) -> Proposition {
        parse_lenient(&self.formula)
    }
}

impl Display for Belief {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (priority {})", self.formula, self.priority)
    }
}

/// Beliefs unique by formula text, ordered by descending priority and then
/// by insertion order.
#[derive(Debug, Clone, Default)]
pub struct BeliefBase {
    beliefs: Vec<Belief>,
    next_sequence: u64,
}

impl BeliefBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Belief> {
        self.beliefs.iter()
    }

    pub fn contains(&self, formula: &str) -> bool {
        self.get(formula).is_some()
    }

    pub fn get(&self, formula: &str) -> Option<&Belief> {
        let formula = normalize(formula);
        self.beliefs.iter().find(|belief| belief.formula == formula)
    }

    pub fn formulas(&self) -> Vec<&str> {
        self.beliefs.iter().map(Belief::formula).collect()
    }

    /// Inserts the formula unless a belief with the same normalized text
    /// exists. Returns whether it was inserted.
    pub fn insert(&mut self, formula: &str, priority: Priority) -> bool {
        let formula = normalize(formula);

        if self.beliefs.iter().any(|belief| belief.formula == formula) {
            return false;
        }

        let belief = Belief {
            priority,
            formula,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        // Insert after every belief that is at least as entrenched, which keeps the order stable.
        let position = self
            .beliefs
            .partition_point(|other| other.priority >= belief.priority);
        self.beliefs.insert(position, belief);

        true
    }

    pub fn remove(&mut self, formula: &str) -> Option<Belief> {
        let formula = normalize(formula);
        let position = self
            .beliefs
            .iter()
            .position(|belief| belief.formula == formula)?;

        Some(self.beliefs.remove(position))
    }

    /// Least entrenched first; equal priorities keep insertion order.
    pub fn ascending(&self) -> Vec<Belief> {
        let mut beliefs = self.beliefs.clone();
        beliefs.sort_by_key(|belief| (belief.priority, belief.sequence));
        beliefs
    }

    pub fn propositions(&self) -> Vec<Proposition> {
        self.beliefs.iter().map(Belief::proposition).collect()
    }

    pub fn to_cnf(&self, explanation: &mut impl Explain) -> ConjunctiveNormalForm {
        explanation.with_subexplanation(
            || "Converting the belief base to clauses",
            |explanation| {
                let mut cnf = ConjunctiveNormalForm::default();
                for belief in &self.beliefs {
                    cnf.extend(to_cnf(&belief.formula, explanation));
                }
                cnf
            },
        )
    }
}

impl Display for BeliefBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let beliefs = self
            .beliefs
            .iter()
            .map(|belief| {
                format!(
                    "{} {}",
                    belief.formula.blue(),
                    format!("({})", belief.priority).magenta()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "[{}]", beliefs)
    }
}
