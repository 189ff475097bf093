use std::{collections::BTreeSet, fmt::Display};

use colored::Colorize;
use maplit::btreeset;

use crate::{
    explanation::Explain,
    propositional_logic::{
        parser::parse_lenient,
        types::{Proposition, PropositionalVariable},
    },
};

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Literal(pub PropositionalVariable, pub bool);

impl Literal {
    pub fn positive(name: impl Into<String>) -> Self {
        Literal(PropositionalVariable::new(name), true)
    }

    pub fn negative(name: impl Into<String>) -> Self {
        Literal(PropositionalVariable::new(name), false)
    }

    pub fn complement(&self) -> Self {
        Literal(self.0.clone(), !self.1)
    }

    pub fn is_positive(&self) -> bool {
        self.1
    }
}

impl From<Literal> for Proposition {
    fn from(Literal(variable, value): Literal) -> Self {
        let proposition = variable.into();

        if value {
            proposition
        } else {
            Proposition::Negation(Box::new(proposition))
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "~{}", self.0)
        }
    }
}

/// A disjunction of literals. The empty clause is a contradiction.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Default)]
pub struct Clause(pub BTreeSet<Literal>);

impl Clause {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_tautology(&self) -> bool {
        self.0
            .iter()
            .any(|literal| !literal.1 && self.0.contains(&literal.complement()))
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause(iter.into_iter().collect())
    }
}

// Shorter clauses first, so that unit clauses are visited before the rest.
impl PartialOrd for Clause {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Clause {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let literals = self
            .0
            .iter()
            .map(|literal| literal.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{{{}}}", literals)
    }
}

/// Negations only on atoms. An empty conjunction is true, an empty
/// disjunction is false.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum NegationNormalForm {
    Literal(Literal),
    Conjunction(BTreeSet<NegationNormalForm>),
    Disjunction(BTreeSet<NegationNormalForm>),
}

impl From<Literal> for NegationNormalForm {
    fn from(value: Literal) -> Self {
        NegationNormalForm::Literal(value)
    }
}

impl NegationNormalForm {
    pub fn from_proposition(proposition: &Proposition, explanation: &mut impl Explain) -> Self {
        explanation.with_subexplanation(
            || {
                format!(
                    "Computing NNF for proposition: {}",
                    proposition.to_string().blue()
                )
            },
            |explanation| {
                let result = Self::with_polarity(proposition, true, explanation);

                explanation.step(|| format!("NNF: {}", result.to_string().red()));

                result
            },
        )
    }

    fn with_polarity(
        proposition: &Proposition,
        positive: bool,
        explanation: &mut impl Explain,
    ) -> Self {
        use NegationNormalForm::{Conjunction, Disjunction};

        match (proposition, positive) {
            (Proposition::Contradiction, true) => Disjunction(btreeset! {}),
            (Proposition::Contradiction, false) => Conjunction(btreeset! {}),
            (Proposition::Atomic(p), value) => Literal(p.clone(), value).into(),

            (Proposition::Negation(p), positive) => {
                if !positive {
                    explanation.step(|| law("~~F ∼ F"));
                }
                Self::with_polarity(p, !positive, explanation)
            }

            (Proposition::Conjunction(left, right), true) => Conjunction(btreeset! {
                Self::with_polarity(left, true, explanation),
                Self::with_polarity(right, true, explanation),
            }),
            (Proposition::Conjunction(left, right), false) => {
                explanation.step(|| law("~(F & G) ∼ ~F | ~G"));
                Disjunction(btreeset! {
                    Self::with_polarity(left, false, explanation),
                    Self::with_polarity(right, false, explanation),
                })
            }

            (Proposition::Disjunction(left, right), true) => Disjunction(btreeset! {
                Self::with_polarity(left, true, explanation),
                Self::with_polarity(right, true, explanation),
            }),
            (Proposition::Disjunction(left, right), false) => {
                explanation.step(|| law("~(F | G) ∼ ~F & ~G"));
                Conjunction(btreeset! {
                    Self::with_polarity(left, false, explanation),
                    Self::with_polarity(right, false, explanation),
                })
            }

            (Proposition::Implication(left, right), true) => {
                explanation.step(|| law("F => G ∼ ~F | G"));
                Disjunction(btreeset! {
                    Self::with_polarity(left, false, explanation),
                    Self::with_polarity(right, true, explanation),
                })
            }
            (Proposition::Implication(left, right), false) => {
                explanation.step(|| law("~(F => G) ∼ F & ~G"));
                Conjunction(btreeset! {
                    Self::with_polarity(left, true, explanation),
                    Self::with_polarity(right, false, explanation),
                })
            }

            (Proposition::Equivalence(left, right), true) => {
                explanation.step(|| law("F <=> G ∼ (~F | G) & (F | ~G)"));
                Conjunction(btreeset! {
                    Disjunction(btreeset! {
                        Self::with_polarity(left, false, explanation),
                        Self::with_polarity(right, true, explanation),
                    }),
                    Disjunction(btreeset! {
                        Self::with_polarity(left, true, explanation),
                        Self::with_polarity(right, false, explanation),
                    }),
                })
            }
            (Proposition::Equivalence(left, right), false) => {
                explanation.step(|| law("~(F <=> G) ∼ (F | G) & (~F | ~G)"));
                Conjunction(btreeset! {
                    Disjunction(btreeset! {
                        Self::with_polarity(left, true, explanation),
                        Self::with_polarity(right, true, explanation),
                    }),
                    Disjunction(btreeset! {
                        Self::with_polarity(left, false, explanation),
                        Self::with_polarity(right, false, explanation),
                    }),
                })
            }
        }
    }
}

impl From<NegationNormalForm> for Proposition {
    fn from(value: NegationNormalForm) -> Self {
        fn fold(
            propositions: BTreeSet<NegationNormalForm>,
            empty: Proposition,
            combine: fn(Proposition, Proposition) -> Proposition,
        ) -> Proposition {
            propositions
                .into_iter()
                .map(Proposition::from)
                .reduce(combine)
                .unwrap_or(empty)
        }

        match value {
            NegationNormalForm::Literal(literal) => literal.into(),
            NegationNormalForm::Conjunction(propositions) => fold(
                propositions,
                Proposition::Contradiction.negated(),
                Proposition::and,
            ),
            NegationNormalForm::Disjunction(propositions) => {
                fold(propositions, Proposition::Contradiction, Proposition::or)
            }
        }
    }
}

impl Display for NegationNormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Proposition::from(self.clone()).fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConjunctiveNormalForm(pub BTreeSet<Clause>);

impl ConjunctiveNormalForm {
    pub fn from_proposition(proposition: &Proposition, explanation: &mut impl Explain) -> Self {
        let nnf = NegationNormalForm::from_proposition(proposition, explanation);
        Self::from_negation_normal_form(nnf, explanation)
    }

    pub fn from_negation_normal_form(
        nnf: NegationNormalForm,
        explanation: &mut impl Explain,
    ) -> Self {
        let shown = nnf.to_string();

        explanation.with_subexplanation(
            move || format!("Computing CNF for: {}", shown.blue()),
            |explanation| {
                let cnf = ConjunctiveNormalForm(Self::clauses(nnf, explanation));

                explanation.step(|| format!("CNF: {}", cnf.to_string().red()));

                cnf
            },
        )
    }

    fn clauses(nnf: NegationNormalForm, explanation: &mut impl Explain) -> BTreeSet<Clause> {
        match nnf {
            NegationNormalForm::Literal(literal) => btreeset! { Clause(btreeset! { literal }) },
            NegationNormalForm::Conjunction(propositions) => propositions
                .into_iter()
                .flat_map(|p| Self::clauses(p, explanation))
                .collect(),
            NegationNormalForm::Disjunction(propositions) => {
                // Starting from the empty clause, distribute each disjunct's
                // clauses over the result.
                let mut product = btreeset! { Clause::default() };

                for proposition in propositions {
                    let clauses = Self::clauses(proposition, explanation);

                    if clauses.len() > 1 {
                        explanation.step(|| law("F | (G & H) ∼ (F | G) & (F | H)"));
                    }

                    product = product
                        .iter()
                        .flat_map(|left| {
                            clauses.iter().map(move |right| {
                                left.0.iter().chain(&right.0).cloned().collect::<Clause>()
                            })
                        })
                        .filter(|clause| !clause.is_tautology())
                        .collect();
                }

                product
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&mut self, other: ConjunctiveNormalForm) {
        self.0.extend(other.0);
    }
}

impl FromIterator<Clause> for ConjunctiveNormalForm {
    fn from_iter<T: IntoIterator<Item = Clause>>(iter: T) -> Self {
        ConjunctiveNormalForm(iter.into_iter().collect())
    }
}

impl Display for ConjunctiveNormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clauses = self
            .0
            .iter()
            .map(|clause| clause.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        write!(f, "{{{}}}", clauses)
    }
}

/// Clausal form of a belief's text. Text outside the grammar becomes a unit
/// clause over an opaque atom.
pub fn to_cnf(formula: &str, explanation: &mut impl Explain) -> ConjunctiveNormalForm {
    ConjunctiveNormalForm::from_proposition(&parse_lenient(formula), explanation)
}

pub fn law(law: &str) -> String {
    format!("Applying law: {}", law.magenta())
}
