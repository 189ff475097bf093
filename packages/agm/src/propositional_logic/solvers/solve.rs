use colored::Colorize;

use crate::{
    error::LimitExceeded,
    explanation::Explain,
    propositional_logic::{
        normal_forms::ConjunctiveNormalForm,
        types::{LogicalConsequence, Proposition},
    },
};

pub trait SolverResult {
    fn value(&self) -> bool;

    fn flip_value(&mut self);
}

/// A satisfiability oracle over clause sets.
pub trait Solve {
    type Result: SolverResult;

    fn solve(
        &self,
        cnf: ConjunctiveNormalForm,
        explanation: &mut impl Explain,
    ) -> Result<Self::Result, LimitExceeded>;

    fn check_satisfiability(
        &self,
        proposition: &Proposition,
        explanation: &mut impl Explain,
    ) -> Result<Self::Result, LimitExceeded> {
        explanation.with_subexplanation(
            || {
                format!(
                    "Checking satisfiability of {}",
                    proposition.to_string().blue()
                )
            },
            |explanation| {
                let cnf = ConjunctiveNormalForm::from_proposition(proposition, explanation);

                self.solve(cnf, explanation)
            },
        )
    }

    /// The value of the result is `true` when the premises entail the
    /// conclusion, that is when the premises together with the negated
    /// conclusion are unsatisfiable.
    fn check_logical_consequence(
        &self,
        consequence: &LogicalConsequence,
        explanation: &mut impl Explain,
    ) -> Result<Self::Result, LimitExceeded> {
        explanation.with_subexplanation(
            || {
                format!(
                    "Checking logical consequence {}",
                    consequence.to_string().blue()
                )
            },
            |explanation| {
                let mut cnf = ConjunctiveNormalForm::default();

                for premise in &consequence.premises {
                    cnf.extend(ConjunctiveNormalForm::from_proposition(
                        premise,
                        explanation,
                    ));
                }
                cnf.extend(ConjunctiveNormalForm::from_proposition(
                    &consequence.conclusion.negated(),
                    explanation,
                ));

                let mut result = self.solve(cnf, explanation)?;

                explanation.step(|| {
                    format!(
                        "Premises with the negated conclusion are {}, therefore the consequence is {}",
                        if result.value() {
                            "satisfiable".green()
                        } else {
                            "unsatisfiable".red()
                        },
                        if result.value() {
                            "false".red()
                        } else {
                            "true".green()
                        },
                    )
                });

                result.flip_value();

                Ok(result)
            },
        )
    }

    fn implies(
        &self,
        premises: &[Proposition],
        conclusion: &Proposition,
        explanation: &mut impl Explain,
    ) -> Result<bool, LimitExceeded> {
        let consequence = LogicalConsequence {
            premises: premises.to_vec(),
            conclusion: conclusion.clone(),
        };

        Ok(self
            .check_logical_consequence(&consequence, explanation)?
            .value())
    }
}
