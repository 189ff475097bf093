use colored::Colorize;

use crate::{
    config::defaults,
    error::LimitExceeded,
    explanation::Explain,
    log::targets::TRUTH_TABLE as LOG_TRUTH_TABLE,
    propositional_logic::{
        evaluate::{Evaluate, Interpretation},
        normal_forms::ConjunctiveNormalForm,
    },
};

use super::solve::{Solve, SolverResult};

#[derive(Debug)]
pub struct TruthTableResult {
    value: bool,
    model: Option<Interpretation>,
}

impl TruthTableResult {
    /// The first satisfying interpretation found, if any.
    pub fn model(&self) -> Option<&Interpretation> {
        self.model.as_ref()
    }
}

impl SolverResult for TruthTableResult {
    fn value(&self) -> bool {
        self.value
    }

    fn flip_value(&mut self) {
        self.value = !self.value;
    }
}

/// Enumerates every interpretation of the clause set's variables. Only
/// meant for small clause sets: more than `limit` variables is refused.
#[derive(Debug, Clone, Copy)]
pub struct TruthTableSolver {
    limit: usize,
}

impl TruthTableSolver {
    pub fn new() -> Self {
        Self {
            limit: defaults::TRUTH_TABLE_LIMIT,
        }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for TruthTableSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solve for TruthTableSolver {
    type Result = TruthTableResult;

    fn solve(
        &self,
        cnf: ConjunctiveNormalForm,
        explanation: &mut impl Explain,
    ) -> Result<TruthTableResult, LimitExceeded> {
        let variables = cnf.get_variables();

        if variables.0.len() > self.limit {
            log::warn!(
                target: LOG_TRUTH_TABLE,
                "Refusing to enumerate {} variables.",
                variables.0.len()
            );
            return Err(LimitExceeded::Variables {
                limit: self.limit,
                variables: variables.0.len(),
            });
        }

        explanation.with_subexplanation(
            || {
                format!(
                    "Searching the interpretations of {} for a model of {}",
                    variables.to_string().blue(),
                    cnf.to_string().blue()
                )
            },
            |explanation| {
                let model = Interpretation::generate_all(variables.clone())
                    .find(|interpretation| cnf.evaluate(interpretation).0);

                match &model {
                    Some(interpretation) => explanation.step(|| {
                        format!("Model found: {}", interpretation.to_string().green())
                    }),
                    None => explanation.step(|| "No interpretation satisfies every clause"),
                }

                Ok(TruthTableResult {
                    value: model.is_some(),
                    model,
                })
            },
        )
    }
}
