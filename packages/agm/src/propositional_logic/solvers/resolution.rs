use std::collections::BTreeSet;

use colored::Colorize;

use crate::{
    error::LimitExceeded,
    explanation::Explain,
    log::targets::RESOLUTION as LOG_RESOLUTION,
    propositional_logic::normal_forms::{Clause, ConjunctiveNormalForm},
};

use super::solve::{Solve, SolverResult};

#[derive(Debug)]
pub struct ResolutionResult {
    value: bool,
    rounds: usize,
    clause_count: usize,
}

impl ResolutionResult {
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Size of the working clause set when the search stopped.
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

impl SolverResult for ResolutionResult {
    fn value(&self) -> bool {
        self.value
    }

    fn flip_value(&mut self) {
        self.value = !self.value;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolutionSolver {
    limit: Option<usize>,
}

impl ResolutionSolver {
    pub fn new() -> Self {
        Self { limit: None }
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self { limit }
    }
}

impl Solve for ResolutionSolver {
    type Result = ResolutionResult;

    fn solve(
        &self,
        cnf: ConjunctiveNormalForm,
        explanation: &mut impl Explain,
    ) -> Result<ResolutionResult, LimitExceeded> {
        let mut engine = ResolutionEngine::new(cnf, self.limit);
        let refuted = engine.apply_resolution(explanation)?;

        Ok(ResolutionResult {
            value: !refuted,
            rounds: engine.rounds,
            clause_count: engine.clauses.len(),
        })
    }
}

/// Returns `true` when the empty clause is derivable from `cnf`, that is when
/// `cnf` is unsatisfiable.
pub fn resolution(
    cnf: ConjunctiveNormalForm,
    limit: Option<usize>,
    explanation: &mut impl Explain,
) -> Result<bool, LimitExceeded> {
    ResolutionEngine::new(cnf, limit).apply_resolution(explanation)
}

#[derive(Debug)]
struct ResolutionEngine {
    clauses: BTreeSet<Clause>,
    limit: Option<usize>,
    rounds: usize,
}

impl ResolutionEngine {
    fn new(cnf: ConjunctiveNormalForm, limit: Option<usize>) -> Self {
        Self {
            clauses: cnf.0,
            limit,
            rounds: 0,
        }
    }

    fn apply_resolution(&mut self, explanation: &mut impl Explain) -> Result<bool, LimitExceeded> {
        let refuted = explanation.with_subexplanation(
            || "Applying the resolution algorithm",
            |explanation| -> Result<bool, LimitExceeded> {
                self.check_limit(self.clauses.len())?;

                if self.clauses.contains(&Clause::default()) {
                    explanation.step(|| "The clause set already contains the empty clause");
                    return Ok(true);
                }

                loop {
                    self.rounds += 1;

                    let outcome = explanation.with_subexplanation(
                        || format!("Round {}", self.rounds),
                        |explanation| self.apply_resolution_round(explanation),
                    );

                    match outcome {
                        Round::Refuted => return Ok(true),
                        Round::Saturated => return Ok(false),
                        Round::Extended(resolvents) => {
                            self.check_limit(self.clauses.len() + resolvents.len())?;

                            log::trace!(
                                target: LOG_RESOLUTION,
                                "Round {}: {} new resolvents.",
                                self.rounds,
                                resolvents.len()
                            );
                            self.clauses.extend(resolvents);
                        }
                    }
                }
            },
        )?;

        explanation.step(|| {
            format!(
                "Result: {}",
                if refuted {
                    "empty clause derived".red()
                } else {
                    "saturated without the empty clause".green()
                },
            )
        });

        Ok(refuted)
    }

    fn check_limit(&self, clause_count: usize) -> Result<(), LimitExceeded> {
        match self.limit {
            Some(limit) if clause_count > limit => {
                log::warn!(
                    target: LOG_RESOLUTION,
                    "Clause limit of {limit} reached after {} rounds.",
                    self.rounds
                );
                Err(LimitExceeded::Resolution { limit })
            }
            _ => Ok(()),
        }
    }

    // Resolves every unordered pair of clauses once.
    fn apply_resolution_round(&self, explanation: &mut impl Explain) -> Round {
        let mut resolvents = BTreeSet::new();

        for (i, clause1) in self.clauses.iter().enumerate() {
            for clause2 in self.clauses.iter().skip(i + 1) {
                for resolvent in resolve(clause1, clause2) {
                    if resolvent.is_empty() {
                        explanation.step(|| {
                            format!(
                                "Found the empty resolvent from {} and {}",
                                clause1.to_string().blue(),
                                clause2.to_string().blue()
                            )
                        });
                        return Round::Refuted;
                    }

                    if !self.clauses.contains(&resolvent) && !resolvents.contains(&resolvent) {
                        explanation.step(|| {
                            format!(
                                "New resolvent {} from {} and {}",
                                resolvent.to_string().magenta(),
                                clause1.to_string().blue(),
                                clause2.to_string().blue()
                            )
                        });
                        resolvents.insert(resolvent);
                    }
                }
            }
        }

        if resolvents.is_empty() {
            explanation.step(|| "No new resolvent found, the clause set is saturated");
            Round::Saturated
        } else {
            Round::Extended(resolvents)
        }
    }
}

enum Round {
    Refuted,
    Saturated,
    Extended(BTreeSet<Clause>),
}

/// Every non-tautological resolvent of the two clauses, one per complementary
/// pair of literals.
pub fn resolve(clause1: &Clause, clause2: &Clause) -> Vec<Clause> {
    clause1
        .0
        .iter()
        .filter(|literal| clause2.0.contains(&literal.complement()))
        .filter_map(|literal| {
            let complement = literal.complement();

            let resolvent = clause1
                .0
                .iter()
                .filter(|&l| l != literal)
                .chain(clause2.0.iter().filter(|&l| *l != complement))
                .cloned()
                .collect::<Clause>();

            (!resolvent.is_tautology()).then_some(resolvent)
        })
        .collect()
}
