use std::fmt::Display;

use colored::Colorize;

use crate::{
    belief::base::{Belief, BeliefBase},
    config::{Config, ExpansionPolicy, Priority},
    error::LimitExceeded,
    explanation::Explain,
    log::targets::{
        CONTRACTION as LOG_CONTRACTION, EXPANSION as LOG_EXPANSION, REPAIR as LOG_REPAIR,
        REVISION as LOG_REVISION,
    },
    propositional_logic::{
        normal_forms::ConjunctiveNormalForm,
        parser::{negate, normalize, parse_lenient},
        solvers::resolution::resolution,
        types::CONTRADICTION,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    AlreadyPresent,
    Added,
    /// Only under [`ExpansionPolicy::Permissive`]: the formula was added and
    /// the base no longer is consistent.
    AddedInconsistent,
    /// Only under [`ExpansionPolicy::Guarded`]: the base entails the
    /// formula's negation, nothing changed.
    Rejected,
}

impl Expansion {
    pub fn is_added(&self) -> bool {
        matches!(self, Expansion::Added | Expansion::AddedInconsistent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contraction {
    /// The base did not entail the formula; nothing to withdraw.
    NotEntailed,
    Withdrew(Belief),
    /// No single withdrawal stops the entailment. The base is unchanged.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub contraction: Contraction,
    pub expansion: Expansion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    AlreadyConsistent,
    Repaired(Vec<Belief>),
    /// Still inconsistent: no single withdrawal restores consistency.
    Failed { removed: Vec<Belief> },
}

/// A belief base together with the policy used to change it.
///
/// Speculative changes are always tried on a clone, so a rejected candidate
/// never touches the live base.
#[derive(Debug, Clone, Default)]
pub struct BeliefStore {
    base: BeliefBase,
    config: Config,
}

impl BeliefStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            base: BeliefBase::new(),
            config,
        }
    }

    pub fn guarded() -> Self {
        Self::with_config(Config::default().with_expansion(ExpansionPolicy::Guarded))
    }

    pub fn permissive() -> Self {
        Self::with_config(Config::default().with_expansion(ExpansionPolicy::Permissive))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base(&self) -> &BeliefBase {
        &self.base
    }

    pub fn formulas(&self) -> Vec<&str> {
        self.base.formulas()
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn entails(
        &self,
        query: &str,
        explanation: &mut impl Explain,
    ) -> Result<bool, LimitExceeded> {
        explanation.with_subexplanation(
            || {
                format!(
                    "Checking whether {} entails {}",
                    self.base,
                    normalize(query).blue()
                )
            },
            |explanation| {
                let mut cnf = self.base.to_cnf(explanation);
                cnf.extend(ConjunctiveNormalForm::from_proposition(
                    &parse_lenient(query).negated(),
                    explanation,
                ));

                let entailed = resolution(cnf, self.config.resolution_limit, explanation)?;

                explanation.step(|| {
                    if entailed {
                        format!("{} is entailed", normalize(query).green())
                    } else {
                        format!("{} is not entailed", normalize(query).red())
                    }
                });

                Ok(entailed)
            },
        )
    }

    pub fn is_consistent(&self, explanation: &mut impl Explain) -> Result<bool, LimitExceeded> {
        Ok(!self.entails(CONTRADICTION, explanation)?)
    }

    pub fn expand(
        &mut self,
        formula: &str,
        priority: Priority,
        explanation: &mut impl Explain,
    ) -> Result<Expansion, LimitExceeded> {
        let formula = normalize(formula);
        let policy = self.config.expansion;

        explanation.with_subexplanation(
            || {
                format!(
                    "Expanding with {} (priority {}, {} policy)",
                    formula.blue(),
                    priority,
                    policy
                )
            },
            |explanation| {
                if self.base.contains(&formula) {
                    explanation.step(|| "The formula is already a belief");
                    return Ok(Expansion::AlreadyPresent);
                }

                match policy {
                    ExpansionPolicy::Guarded => {
                        if self.entails(&negate(&formula), explanation)? {
                            log::warn!(
                                target: LOG_EXPANSION,
                                "Rejected \"{formula}\": the base entails its negation."
                            );
                            explanation.step(|| "Rejected, the base entails its negation");
                            return Ok(Expansion::Rejected);
                        }

                        self.base.insert(&formula, priority);
                        Ok(Expansion::Added)
                    }
                    ExpansionPolicy::Permissive => {
                        self.base.insert(&formula, priority);

                        if self.is_consistent(explanation)? {
                            Ok(Expansion::Added)
                        } else {
                            log::warn!(
                                target: LOG_EXPANSION,
                                "The belief base is inconsistent after adding \"{formula}\"."
                            );
                            explanation.step(|| "Added, the base is now inconsistent");
                            Ok(Expansion::AddedInconsistent)
                        }
                    }
                }
            },
        )
    }

    pub fn expand_default(
        &mut self,
        formula: &str,
        explanation: &mut impl Explain,
    ) -> Result<Expansion, LimitExceeded> {
        self.expand(formula, self.config.default_priority, explanation)
    }

    pub fn remove_belief(&mut self, formula: &str) -> Option<Belief> {
        self.base.remove(formula)
    }

    /// Withdraws the least entrenched belief whose removal alone stops the
    /// base from entailing `formula`.
    pub fn contract(
        &mut self,
        formula: &str,
        explanation: &mut impl Explain,
    ) -> Result<Contraction, LimitExceeded> {
        let formula = normalize(formula);

        explanation.with_subexplanation(
            || format!("Contracting by {}", formula.blue()),
            |explanation| {
                if !self.entails(&formula, explanation)? {
                    return Ok(Contraction::NotEntailed);
                }

                for belief in self.base.ascending() {
                    let mut scratch = self.clone();
                    scratch.remove_belief(belief.formula());

                    let still_entailed = explanation.with_subexplanation(
                        || format!("Trying without {}", belief.to_string().yellow()),
                        |explanation| scratch.entails(&formula, explanation),
                    )?;

                    if !still_entailed {
                        self.remove_belief(belief.formula());
                        log::info!(
                            target: LOG_CONTRACTION,
                            "Withdrew {belief} to stop entailing \"{formula}\"."
                        );
                        explanation.step(|| format!("Withdrew {}", belief.to_string().red()));
                        return Ok(Contraction::Withdrew(belief));
                    }
                }

                log::warn!(
                    target: LOG_CONTRACTION,
                    "No single withdrawal stops the base from entailing \"{formula}\"."
                );
                explanation.step(|| "No single withdrawal suffices");
                Ok(Contraction::Exhausted)
            },
        )
    }

    /// Levi identity: contract by the negation, then expand.
    pub fn revise(
        &mut self,
        formula: &str,
        priority: Priority,
        explanation: &mut impl Explain,
    ) -> Result<Revision, LimitExceeded> {
        explanation.with_subexplanation(
            || format!("Revising by {}", normalize(formula).blue()),
            |explanation| {
                let contraction = self.contract(&negate(formula), explanation)?;
                let expansion = self.expand(formula, priority, explanation)?;

                if !expansion.is_added() && expansion != Expansion::AlreadyPresent {
                    log::warn!(
                        target: LOG_REVISION,
                        "Revision by \"{}\" did not add the formula.",
                        normalize(formula)
                    );
                }

                Ok(Revision {
                    contraction,
                    expansion,
                })
            },
        )
    }

    pub fn revise_default(
        &mut self,
        formula: &str,
        explanation: &mut impl Explain,
    ) -> Result<Revision, LimitExceeded> {
        self.revise(formula, self.config.default_priority, explanation)
    }

    /// Withdraws least entrenched beliefs, one at a time, until the base is
    /// consistent or no single withdrawal helps.
    pub fn auto_fix(&mut self, explanation: &mut impl Explain) -> Result<Repair, LimitExceeded> {
        explanation.with_subexplanation(
            || "Restoring consistency",
            |explanation| {
                if self.is_consistent(explanation)? {
                    explanation.step(|| "The base is already consistent");
                    return Ok(Repair::AlreadyConsistent);
                }

                self.repair(Vec::new(), explanation)
            },
        )
    }

    // Each call either returns or removes one belief before recursing.
    fn repair(
        &mut self,
        mut removed: Vec<Belief>,
        explanation: &mut impl Explain,
    ) -> Result<Repair, LimitExceeded> {
        if self.is_consistent(explanation)? {
            return Ok(Repair::Repaired(removed));
        }

        for belief in self.base.ascending() {
            let mut scratch = self.clone();
            scratch.remove_belief(belief.formula());

            let consistent = explanation.with_subexplanation(
                || format!("Trying without {}", belief.to_string().yellow()),
                |explanation| scratch.is_consistent(explanation),
            )?;

            if consistent {
                self.remove_belief(belief.formula());
                log::info!(target: LOG_REPAIR, "Withdrew {belief} to restore consistency.");
                explanation.step(|| format!("Withdrew {}", belief.to_string().red()));
                removed.push(belief);

                return self.repair(removed, explanation);
            }
        }

        log::warn!(target: LOG_REPAIR, "Failed to restore consistency with a single withdrawal.");
        explanation.step(|| "No single withdrawal restores consistency");
        Ok(Repair::Failed { removed })
    }
}

impl Display for BeliefStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)
    }
}
