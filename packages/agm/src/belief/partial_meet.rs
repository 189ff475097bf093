use std::fmt::Display;

use colored::Colorize;
use itertools::Itertools;

use crate::{
    belief::base::{Belief, BeliefBase},
    config::{defaults::SUBSET_LIMIT, Config, Priority},
    error::LimitExceeded,
    explanation::Explain,
    log::targets::PARTIAL_MEET as LOG_PARTIAL_MEET,
    propositional_logic::{
        parser::{normalize, parse_lenient},
        solvers::solve::Solve,
        types::Proposition,
    },
};

/// Contraction by intersecting maximal non-implying subsets of a base.
///
/// The power set is enumerated in full, so `subset_limit` bounds the size of
/// the base it accepts.
#[derive(Debug, Clone)]
pub struct PartialMeetContractor<O: Solve> {
    oracle: O,
    subset_limit: Option<usize>,
}

impl<O: Solve> PartialMeetContractor<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            subset_limit: SUBSET_LIMIT,
        }
    }

    pub fn from_config(oracle: O, config: &Config) -> Self {
        Self {
            oracle,
            subset_limit: config.subset_limit,
        }
    }

    pub fn with_subset_limit(self, subset_limit: Option<usize>) -> Self {
        Self {
            subset_limit,
            ..self
        }
    }

    fn implies(
        &self,
        subset: &[&Belief],
        target: &Proposition,
        explanation: &mut impl Explain,
    ) -> Result<bool, LimitExceeded> {
        let premises = subset
            .iter()
            .map(|belief| belief.proposition())
            .collect::<Vec<_>>();

        self.oracle.implies(&premises, target, explanation)
    }

    /// Every subset of `base` that does not imply `target` and becomes
    /// implying as soon as any excluded belief is added back.
    pub fn remainders(
        &self,
        base: &BeliefBase,
        target: &str,
        explanation: &mut impl Explain,
    ) -> Result<Remainders, LimitExceeded> {
        if let Some(limit) = self.subset_limit {
            if base.len() > limit {
                log::warn!(
                    target: LOG_PARTIAL_MEET,
                    "Refusing the power set of {} beliefs.",
                    base.len()
                );
                return Err(LimitExceeded::Subsets {
                    limit,
                    beliefs: base.len(),
                });
            }
        }

        let target_text = normalize(target);
        let target = parse_lenient(&target_text);
        let beliefs = base.iter().collect::<Vec<_>>();

        let sets = explanation.with_subexplanation(
            || format!("Computing the remainders of {} by {}", base, target_text.blue()),
            |explanation| {
                let mut sets = Vec::new();

                for subset in beliefs.iter().copied().powerset() {
                    if self.implies(&subset, &target, explanation)? {
                        continue;
                    }

                    let mut maximal = true;
                    for &excluded in beliefs.iter().filter(|b| !subset.contains(b)) {
                        let mut extended = subset.clone();
                        extended.push(excluded);

                        if !self.implies(&extended, &target, explanation)? {
                            maximal = false;
                            break;
                        }
                    }

                    if maximal {
                        explanation.step(|| {
                            format!("Remainder {}", format_beliefs(subset.iter().copied()).green())
                        });
                        sets.push(subset.into_iter().cloned().collect::<Vec<_>>());
                    }
                }

                Ok::<_, LimitExceeded>(sets)
            },
        )?;

        log::debug!(
            target: LOG_PARTIAL_MEET,
            "{} remainders of {} beliefs by \"{target_text}\".",
            sets.len(),
            base.len()
        );

        Ok(Remainders {
            base: base.iter().cloned().collect(),
            sets,
        })
    }

    /// Full meet contraction: the beliefs shared by every remainder.
    pub fn contract(
        &self,
        base: &BeliefBase,
        target: &str,
        explanation: &mut impl Explain,
    ) -> Result<Vec<Belief>, LimitExceeded> {
        Ok(self.remainders(base, target, explanation)?.full_meet())
    }
}

/// The remainder family of a base, each remainder kept in base order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remainders {
    base: Vec<Belief>,
    sets: Vec<Vec<Belief>>,
}

impl Remainders {
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Belief]> {
        self.sets.iter().map(Vec::as_slice)
    }

    /// Intersection of all remainders. With no remainders (the target is a
    /// tautology) nothing can be given up, so the whole base is returned.
    pub fn full_meet(&self) -> Vec<Belief> {
        Self::meet(&self.base, self.sets.iter())
    }

    /// Intersection of the remainders with the greatest total priority.
    pub fn meet_by_priority(&self) -> Vec<Belief> {
        let total = |set: &Vec<Belief>| set.iter().map(Belief::priority).sum::<Priority>();

        match self.sets.iter().map(total).max() {
            Some(best) => Self::meet(
                &self.base,
                self.sets.iter().filter(|&set| total(set) == best),
            ),
            None => self.base.clone(),
        }
    }

    fn meet<'a>(
        base: &[Belief],
        mut selected: impl Iterator<Item = &'a Vec<Belief>>,
    ) -> Vec<Belief> {
        let Some(first) = selected.next() else {
            return base.to_vec();
        };

        let rest = selected.collect::<Vec<_>>();
        first
            .iter()
            .filter(|belief| rest.iter().all(|set| set.contains(belief)))
            .cloned()
            .collect()
    }
}

fn format_beliefs<'a>(beliefs: impl Iterator<Item = &'a Belief>) -> String {
    format!("{{{}}}", beliefs.map(Belief::formula).join(", "))
}

impl Display for Remainders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for set in &self.sets {
            writeln!(f, "{}", format_beliefs(set.iter()))?;
        }

        Ok(())
    }
}
