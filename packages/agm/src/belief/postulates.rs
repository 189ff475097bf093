use std::{collections::BTreeSet, fmt::Display};

use colored::Colorize;

use crate::{
    belief::store::BeliefStore,
    config::Priority,
    error::LimitExceeded,
    explanation::Explain,
    log::targets::POSTULATES as LOG_POSTULATES,
    propositional_logic::parser::{negate, normalize},
};

/// Outcome of the five AGM checks for expanding a store by one formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostulateReport {
    pub success: bool,
    pub inclusion: bool,
    pub vacuity: bool,
    pub consistency: bool,
    pub extensionality: bool,
}

impl PostulateReport {
    pub fn all_hold(&self) -> bool {
        self.success && self.inclusion && self.vacuity && self.consistency && self.extensionality
    }

    fn checks(&self) -> [(&'static str, bool); 5] {
        [
            ("Success", self.success),
            ("Inclusion", self.inclusion),
            ("Vacuity", self.vacuity),
            ("Consistency", self.consistency),
            ("Extensionality", self.extensionality),
        ]
    }
}

impl Display for PostulateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, holds)) in self.checks().into_iter().enumerate() {
            writeln!(
                f,
                "{}. {}: {}",
                i + 1,
                name,
                if holds { "holds".green() } else { "fails".red() }
            )?;
        }

        Ok(())
    }
}

fn formula_set(store: &BeliefStore) -> BTreeSet<String> {
    store.formulas().into_iter().map(str::to_owned).collect()
}

/// Runs the postulate checks for expanding `store` by `formula`.
/// `store` itself is never changed.
pub fn verify_postulates(
    store: &BeliefStore,
    formula: &str,
    priority: Priority,
    explanation: &mut impl Explain,
) -> Result<PostulateReport, LimitExceeded> {
    let formula = normalize(formula);

    explanation.with_subexplanation(
        || format!("Testing the AGM postulates for {}", formula.blue()),
        |explanation| {
            let original = formula_set(store);
            let consistent_before = store.is_consistent(explanation)?;

            let mut expanded = store.clone();
            expanded.expand(&formula, priority, explanation)?;

            let success = expanded.entails(&formula, explanation)?;

            let inclusion = original.is_subset(&formula_set(&expanded));

            let before = formula_set(&expanded);
            expanded.expand(&formula, priority, explanation)?;
            let vacuity = before == formula_set(&expanded);

            let consistency = !consistent_before || expanded.is_consistent(explanation)?;

            let mut doubly_negated = store.clone();
            doubly_negated.expand(&negate(&negate(&formula)), priority, explanation)?;
            let extensionality = formula_set(&expanded) == formula_set(&doubly_negated);

            let report = PostulateReport {
                success,
                inclusion,
                vacuity,
                consistency,
                extensionality,
            };

            for (name, holds) in report.checks() {
                explanation.step(|| format!("{name}: {holds}"));
                if !holds {
                    log::info!(target: LOG_POSTULATES, "{name} fails for \"{formula}\".");
                }
            }

            Ok(report)
        },
    )
}
