use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub mod defaults;

pub type Priority = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub expansion: ExpansionPolicy,
    /// Largest working clause set a single refutation may build.
    pub resolution_limit: Option<usize>,
    /// Largest belief list the partial meet contractor will take the power set of.
    pub subset_limit: Option<usize>,
    pub default_priority: Priority,
}

impl Default for Config {
    fn default() -> Self {
        use defaults::*;
        Config {
            expansion: EXPANSION_POLICY,
            resolution_limit: RESOLUTION_LIMIT,
            subset_limit: SUBSET_LIMIT,
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

impl Config {
    pub fn with_expansion(self, expansion: ExpansionPolicy) -> Self {
        Config { expansion, ..self }
    }

    pub fn with_resolution_limit(self, resolution_limit: Option<usize>) -> Self {
        Config {
            resolution_limit,
            ..self
        }
    }

    pub fn with_subset_limit(self, subset_limit: Option<usize>) -> Self {
        Config {
            subset_limit,
            ..self
        }
    }
}

/// How `expand` treats a formula whose negation the base already entails.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExpansionPolicy {
    /// Reject the formula and leave the base untouched.
    Guarded,
    /// Add the formula anyway and report that the base became inconsistent.
    Permissive,
}
