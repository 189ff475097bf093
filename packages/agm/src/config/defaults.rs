use crate::config;

pub const EXPANSION_POLICY: config::ExpansionPolicy = config::ExpansionPolicy::Guarded;

pub const RESOLUTION_LIMIT: Option<usize> = None;
pub const SUBSET_LIMIT: Option<usize> = Some(16);
pub const TRUTH_TABLE_LIMIT: usize = 24;

pub const DEFAULT_PRIORITY: config::Priority = 0;
