pub mod resolution;
pub mod solve;
pub mod truth_table;
