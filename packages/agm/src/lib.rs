pub mod belief;
pub mod config;
pub mod error;
pub mod explanation;
pub mod log;
pub mod mastermind;
pub mod propositional_logic;
