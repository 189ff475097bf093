pub mod evaluate;
pub mod normal_forms;
pub mod parser;
pub mod solvers;
pub mod types;
