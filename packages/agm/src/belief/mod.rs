pub mod base;
pub mod partial_meet;
pub mod postulates;
pub mod store;
