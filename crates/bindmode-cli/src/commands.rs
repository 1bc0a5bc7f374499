pub mod analyze;
pub mod defaults;
