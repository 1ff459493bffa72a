pub mod defaults;
pub mod types;
