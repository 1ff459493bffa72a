pub mod events;
pub mod matching_engine;
pub mod session;
pub mod validation;
