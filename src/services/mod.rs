//! Services outside the panel itself
//!
//! - `store` - the JSON-backed owner of the question list

pub mod store;

pub use store::QuestionStore;
