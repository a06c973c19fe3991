//! Search session module
//!
//! Ties the registry, the extractor and the store together for one invocation.

mod session;

pub use session::SearchSession;
