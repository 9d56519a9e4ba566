//! Semantic FAQ matching.
//!
//! Given a query, encode it, take the inner product against every precomputed
//! answer embedding and return the best row if its score is strictly above the
//! confidence threshold (0.6 by default).

pub mod error;
pub mod semantic;
pub mod types;


pub use error::MatcherError;
pub use semantic::{SemanticMatcher, best_row, dot, similarity_scores};
pub use types::{MatchResult, MatcherConfig};
