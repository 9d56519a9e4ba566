//! Message routing: empty check, greeting, FAQ lookup, generative fallback.
//!
//! Every path ends in a non-empty reply. Provider and encoder failures are
//! logged and degrade to the next stage or to the fixed fallback message.

pub mod responder;
pub mod stage;


pub use responder::ResponseRouter;
pub use stage::{ResponseSource, RoutedResponse, Stage, is_greeting};
