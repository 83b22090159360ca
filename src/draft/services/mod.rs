//! Application services for drafting.
//!
//! Services tie the draft domain to the directory and sender ports: the
//! suggestion engine resolves triggers, and the compose service runs an
//! editing session end to end.

mod compose;
mod suggestion;


pub use compose::ComposeService;
pub use suggestion::{
    Epoch, SuggestionEngine, SuggestionRequest, SuggestionResponse, SuggestionSet,
};
