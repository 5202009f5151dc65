//! Message enhancement, canned design ideas and provider prompt templates

pub mod ideas;
pub mod message;
pub mod templates;

pub use ideas::lookup;
pub use message::{enhance, enhance_submission};
