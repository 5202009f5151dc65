//! Service modules for the external providers

pub mod common;
pub mod form_relay;
pub(crate) mod gemini;
pub mod image;

// Re-export commonly used items
pub use common::{build_model_url, check_provider_status, ProviderConfig};
pub use form_relay::{submit_contact, ContactSubmission};
pub use gemini::generate_text;
pub use image::{build_pollinations_url, generate_image, GeneratedImage, ImageMode};
