//! folio-studio library - portfolio backend with message enhancement,
//! design idea templates and generative-AI proxies

pub mod client;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod http_logger;
pub mod server;
pub mod service;

// Re-export commonly used types
pub use client::StudioClient;
pub use config::{Config, ConfigOptions};
pub use enhancer::{enhance, enhance_submission, lookup};
pub use error::AppError;
pub use server::AppServer;
pub use service::{ContactSubmission, GeneratedImage, ImageMode};
