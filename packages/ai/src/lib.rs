// ABOUTME: Generative collaborator clients for the Stayscope funnel
// ABOUTME: OpenAI-style text and image generation behind async traits, with a shared error taxonomy

pub mod error;
pub mod image;
pub mod text;

pub use error::{GenerationError, GenerationResult};
pub use image::{ImageGenerator, OpenAiImageClient};
pub use text::{OpenAiTextClient, TextGenerator};
