// ABOUTME: Report request pipeline for the Stayscope funnel
// ABOUTME: Builds the project brief, normalizes generated scenarios against the budget, and fans out image generation

pub mod brief;
pub mod image_prompt;
pub mod normalize;
pub mod pipeline;

pub use brief::{build_brief, SYSTEM_PROMPT};
pub use image_prompt::build_image_prompt;
pub use normalize::{normalize_report, RawReport, RawScenario};
pub use pipeline::{attach_images, generate_report, generate_scenarios};
