// ABOUTME: Funnel orchestration for the Stayscope assessment flow
// ABOUTME: Steps from landing through conversation, report generation, booking and unlock

pub mod flow;
pub mod notice;

pub use flow::{AssessmentFlow, ContactInfo, FlowSignal, FlowStep};
pub use notice::FlowNotice;
