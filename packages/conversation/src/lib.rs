// ABOUTME: Scripted conversation state machine for the assessment funnel
// ABOUTME: Transcript, reveal pacing, history frames, and re-edit driven by tick deadlines

pub mod machine;
pub mod schedule;
pub mod transcript;

pub use machine::{
    Conversation, ConversationSignal, ExitDisposition, HistoryFrame, Phase, ANSWER_ADVANCE,
    INPUT_SURFACE, QUESTION_REVEAL, REEDIT_REVEAL, SKIP_SENTINEL, WELCOME_REVEAL,
    WELCOME_TO_FIRST_QUESTION,
};
pub use stayscope_core::IMAGE_MARKER;
pub use schedule::{Scheduler, Transition};
pub use transcript::{Author, Transcript, TranscriptEntry};
