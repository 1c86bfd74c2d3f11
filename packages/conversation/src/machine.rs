use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use stayscope_core::{
    apply_answer, optional_questions, required_questions, AnswerValue, ChatOption, ProjectFacts,
    Question, IMAGE_MARKER,
};

use crate::schedule::{Scheduler, Transition};
use crate::transcript::Transcript;

/// Which question list the conversation is walking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Required,
    Optional,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Required
    }
}

/// Snapshot of (phase, index) taken just before an answer advances the
/// flow, so a re-edit can land back exactly where the answer was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryFrame {
    pub question_index: usize,
    pub phase: Phase,
}

/// Raised by `tick` when a terminal transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationSignal {
    Completed,
}

/// What should happen to an exit request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDisposition {
    /// Answers exist; ask before throwing them away
    Confirm,
    /// Nothing recorded yet; leaving loses nothing
    Leave,
}

pub const WELCOME_REVEAL: Duration = Duration::from_millis(500);
pub const WELCOME_TO_FIRST_QUESTION: Duration = Duration::from_millis(1000);
pub const QUESTION_REVEAL: Duration = Duration::from_millis(800);
pub const INPUT_SURFACE: Duration = Duration::from_millis(300);
pub const ANSWER_ADVANCE: Duration = Duration::from_millis(500);
pub const REEDIT_REVEAL: Duration = Duration::from_millis(300);

/// Sentinel recorded when a skippable question is skipped
pub const SKIP_SENTINEL: &str = "Skipped";

/// The scripted conversation. All operations are total: calls that arrive
/// in the wrong state are logged no-ops. Nothing here blocks or awaits;
/// reveal pacing is queued on the scheduler and fired by `tick`.
#[derive(Debug, Default)]
pub struct Conversation {
    transcript: Transcript,
    phase: Phase,
    question_index: usize,
    history: Vec<HistoryFrame>,
    awaiting_response: bool,
    revealing: bool,
    started: bool,
    completed: bool,
    scheduler: Scheduler,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// First activation: queue the welcome reveal. Calling again is a no-op,
    /// so a re-rendered screen cannot double-start the flow.
    pub fn start(&mut self, now: Instant) {
        if self.started {
            debug!("conversation already started, ignoring start");
            return;
        }
        self.started = true;
        self.revealing = true;
        self.scheduler
            .schedule_at(now + WELCOME_REVEAL, Transition::RevealWelcome);
    }

    /// Fire every transition whose deadline has passed. Transitions queued
    /// by a fired transition are picked up in the same call when their
    /// deadline is already behind `now`, so a long gap settles fully.
    pub fn tick(&mut self, now: Instant) -> Vec<ConversationSignal> {
        let mut signals = Vec::new();
        loop {
            let due = self.scheduler.fire_due(now);
            if due.is_empty() {
                break;
            }
            for transition in due {
                self.apply(transition, now, &mut signals);
            }
        }
        signals
    }

    /// Answer the current question with one of its options
    pub fn record_option(&mut self, facts: &mut ProjectFacts, now: Instant, option: &ChatOption) {
        if !self.can_accept_input() {
            debug!("option ignored, no question is awaiting a response");
            return;
        }
        if option.is_custom() {
            // the screen swaps to free-text entry; nothing to record yet
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };

        self.transcript.push_user(&option.label);
        self.push_frame();
        self.awaiting_response = false;

        if question.is_gate {
            if option.value == "no" {
                self.scheduler
                    .schedule_at(now + ANSWER_ADVANCE, Transition::Complete);
            } else {
                self.scheduler
                    .schedule_at(now + ANSWER_ADVANCE, Transition::Advance { index: 1 });
            }
            return;
        }

        if let Some(path) = question.binding {
            apply_answer(facts, path, AnswerValue::text(option.value.clone()));
        }
        self.schedule_advance(now);
    }

    /// Answer the current question with free text, optionally marking an
    /// attached image
    pub fn record_text(
        &mut self,
        facts: &mut ProjectFacts,
        now: Instant,
        text: &str,
        has_image: bool,
    ) {
        if !self.can_accept_input() {
            debug!("text ignored, no question is awaiting a response");
            return;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() && !has_image {
            debug!("empty submit ignored");
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };

        let display = if has_image {
            if trimmed.is_empty() {
                IMAGE_MARKER.to_string()
            } else {
                format!("{trimmed}\n{IMAGE_MARKER}")
            }
        } else {
            trimmed.to_string()
        };
        let recorded = if trimmed.is_empty() {
            IMAGE_MARKER.to_string()
        } else {
            trimmed.to_string()
        };

        self.transcript.push_user(display);
        self.push_frame();
        self.awaiting_response = false;

        if let Some(path) = question.binding {
            apply_answer(facts, path, AnswerValue::Text(recorded));
        }
        self.schedule_advance(now);
    }

    /// Pass on the current question without recording a fact
    pub fn skip(&mut self, now: Instant) {
        if !self.can_accept_input() {
            debug!("skip ignored, no question is awaiting a response");
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        if !question.skippable {
            debug!("skip ignored, question {} cannot be skipped", question.id);
            return;
        }

        self.transcript.push_user(SKIP_SENTINEL);
        self.push_frame();
        self.awaiting_response = false;
        self.schedule_advance(now);
    }

    /// Jump back to a previously answered question. The target entry, the
    /// machine question right before it, and everything after are dropped;
    /// phase and index are restored from the matching history frame and the
    /// question is revealed again. Invalid targets are no-ops.
    pub fn re_edit(&mut self, now: Instant, transcript_index: usize) {
        if self.completed {
            debug!("re-edit ignored, conversation is complete");
            return;
        }
        if self.revealing {
            debug!("re-edit ignored while a reveal is in progress");
            return;
        }
        if transcript_index + 1 >= self.transcript.len() {
            debug!("re-edit ignored, the latest entry cannot be re-edited");
            return;
        }
        let Some(ordinal) = self.transcript.user_ordinal(transcript_index) else {
            debug!("re-edit ignored, target is not a user entry");
            return;
        };
        let user_count = self.transcript.user_count();
        let Some(frame_index) = (self.history.len() + ordinal).checked_sub(user_count) else {
            debug!("re-edit ignored, no history frame matches the entry");
            return;
        };
        let Some(frame) = self.history.get(frame_index).copied() else {
            debug!("re-edit ignored, no history frame matches the entry");
            return;
        };

        let keep = if transcript_index > 0 {
            transcript_index - 1
        } else {
            transcript_index
        };
        self.transcript.truncate(keep);
        self.history.truncate(frame_index);
        self.phase = frame.phase;
        self.question_index = frame.question_index;
        self.awaiting_response = false;

        // pending advances captured the pre-edit index; they must not fire
        // into the restored state
        self.scheduler.clear();
        self.revealing = true;
        self.scheduler.schedule_at(
            now + REEDIT_REVEAL,
            Transition::RevealQuestion {
                index: frame.question_index,
            },
        );
    }

    /// Whether leaving needs a confirmation first
    pub fn request_exit(&self) -> ExitDisposition {
        if self.history.is_empty() {
            ExitDisposition::Leave
        } else {
            ExitDisposition::Confirm
        }
    }

    // ==== Accessors ====

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The question the flow currently points at
    pub fn current_question(&self) -> Option<&'static Question> {
        self.questions().get(self.question_index)
    }

    /// Completion percentage shown in the header. The optional phase always
    /// reads 100; the welcome counts as zero.
    pub fn progress_percent(&self) -> u8 {
        match self.phase {
            Phase::Optional => 100,
            Phase::Required => {
                let denominator = (required_questions().len() - 1) as f64;
                ((self.question_index as f64 / denominator) * 100.0).round() as u8
            }
        }
    }

    /// (current, total) counter over the required questions, welcome excluded
    pub fn required_position(&self) -> (usize, usize) {
        (self.question_index.max(1), required_questions().len() - 1)
    }

    // ==== Internals ====

    fn can_accept_input(&self) -> bool {
        self.started && !self.completed && self.awaiting_response && !self.revealing
    }

    fn questions(&self) -> &'static [Question] {
        match self.phase {
            Phase::Required => required_questions(),
            Phase::Optional => optional_questions(),
        }
    }

    fn push_frame(&mut self) {
        self.history.push(HistoryFrame {
            question_index: self.question_index,
            phase: self.phase,
        });
    }

    fn schedule_advance(&mut self, now: Instant) {
        self.scheduler.schedule_at(
            now + ANSWER_ADVANCE,
            Transition::Advance {
                index: self.question_index + 1,
            },
        );
    }

    fn apply(
        &mut self,
        transition: Transition,
        now: Instant,
        signals: &mut Vec<ConversationSignal>,
    ) {
        if self.completed {
            return;
        }
        match transition {
            Transition::RevealWelcome => {
                let welcome = &required_questions()[0];
                self.transcript.push_assistant(&welcome.text);
                self.revealing = false;
                self.scheduler.schedule_at(
                    now + WELCOME_TO_FIRST_QUESTION,
                    Transition::Advance { index: 1 },
                );
            }
            Transition::Advance { index } => self.advance(index, now, signals),
            Transition::RevealQuestion { index } => {
                let Some(question) = self.questions().get(index) else {
                    debug!("reveal for out-of-range question {} dropped", index);
                    self.revealing = false;
                    return;
                };
                self.transcript.push_assistant(&question.text);
                self.question_index = index;
                self.revealing = false;
                self.scheduler
                    .schedule_at(now + INPUT_SURFACE, Transition::SurfaceInput);
            }
            Transition::SurfaceInput => {
                self.awaiting_response = true;
            }
            Transition::Complete => self.finish(signals),
        }
    }

    fn advance(&mut self, index: usize, now: Instant, signals: &mut Vec<ConversationSignal>) {
        if self.revealing {
            debug!("advance to {} coalesced, a reveal is already pending", index);
            return;
        }
        if index >= self.questions().len() {
            match self.phase {
                Phase::Required => {
                    self.phase = Phase::Optional;
                    self.question_index = 0;
                    self.reveal(0, now);
                }
                Phase::Optional => self.finish(signals),
            }
        } else {
            self.reveal(index, now);
        }
    }

    fn reveal(&mut self, index: usize, now: Instant) {
        self.revealing = true;
        self.awaiting_response = false;
        self.scheduler
            .schedule_at(now + QUESTION_REVEAL, Transition::RevealQuestion { index });
    }

    fn finish(&mut self, signals: &mut Vec<ConversationSignal>) {
        self.completed = true;
        self.awaiting_response = false;
        self.revealing = false;
        signals.push(ConversationSignal::Completed);
    }
}
