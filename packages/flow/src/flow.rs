use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, error, info};

use stayscope_ai::{ImageGenerator, TextGenerator};
use stayscope_conversation::{Conversation, ConversationSignal, ExitDisposition};
use stayscope_core::{ChatOption, ProjectFacts, ReportResult};
use stayscope_report::{attach_images, generate_scenarios};

use crate::notice::FlowNotice;

/// Screens of the funnel in visit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    Landing,
    Conversation,
    Loading,
    Preview,
    Booking,
    Unlocked,
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowStep::Landing => "landing",
            FlowStep::Conversation => "conversation",
            FlowStep::Loading => "loading",
            FlowStep::Preview => "preview",
            FlowStep::Booking => "booking",
            FlowStep::Unlocked => "unlocked",
        };
        write!(f, "{name}")
    }
}

/// Contact details collected by the booking screen. Validation happens
/// before construction; the flow only stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Raised by `tick` when the conversation has collected everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowSignal {
    ReportRequested,
}

/// The whole funnel in one owned value: current step, collected facts, the
/// scripted conversation, the generated report, and booking state. All
/// transitions are explicit method calls; invalid ones are logged no-ops.
pub struct AssessmentFlow {
    step: FlowStep,
    facts: ProjectFacts,
    conversation: Conversation,
    report: Option<ReportResult>,
    unlocked: bool,
    contact: Option<ContactInfo>,
    progress: watch::Sender<u8>,
    generating_images: bool,
    notice: Option<FlowNotice>,
}

impl Default for AssessmentFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentFlow {
    pub fn new() -> Self {
        let (progress, _) = watch::channel(0);
        Self {
            step: FlowStep::Landing,
            facts: ProjectFacts::default(),
            conversation: Conversation::new(),
            report: None,
            unlocked: false,
            contact: None,
            progress,
            generating_images: false,
            notice: None,
        }
    }

    /// Leave the landing page and activate the conversation. Calling again
    /// mid-funnel changes nothing.
    pub fn start(&mut self, now: Instant) {
        if self.step != FlowStep::Landing {
            debug!(step = %self.step, "start ignored outside the landing page");
            return;
        }
        self.set_step(FlowStep::Conversation);
        self.conversation.start(now);
    }

    /// Drive the conversation clock. A completed script surfaces as a report
    /// request; the caller decides when to run the pipeline.
    pub fn tick(&mut self, now: Instant) -> Option<FlowSignal> {
        if self.step != FlowStep::Conversation {
            return None;
        }
        let signals = self.conversation.tick(now);
        if signals.contains(&ConversationSignal::Completed) {
            info!("conversation complete, report requested");
            return Some(FlowSignal::ReportRequested);
        }
        None
    }

    pub fn answer_option(&mut self, now: Instant, option: &ChatOption) {
        self.conversation.record_option(&mut self.facts, now, option);
    }

    pub fn answer_text(&mut self, now: Instant, text: &str, has_image: bool) {
        self.conversation.record_text(&mut self.facts, now, text, has_image);
    }

    pub fn skip(&mut self, now: Instant) {
        self.conversation.skip(now);
    }

    pub fn re_edit(&mut self, now: Instant, transcript_index: usize) {
        self.conversation.re_edit(now, transcript_index);
    }

    /// Whether leaving the conversation needs a confirmation first
    pub fn request_exit(&self) -> ExitDisposition {
        self.conversation.request_exit()
    }

    /// Leave the conversation and throw away everything entered so far. The
    /// confirmation dialog promises exactly this.
    pub fn abandon(&mut self) {
        info!("conversation abandoned, answers discarded");
        self.facts = ProjectFacts::default();
        self.conversation = Conversation::new();
        self.set_step(FlowStep::Landing);
    }

    /// Run the report pipeline against a snapshot of the collected facts.
    /// Success lands on the preview. Failure stores a notice and returns to
    /// the conversation with every answer intact, so the user can retry.
    pub async fn complete(&mut self, text: &dyn TextGenerator, images: &dyn ImageGenerator) {
        self.set_step(FlowStep::Loading);
        self.generating_images = false;
        self.notice = None;
        self.progress.send_replace(0);

        let facts = self.facts.clone();
        match generate_scenarios(text, &facts).await {
            Ok(mut report) => {
                self.generating_images = true;
                {
                    let progress = &self.progress;
                    let on_progress = move |percent: u8| {
                        progress.send_replace(percent);
                    };
                    attach_images(images, &facts, &mut report, &on_progress).await;
                }
                self.generating_images = false;
                self.progress.send_replace(100);
                self.report = Some(report);
                self.set_step(FlowStep::Preview);
            }
            Err(err) => {
                error!(%err, "report generation failed, returning to the conversation");
                self.notice = Some(FlowNotice::from_error(&err));
                self.generating_images = false;
                self.progress.send_replace(0);
                self.set_step(FlowStep::Conversation);
            }
        }
    }

    /// Preview → booking
    pub fn open_booking(&mut self) {
        if self.step != FlowStep::Preview {
            debug!(step = %self.step, "booking ignored outside the preview");
            return;
        }
        self.set_step(FlowStep::Booking);
    }

    /// Store the contact details and unlock the full report
    pub fn book(&mut self, contact: ContactInfo) {
        if self.step != FlowStep::Booking {
            debug!(step = %self.step, "booking submission ignored outside the booking step");
            return;
        }
        self.contact = Some(contact);
        self.unlocked = true;
        self.set_step(FlowStep::Unlocked);
    }

    /// Back to the very beginning, nothing kept
    pub fn reset(&mut self) {
        info!("flow reset to landing");
        self.step = FlowStep::Landing;
        self.facts = ProjectFacts::default();
        self.conversation = Conversation::new();
        self.report = None;
        self.unlocked = false;
        self.contact = None;
        self.generating_images = false;
        self.notice = None;
        self.progress.send_replace(0);
    }

    // ==== Accessors ====

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn facts(&self) -> &ProjectFacts {
        &self.facts
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn report(&self) -> Option<&ReportResult> {
        self.report.as_ref()
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn contact(&self) -> Option<&ContactInfo> {
        self.contact.as_ref()
    }

    pub fn is_generating_images(&self) -> bool {
        self.generating_images
    }

    /// Current image-generation progress in percent
    pub fn image_progress(&self) -> u8 {
        *self.progress.borrow()
    }

    /// Subscribe to image-generation progress updates
    pub fn watch_image_progress(&self) -> watch::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn notice(&self) -> Option<&FlowNotice> {
        self.notice.as_ref()
    }

    /// One-shot read of the pending notice; showing it consumes it
    pub fn take_notice(&mut self) -> Option<FlowNotice> {
        self.notice.take()
    }

    fn set_step(&mut self, step: FlowStep) {
        if self.step != step {
            info!(from = %self.step, to = %step, "flow step changed");
        }
        self.step = step;
    }
}
