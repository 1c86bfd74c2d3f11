use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use tracing::{info, warn};

use stayscope_ai::{GenerationError, GenerationResult, ImageGenerator, TextGenerator};
use stayscope_core::{ProjectFacts, ReportResult, ScenarioTier};

use crate::brief::{build_brief, SYSTEM_PROMPT};
use crate::image_prompt::build_image_prompt;
use crate::normalize::{normalize_report, RawReport};

/// Stage one: brief the text collaborator and normalize what comes back.
/// Any failure here aborts the whole run.
pub async fn generate_scenarios(
    text: &dyn TextGenerator,
    facts: &ProjectFacts,
) -> GenerationResult<ReportResult> {
    let brief = build_brief(facts);
    info!(brief_chars = brief.len(), "requesting feasibility scenarios");

    let value = text.generate_structured(&brief, SYSTEM_PROMPT).await?;
    let raw: RawReport = serde_json::from_value(value).map_err(|error| {
        GenerationError::MalformedResponse(format!("report JSON has the wrong shape: {error}"))
    })?;

    let bracket = facts.budget_bracket().unwrap_or_default();
    let report = normalize_report(raw, bracket);
    info!(scenarios = report.scenarios.len(), "scenarios normalized");
    Ok(report)
}

/// Stage two: render one interior image per scenario. All requests run at
/// once and every outcome is collected; a failed render leaves its scenario
/// without an image and never sinks the batch. Progress is reported as each
/// request settles, success or not.
pub async fn attach_images(
    images: &dyn ImageGenerator,
    facts: &ProjectFacts,
    report: &mut ReportResult,
    on_progress: &(dyn Fn(u8) + Send + Sync),
) {
    let total = report.scenarios.len().max(1);
    let completed = AtomicUsize::new(0);
    let completed = &completed;

    let renders = report.scenarios.iter().enumerate().map(|(index, scenario)| {
        let prompt = build_image_prompt(facts, ScenarioTier::from_index(index));
        async move {
            let outcome = images.generate(&prompt).await;
            let settled = completed.fetch_add(1, Ordering::SeqCst) + 1;
            on_progress((settled * 100 / total) as u8);
            match outcome {
                Ok(url) => Some(url),
                Err(error) => {
                    warn!(
                        scenario = %scenario.name,
                        %error,
                        "scenario image generation failed, continuing without it"
                    );
                    None
                }
            }
        }
    });

    let urls = join_all(renders).await;
    for (scenario, url) in report.scenarios.iter_mut().zip(urls) {
        scenario.image_url = url;
    }
}

/// Full pipeline: scenarios, then images, then the stamped result
pub async fn generate_report(
    text: &dyn TextGenerator,
    images: &dyn ImageGenerator,
    facts: &ProjectFacts,
    on_progress: &(dyn Fn(u8) + Send + Sync),
) -> GenerationResult<ReportResult> {
    let mut report = generate_scenarios(text, facts).await?;
    attach_images(images, facts, &mut report, on_progress).await;
    Ok(report)
}
