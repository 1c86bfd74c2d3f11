// Integration tests walking the scripted conversation end to end

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use stayscope_conversation::{
    Author, Conversation, ConversationSignal, ExitDisposition, Phase, SKIP_SENTINEL,
};
use stayscope_core::ProjectFacts;

const STEP: Duration = Duration::from_secs(3);

const REQUIRED_ANSWERS: [&str; 10] = [
    "planning",
    "gangwon",
    "tourist",
    "pension",
    "10-20",
    "330–660㎡",
    "3–5 floors",
    "6–15 spaces",
    "5b-15b",
    "no",
];

/// Conversation settled on the first required question
fn started() -> (Conversation, ProjectFacts, Instant) {
    let mut conversation = Conversation::new();
    let facts = ProjectFacts::default();
    let t0 = Instant::now();
    conversation.start(t0);
    let now = t0 + STEP;
    conversation.tick(now);
    (conversation, facts, now)
}

/// Answer the current question by option value and settle the next reveal
fn answer(
    conversation: &mut Conversation,
    facts: &mut ProjectFacts,
    now: Instant,
    value: &str,
) -> Instant {
    let option = conversation
        .current_question()
        .unwrap_or_else(|| panic!("no current question while answering {value}"))
        .option(value)
        .unwrap_or_else(|| panic!("option {value} not found"))
        .clone();
    conversation.record_option(facts, now, &option);
    let now = now + STEP;
    conversation.tick(now);
    now
}

/// Conversation settled on the optional-phase gate, with all required
/// questions answered
fn at_gate() -> (Conversation, ProjectFacts, Instant) {
    let (mut conversation, mut facts, mut now) = started();
    for value in REQUIRED_ANSWERS {
        now = answer(&mut conversation, &mut facts, now, value);
    }
    (conversation, facts, now)
}

#[test]
fn test_required_walkthrough_flips_into_optional_phase() {
    let (mut conversation, mut facts, mut now) = started();
    assert_eq!(conversation.phase(), Phase::Required);

    for value in REQUIRED_ANSWERS {
        now = answer(&mut conversation, &mut facts, now, value);
    }

    // all ten answers landed in the facts
    assert_eq!(facts.project_status, "planning");
    assert_eq!(facts.location.region, "gangwon");
    assert_eq!(facts.location.location_type, "tourist");
    assert_eq!(facts.accommodation_type, "pension");
    assert_eq!(facts.scale.rooms, "10-20");
    assert_eq!(facts.scale.area, "330–660㎡");
    assert_eq!(facts.scale.floors, "3–5 floors");
    assert_eq!(facts.scale.parking, "6–15 spaces");
    assert_eq!(facts.budget, "5b-15b");
    assert!(!facts.include_building_purchase);

    // advancing past the last required question lands on the gate intro
    assert_eq!(conversation.phase(), Phase::Optional);
    assert_eq!(conversation.question_index(), 0);
    assert!(conversation.current_question().unwrap().is_gate);
    assert!(conversation.awaiting_response());
    assert_eq!(conversation.progress_percent(), 100);

    // welcome + 10 questions + 10 answers + gate
    assert_eq!(conversation.transcript().len(), 22);
    assert_eq!(conversation.history_len(), 10);
}

#[test]
fn test_gate_no_completes_without_optional_questions() {
    let (mut conversation, mut facts, now) = at_gate();

    let no = conversation
        .current_question()
        .unwrap()
        .option("no")
        .unwrap()
        .clone();
    conversation.record_option(&mut facts, now, &no);

    // completion is delayed like any other advance
    assert!(conversation.tick(now).is_empty());
    let signals = conversation.tick(now + Duration::from_millis(600));
    assert_eq!(signals, vec![ConversationSignal::Completed]);
    assert!(conversation.is_complete());

    // the decline is in the transcript but wrote no fact
    let last = conversation.transcript().last().unwrap();
    assert_eq!(last.author, Author::User);
    assert_eq!(last.content, "No, show my report now");
    assert_eq!(facts.target_customer, "");
}

#[test]
fn test_gate_yes_advances_without_fact_write() {
    let (mut conversation, mut facts, now) = at_gate();
    let snapshot = facts.clone();

    answer(&mut conversation, &mut facts, now, "yes");

    assert_eq!(facts, snapshot);
    assert_eq!(conversation.phase(), Phase::Optional);
    assert_eq!(conversation.question_index(), 1);
    assert_eq!(
        conversation.current_question().unwrap().id,
        "target-customer"
    );
}

#[test]
fn test_optional_walkthrough_completes_after_last_question() {
    let (mut conversation, mut facts, mut now) = at_gate();
    now = answer(&mut conversation, &mut facts, now, "yes");
    now = answer(&mut conversation, &mut facts, now, "family");
    now = answer(&mut conversation, &mut facts, now, "minimal");

    // reference takes free text
    conversation.record_text(&mut facts, now, "clean lines, lots of light", false);
    now += STEP;
    conversation.tick(now);

    now = answer(&mut conversation, &mut facts, now, "partial");
    now = answer(&mut conversation, &mut facts, now, "aged");

    // last optional question is free text; completion follows it
    conversation.record_text(&mut facts, now, "roof needs repair", false);
    let signals = conversation.tick(now + STEP);
    assert_eq!(signals, vec![ConversationSignal::Completed]);

    assert_eq!(facts.target_customer, "family");
    assert_eq!(facts.concept, "minimal");
    assert_eq!(facts.reference_text, "clean lines, lots of light");
    assert_eq!(facts.interior_scope, "partial");
    assert_eq!(facts.building_condition, "aged");
    assert_eq!(facts.condition_text, "roof needs repair");
}

#[test]
fn test_skip_records_sentinel_and_no_fact() {
    let (mut conversation, mut facts, mut now) = at_gate();
    now = answer(&mut conversation, &mut facts, now, "yes");

    conversation.skip(now);
    now += STEP;
    conversation.tick(now);

    assert_eq!(facts.target_customer, "");
    let entries = conversation.transcript().entries();
    let sentinel = &entries[entries.len() - 2];
    assert_eq!(sentinel.content, SKIP_SENTINEL);
    assert_eq!(sentinel.author, Author::User);
    assert_eq!(conversation.current_question().unwrap().id, "concept");
    assert_eq!(
        conversation.history_len(),
        conversation.transcript().user_count()
    );
}

#[test]
fn test_re_edit_restores_question_and_truncates() {
    let (mut conversation, mut facts, mut now) = started();
    for value in &REQUIRED_ANSWERS[..3] {
        now = answer(&mut conversation, &mut facts, now, value);
    }
    // transcript: [welcome, q1, a1, q2, a2, q3, a3, q4]
    assert_eq!(conversation.transcript().len(), 8);
    assert_eq!(conversation.question_index(), 4);

    // go back to the region answer (entry 4)
    conversation.re_edit(now, 4);
    now += STEP;
    conversation.tick(now);

    assert_eq!(conversation.phase(), Phase::Required);
    assert_eq!(conversation.question_index(), 2);
    assert!(conversation.awaiting_response());
    // [welcome, q1, a1, q2 again]
    assert_eq!(conversation.transcript().len(), 4);
    assert_eq!(conversation.history_len(), 1);
    assert_eq!(
        conversation.history_len(),
        conversation.transcript().user_count()
    );

    // answering again overwrites the fact and the flow continues
    now = answer(&mut conversation, &mut facts, now, "jeju");
    assert_eq!(facts.location.region, "jeju");
    assert_eq!(conversation.question_index(), 3);
}

#[test]
fn test_re_edit_twice_yields_identical_state() {
    let (mut conversation, mut facts, mut now) = started();
    for value in &REQUIRED_ANSWERS[..3] {
        now = answer(&mut conversation, &mut facts, now, value);
    }

    conversation.re_edit(now, 4);
    now += STEP;
    conversation.tick(now);
    let first_pass: Vec<String> = conversation
        .transcript()
        .entries()
        .iter()
        .map(|entry| entry.content.clone())
        .collect();
    let first_index = conversation.question_index();
    let first_history = conversation.history_len();

    now = answer(&mut conversation, &mut facts, now, "gangwon");
    conversation.re_edit(now, 4);
    now += STEP;
    conversation.tick(now);

    let second_pass: Vec<String> = conversation
        .transcript()
        .entries()
        .iter()
        .map(|entry| entry.content.clone())
        .collect();
    assert_eq!(first_pass, second_pass);
    assert_eq!(conversation.question_index(), first_index);
    assert_eq!(conversation.history_len(), first_history);
}

#[test]
fn test_re_edit_from_optional_phase_restores_required() {
    let (mut conversation, mut facts, mut now) = at_gate();
    now = answer(&mut conversation, &mut facts, now, "yes");
    assert_eq!(conversation.phase(), Phase::Optional);

    // the accommodation answer sits at transcript index 8
    let entry = conversation.transcript().entry(8).unwrap();
    assert_eq!(entry.content, "Pension / pool villa");

    conversation.re_edit(now, 8);
    now += STEP;
    conversation.tick(now);

    assert_eq!(conversation.phase(), Phase::Required);
    assert_eq!(conversation.question_index(), 4);
    assert_eq!(conversation.transcript().len(), 8);
    assert_eq!(conversation.history_len(), 3);
    assert_eq!(
        conversation.history_len(),
        conversation.transcript().user_count()
    );
}

#[test]
fn test_re_edit_rejects_invalid_targets() {
    let (mut conversation, mut facts, mut now) = started();
    now = answer(&mut conversation, &mut facts, now, "planning");

    let len_before = conversation.transcript().len();
    let history_before = conversation.history_len();

    // machine entries are not editable
    conversation.re_edit(now, 1);
    // out of range
    conversation.re_edit(now, 99);
    assert_eq!(conversation.transcript().len(), len_before);
    assert_eq!(conversation.history_len(), history_before);

    // the latest entry is not editable while its advance is still pending
    let option = conversation
        .current_question()
        .unwrap()
        .option("seoul")
        .unwrap()
        .clone();
    conversation.record_option(&mut facts, now, &option);
    let latest = conversation.transcript().len() - 1;
    conversation.re_edit(now, latest);
    assert_eq!(conversation.question_index(), 2);

    // nor is anything editable while the next question reveals
    let mid_reveal = now + Duration::from_millis(900);
    conversation.tick(mid_reveal);
    assert!(conversation.is_revealing());
    let len_mid = conversation.transcript().len();
    conversation.re_edit(mid_reveal, 2);
    assert_eq!(conversation.transcript().len(), len_mid);
}

#[test]
fn test_exit_disposition_lifecycle() {
    let (mut conversation, mut facts, now) = started();
    assert_eq!(conversation.request_exit(), ExitDisposition::Leave);
    answer(&mut conversation, &mut facts, now, "searching");
    assert_eq!(conversation.request_exit(), ExitDisposition::Confirm);
}
