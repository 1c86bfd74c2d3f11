use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::path::{FactPath, LocationField, ScaleField};

/// Option value reserved for "let me type it instead"; selecting it surfaces
/// a free-text input and records nothing by itself.
pub const CUSTOM_VALUE: &str = "custom";

/// How a question's answer is captured on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    Buttons,
    Cards,
    Chips,
    Text,
    TextWithImage,
}

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
}

impl ChatOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
        }
    }

    /// Option with a one-line description shown on card inputs
    pub fn described(
        label: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: Some(description.into()),
        }
    }

    /// Option whose recorded value is its display text, for answers that
    /// flow into the brief verbatim
    pub fn verbatim(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            label: text.clone(),
            value: text,
            description: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.value == CUSTOM_VALUE
    }
}

/// A scripted question in the assessment flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub input: Option<InputMode>,
    pub options: Vec<ChatOption>,
    pub binding: Option<FactPath>,
    pub skippable: bool,
    pub allow_text_input: bool,
    pub is_gate: bool,
}

impl Question {
    fn new(id: impl Into<String>, text: impl Into<String>, input: Option<InputMode>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            input,
            options: Vec::new(),
            binding: None,
            skippable: false,
            allow_text_input: false,
            is_gate: false,
        }
    }

    /// A message with no input at all, like the welcome line
    pub fn statement(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, None)
    }

    pub fn buttons(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<ChatOption>,
    ) -> Self {
        let mut question = Self::new(id, text, Some(InputMode::Buttons));
        question.options = options;
        question
    }

    pub fn cards(id: impl Into<String>, text: impl Into<String>, options: Vec<ChatOption>) -> Self {
        let mut question = Self::new(id, text, Some(InputMode::Cards));
        question.options = options;
        question
    }

    pub fn chips(id: impl Into<String>, text: impl Into<String>, options: Vec<ChatOption>) -> Self {
        let mut question = Self::new(id, text, Some(InputMode::Chips));
        question.options = options;
        question
    }

    pub fn text_entry(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, Some(InputMode::Text))
    }

    pub fn text_with_image(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, Some(InputMode::TextWithImage))
    }

    /// Record answers to this question at the given facts field
    pub fn bind(mut self, path: FactPath) -> Self {
        self.binding = Some(path);
        self
    }

    /// Make this question skippable
    pub fn skippable(mut self) -> Self {
        self.skippable = true;
        self
    }

    /// Append a "type it myself" option that opens free-text entry
    pub fn with_text_escape(mut self, label: impl Into<String>) -> Self {
        self.options.push(ChatOption::new(label, CUSTOM_VALUE));
        self.allow_text_input = true;
        self
    }

    /// Mark as the optional-phase gate; its answer steers the flow and is
    /// never written to the facts
    pub fn gate(mut self) -> Self {
        self.is_gate = true;
        self
    }

    /// Look up one of this question's options by machine value
    pub fn option(&self, value: &str) -> Option<&ChatOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

lazy_static! {
    static ref REQUIRED: Vec<Question> = build_required();
    static ref OPTIONAL: Vec<Question> = build_optional();
}

/// The required phase: welcome plus ten questions, asked in order
pub fn required_questions() -> &'static [Question] {
    &REQUIRED
}

/// The optional phase: gate intro plus six skippable refinements
pub fn optional_questions() -> &'static [Question] {
    &OPTIONAL
}

fn build_required() -> Vec<Question> {
    vec![
        Question::statement(
            "welcome",
            "Hello! I'm the Stayscope assistant. Answer a few questions about \
             your project and I'll put together a three-scenario feasibility \
             estimate. It takes about three minutes.",
        ),
        Question::cards(
            "project-status",
            "Where does your project stand right now?",
            vec![
                ChatOption::described(
                    "Scouting properties",
                    "searching",
                    "Still comparing candidate buildings or sites",
                ),
                ChatOption::described(
                    "Planning",
                    "planning",
                    "Property secured, shaping the business plan",
                ),
                ChatOption::described(
                    "In design",
                    "design",
                    "Working with architects or designers",
                ),
                ChatOption::described(
                    "Under construction",
                    "construction",
                    "Construction or fit-out already underway",
                ),
            ],
        )
        .bind(FactPath::ProjectStatus),
        Question::chips(
            "region",
            "Which region will the property be in?",
            vec![
                ChatOption::new("Seoul", "seoul"),
                ChatOption::new("Gyeonggi / Incheon", "gyeonggi"),
                ChatOption::new("Gangwon", "gangwon"),
                ChatOption::new("Chungcheong", "chungcheong"),
                ChatOption::new("Jeolla", "jeolla"),
                ChatOption::new("Gyeongsang", "gyeongsang"),
                ChatOption::new("Jeju", "jeju"),
                ChatOption::new("Not decided yet", "undecided"),
            ],
        )
        .bind(FactPath::Location(LocationField::Region)),
        Question::buttons(
            "location-type",
            "What kind of spot is it?",
            vec![
                ChatOption::new("Tourist area", "tourist"),
                ChatOption::new("City center", "urban"),
                ChatOption::new("University district", "university"),
                ChatOption::new("Near a transit hub", "station"),
                ChatOption::new("Somewhere else", "other"),
            ],
        )
        .bind(FactPath::Location(LocationField::LocationType)),
        Question::cards(
            "accommodation-type",
            "What kind of stay do you want to run?",
            vec![
                ChatOption::new("Motel", "motel"),
                ChatOption::new("Pension / pool villa", "pension"),
                ChatOption::new("Guesthouse", "guesthouse"),
                ChatOption::new("Short-term rental", "airbnb"),
                ChatOption::new("Boutique hotel", "boutique"),
                ChatOption::new("Something else", "other"),
            ],
        )
        .bind(FactPath::AccommodationType),
        Question::chips(
            "rooms",
            "Roughly how many rooms are you planning?",
            vec![
                ChatOption::new("Up to 10", "10"),
                ChatOption::new("10 to 20", "10-20"),
                ChatOption::new("20 to 30", "20-30"),
                ChatOption::new("More than 30", "30+"),
            ],
        )
        .bind(FactPath::Scale(ScaleField::Rooms))
        .with_text_escape("Type it in"),
        Question::chips(
            "area",
            "How much floor area are you working with?",
            vec![
                ChatOption::verbatim("Under 330㎡"),
                ChatOption::verbatim("330–660㎡"),
                ChatOption::verbatim("660–1,650㎡"),
                ChatOption::verbatim("Over 1,650㎡"),
            ],
        )
        .bind(FactPath::Scale(ScaleField::Area))
        .with_text_escape("Type it in"),
        Question::chips(
            "floors",
            "How many floors does the building have?",
            vec![
                ChatOption::verbatim("1–2 floors"),
                ChatOption::verbatim("3–5 floors"),
                ChatOption::verbatim("6–10 floors"),
                ChatOption::verbatim("More than 10 floors"),
            ],
        )
        .bind(FactPath::Scale(ScaleField::Floors))
        .with_text_escape("Type it in"),
        Question::chips(
            "parking",
            "What about parking?",
            vec![
                ChatOption::verbatim("No parking"),
                ChatOption::verbatim("1–5 spaces"),
                ChatOption::verbatim("6–15 spaces"),
                ChatOption::verbatim("16 or more spaces"),
            ],
        )
        .bind(FactPath::Scale(ScaleField::Parking))
        .with_text_escape("Type it in"),
        Question::cards(
            "budget",
            "What renovation budget do you have in mind?",
            vec![
                ChatOption::described(
                    "Under ₩50M",
                    "under-50m",
                    "Light refresh: paint, fixtures, soft furnishings",
                ),
                ChatOption::described(
                    "₩50M – ₩500M",
                    "50m-5b",
                    "Partial renovation of rooms and common areas",
                ),
                ChatOption::described(
                    "₩500M – ₩1.5B",
                    "5b-15b",
                    "Full renovation including building systems",
                ),
                ChatOption::described(
                    "Over ₩1.5B",
                    "over-15b",
                    "New build or top-to-bottom conversion",
                ),
                ChatOption::described(
                    "Not decided yet",
                    "unknown",
                    "We'll estimate across a sensible range",
                ),
            ],
        )
        .bind(FactPath::Budget),
        Question::buttons(
            "building-purchase",
            "Should the budget include buying the building?",
            vec![
                ChatOption::new("Yes, purchase included", "yes"),
                ChatOption::new("No, construction only", "no"),
            ],
        )
        .bind(FactPath::IncludeBuildingPurchase),
    ]
}

fn build_optional() -> Vec<Question> {
    vec![
        Question::buttons(
            "optional-intro",
            "That covers the essentials! A few optional questions will sharpen \
             the estimate. Want to continue?",
            vec![
                ChatOption::new("Sure, a few more", "yes"),
                ChatOption::new("No, show my report now", "no"),
            ],
        )
        .gate(),
        Question::buttons(
            "target-customer",
            "Who do you most want to host?",
            vec![
                ChatOption::new("Couples", "couple"),
                ChatOption::new("Families", "family"),
                ChatOption::new("Long-stay guests", "longstay"),
                ChatOption::new("Group travelers", "group"),
                ChatOption::new("Not sure yet", "unknown"),
            ],
        )
        .bind(FactPath::TargetCustomer)
        .skippable(),
        Question::cards(
            "concept",
            "Is there an interior direction you lean toward?",
            vec![
                ChatOption::new("Minimal & modern", "minimal"),
                ChatOption::new("Natural & warm", "nature"),
                ChatOption::new("Refined & luxurious", "luxury"),
                ChatOption::new("Photogenic & trendy", "instagram"),
                ChatOption::new("Playful & eclectic", "kitsch"),
                ChatOption::new("Not sure yet", "unknown"),
            ],
        )
        .bind(FactPath::Concept)
        .skippable()
        .with_text_escape("Describe it myself"),
        Question::text_with_image(
            "reference",
            "Any reference stays or spaces you love? Describe them, or attach \
             a photo.",
        )
        .bind(FactPath::ReferenceText)
        .skippable(),
        Question::buttons(
            "interior-scope",
            "How far should the interior work go?",
            vec![
                ChatOption::new("Full interior", "full"),
                ChatOption::new("Partial refresh", "partial"),
                ChatOption::new("Need advice", "unknown"),
            ],
        )
        .bind(FactPath::InteriorScope)
        .skippable(),
        Question::buttons(
            "building-condition",
            "What condition is the building in?",
            vec![
                ChatOption::new("Newly built", "new"),
                ChatOption::new("Solid, lightly worn", "good"),
                ChatOption::new("Aged, needs work", "aged"),
                ChatOption::new("Not sure", "unknown"),
            ],
        )
        .bind(FactPath::BuildingCondition)
        .skippable(),
        Question::text_entry(
            "condition-notes",
            "Anything else I should know about the building's condition?",
        )
        .bind(FactPath::ConditionText)
        .skippable(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_catalog_shape() {
        let questions = required_questions();
        assert_eq!(questions.len(), 11);

        // welcome is a bare statement
        assert_eq!(questions[0].input, None);
        assert!(questions[0].options.is_empty());
        assert!(questions[0].binding.is_none());

        // nothing in the required phase can be skipped
        assert!(questions.iter().all(|q| !q.skippable));

        // every question after the welcome records somewhere
        assert!(questions[1..].iter().all(|q| q.binding.is_some()));
    }

    #[test]
    fn test_optional_catalog_shape() {
        let questions = optional_questions();
        assert_eq!(questions.len(), 7);

        assert!(questions[0].is_gate);
        assert!(questions[0].binding.is_none());
        assert!(!questions[0].skippable);

        // everything past the gate is skippable and bound
        assert!(questions[1..].iter().all(|q| q.skippable));
        assert!(questions[1..].iter().all(|q| q.binding.is_some()));
    }

    #[test]
    fn test_budget_options_parse_as_brackets() {
        use crate::budget::BudgetBracket;

        let budget = required_questions()
            .iter()
            .find(|q| q.id == "budget")
            .unwrap();
        for option in &budget.options {
            assert!(
                BudgetBracket::parse(&option.value).is_some(),
                "unparseable budget option {}",
                option.value
            );
        }
    }

    #[test]
    fn test_text_escape_appends_custom_option() {
        let rooms = required_questions()
            .iter()
            .find(|q| q.id == "rooms")
            .unwrap();
        assert!(rooms.allow_text_input);
        let last = rooms.options.last().unwrap();
        assert!(last.is_custom());
        assert_eq!(last.value, CUSTOM_VALUE);
    }

    #[test]
    fn test_option_lookup_by_value() {
        let purchase = required_questions()
            .iter()
            .find(|q| q.id == "building-purchase")
            .unwrap();
        assert_eq!(purchase.option("yes").unwrap().label, "Yes, purchase included");
        assert!(purchase.option("maybe").is_none());
    }

    #[test]
    fn test_verbatim_options_record_their_label() {
        let area = required_questions()
            .iter()
            .find(|q| q.id == "area")
            .unwrap();
        for option in area.options.iter().filter(|o| !o.is_custom()) {
            assert_eq!(option.label, option.value);
        }
    }
}
