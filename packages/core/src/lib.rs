// ABOUTME: Core domain types for the Stayscope assessment funnel
// ABOUTME: Project facts, question catalog, budget brackets, and report structures shared by all packages

pub mod budget;
pub mod catalog;
pub mod facts;
pub mod path;
pub mod report;

pub use budget::{format_won, BudgetBracket};
pub use catalog::{
    optional_questions, required_questions, ChatOption, InputMode, Question, CUSTOM_VALUE,
};
pub use facts::{LocationFacts, ProjectFacts, ScaleFacts, IMAGE_MARKER};
pub use path::{apply_answer, AnswerValue, FactPath, LocationField, ScaleField};
pub use report::{
    MoneyBand, OccupancyBand, OperationDifficulty, RateBand, ReportResult, RiskLevel, Scenario,
    ScenarioTier,
};
