use serde::{Deserialize, Serialize};

use crate::budget::BudgetBracket;

/// Marker appended to `reference_text` when the user attached a photo.
/// The image itself never leaves the screen layer; downstream prompt
/// builders strip the marker before using the text.
pub const IMAGE_MARKER: &str = "[image attached]";

/// Everything the conversation collects about a project. Fields hold the
/// catalog's machine tokens, or free text for the free-form entries; an
/// empty string means the question has not been answered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFacts {
    #[serde(rename = "projectStatus")]
    pub project_status: String,
    pub location: LocationFacts,
    #[serde(rename = "accommodationType")]
    pub accommodation_type: String,
    pub scale: ScaleFacts,
    pub budget: String,
    #[serde(rename = "includeBuildingPurchase")]
    pub include_building_purchase: bool,
    #[serde(rename = "targetCustomer")]
    pub target_customer: String,
    pub concept: String,
    #[serde(rename = "referenceText")]
    pub reference_text: String,
    #[serde(rename = "interiorScope")]
    pub interior_scope: String,
    #[serde(rename = "buildingCondition")]
    pub building_condition: String,
    #[serde(rename = "conditionText")]
    pub condition_text: String,
}

/// Where the property sits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationFacts {
    pub region: String,
    #[serde(rename = "locationType")]
    pub location_type: String,
}

/// Physical scale of the building, free-form strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleFacts {
    pub rooms: String,
    pub area: String,
    pub floors: String,
    pub parking: String,
}

impl ProjectFacts {
    /// Parsed budget bracket, if one has been chosen
    pub fn budget_bracket(&self) -> Option<BudgetBracket> {
        BudgetBracket::parse(&self.budget)
    }
}
