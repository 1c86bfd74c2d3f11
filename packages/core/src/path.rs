use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::facts::ProjectFacts;

/// Typed handle to a single `ProjectFacts` field. Nested fields name their
/// parent explicitly, so a path can only ever address a field that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FactPath {
    ProjectStatus,
    AccommodationType,
    Budget,
    IncludeBuildingPurchase,
    TargetCustomer,
    Concept,
    ReferenceText,
    InteriorScope,
    BuildingCondition,
    ConditionText,
    Location(LocationField),
    Scale(ScaleField),
}

/// Children of `ProjectFacts::location`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationField {
    Region,
    LocationType,
}

/// Children of `ProjectFacts::scale`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleField {
    Rooms,
    Area,
    Floors,
    Parking,
}

/// A recorded answer on its way into the facts
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }
}

/// Write one answer into the facts. Sibling fields are never touched: a
/// nested write mutates exactly one child of `location` or `scale`. The
/// purchase flag accepts the catalog's yes/no tokens as well as a boolean.
pub fn apply_answer(facts: &mut ProjectFacts, path: FactPath, value: AnswerValue) {
    match (path, value) {
        (FactPath::IncludeBuildingPurchase, AnswerValue::Flag(flag)) => {
            facts.include_building_purchase = flag;
        }
        (FactPath::IncludeBuildingPurchase, AnswerValue::Text(text)) => {
            facts.include_building_purchase = text == "yes";
        }
        (path, AnswerValue::Flag(_)) => {
            debug!("ignoring boolean answer for text field {:?}", path);
        }
        (FactPath::ProjectStatus, AnswerValue::Text(text)) => facts.project_status = text,
        (FactPath::AccommodationType, AnswerValue::Text(text)) => facts.accommodation_type = text,
        (FactPath::Budget, AnswerValue::Text(text)) => facts.budget = text,
        (FactPath::TargetCustomer, AnswerValue::Text(text)) => facts.target_customer = text,
        (FactPath::Concept, AnswerValue::Text(text)) => facts.concept = text,
        (FactPath::ReferenceText, AnswerValue::Text(text)) => facts.reference_text = text,
        (FactPath::InteriorScope, AnswerValue::Text(text)) => facts.interior_scope = text,
        (FactPath::BuildingCondition, AnswerValue::Text(text)) => facts.building_condition = text,
        (FactPath::ConditionText, AnswerValue::Text(text)) => facts.condition_text = text,
        (FactPath::Location(field), AnswerValue::Text(text)) => match field {
            LocationField::Region => facts.location.region = text,
            LocationField::LocationType => facts.location.location_type = text,
        },
        (FactPath::Scale(field), AnswerValue::Text(text)) => match field {
            ScaleField::Rooms => facts.scale.rooms = text,
            ScaleField::Area => facts.scale.area = text,
            ScaleField::Floors => facts.scale.floors = text,
            ScaleField::Parking => facts.scale.parking = text,
        },
    }
}
