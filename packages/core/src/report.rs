use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive cost range in won
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyBand {
    pub min: u64,
    pub max: u64,
}

impl MoneyBand {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

/// Average daily rate split by season, in won
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    pub peak: u64,
    #[serde(rename = "offPeak")]
    pub off_peak: u64,
}

/// Occupancy split by season, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyBand {
    pub peak: u32,
    #[serde(rename = "offPeak")]
    pub off_peak: u32,
}

/// Overall risk posture of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl Default for RiskLevel {
    fn default() -> Self {
        RiskLevel::Medium
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// How demanding day-to-day operation would be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationDifficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for OperationDifficulty {
    fn default() -> Self {
        OperationDifficulty::Medium
    }
}

impl fmt::Display for OperationDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationDifficulty::Easy => write!(f, "Easy"),
            OperationDifficulty::Medium => write!(f, "Medium"),
            OperationDifficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Position of a scenario within the three-way comparison. The first slot
/// is always the cautious plan and the last the ambitious one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioTier {
    Conservative,
    Balanced,
    Aggressive,
}

impl ScenarioTier {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => ScenarioTier::Conservative,
            1 => ScenarioTier::Balanced,
            _ => ScenarioTier::Aggressive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioTier::Conservative => "conservative",
            ScenarioTier::Balanced => "balanced",
            ScenarioTier::Aggressive => "aggressive",
        }
    }
}

/// One fully normalized feasibility scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: MoneyBand,
    #[serde(rename = "monthlyRevenue")]
    pub monthly_revenue: MoneyBand,
    #[serde(rename = "monthlyProfit")]
    pub monthly_profit: MoneyBand,
    #[serde(rename = "suggestedRooms")]
    pub suggested_rooms: u32,
    pub adr: RateBand,
    pub occupancy: OccupancyBand,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskLevel,
    #[serde(rename = "operationDifficulty")]
    pub operation_difficulty: OperationDifficulty,
    #[serde(rename = "keyRisk")]
    pub key_risk: String,
    #[serde(rename = "moodDescription")]
    pub mood_description: String,
    #[serde(rename = "riskScore")]
    pub risk_score: u32,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// The assembled report handed to the preview and unlocked screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub scenarios: Vec<Scenario>,
    pub recommendation: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_index() {
        assert_eq!(ScenarioTier::from_index(0), ScenarioTier::Conservative);
        assert_eq!(ScenarioTier::from_index(1), ScenarioTier::Balanced);
        assert_eq!(ScenarioTier::from_index(2), ScenarioTier::Aggressive);
        assert_eq!(ScenarioTier::from_index(7), ScenarioTier::Aggressive);
    }

    #[test]
    fn test_scenario_serde_uses_camel_case() {
        let scenario = Scenario {
            id: "scenario-1".to_string(),
            name: "Scenario 1".to_string(),
            estimated_cost: MoneyBand::new(700_000_000, 1_100_000_000),
            monthly_revenue: MoneyBand::default(),
            monthly_profit: MoneyBand::default(),
            suggested_rooms: 10,
            adr: RateBand {
                peak: 100_000,
                off_peak: 70_000,
            },
            occupancy: OccupancyBand {
                peak: 70,
                off_peak: 50,
            },
            risk_level: RiskLevel::Medium,
            operation_difficulty: OperationDifficulty::Medium,
            key_risk: "Risk analysis pending".to_string(),
            mood_description: "Interior concept to be defined".to_string(),
            risk_score: 50,
            image_url: None,
        };

        let json = serde_json::to_value(&scenario).unwrap();
        assert!(json.get("estimatedCost").is_some());
        assert!(json.get("riskLevel").is_some());
        assert!(json["adr"].get("offPeak").is_some());
        assert_eq!(json["riskLevel"], "medium");
        assert_eq!(json["operationDifficulty"], "medium");
    }

    #[test]
    fn test_risk_defaults() {
        assert_eq!(RiskLevel::default(), RiskLevel::Medium);
        assert_eq!(OperationDifficulty::default(), OperationDifficulty::Medium);
    }
}
