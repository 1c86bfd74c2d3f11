use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use stayscope_core::{
    BudgetBracket, MoneyBand, OccupancyBand, OperationDifficulty, RateBand, ReportResult,
    RiskLevel, Scenario,
};

const DEFAULT_RECOMMENDATION: &str = "Review the scenario comparison to choose a direction.";
const DEFAULT_KEY_RISK: &str = "Risk analysis pending";
const DEFAULT_MOOD: &str = "Interior concept to be defined";

/// Report as the model returns it. Everything is optional and numbers are
/// floats, so partial or sloppy output degrades to defaults instead of
/// failing the whole run; extra fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawReport {
    pub scenarios: Vec<RawScenario>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScenario {
    pub id: String,
    pub name: String,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: Option<RawBand>,
    #[serde(rename = "monthlyRevenue")]
    pub monthly_revenue: Option<RawBand>,
    #[serde(rename = "monthlyProfit")]
    pub monthly_profit: Option<RawBand>,
    #[serde(rename = "suggestedRooms")]
    pub suggested_rooms: f64,
    pub adr: Option<RawRateBand>,
    pub occupancy: Option<RawOccupancyBand>,
    #[serde(rename = "riskLevel")]
    pub risk_level: String,
    #[serde(rename = "operationDifficulty")]
    pub operation_difficulty: String,
    #[serde(rename = "keyRisk")]
    pub key_risk: String,
    #[serde(rename = "moodDescription")]
    pub mood_description: String,
    #[serde(rename = "riskScore")]
    pub risk_score: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawBand {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawRateBand {
    pub peak: f64,
    #[serde(rename = "offPeak")]
    pub off_peak: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct RawOccupancyBand {
    pub peak: f64,
    #[serde(rename = "offPeak")]
    pub off_peak: f64,
}

/// Turn raw model output into a renderable report: repair costs against the
/// budget bracket, default missing fields, and pad or cut to exactly three
/// scenarios. Deterministic, and idempotent over already-normalized input.
pub fn normalize_report(raw: RawReport, bracket: BudgetBracket) -> ReportResult {
    let mut scenarios: Vec<Scenario> = raw
        .scenarios
        .into_iter()
        .enumerate()
        .map(|(index, scenario)| normalize_scenario(scenario, index, bracket))
        .collect();

    if scenarios.len() < 3 {
        warn!(
            returned = scenarios.len(),
            "model returned too few scenarios, padding with canned ones"
        );
        let existing: Vec<String> = scenarios.iter().map(|s| s.id.clone()).collect();
        for fallback in fallback_scenarios(bracket) {
            if !existing.contains(&fallback.id) {
                scenarios.push(fallback);
            }
        }
    }
    scenarios.truncate(3);

    let recommendation = if raw.recommendation.trim().is_empty() {
        DEFAULT_RECOMMENDATION.to_string()
    } else {
        raw.recommendation
    };

    ReportResult {
        scenarios,
        recommendation,
        created_at: Utc::now(),
    }
}

fn normalize_scenario(raw: RawScenario, index: usize, bracket: BudgetBracket) -> Scenario {
    let estimated_cost = repair_cost(to_money(raw.estimated_cost), bracket);
    Scenario {
        id: fallback_text(raw.id, || format!("scenario-{}", index + 1)),
        name: fallback_text(raw.name, || format!("Scenario {}", index + 1)),
        estimated_cost,
        monthly_revenue: to_money(raw.monthly_revenue),
        monthly_profit: to_money(raw.monthly_profit),
        suggested_rooms: positive_count(raw.suggested_rooms, 10),
        adr: raw
            .adr
            .map(|band| RateBand {
                peak: to_won(band.peak),
                off_peak: to_won(band.off_peak),
            })
            .unwrap_or(RateBand {
                peak: 100_000,
                off_peak: 70_000,
            }),
        occupancy: raw
            .occupancy
            .map(|band| OccupancyBand {
                peak: to_percent(band.peak),
                off_peak: to_percent(band.off_peak),
            })
            .unwrap_or(OccupancyBand {
                peak: 70,
                off_peak: 50,
            }),
        risk_level: parse_risk_level(&raw.risk_level),
        operation_difficulty: parse_difficulty(&raw.operation_difficulty),
        key_risk: fallback_text(raw.key_risk, || DEFAULT_KEY_RISK.to_string()),
        mood_description: fallback_text(raw.mood_description, || DEFAULT_MOOD.to_string()),
        risk_score: normalize_risk_score(raw.risk_score),
        image_url: None,
    }
}

/// Force the cost band inside the bracket. An unknown bracket has no
/// ceiling and passes costs through untouched. An all-zero band carries no
/// information at all and goes straight to the bracket's default band.
fn repair_cost(mut cost: MoneyBand, bracket: BudgetBracket) -> MoneyBand {
    let floor = bracket.floor();
    let ceiling = bracket.ceiling();
    if ceiling == 0 {
        return cost;
    }
    if cost.min == 0 && cost.max == 0 {
        let (min, max) = bracket.default_band();
        return MoneyBand::new(min, max);
    }

    if cost.min < floor || cost.min == 0 {
        cost.min = floor;
    }
    if cost.max > ceiling {
        cost.max = ceiling;
    }
    if cost.min > cost.max {
        cost.min = cost.min.min(ceiling);
        cost.max = ceiling;
    }
    if cost.min >= cost.max {
        let (min, max) = bracket.default_band();
        cost = MoneyBand::new(min, max);
    }
    cost
}

/// Canned trio used when the model returns fewer than three scenarios.
/// Each takes a different slice of the bracket span.
fn fallback_scenarios(bracket: BudgetBracket) -> Vec<Scenario> {
    let floor = bracket.floor();
    let ceiling = bracket.ceiling();
    let span = bracket.span();
    vec![
        Scenario {
            id: "conservative".to_string(),
            name: "Steady".to_string(),
            estimated_cost: MoneyBand::new(floor + span / 10, floor + span * 3 / 10),
            monthly_revenue: MoneyBand::new(5_000_000, 8_000_000),
            monthly_profit: MoneyBand::new(2_000_000, 4_000_000),
            suggested_rooms: 8,
            adr: RateBand {
                peak: 80_000,
                off_peak: 60_000,
            },
            occupancy: OccupancyBand {
                peak: 70,
                off_peak: 50,
            },
            risk_level: RiskLevel::Low,
            operation_difficulty: OperationDifficulty::Easy,
            key_risk: "Payback on the initial investment may take a while".to_string(),
            mood_description: "Calm, settled atmosphere".to_string(),
            risk_score: 30,
            image_url: None,
        },
        Scenario {
            id: "balanced".to_string(),
            name: "Balanced".to_string(),
            estimated_cost: MoneyBand::new(floor + span * 35 / 100, floor + span * 65 / 100),
            monthly_revenue: MoneyBand::new(8_000_000, 12_000_000),
            monthly_profit: MoneyBand::new(3_500_000, 6_000_000),
            suggested_rooms: 10,
            adr: RateBand {
                peak: 100_000,
                off_peak: 70_000,
            },
            occupancy: OccupancyBand {
                peak: 75,
                off_peak: 55,
            },
            risk_level: RiskLevel::Medium,
            operation_difficulty: OperationDifficulty::Medium,
            key_risk: "Occupancy is hard to secure in a crowded market".to_string(),
            mood_description: "Modern, trendy atmosphere".to_string(),
            risk_score: 50,
            image_url: None,
        },
        Scenario {
            id: "aggressive".to_string(),
            name: "Growth".to_string(),
            estimated_cost: MoneyBand::new(floor + span * 7 / 10, ceiling - span / 10),
            monthly_revenue: MoneyBand::new(12_000_000, 18_000_000),
            monthly_profit: MoneyBand::new(5_000_000, 9_000_000),
            suggested_rooms: 12,
            adr: RateBand {
                peak: 120_000,
                off_peak: 80_000,
            },
            occupancy: OccupancyBand {
                peak: 80,
                off_peak: 60,
            },
            risk_level: RiskLevel::High,
            operation_difficulty: OperationDifficulty::Hard,
            key_risk: "Heavy upfront investment and operating costs".to_string(),
            mood_description: "Luxurious, premium atmosphere".to_string(),
            risk_score: 70,
            image_url: None,
        },
    ]
}

fn to_money(band: Option<RawBand>) -> MoneyBand {
    band.map(|b| MoneyBand::new(to_won(b.min), to_won(b.max)))
        .unwrap_or_default()
}

fn to_won(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

fn to_percent(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        (value as u32).min(100)
    } else {
        0
    }
}

fn positive_count(value: f64, default: u32) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value as u32
    } else {
        default
    }
}

fn normalize_risk_score(value: f64) -> u32 {
    if value.is_finite() && value != 0.0 {
        value.clamp(0.0, 100.0) as u32
    } else {
        50
    }
}

fn fallback_text(value: String, default: impl FnOnce() -> String) -> String {
    if value.trim().is_empty() {
        default()
    } else {
        value
    }
}

fn parse_risk_level(value: &str) -> RiskLevel {
    match value.trim().to_ascii_lowercase().as_str() {
        "low" => RiskLevel::Low,
        "high" => RiskLevel::High,
        _ => RiskLevel::Medium,
    }
}

fn parse_difficulty(value: &str) -> OperationDifficulty {
    match value.trim().to_ascii_lowercase().as_str() {
        "easy" => OperationDifficulty::Easy,
        "hard" => OperationDifficulty::Hard,
        _ => OperationDifficulty::Medium,
    }
}
