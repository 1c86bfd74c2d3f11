use stayscope_core::{format_won, BudgetBracket, ProjectFacts};

/// Fixed instruction sent with every report request. The model must answer
/// with bare JSON in exactly the shape `RawReport` parses.
pub const SYSTEM_PROMPT: &str = "\
You are a feasibility consultant for Korean hospitality ventures. From the \
project details the user provides, produce an accurate, practical \
pre-opening feasibility report.

Respond with JSON only - no markdown fences, no commentary - in exactly \
this shape:
{
  \"recommendation\": \"overall recommendation\",
  \"scenarios\": [
    {
      \"id\": \"conservative\",
      \"name\": \"Steady\",
      \"estimatedCost\": { \"min\": 180000000, \"max\": 250000000 },
      \"monthlyRevenue\": { \"min\": 12000000, \"max\": 18000000 },
      \"monthlyProfit\": { \"min\": 4500000, \"max\": 7500000 },
      \"suggestedRooms\": 12,
      \"adr\": { \"peak\": 120000, \"offPeak\": 85000 },
      \"occupancy\": { \"peak\": 85, \"offPeak\": 55 },
      \"riskLevel\": \"low\",
      \"operationDifficulty\": \"easy\",
      \"keyRisk\": \"the main risk in one sentence\",
      \"moodDescription\": \"the interior mood in one sentence\",
      \"riskScore\": 25
    }
  ]
}

Rules:
1. Produce exactly 3 scenarios, each with a different budget, scale and \
risk posture.
2. All amounts are Korean won as plain integers, estimated conservatively.
3. Every estimatedCost must sit inside the owner budget stated in the \
brief. Check the stated budget and keep both min and max of every \
scenario within it. For an owner budget of 500,000,000 to 1,500,000,000 \
won, aim the cautious scenario around 500-800 million, the balanced one \
around 800-1,200 million and the ambitious one around 1,200-1,500 million.
4. riskLevel is one of low, medium, high. operationDifficulty is one of \
easy, medium, hard. riskScore is an integer from 0 to 100.";

/// Render the collected facts as the natural-language brief sent to the
/// text collaborator. Budget bounds are restated numerically because the
/// model is unreliable at honoring ranges it has only seen as labels.
pub fn build_brief(facts: &ProjectFacts) -> String {
    let mut brief = String::from(
        "Put together a pre-opening feasibility report for this hospitality project:\n\n",
    );

    brief.push_str("[Project]\n");
    brief.push_str(&format!("- Stage: {}\n", stage_label(&facts.project_status)));
    brief.push_str(&format!(
        "- Region: {}\n",
        region_label(&facts.location.region)
    ));
    brief.push_str(&format!(
        "- Location type: {}\n",
        location_type_label(&facts.location.location_type)
    ));
    brief.push_str(&format!(
        "- Accommodation type: {}\n\n",
        accommodation_label(&facts.accommodation_type)
    ));

    let bracket = facts.budget_bracket();
    let budget_text = match bracket {
        Some(bracket) => bracket.label().to_string(),
        None => facts.budget.clone(),
    };

    brief.push_str("[Scale and budget]\n");
    brief.push_str(&format!("- Planned rooms: {}\n", facts.scale.rooms));
    brief.push_str(&format!("- Gross floor area: {}\n", facts.scale.area));
    brief.push_str(&format!("- Floors: {}\n", facts.scale.floors));
    brief.push_str(&format!("- Parking: {}\n", facts.scale.parking));
    brief.push_str(&format!("- Owner budget: {budget_text}"));
    if let Some(bracket) = bracket.filter(|b| b.ceiling() > 0) {
        if bracket == BudgetBracket::Under50M {
            brief.push_str(&format!(
                " (in won: {} to just under {})",
                format_won(bracket.floor()),
                format_won(bracket.ceiling())
            ));
        } else {
            brief.push_str(&format!(
                " (in won: {} to {})",
                format_won(bracket.floor()),
                format_won(bracket.ceiling())
            ));
        }
    }
    brief.push('\n');
    brief.push_str(&format!(
        "- Building purchase included: {}\n\n",
        if facts.include_building_purchase {
            "yes"
        } else {
            "no"
        }
    ));

    if let Some(bracket) = bracket.filter(|b| b.ceiling() > 0) {
        brief.push_str(&budget_constraints(bracket));
        brief.push('\n');
    }

    let optional = optional_lines(facts);
    if !optional.is_empty() {
        brief.push_str("[Additional details]\n");
        brief.push_str(&optional);
        brief.push('\n');
    }

    brief.push_str("Generate a realistic, practical report from the details above.");
    brief
}

/// The budget block is repeated after the scale section so the constraint
/// is the freshest thing in the model's context.
fn budget_constraints(bracket: BudgetBracket) -> String {
    let floor = format_won(bracket.floor());
    let ceiling = format_won(bracket.ceiling());
    let mut block = String::from(
        "Hard constraint: every scenario's estimatedCost must stay inside the owner budget above.\n",
    );
    match bracket {
        BudgetBracket::Under50M => {
            block.push_str(&format!(
                "- The owner budget is \"{}\", so estimatedCost.max must stay below {ceiling} won.\n",
                bracket.label()
            ));
            block.push_str(&format!(
                "- estimatedCost.min must be at least {floor} won and estimatedCost.max below {ceiling} won.\n",
            ));
            block.push_str(
                "- For example: cautious scenario roughly 10-20 million, balanced roughly 20-35 million, ambitious roughly 35-45 million won.\n",
            );
        }
        BudgetBracket::From500MTo1500M => {
            block.push_str(&format!(
                "- estimatedCost.min must be at least {floor} won.\n"
            ));
            block.push_str(&format!(
                "- estimatedCost.max must not exceed {ceiling} won.\n"
            ));
            block.push_str(
                "- For example: cautious scenario roughly 500-800 million, balanced roughly 800-1,200 million, ambitious roughly 1,200-1,500 million won.\n",
            );
        }
        _ => {
            block.push_str(&format!(
                "- estimatedCost.min must be at least {floor} won.\n"
            ));
            block.push_str(&format!(
                "- estimatedCost.max must not exceed {ceiling} won.\n"
            ));
            block.push_str(
                "- Keep every scenario's construction cost realistic inside this range.\n",
            );
        }
    }
    block
}

fn optional_lines(facts: &ProjectFacts) -> String {
    let mut lines = String::new();
    if !facts.target_customer.is_empty() {
        lines.push_str(&format!(
            "- Target guests: {}\n",
            target_customer_label(&facts.target_customer)
        ));
    }
    if !facts.concept.is_empty() {
        lines.push_str(&format!("- Concept: {}\n", concept_label(&facts.concept)));
    }
    if !facts.reference_text.is_empty() {
        lines.push_str(&format!("- Reference: {}\n", facts.reference_text));
    }
    if !facts.interior_scope.is_empty() {
        lines.push_str(&format!(
            "- Interior scope: {}\n",
            interior_scope_label(&facts.interior_scope)
        ));
    }
    if !facts.building_condition.is_empty() {
        lines.push_str(&format!(
            "- Building condition: {}\n",
            building_condition_label(&facts.building_condition)
        ));
    }
    if !facts.condition_text.is_empty() {
        lines.push_str(&format!("- Condition notes: {}\n", facts.condition_text));
    }
    lines
}

// ==== Token-to-label tables ====
//
// Unknown tokens fall through as-is so free-typed answers survive.

fn stage_label(value: &str) -> &str {
    match value {
        "searching" => "Scouting properties",
        "planning" => "Planning",
        "design" => "In design",
        "construction" => "Under construction",
        other => other,
    }
}

fn region_label(value: &str) -> &str {
    match value {
        "seoul" => "Seoul",
        "gyeonggi" => "Gyeonggi / Incheon",
        "gangwon" => "Gangwon",
        "chungcheong" => "Chungcheong",
        "jeolla" => "Jeolla",
        "gyeongsang" => "Gyeongsang",
        "jeju" => "Jeju",
        "undecided" => "Not decided yet",
        other => other,
    }
}

fn location_type_label(value: &str) -> &str {
    match value {
        "tourist" => "Tourist area",
        "urban" => "City center",
        "university" => "University district",
        "station" => "Near a transit hub",
        "other" => "Other",
        other => other,
    }
}

fn accommodation_label(value: &str) -> &str {
    match value {
        "motel" => "Motel",
        "pension" => "Pension / pool villa",
        "guesthouse" => "Guesthouse",
        "airbnb" => "Short-term rental",
        "boutique" => "Boutique hotel",
        "other" => "Other",
        other => other,
    }
}

fn target_customer_label(value: &str) -> &str {
    match value {
        "couple" => "Couples",
        "family" => "Families",
        "longstay" => "Long-stay guests",
        "group" => "Group travelers",
        "unknown" => "Not decided",
        other => other,
    }
}

fn concept_label(value: &str) -> &str {
    match value {
        "minimal" => "Minimal & modern",
        "nature" => "Natural & warm",
        "luxury" => "Refined & luxurious",
        "instagram" => "Photogenic & trendy",
        "kitsch" => "Playful & eclectic",
        "unknown" => "Not decided",
        other => other,
    }
}

fn interior_scope_label(value: &str) -> &str {
    match value {
        "full" => "Full interior",
        "partial" => "Partial refresh",
        "unknown" => "Undecided, wants advice",
        other => other,
    }
}

fn building_condition_label(value: &str) -> &str {
    match value {
        "new" => "Newly built",
        "good" => "Solid, lightly worn",
        "aged" => "Aged, needs work",
        "unknown" => "Not sure",
        other => other,
    }
}
