use stayscope_core::{BudgetBracket, ProjectFacts, ScenarioTier, CUSTOM_VALUE, IMAGE_MARKER};

/// Korean interior terms worth translating when a free-typed reference or
/// concept reaches the prompt. Longer variants come first so suffixed forms
/// are consumed whole.
const TRANSLATIONS: &[(&str, &str)] = &[
    ("미니멀한", "minimal"),
    ("미니멀", "minimal"),
    ("깔끔한", "clean"),
    ("깔끔", "clean"),
    ("모던한", "modern"),
    ("모던", "modern"),
    ("럭셔리한", "luxury"),
    ("럭셔리", "luxury"),
    ("고급스러운", "sophisticated"),
    ("고급", "high-end"),
    ("트렌디한", "trendy"),
    ("트렌디", "trendy"),
    ("감성적인", "aesthetic"),
    ("감성", "aesthetic"),
    ("친화적", "eco-friendly"),
    ("친화", "friendly"),
    ("따뜻함", "warmth"),
    ("따뜻한", "warm"),
    ("아늑한", "cozy"),
    ("편안한", "comfortable"),
    ("우아한", "elegant"),
    ("세련된", "refined"),
    ("프리미엄", "premium"),
    ("인스타", "Instagram"),
    ("화이트", "white"),
    ("채광", "lighting"),
    ("창문", "windows"),
    ("자연", "natural"),
    ("나무", "wood"),
    ("대형", "large"),
    ("밝은", "bright"),
    ("밝음", "brightness"),
    ("어두운", "dark"),
    ("디자인", "design"),
    ("스타일", "style"),
    ("돌", "stone"),
    ("톤", "tone"),
];

/// Common interior keyword bundles triggered by Korean mentions. When any
/// trigger appears, the bundles replace a word-by-word translation.
const KEYWORD_HINTS: &[(&[&str], &str)] = &[
    (&["화이트", "흰색"], "white tone, light color palette"),
    (&["미니멀"], "minimalist aesthetic, clean lines, uncluttered"),
    (
        &["자연", "나무", "돌"],
        "natural materials, organic elements, biophilic design",
    ),
    (&["대형", "창문"], "large windows, natural daylight, open feel"),
    (&["럭셔리", "고급"], "luxurious, premium finishes, sophisticated"),
];

/// Build the single-line rendering prompt for one scenario slot. Everything
/// comes from the facts snapshot and the slot's tier; scenarios in the same
/// report differ only by materials and tier wording.
pub fn build_image_prompt(facts: &ProjectFacts, tier: ScenarioTier) -> String {
    let bracket = facts.budget_bracket().unwrap_or_default();
    let space = accommodation_phrase(&facts.accommodation_type);
    let setting = location_phrase(&facts.location.location_type);
    let concept = concept_description(facts);
    let mood = customer_mood(&facts.target_customer);
    let scale = rooms_phrase(&facts.scale.rooms);
    let style = bracket.style_level();
    let palette = material_palette(tier, bracket);

    let prompt = format!(
        "Professional architectural interior photography.\n\n\
         SPACE: {space}, {setting} location\n\
         CONCEPT: {concept}\n\
         ATMOSPHERE: {mood}\n\
         SCALE: {scale}\n\
         STYLE: {style}\n\n\
         BUDGET TIER: {tier_label}\n\
         FLOOR: {floor}\n\
         WALLS: {walls}\n\
         FIXTURES: {fixtures}\n\
         FURNITURE: {furniture}\n\
         LIGHTING: {lighting}\n\n\
         Korean modern hospitality design aesthetic, natural daylight, wide \
         angle architectural view, photorealistic rendering, professional \
         interior photography, magazine quality, 8K resolution.",
        tier_label = palette.tier,
        floor = palette.floor,
        walls = palette.walls,
        fixtures = palette.fixtures,
        furniture = palette.furniture,
        lighting = palette.lighting,
    );

    collapse_whitespace(&prompt)
}

/// Pick the concept line: reference text beats the chosen concept beats a
/// synthesized default. Attachment markers are stripped first so a
/// photo-plus-caption answer still contributes its caption.
fn concept_description(facts: &ProjectFacts) -> String {
    let reference = facts.reference_text.replace(IMAGE_MARKER, "");
    let reference = reference.trim();
    let concept = concept_signal(&facts.concept);

    if !reference.is_empty() {
        let harvested = extract_english_keywords(reference);
        let base = if harvested.is_empty() {
            reference.to_string()
        } else {
            harvested
        };
        return match concept {
            Some(keywords) => format!("{base}, incorporating {keywords}"),
            None => base,
        };
    }

    concept.unwrap_or_else(|| {
        default_concept(&facts.accommodation_type, &facts.location.location_type)
    })
}

/// English keywords for the chosen concept, or None when the user gave no
/// usable direction. Free-typed concepts go through the same Korean keyword
/// harvest as references.
fn concept_signal(concept: &str) -> Option<String> {
    let trimmed = concept.trim();
    if trimmed.is_empty() || trimmed == "unknown" || trimmed == CUSTOM_VALUE {
        return None;
    }
    let mapped = concept_keywords(trimmed);
    if !mapped.is_empty() {
        return Some(mapped.to_string());
    }
    let harvested = extract_english_keywords(trimmed);
    if harvested.is_empty() {
        Some(trimmed.to_string())
    } else {
        Some(harvested)
    }
}

fn concept_keywords(concept: &str) -> &'static str {
    match concept {
        "minimal" => "minimalist aesthetic, clean lines, neutral palette, uncluttered spaces",
        "nature" => "natural materials, wood and stone elements, biophilic design, earth tones",
        "luxury" => "luxurious and elegant, refined details, sophisticated palette",
        "instagram" => "photogenic and trendy, aesthetic design, statement pieces",
        "kitsch" => "playful and eclectic, bold colors, vintage accents, unique character",
        _ => "",
    }
}

fn customer_mood(target: &str) -> &'static str {
    match target {
        "couple" => "romantic and intimate atmosphere, cozy private spaces",
        "family" => "warm and welcoming, spacious family-friendly layout",
        "longstay" => "comfortable and practical, residential feel",
        "group" => "social and communal, open gathering spaces",
        _ => "comfortable and inviting atmosphere",
    }
}

fn accommodation_phrase(value: &str) -> &'static str {
    match value {
        "motel" => "modern motel",
        "pension" => "pension villa",
        "guesthouse" => "guesthouse",
        "airbnb" => "shared accommodation",
        "boutique" => "boutique hotel",
        _ => "accommodation facility",
    }
}

fn location_phrase(value: &str) -> &'static str {
    match value {
        "tourist" => "resort area",
        "urban" => "city center",
        "university" => "university district",
        "station" => "transportation hub",
        _ => "commercial area",
    }
}

fn rooms_phrase(rooms: &str) -> &'static str {
    match rooms {
        "10" | "10-20" => "compact, efficient space",
        "20-30" => "spacious, well-planned layout",
        _ => "well-designed interior",
    }
}

/// Synthesized concept for users who gave neither a concept nor a reference
fn default_concept(accommodation: &str, location_type: &str) -> String {
    let base = match accommodation {
        "motel" => "clean and efficient modern design, practical layout",
        "pension" => "cozy and warm natural design, comfortable atmosphere",
        "guesthouse" => "friendly and welcoming design, communal spaces",
        "airbnb" => "stylish and Instagram-worthy design, unique character",
        "boutique" => "sophisticated and distinctive design, curated aesthetics",
        _ => "modern and comfortable design",
    };
    let setting = match location_type {
        "tourist" => "resort-style, vacation vibes",
        "urban" => "contemporary urban, city chic",
        "university" => "young and fresh, modern minimal",
        "station" => "sleek and convenient, business casual",
        _ => "",
    };
    if setting.is_empty() {
        base.to_string()
    } else {
        format!("{base}, {setting}")
    }
}

fn contains_hangul(text: &str) -> bool {
    text.chars()
        .any(|c| matches!(c, '\u{3131}'..='\u{3163}' | '\u{AC00}'..='\u{D7A3}'))
}

/// Harvest English keywords from Korean free text. Already-English text
/// yields an empty string so callers can use it verbatim instead.
fn extract_english_keywords(text: &str) -> String {
    if !contains_hangul(text) {
        return String::new();
    }

    let bundles: Vec<&str> = KEYWORD_HINTS
        .iter()
        .filter(|(triggers, _)| triggers.iter().any(|t| text.contains(t)))
        .map(|(_, phrase)| *phrase)
        .collect();
    if !bundles.is_empty() {
        return bundles.join(", ");
    }

    translate_keywords(text)
}

fn translate_keywords(text: &str) -> String {
    let mut result = text.to_string();
    for (korean, english) in TRANSLATIONS {
        result = result.replace(korean, english);
    }
    result
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct MaterialPalette {
    tier: &'static str,
    floor: &'static str,
    walls: &'static str,
    fixtures: &'static str,
    furniture: &'static str,
    lighting: &'static str,
}

/// Finish level for one scenario slot. Tiers slice the owner's own budget
/// bracket, so a conservative plan in a large budget still outfinishes an
/// aggressive plan in a small one.
fn material_palette(tier: ScenarioTier, bracket: BudgetBracket) -> MaterialPalette {
    match tier {
        ScenarioTier::Conservative => MaterialPalette {
            tier: "budget tier (lower range within user budget)",
            ..conservative_materials(bracket)
        },
        ScenarioTier::Balanced => MaterialPalette {
            tier: "mid-range tier (middle range within user budget)",
            ..balanced_materials(bracket)
        },
        ScenarioTier::Aggressive => MaterialPalette {
            tier: "premium tier (upper range within user budget)",
            ..aggressive_materials(bracket)
        },
    }
}

fn conservative_materials(bracket: BudgetBracket) -> MaterialPalette {
    match bracket {
        BudgetBracket::Under50M => MaterialPalette {
            tier: "",
            floor: "budget vinyl flooring in light oak or gray finish",
            walls: "simple white painted walls, minimal texture, basic drywall",
            fixtures: "standard chrome faucets and handles, basic white tiles",
            furniture: "affordable minimalist furniture, flat pack assembly, simple clean lines",
            lighting: "basic recessed LED lighting, simple pendant lights, standard track lighting",
        },
        BudgetBracket::From50MTo500M => MaterialPalette {
            tier: "",
            floor: "quality vinyl plank flooring in light oak or beige finish",
            walls: "clean white painted walls with minimal texture, simple accent wall",
            fixtures: "standard modern chrome faucets and handles, ceramic white tiles",
            furniture: "affordable contemporary furniture, simple clean lines, budget-friendly pieces",
            lighting: "basic recessed LED lighting, simple pendant lights, wall sconces",
        },
        BudgetBracket::From500MTo1500M => MaterialPalette {
            tier: "",
            floor: "quality vinyl plank flooring in light oak finish",
            walls: "clean white painted walls with minimal texture",
            fixtures: "standard modern chrome faucets and handles",
            furniture: "affordable minimalist furniture, simple clean lines",
            lighting: "basic recessed LED lighting, simple pendant lights",
        },
        BudgetBracket::Over1500M => MaterialPalette {
            tier: "",
            floor: "engineered hardwood flooring in light oak finish",
            walls: "clean white painted walls, subtle texture",
            fixtures: "standard brushed nickel fixtures",
            furniture: "mid-range minimalist furniture, clean lines",
            lighting: "recessed LED lighting, simple designer pendant lights",
        },
        BudgetBracket::Undecided => MaterialPalette {
            tier: "",
            floor: "quality vinyl flooring",
            walls: "clean painted walls",
            fixtures: "standard modern fixtures",
            furniture: "affordable contemporary furniture",
            lighting: "basic LED lighting",
        },
    }
}

fn balanced_materials(bracket: BudgetBracket) -> MaterialPalette {
    match bracket {
        BudgetBracket::Under50M => MaterialPalette {
            tier: "",
            floor: "quality vinyl plank flooring in oak or gray finish",
            walls: "painted walls with accent wallpaper, subtle texture",
            fixtures: "brushed nickel fixtures, ceramic designer tiles",
            furniture: "mid-range contemporary furniture, some custom joinery, tasteful details",
            lighting: "recessed LED lighting, designer pendant lights, accent lighting",
        },
        BudgetBracket::From50MTo500M | BudgetBracket::From500MTo1500M => MaterialPalette {
            tier: "",
            floor: "engineered hardwood flooring in oak or walnut finish",
            walls: "painted walls with accent wallpaper, textured finishes",
            fixtures: "brushed nickel or matte black fixtures, quartz countertops, ceramic designer tiles",
            furniture: "mid-range contemporary furniture, some custom joinery, tasteful details",
            lighting: "recessed LED lighting, designer pendant lights, wall sconces, accent lighting",
        },
        BudgetBracket::Over1500M => MaterialPalette {
            tier: "",
            floor: "solid oak or engineered hardwood flooring in rich finish",
            walls: "painted walls with designer wallpaper, textured finishes",
            fixtures: "brass or matte black designer fixtures, quartz countertops, luxury tiles",
            furniture: "high-end contemporary furniture, custom joinery, designer pieces",
            lighting: "sophisticated LED lighting system, designer pendant lights, wall sconces, accent lighting",
        },
        BudgetBracket::Undecided => MaterialPalette {
            tier: "",
            floor: "engineered hardwood flooring",
            walls: "painted walls with accent details",
            fixtures: "modern designer fixtures",
            furniture: "mid-range contemporary furniture",
            lighting: "well-designed LED lighting",
        },
    }
}

fn aggressive_materials(bracket: BudgetBracket) -> MaterialPalette {
    match bracket {
        BudgetBracket::Under50M => MaterialPalette {
            tier: "",
            floor: "engineered hardwood flooring in premium finish",
            walls: "painted walls with designer wallpaper, textured finishes",
            fixtures: "brushed nickel designer fixtures, quartz countertops",
            furniture: "mid-range designer furniture, custom elements, enhanced details",
            lighting: "sophisticated LED lighting, designer pendant lights, accent lighting",
        },
        BudgetBracket::From50MTo500M => MaterialPalette {
            tier: "",
            floor: "engineered hardwood or luxury vinyl in premium finish",
            walls: "painted walls with designer wallpaper, textured finishes, accent features",
            fixtures: "brass or matte black designer fixtures, quartz countertops, luxury tiles",
            furniture: "high-end contemporary furniture, custom joinery, designer elements",
            lighting: "sophisticated LED lighting system, designer pendant lights, wall sconces, accent lighting",
        },
        BudgetBracket::From500MTo1500M => MaterialPalette {
            tier: "",
            floor: "solid oak or walnut hardwood flooring in rich finish",
            walls: "venetian plaster walls or designer wallpaper, textured finishes, accent features",
            fixtures: "brass or matte black designer fixtures, natural marble or quartz, porcelain luxury tiles",
            furniture: "bespoke custom furniture, built-in cabinetry, designer pieces, premium finishes",
            lighting: "sophisticated LED lighting system, designer pendant lights, wall sconces, accent lighting, dimmable",
        },
        BudgetBracket::Over1500M => MaterialPalette {
            tier: "",
            floor: "solid oak or walnut hardwood flooring, natural marble accents",
            walls: "venetian plaster walls, designer wallpaper, textured finishes, accent features",
            fixtures: "brass or matte black designer fixtures, natural marble or granite, porcelain luxury tiles",
            furniture: "bespoke custom furniture, built-in cabinetry, designer pieces, luxury touches",
            lighting: "sophisticated LED lighting system, designer pendant lights, wall sconces, accent lighting, dimmable, smart controls",
        },
        BudgetBracket::Undecided => MaterialPalette {
            tier: "",
            floor: "premium hardwood flooring",
            walls: "designer wall finishes",
            fixtures: "designer fixtures",
            furniture: "high-end custom furniture",
            lighting: "sophisticated lighting design",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stayscope_core::{LocationFacts, ScaleFacts};

    fn base_facts() -> ProjectFacts {
        ProjectFacts {
            project_status: "planning".to_string(),
            location: LocationFacts {
                region: "gangwon".to_string(),
                location_type: "tourist".to_string(),
            },
            accommodation_type: "pension".to_string(),
            scale: ScaleFacts {
                rooms: "10-20".to_string(),
                area: "330–660㎡".to_string(),
                floors: "3–5 floors".to_string(),
                parking: "6–15 spaces".to_string(),
            },
            budget: "5b-15b".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_is_single_line() {
        let prompt = build_image_prompt(&base_facts(), ScenarioTier::Balanced);
        assert!(!prompt.contains('\n'));
        assert!(!prompt.contains("  "));
        assert!(prompt.ends_with("8K resolution."));
    }

    #[test]
    fn test_prompt_places_space_and_scale() {
        let prompt = build_image_prompt(&base_facts(), ScenarioTier::Balanced);
        assert!(prompt.contains("SPACE: pension villa, resort area location"));
        assert!(prompt.contains("SCALE: compact, efficient space"));
        assert!(prompt.contains("STYLE: upscale, premium materials throughout"));
    }

    #[test]
    fn test_default_concept_synthesized_when_nothing_given() {
        let prompt = build_image_prompt(&base_facts(), ScenarioTier::Conservative);
        assert!(prompt.contains("cozy and warm natural design"));
        assert!(prompt.contains("resort-style, vacation vibes"));
    }

    #[test]
    fn test_chosen_concept_expands_to_keywords() {
        let mut facts = base_facts();
        facts.concept = "minimal".to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("CONCEPT: minimalist aesthetic, clean lines"));
    }

    #[test]
    fn test_unknown_concept_falls_back_to_default() {
        let mut facts = base_facts();
        facts.concept = "unknown".to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("cozy and warm natural design"));
    }

    #[test]
    fn test_english_reference_used_verbatim() {
        let mut facts = base_facts();
        facts.reference_text = "white oak floors and huge windows".to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("CONCEPT: white oak floors and huge windows"));
    }

    #[test]
    fn test_korean_reference_harvests_keyword_bundles() {
        let mut facts = base_facts();
        facts.reference_text = "화이트 톤의 미니멀한 공간".to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("white tone, light color palette"));
        assert!(prompt.contains("minimalist aesthetic, clean lines, uncluttered"));
    }

    #[test]
    fn test_korean_reference_without_bundle_translates_words() {
        let keywords = extract_english_keywords("세련된 디자인");
        assert_eq!(keywords, "refined design");
    }

    #[test]
    fn test_marker_only_reference_counts_as_absent() {
        let mut facts = base_facts();
        facts.reference_text = IMAGE_MARKER.to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("cozy and warm natural design"));
    }

    #[test]
    fn test_reference_with_marker_keeps_its_caption() {
        let mut facts = base_facts();
        facts.reference_text = format!("calm spa vibe\n{IMAGE_MARKER}");
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("CONCEPT: calm spa vibe"));
    }

    #[test]
    fn test_reference_and_concept_combine() {
        let mut facts = base_facts();
        facts.reference_text = "stone bathhouse".to_string();
        facts.concept = "nature".to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("stone bathhouse, incorporating natural materials"));
    }

    #[test]
    fn test_target_customer_sets_atmosphere() {
        let mut facts = base_facts();
        facts.target_customer = "couple".to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("ATMOSPHERE: romantic and intimate atmosphere"));

        facts.target_customer = String::new();
        let prompt = build_image_prompt(&facts, ScenarioTier::Balanced);
        assert!(prompt.contains("ATMOSPHERE: comfortable and inviting atmosphere"));
    }

    #[test]
    fn test_tiers_pick_different_materials_within_one_bracket() {
        let facts = base_facts();
        let low = build_image_prompt(&facts, ScenarioTier::Conservative);
        let high = build_image_prompt(&facts, ScenarioTier::Aggressive);
        assert!(low.contains("BUDGET TIER: budget tier (lower range within user budget)"));
        assert!(low.contains("quality vinyl plank flooring"));
        assert!(high.contains("BUDGET TIER: premium tier (upper range within user budget)"));
        assert!(high.contains("venetian plaster walls"));
        assert_ne!(low, high);
    }

    #[test]
    fn test_undecided_budget_uses_generic_materials() {
        let mut facts = base_facts();
        facts.budget = "unknown".to_string();
        let prompt = build_image_prompt(&facts, ScenarioTier::Conservative);
        assert!(prompt.contains("FLOOR: quality vinyl flooring"));
        assert!(prompt.contains("STYLE: mid-range, comfortable and well-made"));
    }
}
