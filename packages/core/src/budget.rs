use serde::{Deserialize, Serialize};
use std::fmt;

/// Renovation budget bracket chosen during the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetBracket {
    #[serde(rename = "under-50m")]
    Under50M,
    #[serde(rename = "50m-5b")]
    From50MTo500M,
    #[serde(rename = "5b-15b")]
    From500MTo1500M,
    #[serde(rename = "over-15b")]
    Over1500M,
    #[serde(rename = "unknown")]
    Undecided,
}

impl BudgetBracket {
    /// Parse the machine token stored in `ProjectFacts::budget`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "under-50m" => Some(BudgetBracket::Under50M),
            "50m-5b" => Some(BudgetBracket::From50MTo500M),
            "5b-15b" => Some(BudgetBracket::From500MTo1500M),
            "over-15b" => Some(BudgetBracket::Over1500M),
            "unknown" => Some(BudgetBracket::Undecided),
            _ => None,
        }
    }

    /// Machine token used in the catalog and on the wire
    pub fn id(&self) -> &'static str {
        match self {
            BudgetBracket::Under50M => "under-50m",
            BudgetBracket::From50MTo500M => "50m-5b",
            BudgetBracket::From500MTo1500M => "5b-15b",
            BudgetBracket::Over1500M => "over-15b",
            BudgetBracket::Undecided => "unknown",
        }
    }

    /// Lowest cost the bracket covers, in won
    pub fn floor(&self) -> u64 {
        match self {
            BudgetBracket::Under50M => 10_000_000,
            BudgetBracket::From50MTo500M => 50_000_000,
            BudgetBracket::From500MTo1500M => 500_000_000,
            BudgetBracket::Over1500M => 1_500_000_000,
            BudgetBracket::Undecided => 0,
        }
    }

    /// Highest cost the bracket covers, in won. Zero means "no ceiling known"
    /// and disables cost clamping downstream.
    pub fn ceiling(&self) -> u64 {
        match self {
            BudgetBracket::Under50M => 50_000_000,
            BudgetBracket::From50MTo500M => 500_000_000,
            BudgetBracket::From500MTo1500M => 1_500_000_000,
            BudgetBracket::Over1500M => 50_000_000_000,
            BudgetBracket::Undecided => 0,
        }
    }

    pub fn span(&self) -> u64 {
        self.ceiling().saturating_sub(self.floor())
    }

    /// Band at the 20th to 60th percentile of the bracket, used when a
    /// scenario arrives with no usable cost figures.
    pub fn default_band(&self) -> (u64, u64) {
        let span = self.span();
        (self.floor() + span / 5, self.floor() + span * 3 / 5)
    }

    /// Human-readable range label
    pub fn label(&self) -> &'static str {
        match self {
            BudgetBracket::Under50M => "Under ₩50M",
            BudgetBracket::From50MTo500M => "₩50M – ₩500M",
            BudgetBracket::From500MTo1500M => "₩500M – ₩1.5B",
            BudgetBracket::Over1500M => "Over ₩1.5B",
            BudgetBracket::Undecided => "Not decided yet",
        }
    }

    /// Style descriptor fed into image prompts
    pub fn style_level(&self) -> &'static str {
        match self {
            BudgetBracket::Under50M => "budget-conscious, practical and efficient",
            BudgetBracket::From50MTo500M => "mid-range, comfortable and well-made",
            BudgetBracket::From500MTo1500M => "upscale, premium materials throughout",
            BudgetBracket::Over1500M => "luxury, ultra-premium flagship quality",
            BudgetBracket::Undecided => "mid-range, comfortable and well-made",
        }
    }
}

impl Default for BudgetBracket {
    fn default() -> Self {
        BudgetBracket::Undecided
    }
}

impl fmt::Display for BudgetBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Format a won amount with thousands separators, e.g. 1500000 -> "1,500,000"
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
