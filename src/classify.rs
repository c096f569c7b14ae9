//! Keyword classifier for uploaded items.
//!
//! Only the file name is looked at. Each category owns a fixed list of
//! lower-case keywords; a category scores one point per keyword that appears
//! anywhere in the lower-cased name, and the highest score wins.

use std::fmt;

/// Text shown when no category scored.
pub const NO_MATCH: &str = "no confident match";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WasteLabel {
    Battery,
    Cable,
    Electronics,
    Appliance,
}

impl WasteLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            WasteLabel::Battery => "Battery",
            WasteLabel::Cable => "Cable",
            WasteLabel::Electronics => "Electronics",
            WasteLabel::Appliance => "Appliance",
        }
    }
}

impl fmt::Display for WasteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation order matters: on equal scores the earlier entry wins.
pub static KEYWORDS: [(WasteLabel, &[&str]); 4] = [
    (WasteLabel::Battery, &["batt", "cell", "li-ion", "battery"]),
    (WasteLabel::Cable, &["wire", "cord", "lead", "cable"]),
    (
        WasteLabel::Electronics,
        &["phone", "laptop", "circuit", "electronic"],
    ),
    (WasteLabel::Appliance, &["fridge", "washer", "oven", "appliance"]),
];

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// Outcome of [`classify`]. `label` is `None` when nothing scored, in which
/// case `score` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub label: Option<WasteLabel>,
    pub score: u32,
}

impl Classification {
    pub fn is_confident(&self) -> bool {
        self.label.is_some()
    }

    pub fn label_text(&self) -> &'static str {
        self.label.map_or(NO_MATCH, WasteLabel::as_str)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (score {})", self.label_text(), self.score)
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Number of `keywords` contained in `name_lower`. Keywords are counted
/// independently, so overlapping ones ("batt", "battery") both score.
fn keyword_score(name_lower: &str, keywords: &[&str]) -> u32 {
    keywords.iter().filter(|kw| name_lower.contains(*kw)).count() as u32
}

/// Score of every category in evaluation order.
pub fn scores(file_name: &str) -> Vec<(WasteLabel, u32)> {
    let lower = file_name.to_lowercase();
    KEYWORDS
        .iter()
        .map(|(label, kws)| (*label, keyword_score(&lower, kws)))
        .collect()
}

/// Classify an item by its file name.
pub fn classify(file_name: &str) -> Classification {
    let mut best = Classification {
        label: None,
        score: 0,
    };
    for (label, score) in scores(file_name) {
        if score > best.score {
            best = Classification {
                label: Some(label),
                score,
            };
        }
    }
    log::debug!("classified {file_name:?} as {best}");
    best
}
