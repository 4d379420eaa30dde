//! Per-example scoring.
//!
//! Scoring is pure: it only looks at one labeled example and the ranking the
//! classifier returned for it.

use nlc_sdk::ClassificationResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{ClassMatch, LabeledExample, ScoredResult};

/// Rank cutoff used for the `top3` flag
pub const TOP3_CUTOFF: usize = 3;

/// How the `top5` flag is computed.
///
/// Older reports computed `top5` with the top-3 cutoff. `Literal` reproduces
/// those reports; `Corrected` uses rank `< 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Top5Mode {
    /// `top5` is identical to `top3` (rank `< 3`)
    Literal,
    /// `top5` means rank `< 5`
    #[default]
    Corrected,
}

impl Top5Mode {
    /// Exclusive rank cutoff for the `top5` flag
    pub fn cutoff(self) -> usize {
        match self {
            Top5Mode::Literal => TOP3_CUTOFF,
            Top5Mode::Corrected => 5,
        }
    }
}

impl FromStr for Top5Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(Top5Mode::Literal),
            "corrected" => Ok(Top5Mode::Corrected),
            other => Err(format!(
                "invalid top-5 mode '{}', expected 'literal' or 'corrected'",
                other
            )),
        }
    }
}

impl fmt::Display for Top5Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Top5Mode::Literal => write!(f, "literal"),
            Top5Mode::Corrected => write!(f, "corrected"),
        }
    }
}

/// Score one classification result against the labels of its example.
pub fn score(
    example: &LabeledExample,
    result: ClassificationResult,
    top5_mode: Top5Mode,
) -> ScoredResult {
    let exact_match = example.classes.iter().any(|c| *c == result.top_class);

    let class_matches: Vec<ClassMatch> = example
        .classes
        .iter()
        .map(|class_name| ClassMatch {
            class_name: class_name.clone(),
            match_index: result.rank_of(class_name),
        })
        .collect();

    let top3 = class_matches.iter().any(|m| m.within(TOP3_CUTOFF));
    let top5 = class_matches.iter().any(|m| m.within(top5_mode.cutoff()));
    let match_fail = !class_matches.iter().any(ClassMatch::found);

    ScoredResult {
        classifier_id: result.classifier_id,
        url: result.url,
        text: example.text.clone(),
        top_class: result.top_class,
        classes: result.classes,
        exact_match,
        class_matches,
        top3,
        top5,
        match_fail,
    }
}
