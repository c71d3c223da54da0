#[cfg(test)]
#[path = "confidence_model_test.rs"]
mod tests;

use crate::domain::models::ConfidenceBar;
use crate::domain::models::ConfidenceItem;
use crate::domain::models::RenderableConfidence;
use crate::domain::models::Tier;

const HIGH_TIER_FLOOR: f64 = 0.7;
const MEDIUM_TIER_FLOOR: f64 = 0.4;

pub struct ConfidenceModel {}

impl ConfidenceModel {
    /// Both bounds belong to the lower tier: 0.7 is medium and 0.4 is low.
    pub fn tier(prob: f64) -> Tier {
        if prob > HIGH_TIER_FLOOR {
            return Tier::High;
        }
        if prob > MEDIUM_TIER_FLOOR {
            return Tier::Medium;
        }

        return Tier::Low;
    }

    /// Percentage with no decimals, rounded half away from zero.
    pub fn percent_label(prob: f64) -> String {
        let mut rounded = (prob * 100.0).round();
        if rounded == 0.0 {
            // Avoids printing "-0%".
            rounded = 0.0;
        }

        return format!("{rounded:.0}%");
    }

    pub fn normalize(items: Option<&[ConfidenceItem]>) -> RenderableConfidence {
        let items = match items {
            Some(items) if !items.is_empty() => items,
            _ => return RenderableConfidence::NoData,
        };

        let bars = items
            .iter()
            .map(|item| {
                return ConfidenceBar {
                    name: item.name.to_string(),
                    prob: item.prob,
                    label: ConfidenceModel::percent_label(item.prob),
                    width: item.prob * 100.0,
                    tier: ConfidenceModel::tier(item.prob),
                };
            })
            .collect::<Vec<ConfidenceBar>>();

        return RenderableConfidence::Bars(bars);
    }
}
