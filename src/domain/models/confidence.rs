use serde_derive::Deserialize;
use serde_derive::Serialize;

/// One candidate condition and the model's probability estimate for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceItem {
    pub name: String,
    pub prob: f64,
}

impl ConfidenceItem {
    pub fn new(name: &str, prob: f64) -> ConfidenceItem {
        return ConfidenceItem {
            name: name.to_string(),
            prob,
        };
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfidenceBar {
    pub name: String,
    /// Untouched source value, may sit outside of `[0, 1]`.
    pub prob: f64,
    /// Rounded percentage label, e.g. `82%`.
    pub label: String,
    /// Bar width as a percentage of its container. Not clamped.
    pub width: f64,
    pub tier: Tier,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderableConfidence {
    NoData,
    Bars(Vec<ConfidenceBar>),
}
