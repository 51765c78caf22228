/// Usability tier derived from the score value
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum Tier {
    #[strum(serialize = "Smooth movement")]
    Smooth,
    #[strum(serialize = "Moderate tremor")]
    Moderate,
    #[strum(serialize = "Intense tremor")]
    Intense,
}

impl Tier {
    /// Tiers are closed at their lower bound: 70 is smooth, 40 is moderate.
    pub fn from_value(value: u8) -> Self {
        match value {
            70.. => Tier::Smooth,
            40..=69 => Tier::Moderate,
            _ => Tier::Intense,
        }
    }
}

/// Shown by renderers while no score can be computed
pub const PLACEHOLDER_LABEL: &str = "Move the pointer to calculate";

/// 0-100 usability score
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Score {
    pub value: u8,
    pub tier: Tier,
}

impl Score {
    pub fn from_tremor(tremor: f64) -> Self {
        let value = (100.0 - tremor * 10.0).clamp(0.0, 100.0).round() as u8;
        Self {
            value,
            tier: Tier::from_value(value),
        }
    }
}

/// Score for an optional tremor index; absence propagates.
pub fn score(tremor: Option<f64>) -> Option<Score> {
    tremor.map(Score::from_tremor)
}
