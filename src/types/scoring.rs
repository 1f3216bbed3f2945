use serde::Serialize;

/// One scoring dimension: unique name, fixed importance weight (0..=1),
/// human-readable description. Defined once at startup, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    pub weight: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub name: String,
}

/// One (company, category) cell of the scorecard.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntry {
    pub company: String,
    pub category: String,
    pub score: u8,
    pub weight: f64,
    pub weighted_score: f64,
}

/// The rows of `ScoreEntry` reshaped for a bar chart widget. Labels and
/// values stay index-aligned with the table rows for the same company.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub category_labels: Vec<String>,
    pub score_values: Vec<u8>,
}

/// Detail payload for a single selected category.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreDetail {
    pub category: String,
    pub description: String,
    pub score: u8,
    pub weight_percent: f64,
    pub rationale: String,
}

/// Round half-away-from-zero to two decimals, matching the weighted-score
/// convention of the score table.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.349_999_9), 1.35);
        assert_eq!(round2(0.704_999), 0.7);
        assert_eq!(round2(9.0 * 0.15), 1.35);
    }
}
