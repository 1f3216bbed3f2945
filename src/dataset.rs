use crate::error::{Result, ScorecardError};
use crate::types::scoring::{round2, Category, Company, ScoreEntry};

/// Fixed category order. Table rows and chart series follow this order.
pub const CATEGORY_NAMES: [&str; 10] = [
    "CEO Tenure & Impact",
    "Executive Turnover Rate",
    "Internal vs. External Hires",
    "Founder Presence",
    "Headcount Efficiency",
    "New Role Creation",
    "Department Growth vs. Market Conditions",
    "Product & R&D Investment",
    "Acquisitions & Partnerships",
    "Market Share Growth",
];

const WEIGHTS: [(&str, f64); 10] = [
    ("CEO Tenure & Impact", 0.15),
    ("Executive Turnover Rate", 0.10),
    ("Internal vs. External Hires", 0.10),
    ("Founder Presence", 0.05),
    ("Headcount Efficiency", 0.15),
    ("New Role Creation", 0.10),
    ("Department Growth vs. Market Conditions", 0.10),
    ("Product & R&D Investment", 0.10),
    ("Acquisitions & Partnerships", 0.10),
    ("Market Share Growth", 0.05),
];

const DESCRIPTIONS: [(&str, &str); 10] = [
    (
        "CEO Tenure & Impact",
        "Measures how a long-tenured CEO influences stability, strategy, and performance.",
    ),
    (
        "Executive Turnover Rate",
        "Evaluates the frequency of executive changes and its impact on continuity.",
    ),
    (
        "Internal vs. External Hires",
        "Analyzes whether leadership changes come from within or outside the company.",
    ),
    (
        "Founder Presence",
        "Assesses whether founders remain involved and their influence on company direction.",
    ),
    (
        "Headcount Efficiency",
        "Measures revenue per employee to determine efficient scaling.",
    ),
    (
        "New Role Creation",
        "Examines the introduction of new executive roles and strategic priorities.",
    ),
    (
        "Department Growth vs. Market Conditions",
        "Tracks hiring growth compared to market demand.",
    ),
    (
        "Product & R&D Investment",
        "Evaluates investment in innovation and new product development.",
    ),
    (
        "Acquisitions & Partnerships",
        "Analyzes strategic deals for expansion.",
    ),
    (
        "Market Share Growth",
        "Measures leadership impact on competitive positioning.",
    ),
];

/// Raw scores per company, index-aligned with `CATEGORY_NAMES`.
const SCORES: [(&str, [u8; 10]); 3] = [
    ("Databricks", [9, 8, 7, 10, 8, 9, 7, 9, 8, 9]),
    ("Snowflake", [7, 6, 7, 5, 9, 9, 8, 9, 9, 8]),
    ("Palantir", [10, 9, 6, 10, 7, 6, 7, 8, 7, 7]),
];

pub const DEFAULT_DESCRIPTION: &str = "No description available for this category.";

pub const DETAIL_RATIONALE: &str = "This score was determined based on tenure, impact on \
     company strategy, and performance benchmarks.";

/// The immutable scorecard dataset. Built once at startup and shared
/// read-only; entries are ordered company-major, then in fixed category
/// order.
#[derive(Debug)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub companies: Vec<Company>,
    pub entries: Vec<ScoreEntry>,
}

impl Dataset {
    pub fn built_in() -> Result<Dataset> {
        let rows: Vec<(&str, &[u8])> = SCORES.iter().map(|(c, r)| (*c, r.as_slice())).collect();
        build(&CATEGORY_NAMES, &WEIGHTS, &DESCRIPTIONS, &rows)
    }

    /// Startup invariants: weights sum to 1.0, one entry per (company,
    /// category) pair, weighted score matches the rounding convention.
    pub fn validate(&self) -> Result<()> {
        let total: f64 = self.categories.iter().map(|c| c.weight).sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(ScorecardError::InvalidDataset(format!(
                "category weights sum to {total}, expected 1.0"
            )));
        }
        let expected = self.companies.len() * self.categories.len();
        if self.entries.len() != expected {
            return Err(ScorecardError::InvalidDataset(format!(
                "expected {expected} score entries, found {}",
                self.entries.len()
            )));
        }
        for company in &self.companies {
            for category in &self.categories {
                let matches = self
                    .entries
                    .iter()
                    .filter(|e| e.company == company.name && e.category == category.name)
                    .count();
                if matches != 1 {
                    return Err(ScorecardError::InvalidDataset(format!(
                        "expected exactly one entry for ({}, {}), found {matches}",
                        company.name, category.name
                    )));
                }
            }
        }
        for entry in &self.entries {
            let weighted = round2(f64::from(entry.score) * entry.weight);
            if (entry.weighted_score - weighted).abs() > 1e-9 {
                return Err(ScorecardError::InvalidDataset(format!(
                    "weighted score drift for ({}, {})",
                    entry.company, entry.category
                )));
            }
        }
        Ok(())
    }
}

fn build(
    category_names: &[&str],
    weights: &[(&str, f64)],
    descriptions: &[(&str, &str)],
    scores: &[(&str, &[u8])],
) -> Result<Dataset> {
    let mut categories = Vec::with_capacity(category_names.len());
    for name in category_names {
        let weight = weights
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
            .ok_or_else(|| {
                ScorecardError::InvalidDataset(format!("no weight for category {name}"))
            })?;
        // A category missing from the description table renders with a
        // default line instead of failing the build.
        let description = descriptions
            .iter()
            .find(|(n, _)| n == name)
            .map_or(DEFAULT_DESCRIPTION, |(_, d)| *d);
        categories.push(Category {
            name: (*name).to_string(),
            weight,
            description: description.to_string(),
        });
    }

    let companies: Vec<Company> = scores
        .iter()
        .map(|(name, _)| Company {
            name: (*name).to_string(),
        })
        .collect();

    let mut entries = Vec::with_capacity(companies.len() * categories.len());
    for (company, row) in scores {
        if row.len() != categories.len() {
            return Err(ScorecardError::InvalidDataset(format!(
                "score row for {company} has {} values, expected {}",
                row.len(),
                categories.len()
            )));
        }
        for (category, raw) in categories.iter().zip(row.iter()) {
            entries.push(ScoreEntry {
                company: (*company).to_string(),
                category: category.name.clone(),
                score: *raw,
                weight: category.weight,
                weighted_score: round2(f64::from(*raw) * category.weight),
            });
        }
    }

    Ok(Dataset {
        categories,
        companies,
        entries,
    })
}
