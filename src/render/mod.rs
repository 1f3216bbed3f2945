pub mod html;

use crate::dataset::{Dataset, DETAIL_RATIONALE};
use crate::error::{Result, ScorecardError};
use crate::types::scoring::{ChartSeries, Company, ScoreDetail, ScoreEntry};
use std::sync::Arc;

/// Pure read-side of the scorecard: company list, per-company rows, chart
/// series, and per-category detail over the immutable dataset.
pub struct Renderer {
    dataset: Arc<Dataset>,
}

impl Renderer {
    pub fn new(dataset: Arc<Dataset>) -> Renderer {
        Renderer { dataset }
    }

    /// Fixed, ordered company list.
    pub fn companies(&self) -> &[Company] {
        &self.dataset.companies
    }

    /// The dropdown default: first company in the fixed order.
    pub fn default_company(&self) -> &str {
        self.dataset
            .companies
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or("")
    }

    /// Entries for one company, in the fixed category order.
    pub fn rows_for(&self, company: &str) -> Result<Vec<&ScoreEntry>> {
        self.require_company(company)?;
        Ok(self
            .dataset
            .entries
            .iter()
            .filter(|entry| entry.company == company)
            .collect())
    }

    /// Same filter as `rows_for`, reshaped for the bar chart.
    pub fn chart_series_for(&self, company: &str) -> Result<ChartSeries> {
        let rows = self.rows_for(company)?;
        Ok(ChartSeries {
            category_labels: rows.iter().map(|e| e.category.clone()).collect(),
            score_values: rows.iter().map(|e| e.score).collect(),
        })
    }

    /// Detail payload for one (company, category) cell.
    pub fn detail_for(&self, company: &str, category: &str) -> Result<ScoreDetail> {
        self.require_company(company)?;
        let meta = self
            .dataset
            .categories
            .iter()
            .find(|c| c.name == category)
            .ok_or_else(|| ScorecardError::UnknownCategory(category.to_string()))?;
        let entry = self
            .dataset
            .entries
            .iter()
            .find(|e| e.company == company && e.category == category)
            .ok_or_else(|| ScorecardError::UnknownCategory(category.to_string()))?;
        Ok(ScoreDetail {
            category: meta.name.clone(),
            description: meta.description.clone(),
            score: entry.score,
            weight_percent: meta.weight * 100.0,
            rationale: DETAIL_RATIONALE.to_string(),
        })
    }

    fn require_company(&self, company: &str) -> Result<()> {
        if self.dataset.companies.iter().any(|c| c.name == company) {
            Ok(())
        } else {
            Err(ScorecardError::UnknownCompany(company.to_string()))
        }
    }
}
