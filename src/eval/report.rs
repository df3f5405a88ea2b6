//! Report types for evaluation results.
//!
//! This module converts task tallies into rate tables and renders the
//! nested human-readable summary. Reports serialize to JSON and to a flat
//! CSV for programmatic use.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::IllusionCategory;
use crate::error::Result;
use crate::eval::session::{GroundingResults, REF_LOC_TASK, VqaResults};
use crate::eval::tally::{RateTable, Tally, TaskTallies};

/// Rates and counts for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Task name ("SameDiffQA", "RefQA", "AttrQA", "RefLoc").
    pub task: String,

    /// Overall outcome counts.
    pub counts: Tally,

    /// Overall outcome rates.
    pub rates: RateTable,

    /// Outcome counts per illusion category.
    pub per_category_counts: BTreeMap<IllusionCategory, Tally>,

    /// Outcome rates per illusion category. Categories with no pairs have
    /// empty tables.
    pub per_category_rates: BTreeMap<IllusionCategory, RateTable>,
}

impl TaskSummary {
    /// Derive a summary from one task's tallies.
    #[must_use]
    pub fn from_tallies(task: &str, tallies: &TaskTallies) -> Self {
        Self {
            task: task.to_string(),
            counts: tallies.overall.clone(),
            rates: tallies.overall.rates(),
            per_category_counts: tallies.per_category.clone(),
            per_category_rates: tallies
                .per_category
                .iter()
                .map(|(category, tally)| (*category, tally.rates()))
                .collect(),
        }
    }
}

/// Full evaluation report across all scored tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    /// Prediction file the VQA tasks were scored from.
    pub vqa_predictions: Option<PathBuf>,

    /// Prediction file the grounding task was scored from.
    pub vg_predictions: Option<PathBuf>,

    /// Per-task summaries in evaluation order.
    pub tasks: Vec<TaskSummary>,

    /// When this report was generated.
    #[serde(with = "chrono_serde")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl EvalReport {
    /// Create an empty report stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vqa_predictions: None,
            vg_predictions: None,
            tasks: Vec::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Append summaries for the three VQA tasks.
    pub fn push_vqa(&mut self, results: &VqaResults) {
        for (name, tallies) in results.tasks() {
            self.tasks.push(TaskSummary::from_tallies(name, tallies));
        }
    }

    /// Append the summary for the grounding task.
    pub fn push_grounding(&mut self, results: &GroundingResults) {
        self.tasks
            .push(TaskSummary::from_tallies(REF_LOC_TASK, &results.ref_loc));
    }

    /// Render the nested text summary.
    ///
    /// Overall rates come first, then per-category rates, each task keyed
    /// by name and leaf rates formatted as two-decimal percentages.
    #[must_use]
    pub fn render(&self) -> String {
        let rule = "-".repeat(30);
        let mut out = String::new();

        out.push_str(&format!("{rule} Evaluation Results {rule}\n"));
        for summary in &self.tasks {
            out.push_str(&format!("{}:\n", summary.task));
            render_rates(&mut out, &summary.rates, 4);
        }

        out.push_str(&format!("{rule} Per-category Results {rule}\n"));
        for summary in &self.tasks {
            out.push_str(&format!("{}_per_category:\n", summary.task));
            for (category, rates) in &summary.per_category_rates {
                out.push_str(&format!("    {category}:\n"));
                render_rates(&mut out, rates, 8);
            }
        }

        out
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Write a flat CSV summary: one row per (task, category, outcome).
    ///
    /// Overall rows carry the category `"overall"`.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["task", "category", "outcome", "count", "rate"])?;

        for summary in &self.tasks {
            write_tally_rows(&mut wtr, &summary.task, "overall", &summary.counts)?;
            for (category, tally) in &summary.per_category_counts {
                write_tally_rows(&mut wtr, &summary.task, &category.to_string(), tally)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }
}

impl Default for EvalReport {
    fn default() -> Self {
        Self::new()
    }
}

fn render_rates(out: &mut String, rates: &RateTable, indent: usize) {
    for (outcome, rate) in rates.iter() {
        out.push_str(&format!(
            "{:indent$}{:<14}: {:.2}%\n",
            "",
            outcome.label(),
            rate * 100.0
        ));
    }
}

fn write_tally_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    task: &str,
    category: &str,
    tally: &Tally,
) -> Result<()> {
    let total = tally.total();
    for (outcome, count) in tally.iter() {
        wtr.write_record([
            task.to_string(),
            category.to_string(),
            outcome.label().to_string(),
            count.to_string(),
            format!("{:.4}", count as f64 / total as f64),
        ])?;
    }
    Ok(())
}

// Custom serialization for timestamps as RFC 3339 strings.
mod chrono_serde {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
