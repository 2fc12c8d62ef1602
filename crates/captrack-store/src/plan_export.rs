//! Plan export (JSON and CSV)
//!
//! One row per capability, carrying the latest aspirational and latest
//! implementation plan. Capabilities without plans still appear, with
//! `null` plans in JSON and empty date cells in CSV.

#![allow(clippy::result_large_err)]

use std::fmt;
use std::str::FromStr;

use captrack_core::errors::{ExError, ExErrorKind};
use captrack_core::model::{CapabilityStatus, PhaseName, Plan, PlanPhases, PlanType};
use captrack_core::ops::Store;
use captrack_core::queries::latest_plan;
use chrono::NaiveDate;
use serde::Serialize;

use crate::csv_codec::quoted_record;
use crate::errors::{serialization_error, Result};

pub const CSV_HEADERS: [&str; 7] = [
    "Capability",
    "Workstream",
    "Status",
    "Aspirational Plan Start",
    "Aspirational Plan End",
    "Implementation Plan Start",
    "Implementation Plan End",
];

/// Output format for `export_plans`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("plan_export")
                .with_message(format!("unknown export format '{}'", other))),
        }
    }
}

/// Version and phases of one exported plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub version: u32,
    pub phases: PlanPhases,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            version: plan.version,
            phases: plan.phases.clone(),
        }
    }
}

/// One capability with its latest plan of each type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExportRow {
    pub capability: String,
    pub workstream: String,
    pub status: CapabilityStatus,
    pub aspirational_plan: Option<PlanSummary>,
    pub implementation_plan: Option<PlanSummary>,
}

impl PlanExportRow {
    fn csv_record(&self) -> String {
        let date = |plan: &Option<PlanSummary>, phase: PhaseName, end: bool| -> String {
            plan.as_ref()
                .and_then(|p| p.phases.get(phase))
                .and_then(|p| if end { p.end_date } else { p.start_date })
                .map(|d: NaiveDate| d.to_string())
                .unwrap_or_default()
        };

        quoted_record([
            self.capability.clone(),
            self.workstream.clone(),
            self.status.to_string(),
            date(&self.aspirational_plan, PhaseName::Requirements, false),
            date(&self.aspirational_plan, PhaseName::Uat, true),
            date(&self.implementation_plan, PhaseName::Development, false),
            date(&self.implementation_plan, PhaseName::Uat, true),
        ])
    }
}

/// Build one export row per capability, in store order
pub fn plan_export_rows(store: &Store) -> Vec<PlanExportRow> {
    store
        .capabilities()
        .iter()
        .map(|cap| PlanExportRow {
            capability: cap.name.clone(),
            workstream: cap.workstream.clone(),
            status: cap.status,
            aspirational_plan: latest_plan(store, &cap.id, PlanType::Aspirational)
                .map(PlanSummary::from),
            implementation_plan: latest_plan(store, &cap.id, PlanType::Implementation)
                .map(PlanSummary::from),
        })
        .collect()
}

/// Pretty-printed JSON array of export rows
///
/// # Errors
///
/// Returns `Serialization` if encoding fails.
pub fn export_plans_json(store: &Store) -> Result<String> {
    serde_json::to_string_pretty(&plan_export_rows(store))
        .map_err(|e| serialization_error("plan_export", e))
}

/// CSV with aspirational requirements start / uat end and implementation
/// development start / uat end, every value quoted
pub fn export_plans_csv(store: &Store) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];
    lines.extend(plan_export_rows(store).iter().map(PlanExportRow::csv_record));
    lines.join("\n")
}

/// Export in the requested format
///
/// # Errors
///
/// Returns `Serialization` if JSON encoding fails.
pub fn export_plans(store: &Store, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => export_plans_json(store),
        ExportFormat::Csv => Ok(export_plans_csv(store)),
    }
}
