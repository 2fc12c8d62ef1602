//! Capability CSV import and export
//!
//! Export writes every capability with every value quoted. Import requires
//! the seven core columns by name (any order); the milestone columns written
//! by export are ignored on the way back in.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use captrack_core::model::{CapabilityStatus, NewCapability, Rag, WorkstreamLead};
use captrack_core::ops::{capability_ops, Store};
use captrack_core::{log_op_end, log_op_error, log_op_start};

use crate::csv_codec::{self, CsvError};
use crate::errors::{import_validation, Result, MISSING_HEADERS_MESSAGE};

/// Export column order
pub const EXPORT_HEADERS: [&str; 9] = [
    "Name",
    "Workstream",
    "Lead",
    "SME",
    "BA",
    "Status",
    "RAG",
    "Technical Milestone",
    "Business Milestone",
];

/// Columns an import file must carry
pub const REQUIRED_HEADERS: [&str; 7] = ["Name", "Workstream", "Lead", "SME", "BA", "Status", "RAG"];

const OP_IMPORT: &str = "capability_import";

/// Counts reported after an import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Why a data row was not imported
#[derive(Debug, Clone, PartialEq, Eq)]
enum RowRejection {
    Malformed(CsvError),
    TooFewFields(usize),
    MissingName,
    MissingWorkstream,
    UnknownStatus(String),
    UnknownRag(String),
}

/// Render all capabilities as CSV text, header first
pub fn export_capabilities(store: &Store) -> String {
    let mut lines = vec![csv_codec::quoted_record(EXPORT_HEADERS)];
    for cap in store.capabilities() {
        let technical = cap
            .technical_milestone
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or_default();
        let business = cap
            .business_milestone
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or_default();
        lines.push(csv_codec::quoted_record([
            cap.name.as_str(),
            cap.workstream.as_str(),
            cap.workstream_lead.name.as_str(),
            cap.sme.as_str(),
            cap.ba.as_str(),
            cap.status.as_str(),
            cap.rag.as_str(),
            technical,
            business,
        ]));
    }
    lines.join("\n")
}

/// Column positions of the required headers
struct HeaderIndex {
    name: usize,
    workstream: usize,
    lead: usize,
    sme: usize,
    ba: usize,
    status: usize,
    rag: usize,
}

impl HeaderIndex {
    fn locate(headers: &[String]) -> Option<Self> {
        let find = |wanted: &str| headers.iter().position(|h| h == wanted);
        Some(Self {
            name: find("Name")?,
            workstream: find("Workstream")?,
            lead: find("Lead")?,
            sme: find("SME")?,
            ba: find("BA")?,
            status: find("Status")?,
            rag: find("RAG")?,
        })
    }

    fn draft(&self, values: &[String]) -> std::result::Result<NewCapability, RowRejection> {
        if values.len() < REQUIRED_HEADERS.len() {
            return Err(RowRejection::TooFewFields(values.len()));
        }
        let value = |idx: usize| values.get(idx).map(String::as_str).unwrap_or_default();

        let name = value(self.name);
        if name.is_empty() {
            return Err(RowRejection::MissingName);
        }
        let workstream = value(self.workstream);
        if workstream.is_empty() {
            return Err(RowRejection::MissingWorkstream);
        }

        let status = match value(self.status) {
            "" => CapabilityStatus::NotStarted,
            raw => raw
                .parse::<CapabilityStatus>()
                .map_err(|_| RowRejection::UnknownStatus(raw.to_string()))?,
        };
        let rag = match value(self.rag) {
            "" => Rag::Blue,
            raw => raw
                .parse::<Rag>()
                .map_err(|_| RowRejection::UnknownRag(raw.to_string()))?,
        };

        Ok(NewCapability {
            name: name.to_string(),
            workstream: workstream.to_string(),
            workstream_lead: WorkstreamLead::named(value(self.lead)),
            sme: value(self.sme).to_string(),
            ba: value(self.ba).to_string(),
            status,
            rag,
            ..Default::default()
        })
    }
}

/// Add one capability per valid data row of `text`
///
/// Rows with fewer than seven fields, an empty name or workstream, or an
/// unrecognised status or RAG value are skipped and counted. An empty
/// status becomes Not Started and an empty RAG becomes Blue.
///
/// # Errors
///
/// Returns `InvalidInput` with the missing-headers message when any
/// required column is absent; nothing is imported in that case.
pub fn import_capabilities(store: &mut Store, text: &str) -> Result<ImportReport> {
    log_op_start!(OP_IMPORT);
    let start = Instant::now();

    let index = match header_index(text) {
        Ok(index) => index,
        Err(err) => {
            log_op_error!(
                OP_IMPORT,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(err);
        }
    };

    let mut report = ImportReport::default();
    for (line_no, line) in csv_codec::records(text).skip(1) {
        let draft = csv_codec::parse_record(line)
            .map_err(RowRejection::Malformed)
            .and_then(|values| index.draft(&values));
        match draft {
            Ok(draft) => {
                capability_ops::add_capability(store, draft);
                report.imported += 1;
            }
            Err(reason) => {
                tracing::debug!(line = line_no, ?reason, "skipping capability row");
                report.skipped += 1;
            }
        }
    }

    log_op_end!(
        OP_IMPORT,
        duration_ms = start.elapsed().as_millis() as u64,
        imported = report.imported,
        skipped = report.skipped
    );
    Ok(report)
}

fn header_index(text: &str) -> Result<HeaderIndex> {
    let missing = || import_validation(OP_IMPORT, MISSING_HEADERS_MESSAGE);
    let (_, header_line) = csv_codec::records(text).next().ok_or_else(missing)?;
    let headers = csv_codec::parse_record(header_line).map_err(|_| missing())?;
    HeaderIndex::locate(&headers).ok_or_else(missing)
}
