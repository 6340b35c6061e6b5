// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Coerce raw backend records into normalized TimesheetRecords (hours as f64, status as closed enum, ids as strings)
// role: processing/normalizer
// inputs: Raw JSON bytes (array of record objects)
// outputs: Vec<TimesheetRecord>; malformed numeric fields become 0.0, absent status becomes pending
// invariants: Never errors on a malformed record; input is not mutated; output order equals input order
// errors: Only top-level JSON parse failures surface, with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::model::{RawRecord, Status, TimesheetRecord};

pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawRecord>> {
  serde_json::from_slice::<Vec<RawRecord>>(bytes).context("parsing timesheet JSON (expected a top-level array)")
}

pub fn normalize_records(raw: Vec<RawRecord>) -> Vec<TimesheetRecord> {
  raw.into_iter().map(normalize_record).collect()
}

fn normalize_record(r: RawRecord) -> TimesheetRecord {
  let date_raw = r.date.unwrap_or_default();
  TimesheetRecord {
    employee_id: id_string(r.employee_id.as_ref()),
    name: r.employee_name.unwrap_or_default(),
    surname: r.employee_surname.unwrap_or_default(),
    email: r.employee_email.unwrap_or_default(),
    department: r.employee_department.filter(|d| !d.trim().is_empty()),
    date: parse_date(&date_raw),
    date_raw,
    clock_in: r.clock_in.unwrap_or_default(),
    clock_out: r.clock_out.unwrap_or_default(),
    hours: parse_hours(r.total_hours.as_ref()),
    description: r.description.unwrap_or_default(),
    status: parse_status(r.status.as_deref()),
  }
}

/// Hours arrive as a JSON number or as a numeric string. Anything that
/// does not parse to a finite float counts as 0 — a reporting-fidelity
/// loss, not an error.
fn parse_hours(v: Option<&serde_json::Value>) -> f64 {
  let parsed = match v {
    Some(serde_json::Value::Number(n)) => n.as_f64(),
    Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  match parsed {
    Some(h) if h.is_finite() => h,
    _ => 0.0,
  }
}

/// Status normalization: case-insensitive, with absent/empty/unknown all
/// mapping to pending (the UI renders anything it does not recognize as
/// pending, so the exporter matches).
fn parse_status(s: Option<&str>) -> Status {
  match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
    Some("approved") => Status::Approved,
    Some("rejected") => Status::Rejected,
    _ => Status::Pending,
  }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn id_string(v: Option<&serde_json::Value>) -> String {
  match v {
    Some(serde_json::Value::String(s)) => s.clone(),
    Some(serde_json::Value::Number(n)) => n.to_string(),
    _ => String::new(),
  }
}
