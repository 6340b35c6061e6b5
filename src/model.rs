// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the timesheet data model (raw wire records, normalized records, week buckets, employee aggregates, report summaries)
// role: model/types
// outputs: Serializable structs with stable field names matching the backend list endpoint
// invariants: Raw fields stay permissive (number-or-string); normalized fields are concretely typed; additive fields only
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle tag of a timesheet record, set by a manager/admin action
/// upstream of this tool. The wire form is lowercase; ingest accepts any
/// casing and maps unknown or empty values to `Pending`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Pending,
  Approved,
  Rejected,
}

impl Status {
  pub fn as_str(&self) -> &'static str {
    match self {
      Status::Pending => "pending",
      Status::Approved => "approved",
      Status::Rejected => "rejected",
    }
  }
}

impl std::fmt::Display for Status {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One element of the backend's list-endpoint response, taken as loosely
/// as the backend has been observed to send it: ids and hours arrive as
/// numbers or strings depending on the row, and several fields go missing.
#[derive(Debug, Deserialize, Clone)]
pub struct RawRecord {
  #[serde(default)]
  pub timesheet_id: Option<serde_json::Value>,
  #[serde(default)]
  pub employee_id: Option<serde_json::Value>,
  #[serde(default)]
  pub employee_name: Option<String>,
  #[serde(default)]
  pub employee_surname: Option<String>,
  #[serde(default)]
  pub employee_email: Option<String>,
  #[serde(default)]
  pub employee_department: Option<String>,
  #[serde(default)]
  pub date: Option<String>,
  #[serde(default)]
  pub clock_in: Option<String>,
  #[serde(default)]
  pub clock_out: Option<String>,
  /// Hours for the entry; some deployments name this `hours_worked`.
  #[serde(default, alias = "hours_worked")]
  pub total_hours: Option<serde_json::Value>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub status: Option<String>,
}

/// A normalized timesheet record. Immutable once built; grouping and
/// rendering only ever read from these.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetRecord {
  pub employee_id: String,
  pub name: String,
  pub surname: String,
  pub email: String,
  pub department: Option<String>,
  /// Parsed calendar date; `None` when the raw value did not parse.
  pub date: Option<NaiveDate>,
  /// The raw date string as received, kept for task listings.
  pub date_raw: String,
  pub clock_in: String,
  pub clock_out: String,
  pub hours: f64,
  pub description: String,
  pub status: Status,
}

/// One task line inside an employee aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct TaskEntry {
  pub date: String,
  pub description: String,
  pub clock_in: String,
  pub clock_out: String,
  pub hours: f64,
  pub status: Status,
}

/// Per-employee rollup of tasks and total hours. `total` is recomputed by
/// the grouping engine on every run, never carried in from the input.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeAggregate {
  pub employee_id: String,
  pub name: String,
  pub surname: String,
  pub email: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department: Option<String>,
  pub tasks: Vec<TaskEntry>,
  pub total: f64,
}

/// Aggregation spanning Monday–Sunday of one calendar week.
/// `week_start` is the Monday on or before every contained record's date.
#[derive(Debug, Serialize)]
pub struct WeekBucket {
  pub week_start: NaiveDate,
  pub week_end: NaiveDate,
  pub label: String,
  pub employees: Vec<EmployeeAggregate>,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
  pub count: usize,
  pub filtered_count: usize,
  pub skipped_undated: usize,
  pub total_hours: f64,
  pub status_filter: String,
  pub department_filter: String,
  pub generated_at: String,
}

/// JSON report shape: summary plus exactly one of `weeks` / `employees`
/// depending on the grouping mode.
#[derive(Debug, Serialize)]
pub struct GroupedReport {
  pub summary: ReportSummary,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weeks: Option<Vec<WeekBucket>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub employees: Option<Vec<EmployeeAggregate>>,
}
