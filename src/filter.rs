use crate::model::{Status, TimesheetRecord};

/// Apply status and department predicates, AND-composed, preserving
/// input order. `None` for either predicate means "all".
pub fn apply(records: &[TimesheetRecord], status: Option<Status>, department: Option<&str>) -> Vec<TimesheetRecord> {
  records
    .iter()
    .filter(|r| status.map_or(true, |s| r.status == s))
    .filter(|r| department.map_or(true, |d| r.department.as_deref() == Some(d)))
    .cloned()
    .collect()
}
