use crate::model::EmployeeAggregate;
use crate::report::format_hours;

const HEADER: &str = "Name,Surname,Email,Department,Tasks,Total Hours";

/// Render the flat comma-separated table: one row per employee over the
/// by-employee grouping, columns [name, surname, email, department,
/// task-descriptions-joined, total-hours]. MIME type is text/csv.
pub fn render(employees: &[EmployeeAggregate]) -> Vec<u8> {
  let mut rows: Vec<String> = Vec::with_capacity(employees.len() + 1);
  rows.push(HEADER.to_string());

  for emp in employees {
    let tasks = emp
      .tasks
      .iter()
      .map(|t| sanitize_field(&t.description))
      .collect::<Vec<String>>()
      .join(" | ");
    let row = [
      sanitize_field(&emp.name),
      sanitize_field(&emp.surname),
      sanitize_field(&emp.email),
      sanitize_field(emp.department.as_deref().unwrap_or("")),
      tasks,
      format_hours(emp.total),
    ]
    .join(",");
    rows.push(row);
  }

  let mut out = rows.join("\n");
  out.push('\n');
  out.into_bytes()
}

/// Column structure is kept by stripping embedded commas and newlines
/// from field text instead of RFC-4180 quoting. Lossy on purpose: the
/// column layout must survive any description text.
fn sanitize_field(s: &str) -> String {
  s.chars()
    .map(|c| if c == ',' || c == '\n' || c == '\r' { ' ' } else { c })
    .collect()
}
