pub mod csv;
pub mod pdf;

/// Deterministic artifact filename from the active filters: base name,
/// `_{status}` when the status filter is concrete, then `_{department}`
/// when the department filter is concrete, then the extension. Token
/// order is fixed: status before department.
pub fn derive_filename(base: &str, status: &str, department: &str, ext: &str) -> String {
  let mut name = base.to_string();
  if status != "all" {
    name.push('_');
    name.push_str(status);
  }
  if department != "all" {
    name.push('_');
    name.push_str(department);
  }
  name.push('.');
  name.push_str(ext);
  name
}

/// Totals are rendered with exactly two decimals in every encoding.
pub fn format_hours(hours: f64) -> String {
  format!("{:.2}", hours)
}
