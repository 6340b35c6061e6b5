// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for time handling and man page rendering
// role: utilities/helpers
// inputs: Optional now override; clap CommandFactory
// outputs: Effective "now" instant, formatted timestamps, man page text
// invariants: effective_now is the single source of wall-clock reads; timestamp format is stable and locale-independent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Local};
use clap::CommandFactory;

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise
/// the current local time is used. Centralizes our handling of test
/// determinism without sprinkling `Local::now()` throughout the code.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}

/// Parse a `--now-override` string into a local DateTime.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    chrono::DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}

/// Stable timestamp rendering for report summaries.
pub fn format_generated_at(now: DateTime<Local>) -> String {
  now.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
