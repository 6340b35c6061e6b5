// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one export run: load records, normalize, filter, group, render the chosen encoding, write the artifact
// role: processing/orchestrator
// inputs: EffectiveConfig (source, filters, format, grouping mode, out location)
// outputs: Artifact bytes on stdout, or a file plus a {"file": ...} pointer on stdout
// side_effects: Reads stdin/files/network per source; writes the artifact; prints the pointer
// invariants:
// - filtering always happens locally, identically for every input source
// - out "-" streams raw artifact bytes; a directory out gets the filter-derived filename
// - a skipped-undated count is reported on stderr, never a panic
// errors: Propagates load/render/write errors with path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::cli::{EffectiveConfig, Format, GroupBy, InputSource};
use crate::model::{GroupedReport, ReportSummary, TimesheetRecord};
use crate::report::derive_filename;
use crate::{fetch, filter, group, ingest, report, util};

const BASE_NAME: &str = "timesheets";

pub fn run(cfg: &EffectiveConfig) -> Result<()> {
  let bytes = load_input(cfg)?;
  let raw = ingest::parse_records(&bytes)?;
  let records = ingest::normalize_records(raw);
  let filtered = filter::apply(&records, cfg.status.as_status(), department_filter(cfg));

  let (artifact, ext) = render(cfg, records.len(), &filtered)?;
  write_artifact(cfg, &artifact, ext)
}

fn department_filter(cfg: &EffectiveConfig) -> Option<&str> {
  if cfg.department == "all" { None } else { Some(cfg.department.as_str()) }
}

fn render(cfg: &EffectiveConfig, input_count: usize, filtered: &[TimesheetRecord]) -> Result<(Vec<u8>, &'static str)> {
  match cfg.format {
    Format::Csv => {
      // The flat table always flattens across weeks: one row per employee.
      let employees = group::group_by_employee(filtered);
      Ok((report::csv::render(&employees), "csv"))
    }
    Format::Pdf => {
      let grouping = group::group_by_week(filtered);
      warn_skipped(grouping.skipped_undated);
      Ok((report::pdf::render(&grouping.weeks)?, "pdf"))
    }
    Format::Json => {
      let now = util::effective_now(util::parse_now_override(cfg.now_override.as_deref()));
      let mut summary = ReportSummary {
        count: input_count,
        filtered_count: filtered.len(),
        skipped_undated: 0,
        total_hours: filtered.iter().map(|r| r.hours).sum(),
        status_filter: cfg.status.as_str().to_string(),
        department_filter: cfg.department.clone(),
        generated_at: util::format_generated_at(now),
      };
      let report = match cfg.group_by {
        GroupBy::Week => {
          let grouping = group::group_by_week(filtered);
          warn_skipped(grouping.skipped_undated);
          summary.skipped_undated = grouping.skipped_undated;
          GroupedReport {
            summary,
            weeks: Some(grouping.weeks),
            employees: None,
          }
        }
        GroupBy::Employee => GroupedReport {
          summary,
          weeks: None,
          employees: Some(group::group_by_employee(filtered)),
        },
      };
      Ok((serde_json::to_vec_pretty(&report)?, "json"))
    }
  }
}

fn warn_skipped(skipped: usize) {
  if skipped > 0 {
    eprintln!("warning: {} record(s) without a parseable date were left out of week grouping", skipped);
  }
}

fn load_input(cfg: &EffectiveConfig) -> Result<Vec<u8>> {
  match &cfg.source {
    InputSource::Stdin => {
      let mut buf: Vec<u8> = Vec::new();
      std::io::stdin().read_to_end(&mut buf).context("reading stdin")?;
      Ok(buf)
    }
    InputSource::File(path) => std::fs::read(path).with_context(|| format!("reading {}", path)),
    InputSource::Url { base, token } => fetch::fetch_timesheets(base, token.as_deref()),
  }
}

fn write_artifact(cfg: &EffectiveConfig, artifact: &[u8], ext: &'static str) -> Result<()> {
  if cfg.out == "-" {
    let mut stdout = std::io::stdout();
    stdout.write_all(artifact).context("writing artifact to stdout")?;
    return Ok(());
  }

  let out_path = std::path::Path::new(&cfg.out);
  let is_dir_like = cfg.out.ends_with('/') || out_path.is_dir();
  let file_path = if is_dir_like {
    std::fs::create_dir_all(out_path).with_context(|| format!("creating {}", cfg.out))?;
    out_path.join(derive_filename(BASE_NAME, cfg.status.as_str(), &cfg.department, ext))
  } else {
    if let Some(parent) = out_path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
      }
    }
    out_path.to_path_buf()
  };

  std::fs::write(&file_path, artifact).with_context(|| format!("writing {}", file_path.display()))?;
  println!(
    "{}",
    serde_json::to_string_pretty(&serde_json::json!({"file": file_path.to_string_lossy()}))?
  );
  Ok(())
}
