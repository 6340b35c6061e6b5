use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::model::Status;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum StatusFilter {
  All,
  Pending,
  Approved,
  Rejected,
}

impl StatusFilter {
  /// `None` means no status predicate (keep everything).
  pub fn as_status(&self) -> Option<Status> {
    match self {
      StatusFilter::All => None,
      StatusFilter::Pending => Some(Status::Pending),
      StatusFilter::Approved => Some(Status::Approved),
      StatusFilter::Rejected => Some(Status::Rejected),
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      StatusFilter::All => "all",
      StatusFilter::Pending => "pending",
      StatusFilter::Approved => "approved",
      StatusFilter::Rejected => "rejected",
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Format {
  Csv,
  Pdf,
  Json,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum GroupBy {
  Week,
  Employee,
}

#[derive(Parser, Debug)]
#[command(
    name = "trackify-report",
    version,
    about = "Export timesheet activity reports (CSV, PDF, or JSON)",
    long_about = None
)]
pub struct Cli {
  /// Timesheet JSON file to read ("-" for stdin; default when --url is absent)
  #[arg(long)]
  pub input: Option<String>,

  /// Backend base URL to fetch timesheets from (e.g. http://127.0.0.1:8000)
  #[arg(long)]
  pub url: Option<String>,

  /// Bearer token for --url fetches
  #[arg(long, env = "TRACKIFY_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// Keep only records with this status
  #[arg(long, value_enum, default_value_t = StatusFilter::All)]
  pub status: StatusFilter,

  /// Keep only records from this department (exact match)
  #[arg(long, default_value = "all")]
  pub department: String,

  /// Output encoding
  #[arg(long, value_enum, default_value_t = Format::Csv)]
  pub format: Format,

  /// Grouping mode for pdf/json output (csv always flattens by employee)
  #[arg(long = "group-by", value_enum, default_value_t = GroupBy::Week)]
  pub group_by: GroupBy,

  /// Output location: "-" streams to stdout; a directory gets a
  /// filter-derived filename; any other path is used verbatim
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant for report timestamps (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum InputSource {
  Stdin,
  File(String),
  Url { base: String, token: Option<String> },
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub source: InputSource,
  pub status: StatusFilter,
  pub department: String,
  pub format: Format,
  pub group_by: GroupBy,
  pub out: String,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  // Validate input selection
  let source = match (&cli.input, &cli.url) {
    (Some(_), Some(_)) => bail!("Ambiguous input: choose only one of --input | --url"),
    (Some(path), None) if path == "-" => InputSource::Stdin,
    (Some(path), None) => InputSource::File(path.clone()),
    (None, Some(base)) => InputSource::Url {
      base: base.trim_end_matches('/').to_string(),
      token: cli.token.clone(),
    },
    (None, None) => InputSource::Stdin,
  };

  if cli.token.is_some() && !matches!(source, InputSource::Url { .. }) {
    bail!("--token only applies together with --url");
  }

  Ok(EffectiveConfig {
    source,
    status: cli.status,
    department: cli.department,
    format: cli.format,
    group_by: cli.group_by,
    out: cli.out,
    now_override: cli.now_override,
  })
}
