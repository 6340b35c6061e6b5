use std::io::Read;

use anyhow::{Context, Result, bail};

/// Fetch the raw timesheet listing from the backend.
///
/// Mirrors the dashboard's call: `GET {base}/timesheets` with an optional
/// bearer token. Filtering stays local so every input source goes through
/// the same pipeline.
pub fn fetch_timesheets(base: &str, token: Option<&str>) -> Result<Vec<u8>> {
  let url = format!("{}/timesheets", base);
  let mut req = ureq::get(&url).set("Accept", "application/json");
  if let Some(token) = token {
    req = req.set("Authorization", &format!("Bearer {}", token));
  }

  let resp = match req.call() {
    Ok(resp) => resp,
    Err(ureq::Error::Status(code, resp)) => {
      let body = resp.into_string().unwrap_or_default();
      bail!("GET {} failed with status {}: {}", url, code, body.trim());
    }
    Err(e) => return Err(e).with_context(|| format!("GET {}", url)),
  };

  let mut buf: Vec<u8> = Vec::new();
  resp
    .into_reader()
    .read_to_end(&mut buf)
    .with_context(|| format!("reading response body from {}", url))?;
  Ok(buf)
}
