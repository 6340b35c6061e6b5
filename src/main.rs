use anyhow::Result;
use clap::Parser;

mod cli;
mod fetch;
mod filter;
mod group;
mod ingest;
mod model;
mod pipeline;
mod report;
mod util;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: load, filter, group, render, write
  pipeline::run(&cfg)
}
