//! Export command - write activities to CSV

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{get_context, load_activities};
use crate::output;

#[derive(Serialize)]
struct ExportResult<'a> {
    path: &'a Path,
    rows: usize,
}

pub fn run(file: Option<&Path>, output_path: &Path, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let activities = load_activities(&ctx, file)?;

    let rows = ctx
        .export_service
        .export_to_file(output_path, &activities)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if json {
        let result = ExportResult { path: output_path, rows };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    output::success(&format!("Exported {} activities to {}", rows, output_path.display()));
    Ok(())
}
