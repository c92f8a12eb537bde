use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::flow::FlowField;

/// Write a flow field as CSV with an `x,y,u,v` header.
pub fn write_flow_csv<W: Write>(field: &FlowField, mut writer: W) -> Result<()> {
    writeln!(writer, "x,y,u,v")?;
    for fv in field {
        writeln!(writer, "{},{},{},{}", fv.x, fv.y, fv.u, fv.v)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a flow field as CSV.
pub fn save_flow_csv(field: &FlowField, path: &Path) -> Result<()> {
    write_flow_csv(field, BufWriter::new(File::create(path)?))
}

/// Save a flow field as a JSON array of `{x, y, u, v}` objects.
pub fn save_flow_json(field: &FlowField, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, field)?;
    writer.flush()?;
    Ok(())
}

/// Save a flow field, choosing format from file extension.
pub fn save_flow(field: &FlowField, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => save_flow_json(field, path),
        _ => save_flow_csv(field, path),
    }
}
