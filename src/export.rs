//! CSV export of recorded samples, and reading such an export back as a
//! replayable trace.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Deserialize;
use tracing::info;

use crate::sample::{Sample, SampleBuffer};
use crate::Result;

pub const HEADER: [&str; 6] = ["timestamp_ms", "x", "y", "speed_px_s", "vx", "vy"];

fn row(sample: &Sample, t0: f64) -> [String; 6] {
    [
        format!("{:.1}", sample.t - t0),
        format!("{:.1}", sample.x),
        format!("{:.1}", sample.y),
        format!("{:.1}", sample.speed),
        format!("{:.1}", sample.vx),
        format!("{:.1}", sample.vy),
    ]
}

/// Render the buffer as CSV with timestamps relative to the first sample.
///
/// Returns `None` when nothing has been recorded.
pub fn to_csv(buffer: &SampleBuffer) -> Result<Option<String>> {
    let Some(t0) = buffer.first().map(|s| s.t) else {
        return Ok(None);
    };

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(HEADER)?;
    for sample in buffer {
        writer.write_record(row(sample, t0))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(Some(String::from_utf8(bytes)?))
}

/// Write the export into `dir` under a timestamped file name.
pub fn save_csv(buffer: &SampleBuffer, dir: &Path) -> Result<Option<PathBuf>> {
    let Some(csv) = to_csv(buffer)? else {
        return Ok(None);
    };

    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "tulipa_mouse_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    fs::write(&path, csv)?;

    info!(path = %path.display(), samples = buffer.len(), "exported samples");
    Ok(Some(path))
}

/// A position read back from an exported table
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TracePoint {
    #[serde(rename = "timestamp_ms")]
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

/// Parse a previously exported table. Derived columns are ignored and
/// recomputed on replay.
pub fn read_trace<R: Read>(reader: R) -> Result<Vec<TracePoint>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut points = Vec::new();
    for record in rdr.deserialize() {
        points.push(record?);
    }
    Ok(points)
}
