//! Loader for plain coordinate files: one `x y` pair per line, separated by
//! whitespace. Reading stops at the first blank line or at end of input.

use std::fs::File as StdFile;
use std::io::{BufRead, BufReader as StdBufReader};
use std::path::Path;

use tracing::debug;

use crate::distance::Location;
use crate::error::{AcoError, Result};

pub fn parse_locations(file_path: impl AsRef<Path>) -> Result<Vec<Location>> {
    let path = file_path.as_ref();
    let file = StdFile::open(path).map_err(|source| AcoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let locations = read_locations(StdBufReader::new(file)).map_err(|e| match e {
        AcoError::Io { source, .. } => AcoError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    debug!(path = %path.display(), count = locations.len(), "loaded locations");
    Ok(locations)
}

pub fn read_locations<R: BufRead>(reader: R) -> Result<Vec<Location>> {
    let mut locations = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let current_line_num = idx + 1;
        let line = line_result.map_err(|source| AcoError::Io {
            path: Default::default(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 2 {
            return Err(AcoError::Parse {
                line: current_line_num,
                message: format!("expected 2 coordinates, found {} in '{}'", parts.len(), line),
            });
        }
        let x = parse_coord(parts[0], "x", current_line_num)?;
        let y = parse_coord(parts[1], "y", current_line_num)?;
        locations.push(Location::new(x, y));
    }

    Ok(locations)
}

fn parse_coord(token: &str, axis: &str, line: usize) -> Result<f64> {
    let value = token.parse::<f64>().map_err(|e| AcoError::Parse {
        line,
        message: format!("invalid {} coord '{}': {}", axis, token, e),
    })?;
    if !value.is_finite() {
        return Err(AcoError::Parse {
            line,
            message: format!("{} coord '{}' is not finite", axis, token),
        });
    }
    Ok(value)
}
