use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// One entry of the candidate list (a lunch spot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub description: String,
}

impl Candidate {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Read one candidate per line, keeping blank lines and file order.
///
/// Lines end at `\n` with an optional `\r` before it. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_candidates<R: BufRead>(reader: R) -> std::io::Result<Vec<Candidate>> {
    let mut list = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        list.push(Candidate::new(String::from_utf8_lossy(&line)));
    }
    Ok(list)
}

pub fn load_candidates(path: &Path) -> Result<Vec<Candidate>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open candidate list: {}", path.display()))?;
    let list = read_candidates(BufReader::new(file))
        .with_context(|| format!("Failed to read candidate list: {}", path.display()))?;
    debug!("Read {} candidates from {}", list.len(), path.display());
    Ok(list)
}
