//! JSON Lines training corpora.
//!
//! One example per line:
//!
//! ```text
//! {"label": "Jar1", "features": [{"name": "CookieF", "value": "plain"}]}
//! ```
//!
//! Blank lines are ignored. The feature name `priorOdds` is reserved.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::feature::{Feature, LabeledExample};

#[derive(Debug, Deserialize)]
struct CorpusLine {
    label: String,
    #[serde(default)]
    features: Vec<Feature>,
}

/// Parse a corpus from any buffered reader.
///
/// `source` names the input in I/O errors.
pub fn parse_corpus<R: BufRead>(reader: R, source: &Path) -> Result<Vec<LabeledExample<String>>> {
    let mut examples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(source, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed: CorpusLine = serde_json::from_str(&line).map_err(|e| Error::CorpusLine {
            line: idx + 1,
            source: e,
        })?;
        if let Some(reserved) = parsed.features.iter().find(|f| f.is_prior_odds()) {
            return Err(Error::ReservedFeature {
                line: idx + 1,
                name: reserved.name.to_string(),
            });
        }
        examples.push(LabeledExample::new(parsed.label, parsed.features));
    }
    Ok(examples)
}

/// Read a corpus file.
pub fn read_corpus(path: &Path) -> Result<Vec<LabeledExample<String>>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let examples = parse_corpus(BufReader::new(file), path)?;
    debug!(path = %path.display(), examples = examples.len(), "corpus read");
    Ok(examples)
}
