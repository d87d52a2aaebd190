//! Model persistence in a portable JSON layout.
//!
//! ```json
//! {
//!   "labels": ["Jar1", "Jar2"],
//!   "casesTotal": 70.0,
//!   "labelCases": { "Jar1": 40.0, "Jar2": 30.0 },
//!   "featureCases": {
//!     "CookieF": { "plain": { "Jar1": 30.0, "Jar2": 15.0 } }
//!   }
//! }
//! ```
//!
//! Labels are written through a [`LabelCodec`]. Derived totals are rebuilt on
//! load; a stored `casesTotal` that disagrees with the label counts is
//! replaced.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::feature::{Feature, PRIOR_ODDS_FEATURE};
use crate::label::{Label, LabelCodec};
use crate::store::CountStore;

/// Serializable view of a [`CountStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDump {
    /// Label identifiers in training order.
    pub labels: Vec<String>,

    /// Number of training cases.
    #[serde(default)]
    pub cases_total: f64,

    /// Cases per label identifier.
    pub label_cases: BTreeMap<String, f64>,

    /// Cases per feature name, feature value and label identifier.
    #[serde(default)]
    pub feature_cases: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>,
}

/// Printable snapshot of a store's statistics.
pub fn inspect<L: Label, C: LabelCodec<L> + ?Sized>(store: &CountStore<L>, codec: &C) -> ModelDump {
    let labels = store
        .labels()
        .iter()
        .map(|label| codec.label_id(label))
        .collect();

    let label_cases = store
        .labels()
        .iter()
        .map(|label| (codec.label_id(label), store.label_count(label).unwrap_or(0.0)))
        .collect();

    let mut feature_cases: BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>> =
        BTreeMap::new();
    for feature in store.features() {
        let per_label = store
            .feature_counts(feature)
            .map(|counts| {
                counts
                    .iter()
                    .map(|(label, count)| (codec.label_id(label), *count))
                    .collect()
            })
            .unwrap_or_default();
        feature_cases
            .entry(feature.name.to_string())
            .or_default()
            .insert(feature.value.to_string(), per_label);
    }

    ModelDump {
        labels,
        cases_total: store.cases_total(),
        label_cases,
        feature_cases,
    }
}

/// Serialize a store to pretty-printed JSON.
pub fn dump<L: Label, C: LabelCodec<L> + ?Sized>(store: &CountStore<L>, codec: &C) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(&inspect(store, codec))?)
}

/// Rebuild a store from JSON produced by [`dump`].
pub fn load<L: Label, C: LabelCodec<L> + ?Sized>(bytes: &[u8], codec: &C) -> Result<CountStore<L>> {
    let model: ModelDump = serde_json::from_slice(bytes)?;
    from_dump(model, codec)
}

/// Rebuild a store from an already decoded [`ModelDump`].
///
/// # Errors
/// - [`Error::UnknownLabelIdentifier`] if the codec rejects an identifier.
/// - [`Error::MalformedModel`] for duplicate labels, labels without cases,
///   feature counts for unlisted labels, the reserved `priorOdds` feature
///   name, or negative/non-finite counts.
pub fn from_dump<L: Label, C: LabelCodec<L> + ?Sized>(model: ModelDump, codec: &C) -> Result<CountStore<L>> {
    let decode = |id: &str| {
        codec
            .label_from_id(id)
            .ok_or_else(|| Error::UnknownLabelIdentifier(id.to_string()))
    };

    // Listed labels keep their order; labels only present in labelCases follow.
    let mut order: Vec<&String> = Vec::with_capacity(model.label_cases.len());
    let mut seen: HashSet<&String> = HashSet::new();
    for id in &model.labels {
        if !seen.insert(id) {
            return Err(Error::MalformedModel(format!("label '{}' listed twice", id)));
        }
        order.push(id);
    }
    for id in model.label_cases.keys() {
        if seen.insert(id) {
            order.push(id);
        }
    }

    let mut ids: HashMap<&str, L> = HashMap::with_capacity(order.len());
    let mut labels = Vec::with_capacity(order.len());
    let mut label_counts = HashMap::with_capacity(order.len());
    for id in order {
        let count = model
            .label_cases
            .get(id)
            .copied()
            .ok_or_else(|| Error::MalformedModel(format!("label '{}' has no case count", id)))?;
        check_count(count, || format!("labelCases.{}", id))?;
        if count == 0.0 {
            return Err(Error::MalformedModel(format!("label '{}' has no cases", id)));
        }
        let label = decode(id)?;
        if label_counts.insert(label.clone(), count).is_some() {
            return Err(Error::MalformedModel(format!(
                "identifier '{}' decodes to a label already present",
                id
            )));
        }
        labels.push(label.clone());
        ids.insert(id.as_str(), label);
    }

    let mut feature_counts: HashMap<Feature, HashMap<L, f64>> = HashMap::new();
    for (name, values) in &model.feature_cases {
        if name == PRIOR_ODDS_FEATURE {
            return Err(Error::MalformedModel(format!(
                "feature name '{}' is reserved",
                name
            )));
        }
        for (value, per_label) in values {
            let mut counts = HashMap::with_capacity(per_label.len());
            for (id, count) in per_label {
                check_count(*count, || format!("featureCases.{}.{}.{}", name, value, id))?;
                let label = match ids.get(id.as_str()) {
                    Some(label) => label.clone(),
                    None => {
                        decode(id)?;
                        return Err(Error::MalformedModel(format!(
                            "feature '{}: {}' counts unlisted label '{}'",
                            name, value, id
                        )));
                    }
                };
                counts.insert(label, *count);
            }
            feature_counts.insert(Feature::new(name.as_str(), value.as_str()), counts);
        }
    }

    let store = CountStore::from_parts(labels, label_counts, feature_counts);
    if !store.cases_total().is_finite() {
        return Err(Error::MalformedModel(
            "label counts overflow the case total".to_string(),
        ));
    }
    if model.cases_total != store.cases_total() {
        warn!(
            stored = model.cases_total,
            recomputed = store.cases_total(),
            "casesTotal disagrees with label counts; using recomputed value"
        );
    }
    Ok(store)
}

fn check_count(count: f64, field: impl FnOnce() -> String) -> Result<()> {
    if !count.is_finite() || count < 0.0 {
        return Err(Error::MalformedModel(format!(
            "{} must be a non-negative finite count, got {}",
            field(),
            count
        )));
    }
    Ok(())
}

/// Write a model file atomically.
///
/// The dump goes to a temporary file next to `path` which then replaces the
/// destination, so readers never observe a partial model.
pub fn save_model<L: Label, C: LabelCodec<L> + ?Sized>(
    path: &Path,
    store: &CountStore<L>,
    codec: &C,
) -> Result<()> {
    let bytes = dump(store, codec)?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let temp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
    let write = || -> std::io::Result<()> {
        let mut writer = BufWriter::new(temp.as_file());
        writer.write_all(&bytes)?;
        writer.write_all(b"\n")?;
        writer.flush()
    };
    write().map_err(|e| Error::io(temp.path(), e))?;
    temp.persist(path).map_err(|e| Error::io(path, e.error))?;

    info!(
        path = %path.display(),
        labels = store.labels().len(),
        features = store.feature_len(),
        bytes = bytes.len(),
        "model saved"
    );
    Ok(())
}

/// Read a model file written by [`save_model`].
pub fn load_model<L: Label, C: LabelCodec<L> + ?Sized>(path: &Path, codec: &C) -> Result<CountStore<L>> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let store = load(&bytes, codec)?;
    info!(
        path = %path.display(),
        labels = store.labels().len(),
        features = store.feature_len(),
        cases_total = store.cases_total(),
        "model loaded"
    );
    Ok(store)
}
