//! The classification pass: filter, per-path rules, deduplicated fold.
//!
//! A pure, order-preserving fold over the filtered path sequence. Both the
//! structural rules and the file-type buckets are driven by the SAME
//! filtered sequence: a filter that targets only `.py` files also suppresses
//! asset detection for non-Python files in the same change set. This
//! coupling is intentional and must not be "fixed" independently.

use regex::Regex;
use tracing::{debug, warn};

use crate::ordered_set::OrderedUniqueSet;
use crate::rules::{FileType, RuleSet};

/// The aggregate produced by one classification run.
///
/// Created at pipeline start, populated incrementally, serialized once by
/// the report stage, then discarded.
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Raw changed paths, as resolved between the two references.
    pub all_changed: Vec<String>,

    /// Changed paths after the optional caller filter.
    pub filtered_changed: Vec<String>,

    /// Deduplicated component asset identifiers, first-seen order.
    pub components: OrderedUniqueSet<String>,

    /// Deduplicated pipeline asset identifiers, first-seen order.
    pub pipelines: OrderedUniqueSet<String>,

    /// Changed `.py` files.
    pub python_files: OrderedUniqueSet<String>,

    /// Changed `.md` files.
    pub markdown_files: OrderedUniqueSet<String>,

    /// Changed `.yaml` / `.yml` files.
    pub yaml_files: OrderedUniqueSet<String>,
}

impl RunResult {
    /// True iff any output category is non-empty.
    pub fn has_changes(&self) -> bool {
        !self.components.is_empty()
            || !self.pipelines.is_empty()
            || !self.python_files.is_empty()
            || !self.markdown_files.is_empty()
            || !self.yaml_files.is_empty()
    }

    fn bucket_mut(&mut self, file_type: FileType) -> &mut OrderedUniqueSet<String> {
        match file_type {
            FileType::Python => &mut self.python_files,
            FileType::Markdown => &mut self.markdown_files,
            FileType::Yaml => &mut self.yaml_files,
        }
    }
}

/// Narrow the raw path sequence with an optional regex, preserving order.
///
/// An absent or empty pattern returns the input unchanged. A pattern that
/// matches nothing returns an empty sequence. A pattern that fails to
/// compile is logged and also yields an empty sequence; the caller cannot
/// distinguish the two cases by design.
pub fn apply_filter(paths: &[String], pattern: Option<&str>) -> Vec<String> {
    let pattern = match pattern {
        None => return paths.to_vec(),
        Some(p) if p.is_empty() => return paths.to_vec(),
        Some(p) => p,
    };

    match Regex::new(pattern) {
        Ok(re) => paths.iter().filter(|p| re.is_match(p)).cloned().collect(),
        Err(err) => {
            warn!(event = "filter.invalid_pattern", pattern = %pattern, error = %err);
            Vec::new()
        }
    }
}

/// Run the full classification pass over a resolved change set.
///
/// Applies the optional filter, tests each filtered path against the active
/// structural rules and the extension buckets, and folds the results into
/// insertion-ordered unique sets. A single path can contribute to both an
/// asset category and a file-type bucket.
pub fn classify_changes(
    all_changed: Vec<String>,
    filter: Option<&str>,
    include_third_party: bool,
) -> RunResult {
    let filtered = apply_filter(&all_changed, filter);
    let rules = RuleSet::new(include_third_party);

    let mut result = RunResult {
        all_changed,
        filtered_changed: filtered.clone(),
        ..RunResult::default()
    };

    for path in &filtered {
        if let Some((kind, asset)) = rules.classify(path) {
            if kind.is_component() {
                result.components.insert(asset);
            } else {
                result.pipelines.insert(asset);
            }
        }

        // Extension buckets run unconditionally, regardless of structural
        // match outcome or the third-party toggle.
        for file_type in FileType::ALL {
            if file_type.matches(path) {
                result.bucket_mut(file_type).insert(path.clone());
            }
        }
    }

    debug!(
        event = "classify.completed",
        all = result.all_changed.len(),
        filtered = result.filtered_changed.len(),
        components = result.components.len(),
        pipelines = result.pipelines.len(),
        python = result.python_files.len(),
        markdown = result.markdown_files.len(),
        yaml = result.yaml_files.len(),
    );

    result
}
