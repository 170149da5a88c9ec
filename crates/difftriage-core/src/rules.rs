//! Structural and file-type classification rules.
//!
//! A structural rule matches a fixed root prefix (`components/`,
//! `pipelines/`, optionally under `third_party/`) followed by exactly two
//! non-empty path segments; the first two segments form the asset identity.
//! File-type rules match by extension alone, anywhere in the repository.

use serde::{Deserialize, Serialize};

/// Asset categories recognised by the structural rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// components/<category>/<name>/...
    Component,

    /// pipelines/<category>/<name>/...
    Pipeline,

    /// third_party/components/<category>/<name>/...
    ThirdPartyComponent,

    /// third_party/pipelines/<category>/<name>/...
    ThirdPartyPipeline,
}

impl AssetKind {
    /// Get the kind name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Component => "component",
            AssetKind::Pipeline => "pipeline",
            AssetKind::ThirdPartyComponent => "third_party_component",
            AssetKind::ThirdPartyPipeline => "third_party_pipeline",
        }
    }

    /// Literal root prefix, without the trailing slash.
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetKind::Component => "components",
            AssetKind::Pipeline => "pipelines",
            AssetKind::ThirdPartyComponent => "third_party/components",
            AssetKind::ThirdPartyPipeline => "third_party/pipelines",
        }
    }

    /// Whether assets of this kind land in the components output category.
    pub fn is_component(&self) -> bool {
        matches!(self, AssetKind::Component | AssetKind::ThirdPartyComponent)
    }

    /// Whether assets of this kind land in the pipelines output category.
    pub fn is_pipeline(&self) -> bool {
        matches!(self, AssetKind::Pipeline | AssetKind::ThirdPartyPipeline)
    }
}

/// One structural rule: a root prefix paired with its asset kind.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    kind: AssetKind,
}

impl ClassificationRule {
    pub fn new(kind: AssetKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Test a path against this rule and extract the asset identifier.
    ///
    /// Requires the exact literal prefix followed by two non-empty segments;
    /// the emitted asset is `<prefix>/<segment1>/<segment2>` with segments
    /// taken verbatim (case-sensitive). `components/a/` has only one segment
    /// and does not match; `components/a/b` and `components/a/b/file.py`
    /// both yield `components/a/b`.
    pub fn matches(&self, path: &str) -> Option<String> {
        let rest = path
            .strip_prefix(self.kind.prefix())?
            .strip_prefix('/')?;
        let mut segments = rest.splitn(3, '/');
        let category = segments.next().filter(|s| !s.is_empty())?;
        let name = segments.next().filter(|s| !s.is_empty())?;
        Some(format!("{}/{}/{}", self.kind.prefix(), category, name))
    }
}

/// File-type buckets, determined purely by extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Python,
    Markdown,
    Yaml,
}

impl FileType {
    /// All buckets, in output order.
    pub const ALL: [FileType; 3] = [FileType::Python, FileType::Markdown, FileType::Yaml];

    /// Get the bucket name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            FileType::Python => "python",
            FileType::Markdown => "markdown",
            FileType::Yaml => "yaml",
        }
    }

    /// Whether a path belongs to this bucket.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            FileType::Python => path.ends_with(".py"),
            FileType::Markdown => path.ends_with(".md"),
            FileType::Yaml => path.ends_with(".yaml") || path.ends_with(".yml"),
        }
    }
}

/// The active structural rule set for one classification run.
///
/// Built once per run; the third-party rules are only present when the
/// run-level toggle is enabled. With the toggle off, paths under
/// `third_party/` never classify as assets at any depth, because the plain
/// prefixes are anchored at the start of the path.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
}

impl RuleSet {
    pub fn new(include_third_party: bool) -> Self {
        let mut rules = vec![
            ClassificationRule::new(AssetKind::Component),
            ClassificationRule::new(AssetKind::Pipeline),
        ];
        if include_third_party {
            rules.push(ClassificationRule::new(AssetKind::ThirdPartyComponent));
            rules.push(ClassificationRule::new(AssetKind::ThirdPartyPipeline));
        }
        Self { rules }
    }

    /// Classify one path. The prefixes are disjoint, so a path matches at
    /// most one rule.
    pub fn classify(&self, path: &str) -> Option<(AssetKind, String)> {
        self.rules
            .iter()
            .find_map(|rule| rule.matches(path).map(|asset| (rule.kind(), asset)))
    }
}
