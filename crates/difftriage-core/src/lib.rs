//! difftriage core library
//!
//! Classifies the files changed between two git references into component and
//! pipeline assets plus file-type buckets, for CI jobs that only want to run
//! what a change actually touched.
//!
//! The pipeline is a sequence of pure stages over an ordered path list:
//! resolve (git) -> filter (regex) -> classify -> deduplicate -> render.

pub mod classify;
pub mod error;
pub mod git;
pub mod ordered_set;
pub mod report;
pub mod rules;
pub mod telemetry;

pub use classify::{apply_filter, classify_changes, RunResult};
pub use error::{Result, TriageError};
pub use git::{is_git_repo, ChangeSetProvider, GitChangeSetProvider, StaticChangeSet};
pub use ordered_set::OrderedUniqueSet;
pub use report::{render_outputs, render_summary_md, write_outputs, write_summary_md};
pub use rules::{AssetKind, ClassificationRule, FileType, RuleSet};
pub use telemetry::init_tracing;
