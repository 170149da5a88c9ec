//! Rendering a populated [`RunResult`] into CI-consumable outputs.
//!
//! Pure renderer: ordering and deduplication are settled upstream, this
//! stage only serializes. Per category it emits a space-joined list, a
//! compact JSON array, an integer count and a boolean flag, plus one
//! overall `has-changes` boolean and a markdown summary block.

use anyhow::{Context, Result};
use std::path::Path;

use crate::classify::RunResult;
use crate::ordered_set::OrderedUniqueSet;

/// Output categories in fixed emission order: key stem, summary heading,
/// members.
fn categories(result: &RunResult) -> [(&'static str, &'static str, &OrderedUniqueSet<String>); 5] {
    [
        ("changed-components", "Components", &result.components),
        ("changed-pipelines", "Pipelines", &result.pipelines),
        ("changed-python-files", "Python files", &result.python_files),
        (
            "changed-markdown-files",
            "Markdown files",
            &result.markdown_files,
        ),
        ("changed-yaml-files", "YAML files", &result.yaml_files),
    ]
}

/// Compact JSON array of the members, `[]` when empty.
fn json_array(set: &OrderedUniqueSet<String>) -> Result<String> {
    serde_json::to_string(set).context("serialize category members")
}

/// Render the full `key=value` output block.
///
/// Every key is always present, even when every upstream stage degraded to
/// empty: empty lists render as empty strings, counts as `0`, booleans as
/// the literal `false`.
pub fn render_outputs(result: &RunResult) -> Result<String> {
    let mut out = String::new();

    for (stem, _, set) in categories(result) {
        out.push_str(&format!("{}={}\n", stem, set.items().join(" ")));
        out.push_str(&format!("{}-json={}\n", stem, json_array(set)?));
        out.push_str(&format!("{}-count={}\n", stem, set.len()));
        out.push_str(&format!("has-{}={}\n", stem, !set.is_empty()));
    }

    out.push_str(&format!("has-changes={}\n", result.has_changes()));
    out.push_str(&format!(
        "all-changed-files={}\n",
        result.all_changed.join(" ")
    ));
    out.push_str(&format!(
        "filtered-changed-files={}\n",
        result.filtered_changed.join(" ")
    ));

    Ok(out)
}

/// Render the markdown summary block for PR/check output.
///
/// Each category gets a heading with its count; the bulleted member list is
/// omitted when the count is zero.
pub fn render_summary_md(result: &RunResult) -> String {
    let mut out = String::new();
    out.push_str("# Changed Files\n\n");

    for (_, heading, set) in categories(result) {
        out.push_str(&format!("## {} ({})\n", heading, set.len()));
        for item in set.iter() {
            out.push_str(&format!("- `{}`\n", item));
        }
        out.push('\n');
    }

    out
}

/// Write the `key=value` block to a file.
pub fn write_outputs(path: &Path, result: &RunResult) -> Result<()> {
    let content = render_outputs(result)?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Write the markdown summary to a file.
pub fn write_summary_md(path: &Path, result: &RunResult) -> Result<()> {
    let md = render_summary_md(result);
    std::fs::write(path, md).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_changes;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_outputs_render_is_stable() {
        let result = classify_changes(
            paths(&[
                "components/training/trainer/component.py",
                "components/training/trainer/metadata.yaml",
            ]),
            None,
            true,
        );

        let actual = render_outputs(&result).expect("render failed");
        let expected = "\
changed-components=components/training/trainer
changed-components-json=[\"components/training/trainer\"]
changed-components-count=1
has-changed-components=true
changed-pipelines=
changed-pipelines-json=[]
changed-pipelines-count=0
has-changed-pipelines=false
changed-python-files=components/training/trainer/component.py
changed-python-files-json=[\"components/training/trainer/component.py\"]
changed-python-files-count=1
has-changed-python-files=true
changed-markdown-files=
changed-markdown-files-json=[]
changed-markdown-files-count=0
has-changed-markdown-files=false
changed-yaml-files=components/training/trainer/metadata.yaml
changed-yaml-files-json=[\"components/training/trainer/metadata.yaml\"]
changed-yaml-files-count=1
has-changed-yaml-files=true
has-changes=true
all-changed-files=components/training/trainer/component.py components/training/trainer/metadata.yaml
filtered-changed-files=components/training/trainer/component.py components/training/trainer/metadata.yaml
";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_empty_run_has_every_key_with_zero_values() {
        let result = classify_changes(Vec::new(), None, true);
        let out = render_outputs(&result).expect("render failed");

        assert!(out.contains("changed-components=\n"));
        assert!(out.contains("changed-components-json=[]\n"));
        assert!(out.contains("changed-components-count=0\n"));
        assert!(out.contains("has-changed-components=false\n"));
        assert!(out.contains("changed-yaml-files-json=[]\n"));
        assert!(out.contains("has-changes=false\n"));
        assert!(out.contains("all-changed-files=\n"));
        assert!(out.contains("filtered-changed-files=\n"));

        // 5 categories x 4 keys + 3 overall keys.
        assert_eq!(out.lines().count(), 23);
    }

    #[test]
    fn test_empty_json_is_empty_array_not_empty_string_element() {
        let result = classify_changes(Vec::new(), None, true);
        let out = render_outputs(&result).expect("render failed");
        assert!(!out.contains(r#"[""]"#));
    }

    #[test]
    fn test_count_and_flag_are_consistent() {
        let result = classify_changes(
            paths(&["pipelines/a/b/p.py", "README.md"]),
            None,
            true,
        );
        let out = render_outputs(&result).expect("render failed");

        for (stem, _, set) in categories(&result) {
            let count_key = format!("{}-count={}", stem, set.len());
            let flag_key = format!("has-{}={}", stem, !set.is_empty());
            assert!(out.contains(&count_key), "missing {count_key}");
            assert!(out.contains(&flag_key), "missing {flag_key}");
        }
    }

    #[test]
    fn test_summary_markdown_render_is_stable() {
        let result = classify_changes(
            paths(&[
                "components/training/trainer/component.py",
                "README.md",
            ]),
            None,
            true,
        );

        let actual = render_summary_md(&result);
        let expected = "\
# Changed Files

## Components (1)
- `components/training/trainer`

## Pipelines (0)

## Python files (1)
- `components/training/trainer/component.py`

## Markdown files (1)
- `README.md`

## YAML files (0)

";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_write_outputs_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("outputs.txt");
        let md_path = dir.path().join("summary.md");

        let result = classify_changes(paths(&["pipelines/x/y/p.py"]), None, true);
        write_outputs(&out_path, &result).expect("write outputs failed");
        write_summary_md(&md_path, &result).expect("write summary failed");

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(written, render_outputs(&result).unwrap());

        let md = std::fs::read_to_string(&md_path).unwrap();
        assert!(md.starts_with("# Changed Files"));
        assert!(md.contains("- `pipelines/x/y`"));
    }
}
