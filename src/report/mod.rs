//! Multi-line rendering of assertion failures.
//!
//! The one-line `Display` of [`AssertionError`] is what tests see in a panic
//! message. The command line prints the longer form produced here, with the
//! selection and the compared content rendered as YAML or JSON blocks:
//!
//! ```text
//! Selection on path members name --->
//!     - Jack
//!     - Ginger
//! Compared with --->
//!     Eric
//! Not verified (expected = 1, got = 0)
//! ```

use crate::assertion::{AssertionError, Violation};
use crate::config::{Config, RenderFormat};
use crate::document::node::TreeValue;
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

/// Renders failures according to a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: Config,
}

impl Reporter {
    pub fn new(config: Config) -> Self {
        Reporter { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Renders any assertion error. Errors without a violation payload are
    /// rendered as their one-line message.
    pub fn render_error(&self, err: &AssertionError) -> Result<String> {
        match err.violation() {
            Some(violation) => self.render_violation(violation),
            None => Ok(format!("{}\n", err)),
        }
    }

    /// Renders a bound violation as labelled blocks.
    pub fn render_violation(&self, violation: &Violation) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "Selection on path {} --->", violation.path)?;
        out.push_str(&self.render_block(&violation.selection)?);

        writeln!(out, "Compared with --->")?;
        match &violation.content {
            Some(content) => out.push_str(&self.render_block(content)?),
            None => writeln!(out, "{}itself", self.indent())?,
        }

        out.push_str("Not verified");
        if self.config.show_counts {
            write!(out, " ({})", violation.summary())?;
        }
        if let Some(detail) = &violation.detail {
            write!(out, ": {}", detail)?;
        }
        out.push('\n');

        Ok(out)
    }

    /// Renders a value in the configured format, indented, one line per row.
    pub fn render_block(&self, value: &TreeValue) -> Result<String> {
        let value = truncate(value, self.config.max_items);
        let text = match self.config.format {
            RenderFormat::Yaml => serde_yaml::to_string(&value)?,
            RenderFormat::Json => to_json_pretty(&value, self.config.indent_size)?,
        };

        let indent = self.indent();
        let mut out = String::new();
        for line in text.trim_end().lines() {
            writeln!(out, "{}{}", indent, line)?;
        }
        Ok(out)
    }

    fn indent(&self) -> String {
        " ".repeat(self.config.indent_size)
    }
}

fn to_json_pretty(value: &TreeValue, indent_size: usize) -> Result<String> {
    let indent = " ".repeat(indent_size);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Shortens every sequence longer than `max_items`, marking the cut with a
/// `"... (n more)"` element. `max_items == 0` keeps everything.
fn truncate(value: &TreeValue, max_items: usize) -> TreeValue {
    match value {
        TreeValue::Sequence(items) => {
            let mut shown: Vec<TreeValue> = items
                .iter()
                .take(if max_items == 0 { items.len() } else { max_items })
                .map(|item| truncate(item, max_items))
                .collect();
            if shown.len() < items.len() {
                let hidden = items.len() - shown.len();
                shown.push(TreeValue::String(format!("... ({} more)", hidden)));
            }
            TreeValue::Sequence(shown)
        }
        TreeValue::Mapping(entries) => TreeValue::Mapping(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), truncate(item, max_items)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::Bound;
    use crate::querypath::Path;

    fn violation() -> Violation {
        Violation {
            path: Path::from("members name"),
            selection: TreeValue::from(vec!["Jack", "Ginger"]),
            bound: Bound::at_least(1),
            matched: 0,
            content: Some(TreeValue::from("Eric")),
            detail: None,
        }
    }

    #[test]
    fn test_render_yaml_violation() {
        let report = Reporter::default().render_violation(&violation()).unwrap();
        assert_eq!(
            report,
            "Selection on path members name --->\n    - Jack\n    - Ginger\n\
             Compared with --->\n    Eric\nNot verified (expected = 1, got = 0)\n"
        );
    }

    #[test]
    fn test_render_json_without_counts() {
        let reporter = Reporter::new(Config {
            format: RenderFormat::Json,
            indent_size: 2,
            show_counts: false,
            ..Config::default()
        });
        let mut violation = violation();
        violation.content = None;
        violation.detail = Some("duplicates found".to_string());

        let report = reporter.render_violation(&violation).unwrap();
        assert!(report.contains("  [\n    \"Jack\",\n"));
        assert!(report.contains("Compared with --->\n  itself\n"));
        assert!(report.ends_with("Not verified: duplicates found\n"));
    }

    #[test]
    fn test_truncate_long_sequences() {
        let value = TreeValue::from(vec![1, 2, 3, 4, 5]);
        let shown = truncate(&value, 2);
        assert_eq!(
            shown,
            TreeValue::Sequence(vec![
                TreeValue::from(1),
                TreeValue::from(2),
                TreeValue::from("... (3 more)"),
            ])
        );
        assert_eq!(truncate(&value, 0), value);
    }

    #[test]
    fn test_render_error_without_violation() {
        let err = AssertionError::Comparison {
            message: "cannot order".to_string(),
        };
        let report = Reporter::default().render_error(&err).unwrap();
        assert_eq!(report, "Comparison failed: cannot order\n");
    }
}
