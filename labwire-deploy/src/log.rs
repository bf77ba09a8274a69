//! The console a deploy writes to.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static ANSI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x1b\x{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]")
        .expect("valid regex")
});

/// Remove terminal escape sequences.
pub fn strip_ansi(text: &str) -> String {
    ANSI.replace_all(text, "").into_owned()
}

/// Ordered, plain-text log lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployLog {
    lines: Vec<String>,
}

impl DeployLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, escape sequences removed.
    pub fn push(&mut self, message: impl AsRef<str>) {
        let line = strip_ansi(message.as_ref());
        tracing::debug!(line = %line, "deploy log");
        self.lines.push(line);
    }

    /// Append an orchestrator payload.
    ///
    /// An object with a non-empty `output` string is command output: it is
    /// split into lines, dropping lines that are only whitespace. Other
    /// objects and arrays are pretty-printed; scalars are appended as text.
    pub fn push_value(&mut self, value: &Value) {
        match value {
            Value::Object(map) => match map.get("output").and_then(Value::as_str) {
                Some(output) if !output.is_empty() => {
                    let clean = strip_ansi(output);
                    self.lines.extend(
                        clean
                            .split('\n')
                            .filter(|line| line.is_empty() || !line.trim().is_empty())
                            .map(str::to_owned),
                    );
                }
                _ => self.push_pretty(value),
            },
            Value::Array(_) => self.push_pretty(value),
            Value::String(text) => self.push(text),
            other => self.push(other.to_string()),
        }
    }

    fn push_pretty(&mut self, value: &Value) {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        self.lines.push(text);
    }

    /// The lines so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl std::fmt::Display for DeployLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
