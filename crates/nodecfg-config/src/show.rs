//! The loaded result and its source-annotated display for `config show`.
//!
//! [`ResolvedConfig`] owns both documents of a load: the effective
//! configuration everyone reads, and the write-once snapshot of what the file
//! actually contained.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde_yaml::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{FieldSources, get_nested};
use crate::types::Config;

/// A resolved configuration together with source annotations.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The effective configuration: defaults, file and overrides merged.
    pub config: Config,
    /// Dotted field path → which layer set the value.
    pub field_sources: FieldSources,
    /// The file that was loaded, if any.
    pub loaded_path: Option<PathBuf>,
    pristine: Option<Config>,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// YAML with trailing comments showing source.
    Yaml,
    /// JSON (for programmatic consumption).
    Json,
}

impl ResolvedConfig {
    /// Wrap an effective document. The snapshot starts out absent.
    #[must_use]
    pub fn new(config: Config, field_sources: FieldSources, loaded_path: Option<PathBuf>) -> Self {
        Self {
            config,
            field_sources,
            loaded_path,
            pristine: None,
        }
    }

    /// Store an independent copy of the document as parsed from the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PristineAlreadySet`] on a second call.
    pub fn set_pristine(&mut self, doc: &Config) -> ConfigResult<()> {
        if self.pristine.is_some() {
            return Err(ConfigError::PristineAlreadySet);
        }
        self.pristine = Some(doc.clone());
        Ok(())
    }

    /// The document as it was in the file, with no defaults and no
    /// overrides. `None` if no file was loaded.
    #[must_use]
    pub fn pristine(&self) -> Option<&Config> {
        self.pristine.as_ref()
    }

    /// Render the effective config, optionally restricted to one (dotted)
    /// section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSection`] if `section` does not exist,
    /// or [`ConfigError::SerializeError`] if rendering fails.
    pub fn show(&self, format: ShowFormat, section: Option<&str>) -> ConfigResult<String> {
        let value = select(self.config.to_value()?, section)?;
        match format {
            ShowFormat::Yaml => self.show_yaml(&value, section),
            ShowFormat::Json => to_json(&value),
        }
    }

    /// Render the as-loaded document exactly as parsed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotLoaded`] if no file was loaded, or
    /// [`ConfigError::SerializeError`] if rendering fails.
    pub fn show_pristine(&self, format: ShowFormat) -> ConfigResult<String> {
        let pristine = self.pristine().ok_or(ConfigError::NotLoaded)?;
        match format {
            ShowFormat::Yaml => pristine.to_yaml(),
            ShowFormat::Json => pristine.to_json(),
        }
    }

    fn show_yaml(&self, value: &Value, section: Option<&str>) -> ConfigResult<String> {
        let yaml = serde_yaml::to_string(value).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        let mut output = String::new();
        output.push_str("# Effective node configuration\n");
        output.push_str("# Source annotations: [defaults] [file] [override]\n");
        match &self.loaded_path {
            Some(path) => {
                let _ = writeln!(output, "# Loaded from: {}", path.display());
            },
            None => output.push_str("# No config file loaded; defaults only\n"),
        }
        output.push('\n');

        let mut walker = LineWalker::new(section.unwrap_or(""));
        for line in yaml.lines() {
            match walker
                .field_path(line)
                .and_then(|path| self.field_sources.get(&path))
            {
                Some(layer) => {
                    let _ = writeln!(output, "{line}  # [{layer}]");
                },
                None => {
                    output.push_str(line);
                    output.push('\n');
                },
            }
        }

        Ok(output)
    }
}

fn select(root: Value, section: Option<&str>) -> ConfigResult<Value> {
    let Some(name) = section else {
        return Ok(root);
    };
    let segments: Vec<&str> = name.split('.').collect();
    get_nested(&root, &segments)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownSection(name.to_owned()))
}

fn to_json(value: &Value) -> ConfigResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ConfigError::SerializeError(e.to_string()))
}

/// Recovers the dotted path of each `key:` line of block-style YAML.
///
/// Sequence contents are not descended into: a list is attributed as a
/// whole on its key line.
struct LineWalker {
    prefix: String,
    stack: Vec<(usize, String)>,
    sequence_indent: Option<usize>,
}

impl LineWalker {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            stack: Vec::new(),
            sequence_indent: None,
        }
    }

    fn field_path(&mut self, line: &str) -> Option<String> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        let indent = line.len().saturating_sub(trimmed.len());

        if let Some(seq) = self.sequence_indent {
            if indent > seq || (indent == seq && trimmed.starts_with('-')) {
                return None;
            }
            self.sequence_indent = None;
        }
        if trimmed.starts_with('-') {
            self.sequence_indent = Some(indent);
            return None;
        }

        while self.stack.last().is_some_and(|(i, _)| *i >= indent) {
            self.stack.pop();
        }

        let (key, rest) = split_key(trimmed)?;
        let mut path = self.prefix.clone();
        for (_, parent) in &self.stack {
            push_segment(&mut path, parent);
        }
        push_segment(&mut path, &key);

        if rest.is_empty() {
            self.stack.push((indent, key));
        }
        Some(path)
    }
}

fn push_segment(path: &mut String, segment: &str) {
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(segment);
}

/// Split `key: value` / `key:` into the unquoted key and the rest.
fn split_key(line: &str) -> Option<(String, &str)> {
    let (key, rest) = match line.split_once(": ") {
        Some((key, rest)) => (key, rest.trim()),
        None => (line.strip_suffix(':')?, ""),
    };
    let key = key
        .strip_prefix('\'')
        .and_then(|k| k.strip_suffix('\''))
        .or_else(|| key.strip_prefix('"').and_then(|k| k.strip_suffix('"')))
        .unwrap_or(key);
    Some((key.to_owned(), rest))
}
