//! Run-time configuration object, fluent builder and JSON file layer.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;

use crate::core::{
    constants::{DEFAULT_BACKGROUND_OPACITY, DEFAULT_TEXT_ALIGN},
    error::{ConfigError, DatabarError},
    partition::GroupConfig,
};

// --- StyleOverrides ---

/// Ordered `property → value` CSS declarations.
///
/// Setting an existing property replaces its value in place; new properties
/// are appended, so the emitted `style` attribute is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleOverrides(Vec<(String, String)>);

impl StyleOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let (property, value) = (property.into(), value.into());
        match self.0.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.0.push((property, value)),
        }
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// `self` laid over `base`: base order first, overrides win.
    #[must_use]
    pub fn merged_over(&self, base: &StyleOverrides) -> StyleOverrides {
        let mut out = base.clone();
        for (p, v) in &self.0 {
            out.set(p.clone(), v.clone());
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Render as a `style` attribute value.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.set(k, v);
        }
        out
    }
}

// --- Config ---

/// Immutable parameters handed to a rendering pass.
#[derive(Debug, Clone)]
pub struct Config {
    pub groups: GroupConfig,
    /// Alpha of every palette colour; negative bars keep their own.
    pub background_opacity: f64,
    /// Caller overrides, already merged over `text-align: right`.
    pub css: StyleOverrides,
    /// Abort the whole pass on a group without numbers instead of skipping it.
    pub strict_groups: bool,
}

impl Config {
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Every column a pass will touch must exist in a table this wide.
    pub fn check_bounds(&self, columns: usize) -> Result<(), ConfigError> {
        let declared = self.groups.declared.iter().flatten();
        match declared.chain(&self.groups.ignore).find(|&&c| c >= columns) {
            Some(&column) => Err(ConfigError::ColumnOutOfRange { column, columns }),
            None => Ok(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            groups: GroupConfig::default(),
            background_opacity: DEFAULT_BACKGROUND_OPACITY,
            css: base_css(),
            strict_groups: false,
        }
    }
}

fn base_css() -> StyleOverrides {
    [("text-align", DEFAULT_TEXT_ALIGN)].into_iter().collect()
}

/// Fluent builder; nothing is validated until `build`.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    groups: Vec<Vec<usize>>,
    ignore: Vec<usize>,
    opacity: Option<f64>,
    css: StyleOverrides,
    strict: Option<bool>,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Declare one column group; may be called repeatedly.
    #[inline]
    #[must_use]
    pub fn group(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.groups.push(columns.into_iter().collect());
        self
    }
    #[inline]
    #[must_use]
    pub fn groups(mut self, groups: Vec<Vec<usize>>) -> Self {
        self.groups.extend(groups);
        self
    }
    #[inline]
    #[must_use]
    pub fn ignore(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.ignore.extend(columns);
        self
    }
    #[inline]
    #[must_use]
    pub fn opacity(mut self, a: f64) -> Self {
        self.opacity = Some(a);
        self
    }
    #[inline]
    #[must_use]
    pub fn opacity_opt(mut self, a: Option<f64>) -> Self {
        if a.is_some() {
            self.opacity = a;
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.css.set(property, value);
        self
    }
    #[inline]
    #[must_use]
    pub fn strict(mut self, yes: bool) -> Self {
        self.strict = Some(yes);
        self
    }

    /// Layer a configuration file underneath whatever was set so far.
    ///
    /// Values already on the builder (typically CLI flags) win over the
    /// file; list-valued settings are concatenated.
    #[must_use]
    pub fn file(mut self, file: ConfigFile) -> Self {
        if let Some(mut g) = file.column_groups {
            g.append(&mut self.groups);
            self.groups = g;
        }
        if let Some(mut i) = file.ignore_columns {
            i.append(&mut self.ignore);
            self.ignore = i;
        }
        self.opacity = self.opacity.or(file.background_opacity);
        self.strict = self.strict.or(file.strict_groups);
        if let Some(css) = file.css {
            let from_file: StyleOverrides = css.into_iter().collect();
            self.css = self.css.merged_over(&from_file);
        }
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let background_opacity = self.opacity.unwrap_or(DEFAULT_BACKGROUND_OPACITY);
        if !(0.0..=1.0).contains(&background_opacity) {
            return Err(ConfigError::InvalidOpacity(background_opacity));
        }
        Ok(Config {
            groups: GroupConfig {
                declared: self.groups,
                ignore: self.ignore,
            },
            background_opacity,
            css: self.css.merged_over(&base_css()),
            strict_groups: self.strict.unwrap_or(false),
        })
    }
}

// --- JSON file ---

/// On-disk shape, e.g.
/// `{"columnGroups": [[1, 2]], "ignoreColumns": [3], "backgroundOpacity": 0.6,
///   "css": {"text-align": "left"}}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub column_groups: Option<Vec<Vec<usize>>>,
    pub ignore_columns: Option<Vec<usize>>,
    pub background_opacity: Option<f64>,
    pub css: Option<BTreeMap<String, String>>,
    pub strict_groups: Option<bool>,
}

impl ConfigFile {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, DatabarError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }
}

// --- CLI value parsers ---

/// `"1,2, 5"` → `[1, 2, 5]`.
pub fn parse_columns(s: &str) -> Result<Vec<usize>, ConfigError> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<usize>()
                .map_err(|_| ConfigError::MalformedColumns(s.to_owned()))
        })
        .collect()
}

/// `"text-align=left"` → `("text-align", "left")`.
pub fn parse_style(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once('=') {
        Some((p, v)) if !p.trim().is_empty() => Ok((p.trim().to_owned(), v.trim().to_owned())),
        _ => Err(ConfigError::MalformedStyle(s.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::builder().build().unwrap();
        assert!((cfg.background_opacity - 0.4).abs() < f64::EPSILON);
        assert_eq!(cfg.css.get("text-align"), Some("right"));
        assert!(!cfg.strict_groups);
        assert!(cfg.groups.declared.is_empty());
    }

    #[test]
    fn opacity_out_of_range() {
        let err = Config::builder().opacity(1.5).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidOpacity(1.5));
        assert!(Config::builder().opacity(0.0).build().is_ok());
    }

    #[test]
    fn style_override_replaces_text_align() {
        let cfg = Config::builder()
            .style("text-align", "left")
            .style("color", "navy")
            .build()
            .unwrap();
        assert_eq!(
            cfg.css.iter().collect::<Vec<_>>(),
            vec![("text-align", "left"), ("color", "navy")]
        );
    }

    #[test]
    fn file_sits_under_flags() {
        let file = ConfigFile::from_json(
            r#"{"columnGroups": [[1, 2]], "ignoreColumns": [0],
                "backgroundOpacity": 0.7, "css": {"text-align": "center"}}"#,
        )
        .unwrap();
        let cfg = Config::builder()
            .group([4, 5])
            .opacity(0.2)
            .file(file)
            .build()
            .unwrap();
        assert_eq!(cfg.groups.declared, vec![vec![1, 2], vec![4, 5]]);
        assert_eq!(cfg.groups.ignore, vec![0]);
        assert!((cfg.background_opacity - 0.2).abs() < f64::EPSILON);
        assert_eq!(cfg.css.get("text-align"), Some("center"));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(ConfigFile::from_json(r#"{"colour": "red"}"#).is_err());
        assert!(ConfigFile::from_json(r#"{"ignoreColumns": [-1]}"#).is_err());
    }

    #[test]
    fn bounds_cover_groups_and_ignore_list() {
        let cfg = Config::builder().group([0, 3]).build().unwrap();
        assert!(cfg.check_bounds(4).is_ok());
        assert_eq!(
            cfg.check_bounds(3),
            Err(ConfigError::ColumnOutOfRange {
                column: 3,
                columns: 3
            })
        );
        let cfg = Config::builder().ignore([7]).build().unwrap();
        assert!(cfg.check_bounds(7).is_err());
    }

    #[test]
    fn value_parsers() {
        assert_eq!(parse_columns("1, 2,5").unwrap(), vec![1, 2, 5]);
        assert!(parse_columns("1,x").is_err());
        assert_eq!(
            parse_style("text-align = left").unwrap(),
            ("text-align".to_owned(), "left".to_owned())
        );
        assert!(parse_style("bold").is_err());
    }
}
