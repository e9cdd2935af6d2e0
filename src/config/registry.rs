use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize as _;

use crate::config::color::ColorDef;
use crate::foundation::error::{CalendarError, CalendarResult};

/// Structured identifier of a configured color.
///
/// `group` is the dotted path of the enclosing table (empty for top-level colors), `name` the
/// leaf key. `"flows.high"` parses to `{ group: "flows", name: "high" }`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorKey {
    /// Dotted path of the enclosing color group.
    pub group: String,
    /// Leaf name inside the group.
    pub name: String,
}

impl ColorKey {
    /// Build a key from its parts.
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Parse a dotted reference such as `"decision.spill"`.
    pub fn parse(dotted: &str) -> CalendarResult<Self> {
        let dotted = dotted.trim();
        if dotted.is_empty() || dotted.split('.').any(str::is_empty) {
            return Err(CalendarError::config(format!(
                "color key '{dotted}' is not a dotted name"
            )));
        }
        Ok(match dotted.rsplit_once('.') {
            Some((group, name)) => Self::new(group, name),
            None => Self::new("", dotted),
        })
    }
}

impl std::fmt::Display for ColorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.group, self.name)
        }
    }
}

/// Flattened, validated color table built from the nested `colors` configuration object.
#[derive(Clone, Debug, Default)]
pub struct ColorRegistry {
    colors: BTreeMap<ColorKey, ColorDef>,
    groups: BTreeSet<String>,
}

impl ColorRegistry {
    /// Flatten a nested JSON color table.
    ///
    /// Objects nest groups; strings and channel lists are colors. Every leaf is parsed here so
    /// bad colors fail at load. Names may not contain `.`, which separates reference segments.
    pub fn from_value(value: &serde_json::Value) -> CalendarResult<Self> {
        let serde_json::Value::Object(root) = value else {
            return Err(CalendarError::config("'colors' must be an object"));
        };
        let mut reg = Self::default();
        reg.insert_group("", root)?;
        Ok(reg)
    }

    fn insert_group(
        &mut self,
        group: &str,
        table: &serde_json::Map<String, serde_json::Value>,
    ) -> CalendarResult<()> {
        for (name, value) in table {
            if name.is_empty() || name.contains('.') {
                let at = if group.is_empty() {
                    "colors".to_owned()
                } else {
                    format!("colors.{group}")
                };
                return Err(CalendarError::config(format!(
                    "{at}: color name '{name}' must be non-empty and must not contain '.'"
                )));
            }
            let key = ColorKey::new(group, name.as_str());
            let path = key.to_string();
            if is_color_leaf(value) {
                let color = ColorDef::deserialize(value)
                    .map_err(|e| CalendarError::config(format!("colors.{path}: {e}")))?;
                self.colors.insert(key, color);
            } else if let serde_json::Value::Object(sub) = value {
                self.groups.insert(path.clone());
                self.insert_group(&path, sub)?;
            } else {
                return Err(CalendarError::config(format!(
                    "colors.{path}: expected a color or a nested color group"
                )));
            }
        }
        Ok(())
    }

    /// Insert or replace a color.
    pub fn insert(&mut self, key: ColorKey, color: ColorDef) {
        self.colors.insert(key, color);
    }

    /// Look up a parsed key.
    pub fn get(&self, key: &ColorKey) -> CalendarResult<ColorDef> {
        if let Some(c) = self.colors.get(key) {
            return Ok(*c);
        }
        if self.groups.contains(&key.to_string()) {
            return Err(CalendarError::config(format!(
                "color key '{key}' does not resolve to a color (it names a group)"
            )));
        }
        Err(CalendarError::config(format!(
            "color key '{key}' not found in configuration"
        )))
    }

    /// Parse and look up a dotted reference.
    pub fn resolve(&self, dotted: &str) -> CalendarResult<ColorDef> {
        self.get(&ColorKey::parse(dotted)?)
    }

    /// Number of leaf colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Return `true` when no colors are registered.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate colors in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ColorKey, &ColorDef)> {
        self.colors.iter()
    }
}

fn is_color_leaf(value: &serde_json::Value) -> bool {
    matches!(
        value,
        serde_json::Value::String(_) | serde_json::Value::Array(_)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/config/registry.rs"]
mod tests;
