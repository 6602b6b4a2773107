//! Category — a free-text label grouping sources for browsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label shown for a source that has no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A source's category. On the wire this is an optional string; `null` and
/// the [`UNCATEGORIZED`] sentinel both mean "no category".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Category {
  #[default]
  Uncategorized,
  Named(String),
}

impl Category {
  /// Interpret user input. Empty input and the sentinel clear the category.
  pub fn parse(raw: &str) -> Self {
    if raw.is_empty() || raw == UNCATEGORIZED {
      Self::Uncategorized
    } else {
      Self::Named(raw.to_owned())
    }
  }

  pub fn is_uncategorized(&self) -> bool { matches!(self, Self::Uncategorized) }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Uncategorized => UNCATEGORIZED,
      Self::Named(name) => name,
    }
  }
}

impl From<Option<String>> for Category {
  fn from(value: Option<String>) -> Self {
    value.as_deref().map(Self::parse).unwrap_or_default()
  }
}

impl From<Category> for Option<String> {
  fn from(value: Category) -> Self {
    match value {
      Category::Uncategorized => None,
      Category::Named(name) => Some(name),
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_and_sentinel_parse_as_uncategorized() {
    assert_eq!(Category::parse(""), Category::Uncategorized);
    assert_eq!(Category::parse(UNCATEGORIZED), Category::Uncategorized);
    assert_eq!(Category::parse("billing"), Category::Named("billing".into()));
  }

  #[test]
  fn null_on_the_wire_is_uncategorized() {
    let c: Category = serde_json::from_str("null").unwrap();
    assert_eq!(c, Category::Uncategorized);
    assert_eq!(serde_json::to_string(&c).unwrap(), "null");

    let c: Category = serde_json::from_str(r#""ads""#).unwrap();
    assert_eq!(c.to_string(), "ads");
  }
}
