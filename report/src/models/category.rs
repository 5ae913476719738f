use common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Channel classification. Adding a variant here (and to `ALL`) is all the
/// pipeline needs to pick up a new category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hero,
    Kol,
    Seller,
}

impl Category {
    /// Every known category, in report order.
    pub const ALL: [Category; 3] = [Category::Hero, Category::Kol, Category::Seller];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hero => "hero",
            Category::Kol => "kol",
            Category::Seller => "seller",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unrecognized channel type: {}", s)))
    }
}

/// Resolves a `channel_type` value: a single category name or `all`.
pub fn parse_channel_type(value: &str) -> Result<Vec<Category>> {
    match value.trim() {
        "all" => Ok(Category::ALL.to_vec()),
        other => Ok(vec![other.parse()?]),
    }
}

/// Opaque channel token as read from an identifier source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
