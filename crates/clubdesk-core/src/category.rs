use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The four age brackets the club trains. Serialized by display label,
/// which is exactly what the backing spreadsheet stores.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Category {
    Cebollitas,
    PreDecima,
    Decima,
    Infantil,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Cebollitas => "Cebollitas (5-6)",
            Category::PreDecima => "Pre-Décima (7-8)",
            Category::Decima => "Décima (9-10)",
            Category::Infantil => "Infantil (11-12)",
        }
    }

    pub fn all() -> [Category; 4] {
        [
            Category::Cebollitas,
            Category::PreDecima,
            Category::Decima,
            Category::Infantil,
        ]
    }

    /// Next bracket, wrapping around. Used by select inputs.
    pub fn next(&self) -> Category {
        match self {
            Category::Cebollitas => Category::PreDecima,
            Category::PreDecima => Category::Decima,
            Category::Decima => Category::Infantil,
            Category::Infantil => Category::Cebollitas,
        }
    }

    pub fn prev(&self) -> Category {
        match self {
            Category::Cebollitas => Category::Infantil,
            Category::PreDecima => Category::Cebollitas,
            Category::Decima => Category::PreDecima,
            Category::Infantil => Category::Decima,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Cebollitas
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::all()
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
