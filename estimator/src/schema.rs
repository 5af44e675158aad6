use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The ordered feature columns the model was trained against.
///
/// The model indexes features positionally, so the order here is the order of
/// every encoded vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Creates a new `FeatureSchema`.
    ///
    /// # Errors
    /// Returns a description of the problem if there are no columns or a column
    /// name repeats.
    pub fn new(columns: Vec<String>) -> Result<Self, String> {
        if columns.is_empty() {
            return Err("schema has no columns".into());
        }

        let mut positions = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if positions.insert(name.clone(), i).is_some() {
                return Err(format!("column '{name}' appears more than once"));
            }
        }

        Ok(Self { columns, positions })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of `name` in the schema, if the model knows that column.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = String;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_column_order() {
        let schema: FeatureSchema =
            serde_json::from_str(r#"["area", "building_area", "City_Bogor"]"#).unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.position("area"), Some(0));
        assert_eq!(schema.position("City_Bogor"), Some(2));
        assert_eq!(schema.position("City_Depok"), None);
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(serde_json::from_str::<FeatureSchema>(r#"["a", "b", "a"]"#).is_err());
        assert!(serde_json::from_str::<FeatureSchema>("[]").is_err());
    }
}
