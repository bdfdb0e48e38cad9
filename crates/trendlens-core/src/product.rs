use serde::{Deserialize, Serialize};

/// A catalog product as edited in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Free-text phrases sent to the analysis service.
    #[serde(default)]
    pub trend_descriptions: Vec<String>,

    #[serde(default)]
    pub reviews: Vec<Review>,

    /// Catalog fields this editor does not touch (`type`, `unit_of_measurement`, ...).
    /// They are sent back to the suggestion service unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A customer review attached to a product. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub customer_name: String,
    pub review: String,
    pub rating: f64,
}

/// Scalar text fields of a product that can be edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
}

impl ProductField {
    pub fn label(&self) -> &'static str {
        match self {
            ProductField::Name => "Name",
            ProductField::Description => "Description",
        }
    }
}

impl Product {
    pub fn field(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Description => &self.description,
        }
    }

    /// Return a copy of this product with one field replaced.
    pub fn with_field(&self, field: ProductField, value: impl Into<String>) -> Product {
        let mut next = self.clone();
        match field {
            ProductField::Name => next.name = value.into(),
            ProductField::Description => next.description = value.into(),
        }
        next
    }

    /// Return a copy of this product with a new trend-query list.
    pub fn with_trend_descriptions(&self, trend_descriptions: Vec<String>) -> Product {
        Product {
            trend_descriptions,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Review {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({} stars)",
            self.customer_name, self.review, self.rating
        )
    }
}
