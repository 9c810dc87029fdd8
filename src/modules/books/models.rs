use serde::{Deserialize, Serialize};
use serde_json::json;

/// Message reported when a create request lacks any required field.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// A catalogue item as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Copies in stock
    pub quantity: i64,
    pub image_url: String,
}

/// A validated book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub image_url: String,
}

impl NewBook {
    /// Attach the identifier the store assigned.
    pub fn with_id(self, id: impl Into<String>) -> Book {
        Book {
            id: id.into(),
            title: self.title,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            image_url: self.image_url,
        }
    }
}

/// Request body for creating a book. Every field is optional on the wire so
/// that missing fields can be reported together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Why a [`CreateBook`] was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub message: &'static str,
    pub details: Vec<serde_json::Value>,
}

impl CreateBook {
    /// Check the request and turn it into a [`NewBook`].
    ///
    /// Empty strings and zero numbers count as missing, matching what the
    /// catalogue has always accepted. Negative numbers are rejected outright.
    pub fn validate(self) -> Result<NewBook, ValidationFailure> {
        let title = self.title.filter(|s| !s.is_empty());
        let description = self.description.filter(|s| !s.is_empty());
        let price = self.price.filter(|p| *p != 0.0);
        let quantity = self.quantity.filter(|q| *q != 0);
        let image_url = self.image_url.filter(|s| !s.is_empty());

        let (Some(title), Some(description), Some(price), Some(quantity), Some(image_url)) =
            (title.clone(), description.clone(), price, quantity, image_url.clone())
        else {
            let details = [
                ("title", title.is_none()),
                ("description", description.is_none()),
                ("price", price.is_none()),
                ("quantity", quantity.is_none()),
                ("imageUrl", image_url.is_none()),
            ]
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| json!({"field": field, "error": "required"}))
            .collect();

            return Err(ValidationFailure {
                message: ALL_FIELDS_REQUIRED,
                details,
            });
        };

        let mut negative = Vec::new();
        if price < 0.0 {
            negative.push(json!({"field": "price", "error": "must not be negative"}));
        }
        if quantity < 0 {
            negative.push(json!({"field": "quantity", "error": "must not be negative"}));
        }
        if !negative.is_empty() {
            return Err(ValidationFailure {
                message: "Price and quantity must not be negative",
                details: negative,
            });
        }

        Ok(NewBook {
            title,
            description,
            price,
            quantity,
            image_url,
        })
    }
}

/// Body returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedBook {
    pub message: String,
    pub book: Book,
}
