use serde::{ Deserialize, Deserializer };

/// A catalog entry as stored by the storefront. Records are owned by the
/// external store and only ever read here.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description_short: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_default: String,
    #[serde(default)]
    pub price: Option<Price>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub sale: Option<f64>,
    #[serde(default)]
    pub regular: Option<f64>,
}

/// Stored documents sometimes carry `null` instead of omitting a field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Price {
    /// Amount shown to shoppers: the sale price when set, otherwise the
    /// regular price. Zero and NaN count as unset.
    pub fn display_amount(&self) -> Option<f64> {
        self.sale.filter(|v| is_set(*v)).or_else(|| self.regular.filter(|v| is_set(*v)))
    }
}

fn is_set(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}
