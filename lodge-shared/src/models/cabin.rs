use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cabin {
    pub id: i64,
    pub name: String,
    pub max_capacity: i32,
    pub regular_price: f64,
    pub discount: f64,
    pub image: Option<String>,
}

impl Cabin {
    pub fn nightly_price(&self) -> f64 {
        self.regular_price - self.discount
    }
}
