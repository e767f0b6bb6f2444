use serde::{Deserialize, Serialize};

/// Profile fields a guest may edit on their own record.
///
/// `country_flag` is `None` when the submitted nationality carried no flag token;
/// the stored flag is then left as it is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuestProfileUpdate {
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_flag: Option<String>,
    #[serde(rename = "nationalID")]
    pub national_id: String,
}
