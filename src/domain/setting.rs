use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::{null_as_default, optional_date};
use crate::domain::types::{Remarks, SettingKey};

/// Setting keys the settings form offers.
pub const KNOWN_SETTING_KEYS: [&str; 2] = ["MONTHLY_FEE", "ADMISSION_FEE"];

/// Dated configuration value, e.g. the monthly fee valid from a given day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub id: i64,
    #[serde(default)]
    pub setting_key: Option<String>,
    #[serde(default)]
    pub setting_value: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub effective_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    pub effective_to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payload accepted by `POST /settings` and `PUT /settings/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSetting {
    pub setting_key: SettingKey,
    pub setting_value: String,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub is_active: bool,
    pub description: Option<Remarks>,
}
