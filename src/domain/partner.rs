use serde::{Deserialize, Serialize};

use crate::domain::dates::null_as_default;

use crate::domain::types::{ContactNumber, MemberId, PartnerName, Percentage, Remarks};

/// Business partner entitled to a share of the gym's profit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub profit_share_percentage: Option<f64>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_active: bool,
}

/// Payload accepted by `POST /partners` and `PUT /partners/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPartner {
    pub employee_id: MemberId,
    pub partner_name: PartnerName,
    pub profit_share_percentage: Percentage,
    pub contact_no: Option<ContactNumber>,
    pub remarks: Option<Remarks>,
    pub is_active: bool,
}
