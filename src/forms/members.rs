use serde::Deserialize;
use validator::Validate;

use crate::domain::member::NewMember;
use crate::domain::types::{Amount, ContactNumber, MemberId, MemberName};
use crate::forms::{FormError, optional_date, optional_number, optional_text, required_date, required_number};

fn default_joining_fee() -> String {
    "1000".to_string()
}

#[derive(Debug, Deserialize, Validate)]
/// Form data of the create and update member screens.
pub struct MemberForm {
    /// Member id, chosen by the operator to match the biometric device.
    #[validate(range(min = 1, message = "Member ID must be a positive number"))]
    pub id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_no: String,
    /// Date of joining, `yyyy-mm-dd`.
    #[validate(length(min = 1, message = "Date of joining is required"))]
    pub doj: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default = "default_joining_fee")]
    pub joining_fee: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub advance_in_months: String,
}

impl TryFrom<MemberForm> for NewMember {
    type Error = FormError;

    fn try_from(form: MemberForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            id: MemberId::new(form.id)?,
            name: MemberName::new(form.name)?,
            contact_no: ContactNumber::new(form.contact_no)?,
            doj: required_date(&form.doj, "doj")?,
            dob: optional_date(&form.dob, "dob")?,
            gender: optional_text(&form.gender),
            weight: optional_number(&form.weight, "weight")?,
            height: optional_number(&form.height, "height")?,
            blood_group: optional_text(&form.blood_group),
            joining_fee: Amount::new(required_number(&form.joining_fee, "joining_fee")?)?,
            is_admin: form.is_admin,
            advance_in_months: optional_number(&form.advance_in_months, "advance_in_months")?,
        })
    }
}
