use serde::Deserialize;
use validator::Validate;

use crate::domain::partner::NewPartner;
use crate::domain::types::{ContactNumber, MemberId, PartnerName, Percentage, Remarks};
use crate::forms::{FormError, optional_text};

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct PartnerForm {
    #[validate(range(min = 1, message = "Employee ID must be a positive number"))]
    pub employee_id: i64,
    #[validate(length(min = 1, message = "Partner name is required"))]
    pub partner_name: String,
    #[validate(range(min = 0.0, max = 100.0, message = "Profit share must be between 0 and 100"))]
    pub profit_share_percentage: f64,
    #[serde(default)]
    pub contact_no: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

impl TryFrom<PartnerForm> for NewPartner {
    type Error = FormError;

    fn try_from(form: PartnerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            employee_id: MemberId::new(form.employee_id)?,
            partner_name: PartnerName::new(form.partner_name)?,
            profit_share_percentage: Percentage::new(form.profit_share_percentage)?,
            contact_no: optional_text(&form.contact_no)
                .map(ContactNumber::new)
                .transpose()?,
            remarks: Remarks::new(form.remarks),
            is_active: form.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_number_is_optional() {
        let partner = NewPartner::try_from(PartnerForm {
            employee_id: 5,
            partner_name: "Arjun".into(),
            profit_share_percentage: 25.0,
            contact_no: " ".into(),
            remarks: String::new(),
            is_active: true,
        })
        .unwrap();

        assert_eq!(partner.contact_no, None);
        assert_eq!(partner.profit_share_percentage.get(), 25.0);
    }

    #[test]
    fn share_above_hundred_is_rejected() {
        let result = NewPartner::try_from(PartnerForm {
            employee_id: 5,
            partner_name: "Arjun".into(),
            profit_share_percentage: 120.0,
            contact_no: String::new(),
            remarks: String::new(),
            is_active: true,
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }
}
