use serde::Deserialize;
use validator::Validate;

use crate::domain::setting::NewSetting;
use crate::domain::types::{Remarks, SettingKey};
use crate::forms::{FormError, optional_date, required_date};

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct SettingForm {
    #[validate(length(min = 1, message = "Setting key is required"))]
    pub setting_key: String,
    #[validate(length(min = 1, message = "Setting value is required"))]
    pub setting_value: String,
    pub effective_from: String,
    /// Blank means open-ended.
    #[serde(default)]
    pub effective_to: String,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<SettingForm> for NewSetting {
    type Error = FormError;

    fn try_from(form: SettingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let effective_from = required_date(&form.effective_from, "effective_from")?;
        let effective_to = optional_date(&form.effective_to, "effective_to")?;
        if effective_to.is_some_and(|to| to < effective_from) {
            return Err(FormError::InvalidDate("effective_to"));
        }

        Ok(Self {
            setting_key: SettingKey::new(form.setting_key.trim().to_uppercase())?,
            setting_value: form.setting_value.trim().to_string(),
            effective_from,
            effective_to,
            is_active: form.is_active,
            description: Remarks::new(form.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(to: &str) -> SettingForm {
        SettingForm {
            setting_key: "monthly_fee".into(),
            setting_value: " 1500 ".into(),
            effective_from: "2025-04-01".into(),
            effective_to: to.into(),
            is_active: true,
            description: String::new(),
        }
    }

    #[test]
    fn normalizes_key_and_value() {
        let setting = NewSetting::try_from(form("")).unwrap();
        assert_eq!(setting.setting_key.as_str(), "MONTHLY_FEE");
        assert_eq!(setting.setting_value, "1500");
        assert_eq!(setting.effective_to, None);
    }

    #[test]
    fn end_before_start_is_rejected() {
        assert!(matches!(
            NewSetting::try_from(form("2025-03-31")),
            Err(FormError::InvalidDate("effective_to"))
        ));
    }
}
