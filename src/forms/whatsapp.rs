use serde::Deserialize;
use validator::Validate;

use crate::domain::message::{Language, WhatsAppMessage};
use crate::domain::types::{ContactNumber, TemplateName};
use crate::forms::FormError;

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct WhatsAppForm {
    #[validate(length(min = 1, message = "Recipient number is required"))]
    pub to: String,
    #[validate(length(min = 1, message = "Template name is required"))]
    pub template_name: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Comma separated template parameters.
    #[serde(default)]
    pub parameters: String,
}

impl TryFrom<WhatsAppForm> for WhatsAppMessage {
    type Error = FormError;

    fn try_from(form: WhatsAppForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            to: ContactNumber::new(form.to)?,
            template_name: TemplateName::new(form.template_name)?,
            language: form.language.parse::<Language>()?,
            parameters: WhatsAppMessage::split_parameters(&form.parameters),
        })
    }
}
