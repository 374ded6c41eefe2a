use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::types::{ContactNumber, TemplateName, TypeConstraintError};

/// Template languages approved on the WhatsApp business account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "en_US")]
    EnglishUs,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::EnglishUs];

    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::EnglishUs => "en_US",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::EnglishUs => "English (US)",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.code() == s.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("language `{s}`")))
    }
}

/// Template message sent through `POST /whatsapp/send`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppMessage {
    pub to: ContactNumber,
    pub template_name: TemplateName,
    pub language: Language,
    #[serde(serialize_with = "comma_separated")]
    pub parameters: Vec<String>,
}

impl WhatsAppMessage {
    /// Splits the comma separated parameter field, dropping blank entries.
    pub fn split_parameters(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn comma_separated<S>(parameters: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&parameters.join(", "))
}

/// Templates offered as one-click examples on the messaging screen.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TemplateExample {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static str,
    pub example: &'static str,
}

pub const TEMPLATE_EXAMPLES: [TemplateExample; 4] = [
    TemplateExample {
        name: "payment_reminder",
        description: "Payment reminder template",
        parameters: "Member Name, Amount, Due Date",
        example: "John Doe, 600, 2025-11-15",
    },
    TemplateExample {
        name: "birthday_wishes",
        description: "Birthday wishes template",
        parameters: "Member Name, Age",
        example: "Jane Smith, 25",
    },
    TemplateExample {
        name: "membership_expiry",
        description: "Membership expiry notification",
        parameters: "Member Name, Expiry Date",
        example: "Mike Johnson, 2025-12-01",
    },
    TemplateExample {
        name: "welcome_message",
        description: "Welcome new member",
        parameters: "Member Name, Gym Name",
        example: "Sarah Wilson, Rock Gym",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_for_the_send_endpoint() {
        let message = WhatsAppMessage {
            to: ContactNumber::new("9876543210").unwrap(),
            template_name: TemplateName::new("birthday_wishes").unwrap(),
            language: Language::EnglishUs,
            parameters: WhatsAppMessage::split_parameters(" Jane Smith , 25 ,"),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["to"], "9876543210");
        assert_eq!(json["templateName"], "birthday_wishes");
        assert_eq!(json["language"], "en_US");
        assert_eq!(json["parameters"], "Jane Smith, 25");
    }
}
