use serde::{Deserialize, Serialize};

use crate::domain::message::{Language, TEMPLATE_EXAMPLES, TemplateExample};

/// Values the send form opens with, e.g. after clicking a template example
/// or a member's message link.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct WhatsAppPrefill {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub parameters: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct WhatsAppPageData {
    pub form: WhatsAppPrefill,
    pub languages: Vec<LanguageOption>,
    pub examples: &'static [TemplateExample],
}

impl WhatsAppPageData {
    pub fn new(mut form: WhatsAppPrefill) -> Self {
        let language = form.language.parse::<Language>().unwrap_or_default();
        form.language = language.code().to_string();
        if form.parameters.trim().is_empty()
            && let Some(example) = TEMPLATE_EXAMPLES.iter().find(|e| e.name == form.template.trim())
        {
            form.parameters = example.example.to_string();
        }
        Self {
            languages: Language::ALL
                .iter()
                .map(|&lang| LanguageOption {
                    code: lang.code(),
                    label: lang.label(),
                    selected: lang == language,
                })
                .collect(),
            examples: &TEMPLATE_EXAMPLES,
            form,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choosing_an_example_fills_its_parameters() {
        let data = WhatsAppPageData::new(WhatsAppPrefill {
            template: "birthday_wishes".into(),
            language: "xx".into(),
            ..Default::default()
        });
        assert_eq!(data.form.parameters, "Jane Smith, 25");
        assert_eq!(data.form.language, "en");
        assert_eq!(data.languages.iter().filter(|l| l.selected).count(), 1);
    }
}
