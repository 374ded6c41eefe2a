use serde::Serialize;

use crate::domain::setting::{KNOWN_SETTING_KEYS, Setting};
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingFilter {
    Current,
    Future,
    All,
    History,
}

impl ListFilter for SettingFilter {
    const ALL: &'static [Self] = &[
        SettingFilter::Current,
        SettingFilter::Future,
        SettingFilter::All,
        SettingFilter::History,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SettingFilter::Current => "current",
            SettingFilter::Future => "future",
            SettingFilter::All => "all",
            SettingFilter::History => "history",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SettingFilter::Current => "Current",
            SettingFilter::Future => "Future",
            SettingFilter::All => "All Settings",
            SettingFilter::History => "History by Key",
        }
    }
}

pub const SETTING_DEFAULTS: ListDefaults<SettingFilter> =
    ListDefaults::new(SettingFilter::Current, "effectiveFrom", SortDirection::Desc)
        .sortable(&["effectiveFrom"]);

/// `Monthly Fee` for `MONTHLY_FEE`; unknown keys are shown as they are.
pub fn setting_key_label(key: &str) -> String {
    match key {
        "MONTHLY_FEE" => "Monthly Fee".to_string(),
        "ADMISSION_FEE" => "Admission Fee".to_string(),
        other => other.to_string(),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SettingRow {
    #[serde(flatten)]
    pub setting: Setting,
    pub key_label: String,
    /// Badge class suffix: `current`, `future` or `expired`.
    pub status_class: String,
}

impl From<Setting> for SettingRow {
    fn from(setting: Setting) -> Self {
        Self {
            key_label: setting_key_label(setting.setting_key.as_deref().unwrap_or("-")),
            status_class: setting
                .status
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_else(|| "expired".to_string()),
            setting,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct KeyOption {
    pub key: &'static str,
    pub label: String,
    pub selected: bool,
}

impl KeyOption {
    pub fn all(selected: &str) -> Vec<Self> {
        KNOWN_SETTING_KEYS
            .iter()
            .map(|&key| KeyOption {
                key,
                label: setting_key_label(key),
                selected: key == selected,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsPageData {
    pub list: ListView<SettingRow>,
    /// Key whose history the history tab shows.
    pub history_key: String,
    pub keys: Vec<KeyOption>,
    pub editing: Option<Setting>,
}
