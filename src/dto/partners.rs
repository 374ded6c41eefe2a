use serde::Serialize;

use crate::domain::partner::Partner;
use crate::domain::types::display_contact;
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerFilter {
    All,
    Active,
}

impl ListFilter for PartnerFilter {
    const ALL: &'static [Self] = &[PartnerFilter::All, PartnerFilter::Active];

    fn as_str(self) -> &'static str {
        match self {
            PartnerFilter::All => "all",
            PartnerFilter::Active => "active",
        }
    }

    fn label(self) -> &'static str {
        match self {
            PartnerFilter::All => "All Partners",
            PartnerFilter::Active => "Active",
        }
    }
}

pub const PARTNER_DEFAULTS: ListDefaults<PartnerFilter> =
    ListDefaults::new(PartnerFilter::All, "id", SortDirection::Asc).sortable(&["id", "name", "share"]);

#[derive(Clone, Debug, Serialize)]
pub struct PartnerRow {
    #[serde(flatten)]
    pub partner: Partner,
    pub contact: String,
    pub share_label: String,
}

impl From<Partner> for PartnerRow {
    fn from(partner: Partner) -> Self {
        Self {
            contact: display_contact(partner.contact_no.as_deref()),
            share_label: partner
                .profit_share_percentage
                .map(|share| format!("{share}%"))
                .unwrap_or_else(|| "-".to_string()),
            partner,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PartnersPageData {
    pub list: ListView<PartnerRow>,
    /// Sum of the shares of active partners, as reported by the API.
    pub active_share_total: f64,
    pub editing: Option<Partner>,
}
