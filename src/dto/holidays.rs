use serde::Serialize;

use crate::domain::holiday::{Holiday, HolidayTotals};
use crate::domain::types::MonthYear;
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayFilter {
    All,
}

impl ListFilter for HolidayFilter {
    const ALL: &'static [Self] = &[HolidayFilter::All];

    fn as_str(self) -> &'static str {
        "all"
    }

    fn label(self) -> &'static str {
        "Holidays"
    }
}

pub const HOLIDAY_DEFAULTS: ListDefaults<HolidayFilter> =
    ListDefaults::new(HolidayFilter::All, "month", SortDirection::Desc).sortable(&["month", "days"]);

#[derive(Clone, Debug, Serialize)]
pub struct HolidayRow {
    #[serde(flatten)]
    pub holiday: Holiday,
    pub month_label: String,
    /// `yyyy-MM` for the month picker of the edit dialog.
    pub month_input: String,
}

impl From<Holiday> for HolidayRow {
    fn from(holiday: Holiday) -> Self {
        let parsed = holiday
            .holiday_month_year
            .as_deref()
            .and_then(|raw| raw.parse::<MonthYear>().ok());
        Self {
            month_label: holiday.month_label(),
            month_input: parsed
                .map(|month| format!("{:04}-{:02}", month.year(), month.month()))
                .unwrap_or_default(),
            holiday,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HolidaysPageData {
    pub list: ListView<HolidayRow>,
    /// Totals over every holiday record, not just the shown page.
    pub totals: HolidayTotals,
    pub editing: Option<HolidayRow>,
}
