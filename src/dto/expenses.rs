use serde::Serialize;

use crate::domain::expense::Expense;
use crate::domain::types::format_currency;
use crate::dto::list::ListView;
use crate::listing::{ListDefaults, ListFilter, SortDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseFilter {
    All,
}

impl ListFilter for ExpenseFilter {
    const ALL: &'static [Self] = &[ExpenseFilter::All];

    fn as_str(self) -> &'static str {
        "all"
    }

    fn label(self) -> &'static str {
        "All Expenses"
    }
}

pub const EXPENSE_DEFAULTS: ListDefaults<ExpenseFilter> =
    ListDefaults::new(ExpenseFilter::All, "date", SortDirection::Desc);

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Clone, Debug, Serialize)]
pub struct ExpenseRow {
    #[serde(flatten)]
    pub expense: Expense,
    pub amount_label: String,
}

impl From<Expense> for ExpenseRow {
    fn from(expense: Expense) -> Self {
        Self {
            amount_label: format_currency(expense.amount),
            expense,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MonthOption {
    pub value: u32,
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct ExpensesPageData {
    pub list: ListView<ExpenseRow>,
    pub year: i32,
    /// `None` shows the whole year.
    pub month: Option<u32>,
    pub years: Vec<i32>,
    pub months: Vec<MonthOption>,
    /// Expense loaded into the edit dialog.
    pub editing: Option<Expense>,
}

impl ExpensesPageData {
    pub fn month_options(selected: Option<u32>) -> Vec<MonthOption> {
        MONTH_NAMES
            .iter()
            .zip(1u32..)
            .map(|(&name, value)| MonthOption {
                value,
                name,
                selected: selected == Some(value),
            })
            .collect()
    }
}
