use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::dates::optional_date;
use crate::domain::types::{Amount, ExpenseName, MemberId, Remarks};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    #[serde(default)]
    pub expense_name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub paid_by_employee_id: Option<i64>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Payload accepted by `POST /expenses` and `PUT /expenses/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub expense_name: ExpenseName,
    pub amount: Amount,
    pub date: NaiveDate,
    pub paid_by_employee_id: Option<MemberId>,
    pub remarks: Option<Remarks>,
}
