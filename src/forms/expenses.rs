use serde::Deserialize;
use validator::Validate;

use crate::domain::expense::NewExpense;
use crate::domain::types::{Amount, ExpenseName, MemberId, Remarks};
use crate::forms::{FormError, optional_number, required_date};

#[derive(Debug, Deserialize, Validate)]
/// Form data of the add and edit expense dialog.
pub struct ExpenseForm {
    #[validate(length(min = 1, message = "Expense name is required"))]
    pub expense_name: String,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: f64,
    pub date: String,
    #[serde(default)]
    pub paid_by_employee_id: String,
    #[serde(default)]
    pub remarks: String,
}

impl TryFrom<ExpenseForm> for NewExpense {
    type Error = FormError;

    fn try_from(form: ExpenseForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let paid_by = optional_number::<i64>(&form.paid_by_employee_id, "paid_by_employee_id")?
            .map(MemberId::new)
            .transpose()?;

        Ok(Self {
            expense_name: ExpenseName::new(form.expense_name)?,
            amount: Amount::new(form.amount)?,
            date: required_date(&form.date, "date")?,
            paid_by_employee_id: paid_by,
            remarks: Remarks::new(form.remarks),
        })
    }
}
