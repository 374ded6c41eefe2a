use serde::Deserialize;
use validator::Validate;

use crate::domain::holiday::NewHoliday;
use crate::domain::types::MonthYear;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
pub struct HolidayForm {
    /// `MM-yyyy`; the month picker's `yyyy-MM` is accepted too.
    #[validate(length(min = 1, message = "Month is required"))]
    pub holiday_month_year: String,
    #[validate(range(max = 31, message = "A month has at most 31 holidays"))]
    pub number_of_holidays: u32,
}

impl TryFrom<HolidayForm> for NewHoliday {
    type Error = FormError;

    fn try_from(form: HolidayForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            holiday_month_year: MonthYear::from_input(&form.holiday_month_year)?,
            number_of_holidays: form.number_of_holidays,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_month_spellings() {
        for raw in ["11-2025", "2025-11"] {
            let holiday = NewHoliday::try_from(HolidayForm {
                holiday_month_year: raw.into(),
                number_of_holidays: 4,
            })
            .unwrap();
            assert_eq!(holiday.holiday_month_year.to_string(), "11-2025");
        }
    }

    #[test]
    fn rejects_impossible_counts() {
        let result = NewHoliday::try_from(HolidayForm {
            holiday_month_year: "02-2025".into(),
            number_of_holidays: 40,
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }
}
