//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! valid Indian mobile numbers, well-formed month strings) so that once a
//! value reaches a write payload it can be sent to the gym API as-is.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use phonenumber::country;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number is not a valid Indian mobile number.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Month string is not in `MM-yyyy` form.
    #[error("invalid month, expected MM-yyyy")]
    InvalidMonthYear,
    /// Amount is negative or not a finite number.
    #[error("invalid amount")]
    InvalidAmount,
    /// Percentage is outside `0..=100`.
    #[error("percentage must be between 0 and 100")]
    InvalidPercentage,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(MemberId, "Gym member identifier (the API calls it employee id).");
id_newtype!(ExpenseId, "Unique identifier for an expense entry.");
id_newtype!(HolidayId, "Unique identifier for a holiday month record.");
id_newtype!(PartnerId, "Unique identifier for a profit-sharing partner.");
id_newtype!(SettingId, "Unique identifier for a dated setting value.");

/// Helper newtype that guarantees a trimmed, non-empty string.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Validates that the input contains non-whitespace characters and trims it.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            Err(TypeConstraintError::EmptyString)
        } else {
            Ok(Self(trimmed))
        }
    }

    /// Borrow the string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Generates trimmed, non-empty string wrappers.
macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(MemberName, "Member display name.");
non_empty_string_newtype!(ExpenseName, "Short label of an expense.");
non_empty_string_newtype!(PartnerName, "Partner display name.");
non_empty_string_newtype!(SettingKey, "Setting key such as `MONTHLY_FEE`.");
non_empty_string_newtype!(TemplateName, "Approved WhatsApp template name.");

/// Free text (remarks, descriptions) with any markup stripped.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(into = "String")]
pub struct Remarks(String);

impl Remarks {
    /// Sanitizes and trims the value. Blank input yields `None`.
    pub fn new<S: Into<String>>(value: S) -> Option<Self> {
        let sanitized = ammonia::clean(&value.into());
        let trimmed = sanitized.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Remarks> for String {
    fn from(value: Remarks) -> Self {
        value.0
    }
}

/// Indian mobile number, stored as the 10-digit national number the API expects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Parses a number written with or without the `+91` prefix.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let parsed = phonenumber::parse(Some(country::Id::IN), trimmed)
            .map_err(|_| TypeConstraintError::InvalidPhone)?;
        if parsed.code().value() != 91 || !phonenumber::is_valid(&parsed) {
            return Err(TypeConstraintError::InvalidPhone);
        }
        let national = parsed.national().value().to_string();
        let is_mobile = national.len() == 10
            && national
                .chars()
                .next()
                .is_some_and(|first| matches!(first, '6'..='9'));
        if !is_mobile {
            return Err(TypeConstraintError::InvalidPhone);
        }
        Ok(Self(national))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number with the country code, as shown in tables.
    pub fn international(&self) -> String {
        format!("+91 {}", self.0)
    }
}

impl Display for ContactNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ContactNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactNumber> for String {
    fn from(value: ContactNumber) -> Self {
        value.0
    }
}

/// Formats a raw contact number the way tables show it.
///
/// Ten digit numbers get the `+91` prefix, anything else is passed through,
/// and a missing number renders as `-`.
pub fn display_contact(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => "-".to_string(),
        Some(number) if number.len() == 10 => format!("+91 {number}"),
        Some(number) => number.to_string(),
    }
}

/// Calendar month in the `MM-yyyy` form used by holiday records.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    pub fn new(month: u32, year: i32) -> Result<Self, TypeConstraintError> {
        if (1..=12).contains(&month) && (1900..=9999).contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(TypeConstraintError::InvalidMonthYear)
        }
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    /// `MM/yyyy`, the form the attendance report expects.
    pub fn slashed(self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }

    /// Month that contains `date`, with the year clamped into range.
    pub fn containing(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: date.year().clamp(1900, 9999),
            month: date.month(),
        }
    }

    /// Accepts `MM-yyyy`, `MM/yyyy` and the `yyyy-MM` value of an HTML month input.
    pub fn from_input(raw: &str) -> Result<Self, TypeConstraintError> {
        let raw = raw.trim();
        if let Some((year, month)) = raw.split_once('-')
            && year.len() == 4
            && month.len() == 2
        {
            return format!("{month}-{year}").parse();
        }
        raw.parse()
    }

    /// Human label such as `November 2025`.
    pub fn label(self) -> String {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|date| date.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl FromStr for MonthYear {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month, year) = s
            .trim()
            .split_once(['-', '/'])
            .ok_or(TypeConstraintError::InvalidMonthYear)?;
        if month.len() != 2 || year.len() != 4 {
            return Err(TypeConstraintError::InvalidMonthYear);
        }
        let month = month
            .parse::<u32>()
            .map_err(|_| TypeConstraintError::InvalidMonthYear)?;
        let year = year
            .parse::<i32>()
            .map_err(|_| TypeConstraintError::InvalidMonthYear)?;
        Self::new(month, year)
    }
}

impl Display for MonthYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl TryFrom<String> for MonthYear {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthYear> for String {
    fn from(value: MonthYear) -> Self {
        value.to_string()
    }
}

/// Non-negative, finite money amount in rupees.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, PartialOrd)]
#[serde(into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidAmount)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

/// Formats an amount in rupees with Indian digit grouping, e.g. `₹1,25,000`.
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|value| value.is_finite()) else {
        return "₹0".to_string();
    };
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let paise = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            groups.push(right);
            rest = left;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{tail}", groups.join(","))
    };

    let sign = if negative { "-" } else { "" };
    if paise == 0 {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{paise:02}")
    }
}

/// Profit share percentage between 0 and 100 inclusive.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, PartialOrd)]
#[serde(into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidPercentage)
        }
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl From<Percentage> for f64 {
    fn from(value: Percentage) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(MemberId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(MemberId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(MemberId::new(17).map(MemberId::get), Ok(17));
    }

    #[test]
    fn ids_deserialize_through_validation() {
        let id: MemberId = serde_json::from_str("42").expect("valid id");
        assert_eq!(id.get(), 42);
        assert!(serde_json::from_str::<MemberId>("0").is_err());
    }

    #[test]
    fn names_are_trimmed_and_non_empty() {
        assert_eq!(MemberName::new("  Ravi  ").unwrap().as_str(), "Ravi");
        assert_eq!(MemberName::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn remarks_strip_markup_and_blank_input() {
        let remarks = Remarks::new("<script>alert(1)</script>paid in cash").unwrap();
        assert_eq!(remarks.as_str(), "paid in cash");
        assert!(Remarks::new("   ").is_none());
    }

    #[test]
    fn contact_number_accepts_local_and_prefixed_forms() {
        let local = ContactNumber::new("9876543210").unwrap();
        let prefixed = ContactNumber::new("+91 98765 43210").unwrap();
        assert_eq!(local, prefixed);
        assert_eq!(local.as_str(), "9876543210");
        assert_eq!(local.international(), "+91 9876543210");
    }

    #[test]
    fn contact_number_rejects_non_mobile_values() {
        assert_eq!(
            ContactNumber::new("12345"),
            Err(TypeConstraintError::InvalidPhone)
        );
        assert_eq!(ContactNumber::new(""), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn display_contact_prefixes_ten_digit_numbers() {
        assert_eq!(display_contact(Some("9876543210")), "+91 9876543210");
        assert_eq!(display_contact(Some("+44 20 7946 0958")), "+44 20 7946 0958");
        assert_eq!(display_contact(None), "-");
    }

    #[test]
    fn month_year_parses_and_formats() {
        let month: MonthYear = "11-2025".parse().unwrap();
        assert_eq!(month.month(), 11);
        assert_eq!(month.year(), 2025);
        assert_eq!(month.to_string(), "11-2025");
        assert_eq!(month.label(), "November 2025");
        assert_eq!("11/2025".parse::<MonthYear>().unwrap(), month);
        assert!("13-2025".parse::<MonthYear>().is_err());
        assert!("1-2025".parse::<MonthYear>().is_err());
    }

    #[test]
    fn amounts_must_be_non_negative() {
        assert!(Amount::new(-1.0).is_err());
        assert!(Amount::new(f64::NAN).is_err());
        assert_eq!(Amount::new(1500.0).unwrap().get(), 1500.0);
    }

    #[test]
    fn currency_uses_indian_grouping() {
        assert_eq!(format_currency(Some(125000.0)), "₹1,25,000");
        assert_eq!(format_currency(Some(999.0)), "₹999");
        assert_eq!(format_currency(Some(1234567.5)), "₹12,34,567.50");
        assert_eq!(format_currency(None), "₹0");
    }

    #[test]
    fn percentage_is_bounded() {
        assert!(Percentage::new(100.0).is_ok());
        assert!(Percentage::new(100.5).is_err());
    }
}
