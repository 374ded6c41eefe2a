//! Read models and write payloads of the gym API.

pub mod attendance;
pub mod birthday;
pub mod dates;
pub mod expense;
pub mod holiday;
pub mod member;
pub mod message;
pub mod partner;
pub mod payment;
pub mod report;
pub mod setting;
pub mod types;
