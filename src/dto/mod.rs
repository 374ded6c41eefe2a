//! DTO modules that bridge services with templates and the API.

pub mod attendance;
pub mod birthdays;
pub mod dashboard;
pub mod expenses;
pub mod holidays;
pub mod list;
pub mod members;
pub mod page;
pub mod partners;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod whatsapp;
