//! Access to the gym REST API.
//!
//! Services depend on the reader/writer traits below; [`ApiRepository`]
//! implements all of them over HTTP and `mock::MockRepository` stands in for
//! it in unit tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::attendance::{ActiveEmployee, ActivePeriod, InactiveMember, InactivePeriod, PunchRecord};
use crate::domain::birthday::BirthdayWindow;
use crate::domain::expense::{Expense, NewExpense};
use crate::domain::holiday::{Holiday, NewHoliday};
use crate::domain::member::{Member, MonthlyPunchSummary, NewMember};
use crate::domain::message::WhatsAppMessage;
use crate::domain::partner::{NewPartner, Partner};
use crate::domain::payment::{NewPayment, Payment, PendingPayment};
use crate::domain::report::{AttendanceSummary, Defaulter, LastPunch};
use crate::domain::setting::{NewSetting, Setting};
use crate::domain::types::{ExpenseId, HolidayId, MemberId, MonthYear, PartnerId, SettingId, SettingKey};
use crate::listing::SortDirection;
use crate::pagination::{PageRequest, PageResult};
use crate::repository::errors::RepositoryResult;

pub mod api;
pub mod attendance;
pub mod errors;
pub mod expense;
pub mod holiday;
pub mod member;
pub mod message;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod partner;
pub mod payment;
pub mod report;
pub mod setting;

pub use api::ApiRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl SortRequest {
    pub fn new(sort_by: impl Into<String>, sort_dir: SortDirection) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_dir,
        }
    }
}

/// Query of the server-paginated `/members` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberListQuery {
    pub page: PageRequest,
    pub sort: SortRequest,
    pub is_admin: bool,
    pub search: Option<String>,
}

impl MemberListQuery {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            sort: SortRequest::new("id", SortDirection::Asc),
            is_admin: false,
            search: None,
        }
    }

    pub fn sort(mut self, sort: SortRequest) -> Self {
        self.sort = sort;
        self
    }

    pub fn admins(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Blank terms are dropped.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }
}

/// Which punch search endpoint to call, most specific criterion first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunchCriteria {
    MonthYear(MonthYear),
    Year(i32),
    Filters {
        employee_id: Option<i64>,
        employee_name: Option<String>,
        date: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchSearchQuery {
    pub criteria: PunchCriteria,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpenseListQuery {
    pub page: PageRequest,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingScope {
    All,
    /// Valid today.
    Current,
    /// Taking effect later.
    Future,
    /// History of a single key.
    Key(SettingKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "excel" => Some(ExportFormat::Excel),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

/// File forwarded to an upload endpoint as the multipart `file` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Binary response of an export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub content_type: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait MemberReader: Send + Sync {
    async fn list_members(&self, query: &MemberListQuery) -> RepositoryResult<PageResult<Member>>;
    /// Members whose current fee is paid, with the API's total.
    async fn list_paid_members(&self) -> RepositoryResult<(u64, Vec<Member>)>;
    async fn list_unpaid_members(&self) -> RepositoryResult<(u64, Vec<Member>)>;
    async fn list_unattended_members(
        &self,
        page: PageRequest,
        sort: &SortRequest,
    ) -> RepositoryResult<PageResult<Member>>;
    /// Members who punched during the last seven days.
    async fn list_recently_active_members(
        &self,
        page: PageRequest,
    ) -> RepositoryResult<PageResult<Member>>;
    async fn get_member(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    async fn get_punch_summary(&self, id: MemberId) -> RepositoryResult<Vec<MonthlyPunchSummary>>;
}

#[async_trait]
pub trait MemberWriter: Send + Sync {
    async fn create_member(&self, member: &NewMember) -> RepositoryResult<()>;
    async fn update_member(&self, id: MemberId, member: &NewMember) -> RepositoryResult<()>;
    async fn upload_members(&self, file: UploadFile) -> RepositoryResult<()>;
    async fn upload_access_file(&self, file: UploadFile) -> RepositoryResult<()>;
}

#[async_trait]
pub trait PaymentReader: Send + Sync {
    async fn list_pending_payments(
        &self,
        date: Option<NaiveDate>,
    ) -> RepositoryResult<Vec<PendingPayment>>;
    async fn list_member_payments(&self, id: MemberId) -> RepositoryResult<Vec<Payment>>;
    async fn list_defaulters(&self, page: PageRequest) -> RepositoryResult<PageResult<Defaulter>>;
}

#[async_trait]
pub trait PaymentWriter: Send + Sync {
    async fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ExpenseReader: Send + Sync {
    async fn list_expenses(&self, query: &ExpenseListQuery) -> RepositoryResult<PageResult<Expense>>;
    async fn get_expense(&self, id: ExpenseId) -> RepositoryResult<Option<Expense>>;
}

#[async_trait]
pub trait ExpenseWriter: Send + Sync {
    async fn create_expense(&self, expense: &NewExpense) -> RepositoryResult<()>;
    async fn update_expense(&self, id: ExpenseId, expense: &NewExpense) -> RepositoryResult<()>;
    async fn delete_expense(&self, id: ExpenseId) -> RepositoryResult<()>;
    async fn upload_expenses(&self, file: UploadFile) -> RepositoryResult<()>;
}

#[async_trait]
pub trait AttendanceReader: Send + Sync {
    async fn search_punches(
        &self,
        query: &PunchSearchQuery,
    ) -> RepositoryResult<PageResult<PunchRecord>>;
    async fn list_inactive_members(
        &self,
        period: InactivePeriod,
        page: PageRequest,
    ) -> RepositoryResult<PageResult<InactiveMember>>;
    async fn list_active_members(
        &self,
        period: ActivePeriod,
        page: PageRequest,
    ) -> RepositoryResult<PageResult<ActiveEmployee>>;
}

#[async_trait]
pub trait AttendanceWriter: Send + Sync {
    async fn upload_punches(&self, file: UploadFile) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ReportReader: Send + Sync {
    async fn attendance_report(&self, month: MonthYear) -> RepositoryResult<Vec<AttendanceSummary>>;
    async fn last_punch_report(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<LastPunch>>;
    async fn members_without_punch(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<Member>>;
    async fn inactive_report(&self, days: u32) -> RepositoryResult<Vec<InactiveMember>>;
    async fn export_inactive_members(
        &self,
        days: u32,
        format: ExportFormat,
    ) -> RepositoryResult<Download>;
    async fn list_birthdays(&self, window: BirthdayWindow) -> RepositoryResult<Vec<Member>>;
}

#[async_trait]
pub trait HolidayReader: Send + Sync {
    async fn list_holidays(&self) -> RepositoryResult<Vec<Holiday>>;
}

#[async_trait]
pub trait HolidayWriter: Send + Sync {
    async fn create_holiday(&self, holiday: &NewHoliday) -> RepositoryResult<()>;
    async fn update_holiday(&self, id: HolidayId, holiday: &NewHoliday) -> RepositoryResult<()>;
    async fn delete_holiday(&self, id: HolidayId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait PartnerReader: Send + Sync {
    async fn list_partners(&self, active_only: bool) -> RepositoryResult<Vec<Partner>>;
}

#[async_trait]
pub trait PartnerWriter: Send + Sync {
    async fn create_partner(&self, partner: &NewPartner) -> RepositoryResult<()>;
    async fn update_partner(&self, id: PartnerId, partner: &NewPartner) -> RepositoryResult<()>;
    async fn delete_partner(&self, id: PartnerId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait SettingReader: Send + Sync {
    async fn list_settings(&self, scope: &SettingScope) -> RepositoryResult<Vec<Setting>>;
}

#[async_trait]
pub trait SettingWriter: Send + Sync {
    async fn create_setting(&self, setting: &NewSetting) -> RepositoryResult<()>;
    async fn update_setting(&self, id: SettingId, setting: &NewSetting) -> RepositoryResult<()>;
    async fn deactivate_setting(&self, id: SettingId) -> RepositoryResult<()>;
    async fn delete_setting(&self, id: SettingId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_whatsapp(&self, message: &WhatsAppMessage) -> RepositoryResult<()>;
}
