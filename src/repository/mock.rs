//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use crate::domain::attendance::{
    ActiveEmployee, ActivePeriod, InactiveMember, InactivePeriod, PunchRecord,
};
use crate::domain::birthday::BirthdayWindow;
use crate::domain::expense::{Expense, NewExpense};
use crate::domain::holiday::{Holiday, NewHoliday};
use crate::domain::member::{Member, MonthlyPunchSummary, NewMember};
use crate::domain::message::WhatsAppMessage;
use crate::domain::partner::{NewPartner, Partner};
use crate::domain::payment::{NewPayment, Payment, PendingPayment};
use crate::domain::report::{AttendanceSummary, Defaulter, LastPunch};
use crate::domain::setting::{NewSetting, Setting};
use crate::domain::types::{ExpenseId, HolidayId, MemberId, MonthYear, PartnerId, SettingId};
use crate::pagination::{PageRequest, PageResult};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AttendanceReader, AttendanceWriter, Download, ExpenseListQuery, ExpenseReader, ExpenseWriter,
    ExportFormat, HolidayReader, HolidayWriter, MemberListQuery, MemberReader, MemberWriter,
    MessageSender, PartnerReader, PartnerWriter, PaymentReader, PaymentWriter, PunchSearchQuery,
    ReportReader, SettingReader, SettingScope, SettingWriter, SortRequest, UploadFile,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl MemberReader for Repository {
        async fn list_members(&self, query: &MemberListQuery) -> RepositoryResult<PageResult<Member>>;
        async fn list_paid_members(&self) -> RepositoryResult<(u64, Vec<Member>)>;
        async fn list_unpaid_members(&self) -> RepositoryResult<(u64, Vec<Member>)>;
        async fn list_unattended_members(
            &self,
            page: PageRequest,
            sort: &SortRequest,
        ) -> RepositoryResult<PageResult<Member>>;
        async fn list_recently_active_members(
            &self,
            page: PageRequest,
        ) -> RepositoryResult<PageResult<Member>>;
        async fn get_member(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        async fn get_punch_summary(&self, id: MemberId) -> RepositoryResult<Vec<MonthlyPunchSummary>>;
    }

    #[async_trait]
    impl MemberWriter for Repository {
        async fn create_member(&self, member: &NewMember) -> RepositoryResult<()>;
        async fn update_member(&self, id: MemberId, member: &NewMember) -> RepositoryResult<()>;
        async fn upload_members(&self, file: UploadFile) -> RepositoryResult<()>;
        async fn upload_access_file(&self, file: UploadFile) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl PaymentReader for Repository {
        async fn list_pending_payments(
            &self,
            date: Option<NaiveDate>,
        ) -> RepositoryResult<Vec<PendingPayment>>;
        async fn list_member_payments(&self, id: MemberId) -> RepositoryResult<Vec<Payment>>;
        async fn list_defaulters(&self, page: PageRequest) -> RepositoryResult<PageResult<Defaulter>>;
    }

    #[async_trait]
    impl PaymentWriter for Repository {
        async fn record_payment(&self, payment: &NewPayment) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ExpenseReader for Repository {
        async fn list_expenses(&self, query: &ExpenseListQuery) -> RepositoryResult<PageResult<Expense>>;
        async fn get_expense(&self, id: ExpenseId) -> RepositoryResult<Option<Expense>>;
    }

    #[async_trait]
    impl ExpenseWriter for Repository {
        async fn create_expense(&self, expense: &NewExpense) -> RepositoryResult<()>;
        async fn update_expense(&self, id: ExpenseId, expense: &NewExpense) -> RepositoryResult<()>;
        async fn delete_expense(&self, id: ExpenseId) -> RepositoryResult<()>;
        async fn upload_expenses(&self, file: UploadFile) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl AttendanceReader for Repository {
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
    impl AttendanceWriter for Repository {
        async fn upload_punches(&self, file: UploadFile) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ReportReader for Repository {
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
    impl HolidayReader for Repository {
        async fn list_holidays(&self) -> RepositoryResult<Vec<Holiday>>;
    }

    #[async_trait]
    impl HolidayWriter for Repository {
        async fn create_holiday(&self, holiday: &NewHoliday) -> RepositoryResult<()>;
        async fn update_holiday(&self, id: HolidayId, holiday: &NewHoliday) -> RepositoryResult<()>;
        async fn delete_holiday(&self, id: HolidayId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl PartnerReader for Repository {
        async fn list_partners(&self, active_only: bool) -> RepositoryResult<Vec<Partner>>;
    }

    #[async_trait]
    impl PartnerWriter for Repository {
        async fn create_partner(&self, partner: &NewPartner) -> RepositoryResult<()>;
        async fn update_partner(&self, id: PartnerId, partner: &NewPartner) -> RepositoryResult<()>;
        async fn delete_partner(&self, id: PartnerId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl SettingReader for Repository {
        async fn list_settings(&self, scope: &SettingScope) -> RepositoryResult<Vec<Setting>>;
    }

    #[async_trait]
    impl SettingWriter for Repository {
        async fn create_setting(&self, setting: &NewSetting) -> RepositoryResult<()>;
        async fn update_setting(&self, id: SettingId, setting: &NewSetting) -> RepositoryResult<()>;
        async fn deactivate_setting(&self, id: SettingId) -> RepositoryResult<()>;
        async fn delete_setting(&self, id: SettingId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl MessageSender for Repository {
        async fn send_whatsapp(&self, message: &WhatsAppMessage) -> RepositoryResult<()>;
    }
}
