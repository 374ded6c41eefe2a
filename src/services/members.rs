//! Members list, member detail, punch history and member mutations.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::member::{Member, NewMember};
use crate::domain::types::MemberId;
use crate::dto::list::ListView;
use crate::dto::members::{
    MEMBER_DEFAULTS, MemberDetailData, MemberFilter, MemberMode, MemberRow, MembersPageData,
    PunchSummaryData,
};
use crate::forms::members::MemberForm;
use crate::forms::upload::UploadSpreadsheetForm;
use crate::listing::url::{self, href};
use crate::listing::{ExtraParams, ListFilter, PageState, SortDirection};
use crate::pagination::PageResult;
use crate::query::{MutationOptions, QueryClient, QueryKey, QueryOptions};
use crate::repository::{MemberListQuery, MemberReader, MemberWriter, PaymentReader, SortRequest, UploadFile};
use crate::services::{ServiceError, ServiceResult, list_key, load_list, paginate_locally};

pub const MEMBERS_PATH: &str = "/members";
pub const LIVE_PATH: &str = "/members/live";

/// Keys dropped after any member mutation.
fn member_keys() -> [QueryKey; 2] {
    [QueryKey::new("members"), QueryKey::new("dashboard")]
}

fn compare(a: &Member, b: &Member, column: &str) -> Ordering {
    match column {
        "name" => a
            .name
            .as_deref()
            .map(str::to_lowercase)
            .cmp(&b.name.as_deref().map(str::to_lowercase)),
        "doj" => a.doj.cmp(&b.doj),
        _ => a.id.cmp(&b.id),
    }
}

/// Sorts a list the API returned whole, ties broken by id.
pub fn sort_members(members: &mut [Member], column: &str, direction: SortDirection) {
    members.sort_by(|a, b| {
        let ordering = compare(a, b, column).then_with(|| a.id.cmp(&b.id));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Runs the one query behind the active tab.
///
/// `None` means the query failed; its toast has been raised already.
pub async fn fetch_members<R>(
    repo: &R,
    client: QueryClient<'_>,
    state: PageState<MemberFilter>,
) -> Option<PageResult<Member>>
where
    R: MemberReader + ?Sized,
{
    let sort = SortRequest::new(state.sort_by.clone(), state.sort_dir);
    let page = state.page_request();
    match state.filter {
        MemberFilter::All | MemberFilter::Admins => {
            let mut query = MemberListQuery::new(page).sort(sort);
            if state.filter == MemberFilter::Admins {
                query = query.admins();
            }
            if let Some(term) = state.search() {
                query = query.search(term);
            }
            client
                .query(&list_key("members", &state), QueryOptions::default(), || {
                    repo.list_members(&query)
                })
                .await
                .into_result()
                .ok()
        }
        MemberFilter::Paid | MemberFilter::Unpaid => {
            let paid = state.filter == MemberFilter::Paid;
            let key = QueryKey::new("members").with(state.filter.as_str());
            let (_, mut members) = client
                .query(&key, QueryOptions::default(), move || async move {
                    if paid {
                        repo.list_paid_members().await
                    } else {
                        repo.list_unpaid_members().await
                    }
                })
                .await
                .into_result()
                .ok()?;
            sort_members(&mut members, &state.sort_by, state.sort_dir);
            Some(paginate_locally(members, &state, |member: &Member, term: &str| {
                member.matches(term)
            }))
        }
        MemberFilter::Unattended => client
            .query(&list_key("members", &state), QueryOptions::default(), || {
                repo.list_unattended_members(page, &sort)
            })
            .await
            .into_result()
            .ok(),
        MemberFilter::Active => client
            .query(&list_key("members", &state), QueryOptions::default(), || {
                repo.list_recently_active_members(page)
            })
            .await
            .into_result()
            .ok(),
    }
}

/// Loads the members screen for the list state encoded in `query`.
pub async fn load_members_page<R>(
    repo: &R,
    client: QueryClient<'_>,
    query: &str,
    today: NaiveDate,
) -> MembersPageData
where
    R: MemberReader + ?Sized,
{
    let (state, extras) = url::decode(query, MEMBER_DEFAULTS);
    let page = load_list(&state, |state| fetch_members(repo, client, state)).await;
    members_view(&state, &extras, page, today)
}

/// Builds the template data around one page of members.
pub fn members_view(
    state: &PageState<MemberFilter>,
    extras: &ExtraParams,
    page: PageResult<Member>,
    today: NaiveDate,
) -> MembersPageData {
    let mode = MemberMode::parse(extras.get("tab"));
    let rows = page.map(|member| MemberRow::new(member, today));
    MembersPageData {
        list: ListView::build(MEMBERS_PATH, state, extras, rows),
        mode,
        searchable: state.filter.supports_search(),
        live_href: href(LIVE_PATH, state, extras),
    }
}

pub async fn load_member_detail<R>(
    repo: &R,
    client: QueryClient<'_>,
    member_id: i64,
    today: NaiveDate,
) -> ServiceResult<MemberDetailData>
where
    R: MemberReader + PaymentReader + ?Sized,
{
    let id = MemberId::new(member_id)?;
    let member = client
        .query(
            &QueryKey::new("members").with("detail").with(id),
            QueryOptions::default(),
            || repo.get_member(id),
        )
        .await
        .into_result()?
        .ok_or(ServiceError::NotFound)?;

    let payments = client
        .query(
            &QueryKey::new("payments").with("member").with(id),
            QueryOptions::default(),
            || repo.list_member_payments(id),
        )
        .await
        .data_or_default();

    Ok(MemberDetailData::new(member, payments, today))
}

pub async fn load_punch_summary<R>(
    repo: &R,
    client: QueryClient<'_>,
    member_id: i64,
) -> ServiceResult<PunchSummaryData>
where
    R: MemberReader + ?Sized,
{
    let id = MemberId::new(member_id)?;
    let months = client
        .query(
            &QueryKey::new("members").with("punches").with(id),
            QueryOptions::default(),
            || repo.get_punch_summary(id),
        )
        .await
        .into_result()?;
    Ok(PunchSummaryData::new(id.get(), months))
}

pub async fn create_member<R>(repo: &R, client: QueryClient<'_>, form: MemberForm) -> ServiceResult<()>
where
    R: MemberWriter + ?Sized,
{
    let payload = NewMember::try_from(form)?;
    let [members, dashboard] = member_keys();
    client
        .mutate(
            |member: NewMember| async move { repo.create_member(&member).await },
            payload,
            MutationOptions::new()
                .success("Member created successfully!")
                .invalidate(members)
                .invalidate(dashboard),
        )
        .await?;
    Ok(())
}

pub async fn update_member<R>(
    repo: &R,
    client: QueryClient<'_>,
    member_id: i64,
    form: MemberForm,
) -> ServiceResult<()>
where
    R: MemberWriter + ?Sized,
{
    let id = MemberId::new(member_id)?;
    let payload = NewMember::try_from(form)?;
    if payload.id != id {
        return Err(ServiceError::Form("Member ID cannot be changed".to_string()));
    }
    let [members, dashboard] = member_keys();
    client
        .mutate(
            |member: NewMember| async move { repo.update_member(id, &member).await },
            payload,
            MutationOptions::new()
                .success("Member updated successfully!")
                .invalidate(members)
                .invalidate(dashboard),
        )
        .await?;
    Ok(())
}

/// Forwards the member spreadsheet. A rejected file toasts the API's message as is.
pub async fn upload_members<R>(
    repo: &R,
    client: QueryClient<'_>,
    form: UploadSpreadsheetForm,
) -> ServiceResult<()>
where
    R: MemberWriter + ?Sized,
{
    let file = UploadFile::try_from(form)?;
    upload_members_file(repo, client, file).await
}

pub async fn upload_members_file<R>(repo: &R, client: QueryClient<'_>, file: UploadFile) -> ServiceResult<()>
where
    R: MemberWriter + ?Sized,
{
    let [members, dashboard] = member_keys();
    client
        .mutate(
            |file: UploadFile| async move { repo.upload_members(file).await },
            file,
            MutationOptions::new()
                .success("Members uploaded successfully!")
                .invalidate(members)
                .invalidate(dashboard),
        )
        .await?;
    Ok(())
}

/// Forwards the access-dates spreadsheet.
pub async fn upload_access_file<R>(
    repo: &R,
    client: QueryClient<'_>,
    form: UploadSpreadsheetForm,
) -> ServiceResult<()>
where
    R: MemberWriter + ?Sized,
{
    let file = UploadFile::try_from(form)?;
    let [members, dashboard] = member_keys();
    client
        .mutate(
            |file: UploadFile| async move { repo.upload_access_file(file).await },
            file,
            MutationOptions::new()
                .success("Access dates updated successfully!")
                .invalidate(members)
                .invalidate(dashboard),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, name: &str) -> Member {
        Member {
            id,
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn local_sort_is_case_insensitive_with_id_ties() {
        let mut members = vec![member(3, "bala"), member(1, "Asha"), member(2, "asha")];
        sort_members(&mut members, "name", SortDirection::Asc);
        let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        sort_members(&mut members, "id", SortDirection::Desc);
        let ids: Vec<i64> = members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
