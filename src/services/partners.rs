//! Profit sharing partners.

use std::cmp::Ordering;

use crate::domain::partner::{NewPartner, Partner};
use crate::domain::types::PartnerId;
use crate::dto::list::ListView;
use crate::dto::partners::{PARTNER_DEFAULTS, PartnerFilter, PartnersPageData, PartnerRow};
use crate::forms::partners::PartnerForm;
use crate::listing::{SortDirection, url};
use crate::query::{MutationOptions, QueryClient, QueryKey, QueryOptions};
use crate::repository::{PartnerReader, PartnerWriter};
use crate::services::{ServiceResult, contains_ci, load_list, paginate_locally};

pub const PARTNERS_PATH: &str = "/partners";

pub fn sort_partners(partners: &mut [Partner], column: &str, dir: SortDirection) {
    partners.sort_by(|a, b| {
        let ordering = match column {
            "name" => a
                .partner_name
                .as_deref()
                .map(str::to_lowercase)
                .cmp(&b.partner_name.as_deref().map(str::to_lowercase)),
            "share" => a
                .profit_share_percentage
                .partial_cmp(&b.profit_share_percentage)
                .unwrap_or(Ordering::Equal),
            _ => a.id.cmp(&b.id),
        };
        match dir {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn partner_matches(partner: &Partner, term: &str) -> bool {
    contains_ci(partner.partner_name.as_deref(), term)
        || contains_ci(partner.contact_no.as_deref(), term)
        || partner.employee_id.is_some_and(|id| id.to_string() == term)
}

pub async fn load_partners_page<R>(repo: &R, client: QueryClient<'_>, query: &str) -> PartnersPageData
where
    R: PartnerReader + ?Sized,
{
    let (state, mut extras) = url::decode(query, PARTNER_DEFAULTS);
    let editing_id = extras.get("edit").and_then(|raw| raw.parse::<i64>().ok());
    extras.remove("edit");

    let all = client
        .query(&QueryKey::new("partners").with("all"), QueryOptions::default(), || {
            repo.list_partners(false)
        })
        .await
        .data_or_default();
    let editing = editing_id.and_then(|id| all.iter().find(|p| p.id == id).cloned());
    let active_share_total = all
        .iter()
        .filter(|partner| partner.is_active)
        .filter_map(|partner| partner.profit_share_percentage)
        .sum();

    let page = load_list(&state, |state| async move {
        let mut partners = match state.filter {
            PartnerFilter::All => all,
            PartnerFilter::Active => client
                .query(&QueryKey::new("partners").with("active"), QueryOptions::default(), || {
                    repo.list_partners(true)
                })
                .await
                .into_result()
                .ok()?,
        };
        sort_partners(&mut partners, &state.sort_by, state.sort_dir);
        Some(paginate_locally(partners, &state, partner_matches))
    })
    .await;

    PartnersPageData {
        list: ListView::build(PARTNERS_PATH, &state, &extras, page.map(PartnerRow::from)),
        active_share_total,
        editing,
    }
}

fn partner_keys<'a>() -> MutationOptions<'a, ()> {
    MutationOptions::new().invalidate(QueryKey::new("partners"))
}

pub async fn create_partner<R>(repo: &R, client: QueryClient<'_>, form: PartnerForm) -> ServiceResult<()>
where
    R: PartnerWriter + ?Sized,
{
    let payload = NewPartner::try_from(form)?;
    client
        .mutate(
            |partner: NewPartner| async move { repo.create_partner(&partner).await },
            payload,
            partner_keys().success("Partner created successfully"),
        )
        .await?;
    Ok(())
}

pub async fn update_partner<R>(
    repo: &R,
    client: QueryClient<'_>,
    partner_id: i64,
    form: PartnerForm,
) -> ServiceResult<()>
where
    R: PartnerWriter + ?Sized,
{
    let id = PartnerId::new(partner_id)?;
    let payload = NewPartner::try_from(form)?;
    client
        .mutate(
            |partner: NewPartner| async move { repo.update_partner(id, &partner).await },
            payload,
            partner_keys().success("Partner updated successfully"),
        )
        .await?;
    Ok(())
}

pub async fn delete_partner<R>(repo: &R, client: QueryClient<'_>, partner_id: i64) -> ServiceResult<()>
where
    R: PartnerWriter + ?Sized,
{
    let id = PartnerId::new(partner_id)?;
    client
        .mutate(
            |id: PartnerId| async move { repo.delete_partner(id).await },
            id,
            partner_keys().success("Partner deleted successfully"),
        )
        .await?;
    Ok(())
}
