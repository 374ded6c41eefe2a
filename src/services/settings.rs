//! Dated settings such as the monthly and admission fees.

use crate::domain::setting::{KNOWN_SETTING_KEYS, NewSetting, Setting};
use crate::domain::types::{SettingId, SettingKey};
use crate::dto::list::ListView;
use crate::dto::settings::{KeyOption, SETTING_DEFAULTS, SettingFilter, SettingRow, SettingsPageData};
use crate::forms::settings::SettingForm;
use crate::listing::{ListFilter, SortDirection, url};
use crate::query::{MutationOptions, QueryClient, QueryKey, QueryOptions};
use crate::repository::{SettingReader, SettingScope, SettingWriter};
use crate::services::{ServiceResult, contains_ci, load_list, paginate_locally};

pub const SETTINGS_PATH: &str = "/settings";

fn scope_of(filter: SettingFilter, key: &SettingKey) -> SettingScope {
    match filter {
        SettingFilter::Current => SettingScope::Current,
        SettingFilter::Future => SettingScope::Future,
        SettingFilter::All => SettingScope::All,
        SettingFilter::History => SettingScope::Key(key.clone()),
    }
}

fn setting_matches(setting: &Setting, term: &str) -> bool {
    contains_ci(setting.setting_key.as_deref(), term)
        || contains_ci(setting.setting_value.as_deref(), term)
        || contains_ci(setting.description.as_deref(), term)
}

pub async fn load_settings_page<R>(repo: &R, client: QueryClient<'_>, query: &str) -> SettingsPageData
where
    R: SettingReader + ?Sized,
{
    let (state, mut extras) = url::decode(query, SETTING_DEFAULTS);
    let default_key = KNOWN_SETTING_KEYS[0];
    let history_key = extras
        .get("key")
        .and_then(|raw| SettingKey::new(raw.trim().to_uppercase()).ok())
        .or_else(|| SettingKey::new(default_key).ok());
    let editing_id = extras.get("edit").and_then(|raw| raw.parse::<i64>().ok());
    extras.remove("edit");
    match &history_key {
        Some(key) => extras.set_unless_default("key", key.as_str(), default_key),
        None => extras.remove("key"),
    }

    let history = history_key.clone();
    let page = load_list(&state, |state| async move {
        let key = history?;
        let scope = scope_of(state.filter, &key);
        let cache_key = match &scope {
            SettingScope::Key(key) => QueryKey::new("settings").with("key").with(key.as_str()),
            _ => QueryKey::new("settings").with(state.filter.as_str()),
        };
        let mut settings = client
            .query(&cache_key, QueryOptions::default(), || repo.list_settings(&scope))
            .await
            .into_result()
            .ok()?;
        settings.sort_by_key(|setting| setting.effective_from);
        if state.sort_dir == SortDirection::Desc {
            settings.reverse();
        }
        Some(paginate_locally(settings, &state, setting_matches))
    })
    .await;

    let editing = editing_id.and_then(|id| page.items.iter().find(|s| s.id == id).cloned());
    let history_key = history_key.map(|key| key.as_str().to_string()).unwrap_or_default();

    SettingsPageData {
        list: ListView::build(SETTINGS_PATH, &state, &extras, page.map(SettingRow::from)),
        keys: KeyOption::all(&history_key),
        history_key,
        editing,
    }
}

fn setting_keys<'a>() -> MutationOptions<'a, ()> {
    MutationOptions::new()
        .invalidate(QueryKey::new("settings"))
        .invalidate(QueryKey::new("members"))
        .invalidate(QueryKey::new("payments"))
}

pub async fn create_setting<R>(repo: &R, client: QueryClient<'_>, form: SettingForm) -> ServiceResult<()>
where
    R: SettingWriter + ?Sized,
{
    let payload = NewSetting::try_from(form)?;
    client
        .mutate(
            |setting: NewSetting| async move { repo.create_setting(&setting).await },
            payload,
            setting_keys().success("Setting created successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn update_setting<R>(
    repo: &R,
    client: QueryClient<'_>,
    setting_id: i64,
    form: SettingForm,
) -> ServiceResult<()>
where
    R: SettingWriter + ?Sized,
{
    let id = SettingId::new(setting_id)?;
    let payload = NewSetting::try_from(form)?;
    client
        .mutate(
            |setting: NewSetting| async move { repo.update_setting(id, &setting).await },
            payload,
            setting_keys().success("Setting updated successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn deactivate_setting<R>(repo: &R, client: QueryClient<'_>, setting_id: i64) -> ServiceResult<()>
where
    R: SettingWriter + ?Sized,
{
    let id = SettingId::new(setting_id)?;
    client
        .mutate(
            |id: SettingId| async move { repo.deactivate_setting(id).await },
            id,
            setting_keys().success("Setting deactivated successfully!"),
        )
        .await?;
    Ok(())
}

pub async fn delete_setting<R>(repo: &R, client: QueryClient<'_>, setting_id: i64) -> ServiceResult<()>
where
    R: SettingWriter + ?Sized,
{
    let id = SettingId::new(setting_id)?;
    client
        .mutate(
            |id: SettingId| async move { repo.delete_setting(id).await },
            id,
            setting_keys().success("Setting deleted successfully!"),
        )
        .await?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::query::{QueryCache, Toast, ToastBuffer};
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    fn setting(id: i64, from: (i32, u32, u32)) -> Setting {
        Setting {
            id,
            setting_key: Some("ADMISSION_FEE".into()),
            setting_value: Some("1000".into()),
            effective_from: NaiveDate::from_ymd_opt(from.0, from.1, from.2),
            status: Some("CURRENT".into()),
            ..Default::default()
        }
    }

    /// History tab asks for the chosen key and lists the newest first.
    #[tokio::test]
    async fn history_tab_lists_one_key_newest_first() {
        let mut repo = MockRepository::new();
        repo.expect_list_settings()
            .withf(|scope| matches!(scope, SettingScope::Key(key) if key.as_str() == "ADMISSION_FEE"))
            .times(1)
            .returning(|_| Ok(vec![setting(1, (2024, 1, 1)), setting(2, (2025, 4, 1))]));
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let data = load_settings_page(&repo, client, "filter=history&key=admission_fee&edit=1").await;

        assert_eq!(data.history_key, "ADMISSION_FEE");
        assert_eq!(data.list.items[0].setting.id, 2);
        assert_eq!(data.list.items[0].key_label, "Admission Fee");
        assert_eq!(data.list.items[0].status_class, "current");
        assert_eq!(data.editing.map(|s| s.id), Some(1));
        assert!(data.keys.iter().any(|k| k.selected && k.key == "ADMISSION_FEE"));
        assert_eq!(data.list.self_href, "/settings?filter=history&key=ADMISSION_FEE");
    }

    #[tokio::test]
    async fn current_tab_is_cached_under_its_filter() {
        let mut repo = MockRepository::new();
        repo.expect_list_settings()
            .withf(|scope| matches!(scope, SettingScope::Current))
            .times(1)
            .returning(|_| Ok(vec![setting(1, (2025, 1, 1))]));
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let first = load_settings_page(&repo, client, "").await;
        let second = load_settings_page(&repo, client, "").await;

        assert_eq!(first.list.total_elements, 1);
        assert_eq!(second.list.total_elements, 1);
        assert_eq!(cache.invalidate(&QueryKey::new("settings").with("current")), 1);
    }

    /// Invalid dates never reach the API.
    #[tokio::test]
    async fn invalid_form_skips_the_api() {
        let mut repo = MockRepository::new();
        repo.expect_create_setting().times(0);
        let cache = QueryCache::default();
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        let form = SettingForm {
            setting_key: "MONTHLY_FEE".into(),
            setting_value: "1500".into(),
            effective_from: "not a date".into(),
            effective_to: String::new(),
            is_active: true,
            description: String::new(),
        };
        let result = create_setting(&repo, client, form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(toasts.take().is_empty());
    }

    #[tokio::test]
    async fn deactivation_clears_fee_dependent_caches() {
        let mut repo = MockRepository::new();
        repo.expect_deactivate_setting()
            .withf(|id| id.get() == 7)
            .times(1)
            .returning(|_| Ok(()));
        let cache = QueryCache::default();
        cache.insert(QueryKey::new("settings").with("current"), 1u8);
        cache.insert(QueryKey::new("payments").with("pending"), 2u8);
        let toasts = ToastBuffer::new();
        let client = QueryClient::new(&cache, &toasts);

        deactivate_setting(&repo, client, 7).await.unwrap();

        assert!(cache.is_empty());
        assert_eq!(toasts.take(), vec![Toast::success("Setting deactivated successfully!")]);
    }
}
