//! Admin user directory: a single paginated listing merged from the
//! `users` and `profiles` collections.
//!
//! One collection is the pagination driver per request. Profiles drive
//! whenever a status or verified filter is present (those fields only exist
//! on profiles); otherwise accounts drive. The other collection is joined
//! in per row, with defaults filled for missing counterparts.

use crate::{
    database::MongoDB,
    models::{AdminFilters, DatingProfile, DirectoryPage, UserAccount, UserListItem},
    services::profile_service,
    utils::{cursor::PageCursor, error::AppError},
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};

const USERS: &str = "users";
const PROFILES: &str = "profiles";

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Primary record pulled from whichever collection drives pagination.
struct PrimaryRecord {
    uid: String,
    created_at: i64,
    account: Option<UserAccount>,
    profile: Option<DatingProfile>,
}

/// Profiles drive pagination iff a status or verified filter is present;
/// those fields can only be pushed down to the profiles collection.
pub fn profiles_are_primary(filters: &AdminFilters) -> bool {
    filters.status_filter().is_some() || filters.verified_filter().is_some()
}

/// One directory page. Fetches `page_size + 1` primary records to detect a
/// following page, joins the counterpart collection concurrently, then
/// applies the role and search filters to the merged rows.
///
/// `has_more` reflects the raw primary fetch, not the filtered rows: a page
/// can return fewer rows than `page_size` (even zero) with `has_more` still
/// true when post-merge filters excluded rows.
pub async fn list_users(
    db: &MongoDB,
    filters: &AdminFilters,
    page_size: usize,
    cursor_token: Option<&str>,
) -> Result<DirectoryPage, AppError> {
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

    let boundary = match cursor_token {
        Some(token) => Some(PageCursor::decode(token)?),
        None => None,
    };

    let raw = if profiles_are_primary(filters) {
        fetch_primary_profiles(db, filters, page_size, boundary.as_ref()).await?
    } else {
        fetch_primary_accounts(db, filters, page_size, boundary.as_ref()).await?
    };

    let (page, has_more) = split_page(raw, page_size);

    let next_cursor = if has_more {
        page.last().map(|record| {
            PageCursor {
                created_at: record.created_at,
                uid: record.uid.clone(),
            }
            .encode()
        })
    } else {
        None
    };

    let enriched = enrich_records(db, page).await;

    let merged: Vec<UserListItem> = enriched
        .iter()
        .map(|record| merge_list_item(&record.uid, record.account.as_ref(), record.profile.as_ref()))
        .collect();

    let items = apply_post_filters(merged, filters);

    Ok(DirectoryPage {
        items,
        next_cursor,
        has_more,
    })
}

fn resume_filter(mut filter: Document, boundary: Option<&PageCursor>) -> Document {
    if let Some(cursor) = boundary {
        filter.insert("created_at", doc! { "$lt": cursor.created_at });
    }
    filter
}

async fn fetch_primary_accounts(
    db: &MongoDB,
    filters: &AdminFilters,
    page_size: usize,
    boundary: Option<&PageCursor>,
) -> Result<Vec<PrimaryRecord>, AppError> {
    let mut filter = Document::new();
    if let Some(role) = filters.role_filter() {
        filter.insert("role", role);
    }
    let filter = resume_filter(filter, boundary);

    let mut cursor = db
        .collection::<UserAccount>(USERS)
        .find(filter)
        .sort(doc! { "created_at": -1 })
        .limit((page_size + 1) as i64)
        .await
        .map_err(|e| AppError::QueryFailure(format!("users query failed: {}", e)))?;

    let mut records = Vec::new();
    while let Some(result) = cursor.next().await {
        let account = result
            .map_err(|e| AppError::QueryFailure(format!("users cursor error: {}", e)))?;
        records.push(PrimaryRecord {
            uid: account.uid.clone(),
            created_at: account.created_at,
            account: Some(account),
            profile: None,
        });
    }
    Ok(records)
}

async fn fetch_primary_profiles(
    db: &MongoDB,
    filters: &AdminFilters,
    page_size: usize,
    boundary: Option<&PageCursor>,
) -> Result<Vec<PrimaryRecord>, AppError> {
    let mut filter = Document::new();
    if let Some(is_active) = filters.status_filter() {
        filter.insert("is_active", is_active);
    }
    if let Some(verified) = filters.verified_filter() {
        filter.insert("verified", verified);
    }
    let filter = resume_filter(filter, boundary);

    let mut cursor = db
        .collection::<DatingProfile>(PROFILES)
        .find(filter)
        .sort(doc! { "created_at": -1 })
        .limit((page_size + 1) as i64)
        .await
        .map_err(|e| AppError::QueryFailure(format!("profiles query failed: {}", e)))?;

    let mut records = Vec::new();
    while let Some(result) = cursor.next().await {
        let profile = result
            .map_err(|e| AppError::QueryFailure(format!("profiles cursor error: {}", e)))?;
        records.push(PrimaryRecord {
            uid: profile.uid.clone(),
            created_at: profile.created_at,
            account: None,
            profile: Some(profile),
        });
    }
    Ok(records)
}

/// Truncates the N+1 fetch to a page. Returns (page, has_more).
fn split_page<T>(mut raw: Vec<T>, page_size: usize) -> (Vec<T>, bool) {
    let has_more = raw.len() > page_size;
    raw.truncate(page_size);
    (raw, has_more)
}

/// Fills in the missing side of each record with one concurrent point
/// lookup per row. A failed lookup is logged and treated as a missing
/// counterpart; the merge substitutes defaults.
async fn enrich_records(db: &MongoDB, records: Vec<PrimaryRecord>) -> Vec<PrimaryRecord> {
    let lookups = records.iter().map(|record| {
        let uid = record.uid.clone();
        let needs_profile = record.profile.is_none();
        async move {
            let result = if needs_profile {
                profile_service::get_profile(db, &uid)
                    .await
                    .map(|p| (None, p))
            } else {
                db.collection::<UserAccount>(USERS)
                    .find_one(doc! { "uid": &uid })
                    .await
                    .map(|a| (a, None))
                    .map_err(|e| e.to_string())
            };
            match result {
                Ok(pair) => pair,
                Err(e) => {
                    let miss = AppError::EnrichmentMiss(format!("{}: {}", uid, e));
                    log::warn!("⚠️  {}", miss);
                    (None, None)
                }
            }
        }
    });
    let counterparts = futures::future::join_all(lookups).await;

    records
        .into_iter()
        .zip(counterparts)
        .map(|(mut record, (account, profile))| {
            if record.account.is_none() {
                record.account = account;
            }
            if record.profile.is_none() {
                record.profile = profile;
            }
            record
        })
        .collect()
}

/// Pure merge of an account/profile pair into one directory row. Missing
/// counterparts fall back to defaults: role "user", inactive, unverified,
/// zero completion.
pub fn merge_list_item(
    uid: &str,
    account: Option<&UserAccount>,
    profile: Option<&DatingProfile>,
) -> UserListItem {
    UserListItem {
        uid: uid.to_string(),
        email: account.map(|a| a.email.clone()).unwrap_or_default(),
        display_name: account
            .map(|a| a.display_name.clone())
            .or_else(|| profile.map(|p| p.display_name.clone()))
            .unwrap_or_default(),
        photo_url: account
            .and_then(|a| a.photo_url.clone())
            .or_else(|| profile.and_then(|p| p.photos.first().cloned())),
        role: account
            .map(|a| a.role.clone())
            .unwrap_or_else(|| "user".to_string()),
        is_active: profile.map(|p| p.is_active).unwrap_or(false),
        verified: profile.map(|p| p.verified).unwrap_or(false),
        created_at: account
            .map(|a| a.created_at)
            .or_else(|| profile.map(|p| p.created_at))
            .unwrap_or(0),
        profile_completion: profile
            .map(profile_service::calculate_profile_completion)
            .unwrap_or(0),
    }
}

/// Role and search filtering on the merged rows. Search is case-insensitive
/// over display name and email, applied after the page was cut.
pub fn apply_post_filters(items: Vec<UserListItem>, filters: &AdminFilters) -> Vec<UserListItem> {
    let role = filters.role_filter().map(str::to_string);
    let search = filters.search_filter().map(|s| s.to_lowercase());

    items
        .into_iter()
        .filter(|item| match &role {
            Some(role) => item.role == *role,
            None => true,
        })
        .filter(|item| match &search {
            Some(needle) => {
                item.display_name.to_lowercase().contains(needle)
                    || item.email.to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(uid: &str, role: &str, created_at: i64) -> UserAccount {
        UserAccount {
            _id: None,
            uid: uid.into(),
            email: format!("{}@example.com", uid),
            display_name: format!("User {}", uid),
            photo_url: None,
            password_hash: None,
            google_id: None,
            provider: Some("local".into()),
            role: role.into(),
            created_at,
            updated_at: created_at,
            last_login: None,
        }
    }

    fn profile(uid: &str, is_active: bool, verified: bool) -> DatingProfile {
        DatingProfile {
            _id: None,
            uid: uid.into(),
            display_name: format!("Profile {}", uid),
            age: Some(30),
            gender: None,
            city: None,
            country: None,
            location: None,
            bio: None,
            interests: vec![],
            education: None,
            occupation: None,
            looking_for: None,
            marital_status: None,
            religion: None,
            languages: vec![],
            photos: vec!["p.jpg".into()],
            verified,
            is_active,
            created_at: 100,
            updated_at: 100,
        }
    }

    #[test]
    fn profiles_drive_only_with_status_or_verified_filters() {
        let mut filters = AdminFilters::default();
        assert!(!profiles_are_primary(&filters));

        filters.role = Some("admin".into());
        filters.search = Some("x".into());
        assert!(!profiles_are_primary(&filters));

        filters.status = Some("active".into());
        assert!(profiles_are_primary(&filters));

        let verified_only = AdminFilters {
            verified: Some("unverified".into()),
            ..AdminFilters::default()
        };
        assert!(profiles_are_primary(&verified_only));

        // "all" is the same as absent
        let all = AdminFilters {
            status: Some("all".into()),
            verified: Some("all".into()),
            ..AdminFilters::default()
        };
        assert!(!profiles_are_primary(&all));
    }

    #[test]
    fn merge_prefers_account_identity_and_profile_state() {
        let acct = account("u1", "admin", 500);
        let prof = profile("u1", true, true);
        let item = merge_list_item("u1", Some(&acct), Some(&prof));

        assert_eq!(item.display_name, "User u1");
        assert_eq!(item.email, "u1@example.com");
        assert_eq!(item.role, "admin");
        assert!(item.is_active);
        assert!(item.verified);
        assert_eq!(item.created_at, 500);
        assert!(item.profile_completion > 0);
    }

    #[test]
    fn merge_without_profile_uses_defaults() {
        let acct = account("u2", "user", 500);
        let item = merge_list_item("u2", Some(&acct), None);

        assert!(!item.is_active);
        assert!(!item.verified);
        assert_eq!(item.profile_completion, 0);
    }

    #[test]
    fn merge_without_account_uses_defaults() {
        let prof = profile("u3", true, false);
        let item = merge_list_item("u3", None, Some(&prof));

        assert_eq!(item.role, "user");
        assert_eq!(item.email, "");
        assert_eq!(item.display_name, "Profile u3");
        assert_eq!(item.photo_url.as_deref(), Some("p.jpg"));
        assert_eq!(item.created_at, 100);
    }

    #[test]
    fn split_page_detects_following_page() {
        let raw: Vec<i32> = (0..21).collect();
        let (page, has_more) = split_page(raw, 20);
        assert_eq!(page.len(), 20);
        assert!(has_more);

        let raw: Vec<i32> = (0..20).collect();
        let (page, has_more) = split_page(raw, 20);
        assert_eq!(page.len(), 20);
        assert!(!has_more);

        let (page, has_more) = split_page(Vec::<i32>::new(), 20);
        assert!(page.is_empty());
        assert!(!has_more);
    }

    #[test]
    fn role_filter_after_merge_can_empty_a_page_with_more_remaining() {
        // Status filter makes profiles primary, so the role filter can only
        // run after the merge. A page of 2 plain users with an admin filter
        // yields zero rows while has_more stays true.
        let raw = vec![
            merge_list_item("u1", Some(&account("u1", "user", 2)), Some(&profile("u1", true, false))),
            merge_list_item("u2", Some(&account("u2", "user", 1)), Some(&profile("u2", true, false))),
        ];
        let filters = AdminFilters {
            role: Some("admin".into()),
            status: Some("active".into()),
            ..AdminFilters::default()
        };

        let (page, has_more) = split_page(raw, 1);
        assert!(has_more);
        let items = apply_post_filters(page, &filters);
        assert!(items.is_empty());
    }

    #[test]
    fn search_matches_name_or_email_case_insensitively() {
        let items = vec![
            merge_list_item("u1", Some(&account("u1", "user", 2)), None),
            merge_list_item("u2", Some(&account("u2", "user", 1)), None),
        ];
        let filters = AdminFilters {
            search: Some("U2@EXAMPLE".into()),
            ..AdminFilters::default()
        };
        let found = apply_post_filters(items, &filters);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].uid, "u2");
    }

    #[test]
    fn search_only_sees_the_current_page() {
        // 25 accounts, page of 20: the searched account sits past the cut,
        // so the page comes back empty but has_more signals to continue.
        let raw: Vec<UserListItem> = (0..25)
            .map(|i| {
                let uid = format!("u{:02}", i);
                merge_list_item(&uid, Some(&account(&uid, "user", 25 - i as i64)), None)
            })
            .collect();

        let (page, has_more) = split_page(raw, 20);
        assert_eq!(page.len(), 20);
        assert!(has_more);

        let filters = AdminFilters {
            search: Some("u24".into()),
            ..AdminFilters::default()
        };
        let items = apply_post_filters(page, &filters);
        assert!(items.is_empty());
        assert!(has_more);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn paging_walks_the_directory_newest_first() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/BabHijra".to_string());
        let db = MongoDB::new(&uri).await.unwrap();

        let filters = AdminFilters::default();
        let first = list_users(&db, &filters, 5, None).await.unwrap();
        assert!(first.items.len() <= 5);

        if let Some(token) = &first.next_cursor {
            let second = list_users(&db, &filters, 5, Some(token)).await.unwrap();
            if let (Some(a), Some(b)) = (first.items.last(), second.items.first()) {
                assert!(b.created_at <= a.created_at);
            }
        }
    }
}
