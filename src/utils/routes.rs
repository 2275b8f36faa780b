//! Route-based enable/disable rules for Google Analytics and AdSense.
//! The SSR frontend asks the backend which scripts to inject for a path;
//! monetization must never load on auth, account or back-office pages.

/// Pages where analytics/ads are explicitly excluded (prefix match).
const EXCLUDED_PAGES: &[&str] = &[
    "/app/admin",
    "/app/profile",
    "/app/dashboard",
    "/app/settings",
    "/app/login",
    "/app/signup",
];

/// Pages where ads may display. `/blog` is a prefix (covers every post);
/// the rest match exactly, with or without a trailing slash.
const AD_ENABLED_PAGES: &[&str] = &["/", "/blog", "/app", "/app/messages"];

pub fn is_analytics_enabled_page(pathname: &str) -> bool {
    !EXCLUDED_PAGES.iter().any(|path| pathname.starts_with(path))
}

pub fn is_ad_enabled_page(pathname: &str) -> bool {
    // Exclusions win over the allow list
    if EXCLUDED_PAGES.iter().any(|path| pathname.starts_with(path)) {
        return false;
    }

    AD_ENABLED_PAGES.iter().any(|path| {
        if *path == "/blog" {
            return pathname.starts_with("/blog");
        }
        pathname == *path || pathname == format!("{}/", path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytics_enabled_on_public_pages() {
        assert!(is_analytics_enabled_page("/"));
        assert!(is_analytics_enabled_page("/blog"));
        assert!(is_analytics_enabled_page("/blog/"));
        assert!(is_analytics_enabled_page("/blog/my-post"));
        assert!(is_analytics_enabled_page("/app"));
        assert!(is_analytics_enabled_page("/app/"));
        assert!(is_analytics_enabled_page("/app/messages"));
        assert!(is_analytics_enabled_page("/app/messages/"));
    }

    #[test]
    fn analytics_disabled_on_private_pages() {
        assert!(!is_analytics_enabled_page("/app/admin"));
        assert!(!is_analytics_enabled_page("/app/admin/users"));
        assert!(!is_analytics_enabled_page("/app/profile"));
        assert!(!is_analytics_enabled_page("/app/profile/edit"));
        assert!(!is_analytics_enabled_page("/app/dashboard"));
        assert!(!is_analytics_enabled_page("/app/login"));
        assert!(!is_analytics_enabled_page("/app/signup/"));
    }

    #[test]
    fn ads_enabled_on_allow_listed_pages_only() {
        assert!(is_ad_enabled_page("/"));
        assert!(is_ad_enabled_page("/blog"));
        assert!(is_ad_enabled_page("/blog/"));
        assert!(is_ad_enabled_page("/app"));
        assert!(is_ad_enabled_page("/app/"));
        assert!(is_ad_enabled_page("/app/messages"));
        assert!(is_ad_enabled_page("/app/messages/"));

        assert!(!is_ad_enabled_page("/contact"));
        assert!(!is_ad_enabled_page("/help"));
        assert!(!is_ad_enabled_page("/privacy"));
        assert!(!is_ad_enabled_page("/terms/"));
    }

    #[test]
    fn ads_cover_every_blog_post_format() {
        assert!(is_ad_enabled_page("/blog/post-1"));
        assert!(is_ad_enabled_page("/blog/post-with-dashes"));
        assert!(is_ad_enabled_page("/blog/2024/01/post"));
        assert!(is_ad_enabled_page("/blog/nested/post/"));
    }

    #[test]
    fn ads_excluded_pages_beat_the_allow_list() {
        assert!(!is_ad_enabled_page("/app/admin"));
        assert!(!is_ad_enabled_page("/app/admin/users"));
        assert!(!is_ad_enabled_page("/app/profile/123"));
        assert!(!is_ad_enabled_page("/app/dashboard/"));
        assert!(!is_ad_enabled_page("/app/login"));
        assert!(!is_ad_enabled_page("/app/signup"));
        assert!(!is_ad_enabled_page("/app/settings"));
    }
}
