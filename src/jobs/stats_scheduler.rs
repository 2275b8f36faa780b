// Background job that keeps the cached admin_stats/platform document fresh
// so the dashboard never pays for a full recount on page load.

use crate::{database::MongoDB, services::admin_service};
use tokio::time::{interval, Duration};

/// Starts the hourly stats refresh. Runs once at startup so a freshly
/// deployed instance has stats before the first tick.
pub async fn start_stats_scheduler(db: MongoDB) {
    log::info!("📅 Starting platform stats scheduler (runs every hour)");

    tokio::spawn(async move {
        log::info!("🚀 Running initial stats calculation on startup...");
        match admin_service::refresh_admin_stats(&db).await {
            Ok(stats) => {
                log::info!(
                    "✅ Startup stats calculated: {} users, {} profiles",
                    stats.total_users,
                    stats.total_profiles
                );
            }
            Err(e) => {
                log::error!("❌ Startup stats calculation failed: {}", e);
            }
        }

        let mut interval = interval(Duration::from_secs(3600));
        // First tick fires immediately and would double the startup run
        interval.tick().await;

        loop {
            interval.tick().await;

            match admin_service::refresh_admin_stats(&db).await {
                Ok(_) => log::debug!("✅ Hourly stats refresh completed"),
                Err(e) => log::error!("❌ Hourly stats refresh failed: {}", e),
            }
        }
    });

    log::info!("✅ Platform stats scheduler started successfully");
}
