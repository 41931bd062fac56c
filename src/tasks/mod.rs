//! Background scheduled tasks for the application.
//!
//! The only recurring job is the stats refresher: it re-reads every store on a
//! fixed interval and rebuilds the derived snapshot served to clients. Call
//! `spawn_all` once during startup to launch it.

use crate::services::StatsService;

/// 快照重算间隔（秒）
pub const STATS_REFRESH_INTERVAL_SECS: u64 = 3;

/// Spawn all background tasks.
///
/// Notes
/// - The refresher never fails hard: a store read error only flips the
///   snapshot's health flag (see `StatsService::refresh`).
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(stats_service: StatsService) {
    // 每 3 秒重算一次派生统计快照
    {
        let svc = stats_service.clone();
        tokio::spawn(async move {
            loop {
                svc.refresh();
                tokio::time::sleep(std::time::Duration::from_secs(
                    STATS_REFRESH_INTERVAL_SECS,
                ))
                .await;
            }
        });
    }
}
