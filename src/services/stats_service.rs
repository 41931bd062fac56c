use chrono::Utc;
use std::sync::{Arc, RwLock};

use crate::error::AppResult;
use crate::models::{Announcement, DeviceType, PrizeStats, StatsSnapshot};
use crate::services::{AnnouncementService, TicketService, WinnerService};

/// 轮询刷新器：定时把各存储重算成一份派生视图快照，前台只读缓存。
#[derive(Clone)]
pub struct StatsService {
    tickets: TicketService,
    winners: WinnerService,
    announcements: AnnouncementService,
    snapshot: Arc<RwLock<StatsSnapshot>>,
}

impl StatsService {
    pub fn new(
        tickets: TicketService,
        winners: WinnerService,
        announcements: AnnouncementService,
    ) -> Self {
        // 首次 refresh 之前的占位快照
        let initial = StatsSnapshot {
            stats: PrizeStats::default(),
            winners_total: 0,
            announcement: Announcement {
                text: "Syncing...".to_string(),
                timestamp: Utc::now(),
                is_breaking: false,
            },
            ticker: Vec::new(),
            healthy: true,
            refreshed_at: Utc::now(),
        };
        Self {
            tickets,
            winners,
            announcements,
            snapshot: Arc::new(RwLock::new(initial)),
        }
    }

    /// 当前缓存的快照
    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// 重算派生统计。存储读取失败只翻转 healthy 标志，不向上抛；
    /// 下一次成功刷新会自动恢复。
    pub fn refresh(&self) {
        match self.compute() {
            Ok(snapshot) => {
                *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = snapshot;
            }
            Err(e) => {
                log::error!("Stats refresh failed: {e}");
                let mut snapshot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
                snapshot.healthy = false;
                snapshot.refreshed_at = Utc::now();
            }
        }
    }

    fn compute(&self) -> AppResult<StatsSnapshot> {
        let tickets = self.tickets.list()?;
        let winners = self.winners.list()?;
        let announcement = self.announcements.current()?;

        let mut stats = PrizeStats {
            total: tickets.len() as i64,
            ..PrizeStats::default()
        };
        for ticket in &tickets {
            stats.bump(ticket.prize);
            match ticket.device_type {
                DeviceType::Mobile => stats.mobile_device_count += 1,
                DeviceType::Desktop => stats.desktop_device_count += 1,
            }
        }

        let mut ticker = vec![
            format!("[BREAKING] {}", announcement.text),
            format!("TOTAL PARTICIPANTS: {}", stats.total),
            format!("WINNERS THIS SESSION: {}", winners.len()),
            format!(
                "MOST POPULAR: {}",
                if stats.mobile > stats.bike {
                    "Fun Mobile"
                } else {
                    "Motorbike"
                }
            ),
        ];
        // 最近五条报名，保持提交顺序
        for ticket in tickets.iter().skip(tickets.len().saturating_sub(5)) {
            let first_name = ticket.name.split(' ').next().unwrap_or(&ticket.name);
            ticker.push(format!(
                "RECENT: {first_name} joined via {}",
                ticket.device_type
            ));
        }

        Ok(StatsSnapshot {
            stats,
            winners_total: winners.len() as i64,
            announcement,
            ticker,
            healthy: true,
            refreshed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PrizeType, TicketStatus};
    use crate::services::ticket_service::testing::{sample_ticket, ticket_service};
    use crate::storage::JsonStore;
    use crate::storage::json_store::testing::temp_store;

    fn stats_service(store: &JsonStore) -> StatsService {
        let tickets = ticket_service(store);
        let announcements = AnnouncementService::new(store.clone());
        let winners = WinnerService::new(store.clone(), tickets.clone(), announcements.clone());
        StatsService::new(tickets, winners, announcements)
    }

    #[test]
    fn test_snapshot_before_first_refresh() {
        let store = temp_store();
        let service = stats_service(&store);
        let snapshot = service.snapshot();
        assert_eq!(snapshot.stats.total, 0);
        assert!(snapshot.healthy);
        assert_eq!(snapshot.announcement.text, "Syncing...");
    }

    #[test]
    fn test_refresh_counts_prizes_and_devices() {
        let store = temp_store();
        let tickets = ticket_service(&store);
        let service = stats_service(&store);

        let mut a = sample_ticket("a", "Ali Khan");
        a.prize = PrizeType::Mobile;
        a.device_type = crate::models::DeviceType::Mobile;
        let mut b = sample_ticket("b", "Bilal Ahmed");
        b.prize = PrizeType::Bike;
        b.device_type = crate::models::DeviceType::Desktop;
        let mut c = sample_ticket("c", "Alina Shah");
        c.prize = PrizeType::Mobile;
        c.device_type = crate::models::DeviceType::Mobile;
        for t in [a, b, c] {
            tickets.append(t).unwrap();
        }

        service.refresh();
        let snapshot = service.snapshot();

        assert_eq!(snapshot.stats.total, 3);
        assert_eq!(snapshot.stats.count_for(PrizeType::Mobile), 2);
        assert_eq!(snapshot.stats.count_for(PrizeType::Bike), 1);
        assert_eq!(snapshot.stats.count_for(PrizeType::Fan), 0);
        assert_eq!(snapshot.stats.mobile_device_count, 2);
        assert_eq!(snapshot.stats.desktop_device_count, 1);
        assert!(snapshot.healthy);

        // 跑马灯：4 条固定文案 + 3 条最近报名
        assert_eq!(snapshot.ticker.len(), 7);
        assert!(snapshot.ticker[1].contains("TOTAL PARTICIPANTS: 3"));
        assert!(snapshot.ticker[4].contains("RECENT: Ali joined via mobile"));
    }

    #[test]
    fn test_refresh_includes_winner_count() {
        let store = temp_store();
        let tickets = ticket_service(&store);
        let announcements = AnnouncementService::new(store.clone());
        let winners = WinnerService::new(store.clone(), tickets.clone(), announcements.clone());
        let service = StatsService::new(tickets.clone(), winners.clone(), announcements);

        tickets.append(sample_ticket("w1", "Ali Khan")).unwrap();
        tickets
            .set_status("w1", TicketStatus::Approved, "Master Admin")
            .unwrap();
        winners.declare("w1").unwrap();

        service.refresh();
        let snapshot = service.snapshot();
        assert_eq!(snapshot.winners_total, 1);
        // 中奖广播成为当前横幅
        assert!(snapshot.announcement.text.starts_with("NEW WINNER:"));
        assert!(snapshot.ticker[0].starts_with("[BREAKING] NEW WINNER:"));
    }
}
