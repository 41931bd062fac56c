use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{TicketStatus, Winner};
use crate::services::{AnnouncementService, TicketService};
use crate::storage::{ANNOUNCEMENT_KEY, JsonStore, NEWS_ARCHIVE_KEY, TICKETS_KEY, WINNERS_KEY};

#[derive(Clone)]
pub struct WinnerService {
    store: JsonStore,
    tickets: TicketService,
    announcements: AnnouncementService,
}

impl WinnerService {
    pub fn new(store: JsonStore, tickets: TicketService, announcements: AnnouncementService) -> Self {
        Self {
            store,
            tickets,
            announcements,
        }
    }

    /// 中奖记录，追加顺序即声明顺序
    pub fn list(&self) -> AppResult<Vec<Winner>> {
        Ok(self.store.read(WINNERS_KEY)?.unwrap_or_default())
    }

    /// 声明中奖。
    ///
    /// 三笔关联写入（标记工单、追加中奖记录、广播突发新闻）在同一把存储锁内
    /// 完成；写入前先做字节快照，后续任一步失败就恢复快照，不留半套状态。
    ///
    /// 重复声明是显式错误：同一张票不允许产生第二条中奖记录。
    pub fn declare(&self, ticket_id: &str) -> AppResult<Winner> {
        let _guard = self.store.lock();

        let ticket = self
            .tickets
            .find(ticket_id)?
            .ok_or_else(|| AppError::NotFound(format!("Ticket {ticket_id} not found")))?;

        if ticket.status != TicketStatus::Approved {
            return Err(AppError::ValidationError(
                "Only approved tickets can be declared winners.".to_string(),
            ));
        }

        let mut winners = self.list()?;
        if ticket.is_winner || winners.iter().any(|w| w.ticket_id == ticket.id) {
            return Err(AppError::ValidationError(
                "Winner Already Declared: This ticket has already won.".to_string(),
            ));
        }

        let tickets_snap = self.store.snapshot(TICKETS_KEY)?;
        let winners_snap = self.store.snapshot(WINNERS_KEY)?;
        let announcement_snap = self.store.snapshot(ANNOUNCEMENT_KEY)?;
        let archive_snap = self.store.snapshot(NEWS_ARCHIVE_KEY)?;

        self.tickets.mark_winner_locked(&ticket.id)?;

        let winner = Winner {
            id: Uuid::new_v4(),
            ticket_id: ticket.id.clone(),
            name: ticket.name.clone(),
            prize: ticket.prize,
            ticket_number: ticket.ticket_number.clone(),
            declared_at: Utc::now(),
            celebration_photo: None,
        };
        winners.push(winner.clone());
        if let Err(e) = self.store.write(WINNERS_KEY, &winners) {
            self.rollback(&[(TICKETS_KEY, &tickets_snap)]);
            return Err(e);
        }

        let headline = format!("NEW WINNER: {} secured a {}!", ticket.name, ticket.prize);
        if let Err(e) = self.announcements.broadcast_locked(&headline, true) {
            self.rollback(&[
                (TICKETS_KEY, &tickets_snap),
                (WINNERS_KEY, &winners_snap),
                (ANNOUNCEMENT_KEY, &announcement_snap),
                (NEWS_ARCHIVE_KEY, &archive_snap),
            ]);
            return Err(e);
        }

        Ok(winner)
    }

    fn rollback(&self, snapshots: &[(&str, &Option<Vec<u8>>)]) {
        for (key, snap) in snapshots {
            if let Err(e) = self.store.restore(key, snap.as_deref()) {
                log::error!("Failed to roll back {key} after winner declaration failure: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ticket_service::testing::{sample_ticket, ticket_service};
    use crate::storage::json_store::testing::temp_store;

    fn winner_service(store: &JsonStore) -> WinnerService {
        WinnerService::new(
            store.clone(),
            ticket_service(store),
            AnnouncementService::new(store.clone()),
        )
    }

    #[test]
    fn test_declare_spans_three_stores() {
        let store = temp_store();
        let tickets = ticket_service(&store);
        let service = winner_service(&store);

        tickets.append(sample_ticket("w1", "Ali Khan")).unwrap();
        tickets
            .set_status("w1", TicketStatus::Approved, "Master Admin")
            .unwrap();

        let winner = service.declare("w1").unwrap();
        assert_eq!(winner.ticket_id, "w1");
        assert_eq!(winner.name, "Ali Khan");
        assert_eq!(winner.ticket_number, "VIP-12345");

        // 工单被打上中奖标记
        let ticket = tickets.find("w1").unwrap().unwrap();
        assert!(ticket.is_winner);
        assert_eq!(ticket.status, TicketStatus::Approved);

        // 同步广播为突发新闻
        let announcements = AnnouncementService::new(store.clone());
        let current = announcements.current().unwrap();
        assert_eq!(current.text, "NEW WINNER: Ali Khan secured a Mobile!");
        assert!(current.is_breaking);
        assert_eq!(announcements.archive().unwrap().len(), 1);
    }

    #[test]
    fn test_declare_rejects_duplicate() {
        let store = temp_store();
        let tickets = ticket_service(&store);
        let service = winner_service(&store);

        tickets.append(sample_ticket("w1", "Ali Khan")).unwrap();
        tickets
            .set_status("w1", TicketStatus::Approved, "Master Admin")
            .unwrap();

        service.declare("w1").unwrap();
        let err = service.declare("w1").unwrap_err();
        assert!(err.to_string().contains("Already Declared"));

        // 不允许出现第二条中奖记录
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_declare_requires_approved_status() {
        let store = temp_store();
        let tickets = ticket_service(&store);
        let service = winner_service(&store);

        tickets.append(sample_ticket("p1", "Pending Guy")).unwrap();
        let err = service.declare("p1").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        tickets.append(sample_ticket("r1", "Rejected Guy")).unwrap();
        tickets
            .set_status("r1", TicketStatus::Rejected, "Master Admin")
            .unwrap();
        let err = service.declare("r1").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_declare_missing_ticket_is_not_found() {
        let store = temp_store();
        let service = winner_service(&store);
        let err = service.declare("ghost").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
