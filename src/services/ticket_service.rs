use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::external::GeminiClient;
use crate::models::{
    HistoryQuery, ReferralStatusResponse, SubmitTicketRequest, SubmitTicketResponse, Ticket,
    TicketStatus,
};
use crate::services::AppConfigService;
use crate::storage::{JsonStore, TICKETS_KEY};
use crate::utils::{
    detect_device_type, generate_entry_id, generate_id_suffix, generate_ticket_number,
    validate_pk_mobile,
};

#[derive(Clone)]
pub struct TicketService {
    store: JsonStore,
    config: AppConfigService,
    gemini: GeminiClient,
}

impl TicketService {
    pub fn new(store: JsonStore, config: AppConfigService, gemini: GeminiClient) -> Self {
        Self {
            store,
            config,
            gemini,
        }
    }

    /// 全量列表，保持插入顺序
    pub fn list(&self) -> AppResult<Vec<Ticket>> {
        Ok(self.store.read(TICKETS_KEY)?.unwrap_or_default())
    }

    pub fn find(&self, id: &str) -> AppResult<Option<Ticket>> {
        Ok(self.list()?.into_iter().find(|t| t.id == id))
    }

    /// 提交流程：
    /// 1. 逐项校验（姓名/手机号/收据），任何副作用之前完成
    /// 2. 外部收据核验（仅记日志，不做门禁）
    /// 3. 构造并追加工单
    /// 4. 生成祝福语返回给用户
    pub async fn submit(
        &self,
        request: SubmitTicketRequest,
        user_agent: &str,
    ) -> AppResult<SubmitTicketResponse> {
        let name = request.name.trim().to_string();
        if name.chars().count() < 3 {
            return Err(AppError::ValidationError(
                "Invalid Name: Use at least 3 characters.".to_string(),
            ));
        }

        let mobile = request.mobile.trim().to_string();
        validate_pk_mobile(&mobile)?;
        // 奖品类别由封闭枚举在反序列化阶段兜住，这里无需再查

        // 缺省推荐码取手机号后四位
        let referral_code = request
            .referral_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| mobile[mobile.len() - 4..].to_string());

        // 免费票：已审核推荐数达到阈值才放行
        let is_referral_free = if request.claim_referral_free {
            let status = self.referral_status(&referral_code)?;
            if !status.unlocked {
                return Err(AppError::ValidationError(
                    "Referral Reward Locked: Not enough verified referrals yet.".to_string(),
                ));
            }
            true
        } else {
            false
        };

        let receipt = request
            .receipt_base64
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        let mime = request
            .receipt_mime
            .clone()
            .unwrap_or_else(|| "image/jpeg".to_string());

        let proof_url = match receipt {
            Some(data) => format!("data:{mime};base64,{data}"),
            // 免费票豁免收据，其余必填
            None if is_referral_free => String::new(),
            None => {
                return Err(AppError::ValidationError(
                    "Receipt Required: Please upload payment proof.".to_string(),
                ));
            }
        };

        // 核验结论仅作参考；调用自身永不报错（内部已兜底）
        if let Some(data) = receipt {
            let verdict = self.gemini.verify_receipt(data, &mime).await;
            log::info!("Receipt verification verdict for {mobile}: {verdict}");
        }

        let ticket = Ticket {
            id: generate_entry_id(),
            ticket_number: generate_ticket_number(),
            name: name.clone(),
            mobile,
            prize: request.prize,
            proof_url,
            status: TicketStatus::Pending,
            created_at: Utc::now(),
            processed_by: None,
            processed_at: None,
            is_referral_free,
            referral_code,
            referred_by: request
                .referred_by
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            is_winner: false,
            device_type: detect_device_type(user_agent),
        };

        let ticket = self.append(ticket)?;
        let mantra = self
            .gemini
            .lucky_mantra(&name, &ticket.prize.to_string())
            .await;

        Ok(SubmitTicketResponse { ticket, mantra })
    }

    /// 追加一张票并整表落盘。
    /// id 冲突时追加随机后缀——写入时的最后防线，不是强唯一性证明。
    pub fn append(&self, mut ticket: Ticket) -> AppResult<Ticket> {
        let _guard = self.store.lock();
        let mut tickets = self.list()?;
        if tickets.iter().any(|t| t.id == ticket.id) {
            ticket.id = format!("{}-{}", ticket.id, generate_id_suffix());
        }
        tickets.push(ticket.clone());
        self.store.write(TICKETS_KEY, &tickets)?;
        Ok(ticket)
    }

    /// 审批/驳回。id 不存在返回 NotFound，调用方能感知操作未生效。
    /// 状态迁移单向：pending -> approved|rejected，终态不再回退。
    pub fn set_status(&self, id: &str, status: TicketStatus, actor: &str) -> AppResult<Ticket> {
        if status == TicketStatus::Pending {
            return Err(AppError::ValidationError(
                "Tickets cannot be moved back to pending.".to_string(),
            ));
        }

        let _guard = self.store.lock();
        let mut tickets = self.list()?;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {id} not found")))?;

        ticket.status = status;
        ticket.processed_by = Some(actor.to_string());
        ticket.processed_at = Some(Utc::now());
        let updated = ticket.clone();

        self.store.write(TICKETS_KEY, &tickets)?;
        Ok(updated)
    }

    pub fn mark_winner(&self, id: &str) -> AppResult<Ticket> {
        let _guard = self.store.lock();
        self.mark_winner_locked(id)
    }

    /// 调用方已持有存储锁时的中奖标记入口
    pub(crate) fn mark_winner_locked(&self, id: &str) -> AppResult<Ticket> {
        let mut tickets = self.list()?;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Ticket {id} not found")))?;

        ticket.is_winner = true;
        let updated = ticket.clone();

        self.store.write(TICKETS_KEY, &tickets)?;
        Ok(updated)
    }

    /// 待审核队列，保持存储顺序
    pub fn pending(&self) -> AppResult<Vec<Ticket>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.status == TicketStatus::Pending)
            .collect())
    }

    /// 审核历史：非 pending 工单按处理时间倒序（未记录处理时间的按零值排最后），
    /// 三个过滤条件取 AND。
    pub fn history(&self, query: &HistoryQuery) -> AppResult<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .list()?
            .into_iter()
            .filter(|t| t.status != TicketStatus::Pending)
            .collect();

        tickets.sort_by_key(|t| {
            std::cmp::Reverse(t.processed_at.map(|at| at.timestamp_millis()).unwrap_or(0))
        });

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let search = search.to_lowercase();
            tickets.retain(|t| {
                t.name.to_lowercase().contains(&search)
                    || t.ticket_number.to_lowercase().contains(&search)
                    || t.processed_by
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&search)
                    || t.mobile.contains(&search)
            });
        }

        if let Some(status) = query.status {
            tickets.retain(|t| t.status == status);
        }

        if let Some(admin) = query.processed_by.as_deref().filter(|s| !s.is_empty()) {
            tickets.retain(|t| t.processed_by.as_deref() == Some(admin));
        }

        Ok(tickets)
    }

    /// 推荐进度：统计已审核通过、referred_by 等于该码的票数
    pub fn referral_status(&self, code: &str) -> AppResult<ReferralStatusResponse> {
        let config = self.config.get()?;
        let approved = self
            .list()?
            .iter()
            .filter(|t| {
                t.referred_by.as_deref() == Some(code) && t.status == TicketStatus::Approved
            })
            .count() as i64;

        Ok(ReferralStatusResponse {
            code: code.to_string(),
            approved_referrals: approved,
            requirement: config.referral_requirement,
            unlocked: approved >= config.referral_requirement,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::TicketService;
    use crate::config::GeminiConfig;
    use crate::external::GeminiClient;
    use crate::models::{DeviceType, PrizeType, Ticket, TicketStatus};
    use crate::services::AppConfigService;
    use crate::storage::JsonStore;
    use chrono::Utc;

    /// 测试用：指向不可达地址的 Gemini 客户端（触发兜底文案路径）
    pub fn offline_gemini() -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: String::new(),
            base_url: "http://127.0.0.1:1".to_string(),
            model: "gemini-3-flash-preview".to_string(),
        })
    }

    pub fn ticket_service(store: &JsonStore) -> TicketService {
        TicketService::new(
            store.clone(),
            AppConfigService::new(store.clone()),
            offline_gemini(),
        )
    }

    pub fn sample_ticket(id: &str, name: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            ticket_number: "VIP-12345".to_string(),
            name: name.to_string(),
            mobile: "03001234567".to_string(),
            prize: PrizeType::Mobile,
            proof_url: "data:image/jpeg;base64,aGk=".to_string(),
            status: TicketStatus::Pending,
            created_at: Utc::now(),
            processed_by: None,
            processed_at: None,
            is_referral_free: false,
            referral_code: "4567".to_string(),
            referred_by: None,
            is_winner: false,
            device_type: DeviceType::Desktop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{sample_ticket, ticket_service};
    use super::*;
    use crate::models::{HistoryQuery, PrizeType, SubmitTicketRequest};
    use crate::storage::json_store::testing::temp_store;

    fn submit_request(name: &str, mobile: &str) -> SubmitTicketRequest {
        SubmitTicketRequest {
            name: name.to_string(),
            mobile: mobile.to_string(),
            prize: PrizeType::Mobile,
            receipt_base64: Some("aGVsbG8=".to_string()),
            receipt_mime: Some("image/jpeg".to_string()),
            referral_code: None,
            referred_by: None,
            claim_referral_free: false,
        }
    }

    #[tokio::test]
    async fn test_submit_builds_pending_ticket() {
        let store = temp_store();
        let service = ticket_service(&store);

        let response = service
            .submit(submit_request("Ali Khan", "03001234567"), "Mozilla/5.0 (iPhone)")
            .await
            .unwrap();

        let ticket = &response.ticket;
        assert_eq!(ticket.status, TicketStatus::Pending);
        assert!(ticket.ticket_number.starts_with("VIP-"));
        assert_eq!(ticket.ticket_number.len(), "VIP-".len() + 5);
        // 未提供推荐码时取手机号后四位
        assert_eq!(ticket.referral_code, "4567");
        assert_eq!(ticket.name, "Ali Khan");
        assert!(!ticket.is_winner);
        // 离线 Gemini 必须落到兜底文案而不是报错
        assert!(!response.mantra.is_empty());
    }

    #[tokio::test]
    async fn test_submit_validation_rejections() {
        let store = temp_store();
        let service = ticket_service(&store);

        // 姓名太短
        let err = service
            .submit(submit_request("Al", "03001234567"), "ua")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid Name"));

        // 手机号格式不对
        let err = service
            .submit(submit_request("Ali Khan", "04001234567"), "ua")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid Mobile"));

        // 缺收据
        let mut request = submit_request("Ali Khan", "03001234567");
        request.receipt_base64 = None;
        let err = service.submit(request, "ua").await.unwrap_err();
        assert!(err.to_string().contains("Receipt Required"));

        // 校验失败不应留下任何半成品工单
        assert!(service.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_n_tickets_all_pending_unique_ids() {
        let store = temp_store();
        let service = ticket_service(&store);

        for i in 0..5 {
            service
                .submit(submit_request(&format!("Person {i}"), "03001234567"), "ua")
                .await
                .unwrap();
        }

        let tickets = service.list().unwrap();
        assert_eq!(tickets.len(), 5);
        let mut ids: Vec<&str> = tickets.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(tickets.iter().all(|t| t.status == TicketStatus::Pending));
    }

    #[test]
    fn test_append_disambiguates_colliding_id() {
        let store = temp_store();
        let service = ticket_service(&store);

        service.append(sample_ticket("dup-id", "First")).unwrap();
        let second = service.append(sample_ticket("dup-id", "Second")).unwrap();

        assert_ne!(second.id, "dup-id");
        assert!(second.id.starts_with("dup-id-"));
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_set_status_records_actor_and_time() {
        let store = temp_store();
        let service = ticket_service(&store);
        service.append(sample_ticket("t1", "Ali Khan")).unwrap();

        let updated = service
            .set_status("t1", TicketStatus::Approved, "Master Admin")
            .unwrap();
        assert_eq!(updated.status, TicketStatus::Approved);
        assert_eq!(updated.processed_by.as_deref(), Some("Master Admin"));
        assert!(updated.processed_at.is_some());
    }

    #[test]
    fn test_set_status_missing_id_is_explicit_not_found() {
        let store = temp_store();
        let service = ticket_service(&store);

        let err = service
            .set_status("no-such-id", TicketStatus::Approved, "Master Admin")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_history_filters_compose_with_and() {
        let store = temp_store();
        let service = ticket_service(&store);

        let mut a = sample_ticket("a", "Ali Khan");
        a.ticket_number = "VIP-11111".to_string();
        let mut b = sample_ticket("b", "Bilal Ahmed");
        b.ticket_number = "VIP-22222".to_string();
        let mut c = sample_ticket("c", "Alina Shah");
        c.ticket_number = "VIP-33333".to_string();
        for t in [a, b, c] {
            service.append(t).unwrap();
        }

        service
            .set_status("a", TicketStatus::Approved, "Master Admin")
            .unwrap();
        service
            .set_status("b", TicketStatus::Approved, "Master Admin")
            .unwrap();
        service
            .set_status("c", TicketStatus::Rejected, "Night Admin")
            .unwrap();

        // status=approved AND 子串 "ali"（大小写不敏感）
        let query = HistoryQuery {
            search: Some("ALI".to_string()),
            status: Some(TicketStatus::Approved),
            processed_by: None,
        };
        let hits = service.history(&query).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "a");

        // 只按审核人过滤
        let query = HistoryQuery {
            search: None,
            status: None,
            processed_by: Some("Night Admin".to_string()),
        };
        let hits = service.history(&query).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "c");

        // 待审核工单不进历史
        let query = HistoryQuery::default();
        assert_eq!(service.history(&query).unwrap().len(), 3);
        assert_eq!(service.pending().unwrap().len(), 0);
    }

    #[test]
    fn test_history_sorted_by_processed_at_desc() {
        let store = temp_store();
        let service = ticket_service(&store);
        let base = chrono::Utc::now();

        // 处理时间乱序写入；t4 没有处理时间，应按零值排最后
        for (id, minutes_ago) in [("t1", 30i64), ("t2", 10), ("t3", 20)] {
            let mut ticket = sample_ticket(id, "Ali Khan");
            ticket.status = TicketStatus::Approved;
            ticket.processed_by = Some("Master Admin".to_string());
            ticket.processed_at = Some(base - chrono::Duration::minutes(minutes_ago));
            service.append(ticket).unwrap();
        }
        let mut stray = sample_ticket("t4", "Ali Khan");
        stray.status = TicketStatus::Rejected;
        service.append(stray).unwrap();

        let history = service.history(&HistoryQuery::default()).unwrap();
        let ids: Vec<&str> = history.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t3", "t1", "t4"]);
    }

    #[test]
    fn test_referral_status_counts_only_approved() {
        let store = temp_store();
        let service = ticket_service(&store);

        for (id, status) in [
            ("r1", TicketStatus::Approved),
            ("r2", TicketStatus::Approved),
            ("r3", TicketStatus::Rejected),
            ("r4", TicketStatus::Pending),
        ] {
            let mut ticket = sample_ticket(id, "Referred User");
            ticket.referred_by = Some("4567".to_string());
            service.append(ticket).unwrap();
            if status != TicketStatus::Pending {
                service.set_status(id, status, "Master Admin").unwrap();
            }
        }

        let status = service.referral_status("4567").unwrap();
        assert_eq!(status.approved_referrals, 2);
        assert_eq!(status.requirement, 5);
        assert!(!status.unlocked);
    }
}
