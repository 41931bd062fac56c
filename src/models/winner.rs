use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::PrizeType;

/// 中奖晋升记录。对工单是弱引用（仅存 id），工单本身继续独立存在。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Winner {
    pub id: Uuid,
    pub ticket_id: String,
    /// 声明时刻的快照字段
    pub name: String,
    pub prize: PrizeType,
    pub ticket_number: String,
    pub declared_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration_photo: Option<String>,
}
