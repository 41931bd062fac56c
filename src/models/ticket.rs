use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 奖品类别（封闭枚举，计数与图片映射对其全覆盖）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PrizeType {
    Mobile,
    Bike,
    Fan,
}

impl PrizeType {
    pub const ALL: [PrizeType; 3] = [PrizeType::Mobile, PrizeType::Bike, PrizeType::Fan];

    /// 前端展示名（Mobile 在运营文案里叫 "Fun Mobile"）
    pub fn display_label(&self) -> &'static str {
        match self {
            PrizeType::Mobile => "Fun Mobile",
            PrizeType::Bike => "Motorbike",
            PrizeType::Fan => "Exhaust Fan",
        }
    }
}

impl std::fmt::Display for PrizeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrizeType::Mobile => write!(f, "Mobile"),
            PrizeType::Bike => write!(f, "Bike"),
            PrizeType::Fan => write!(f, "Fan"),
        }
    }
}

/// 工单生命周期状态：pending 为唯一非终态，approved/rejected 不可回退
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Pending => write!(f, "pending"),
            TicketStatus::Approved => write!(f, "approved"),
            TicketStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// 提交来源设备类型（由 User-Agent 推断）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Mobile => write!(f, "mobile"),
            DeviceType::Desktop => write!(f, "desktop"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    /// 存储内唯一 id（写入时冲突会追加随机后缀）
    pub id: String,
    /// 面向用户的票号，格式 VIP-xxxxx
    pub ticket_number: String,
    pub name: String,
    pub mobile: String,
    pub prize: PrizeType,
    /// 收据图片，内联 base64 data URL
    pub proof_url: String,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_referral_free: bool,
    /// 本票持有人对外分享的推荐码
    pub referral_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(default)]
    pub is_winner: bool,
    pub device_type: DeviceType,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SubmitTicketRequest {
    #[schema(example = "Ali Khan")]
    pub name: String,
    #[schema(example = "03001234567")]
    pub mobile: String,
    pub prize: PrizeType,
    /// 收据图片 base64（不含 data URL 前缀）
    pub receipt_base64: Option<String>,
    #[schema(example = "image/jpeg")]
    pub receipt_mime: Option<String>,
    /// 提交人自己的推荐码；缺省时取手机号后四位
    pub referral_code: Option<String>,
    /// 推荐人的推荐码
    pub referred_by: Option<String>,
    /// 达到推荐阈值后免费领票（免收据）
    #[serde(default)]
    pub claim_referral_free: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitTicketResponse {
    pub ticket: Ticket,
    /// 外部生成的祝福语（失败时为固定兜底文案）
    pub mantra: String,
}

/// 审核历史查询参数，三个过滤条件取 AND
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct HistoryQuery {
    /// 大小写不敏感的子串匹配（姓名/票号/审核人/手机号）
    pub search: Option<String>,
    pub status: Option<TicketStatus>,
    pub processed_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReferralStatusResponse {
    pub code: String,
    /// 已通过审核的被推荐票数
    pub approved_referrals: i64,
    pub requirement: i64,
    pub unlocked: bool,
}
