use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Announcement, PrizeType};

/// 各奖品报名计数与设备分布
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema)]
pub struct PrizeStats {
    pub mobile: i64,
    pub bike: i64,
    pub fan: i64,
    pub total: i64,
    pub mobile_device_count: i64,
    pub desktop_device_count: i64,
}

impl PrizeStats {
    pub fn count_for(&self, prize: PrizeType) -> i64 {
        match prize {
            PrizeType::Mobile => self.mobile,
            PrizeType::Bike => self.bike,
            PrizeType::Fan => self.fan,
        }
    }

    pub fn bump(&mut self, prize: PrizeType) {
        match prize {
            PrizeType::Mobile => self.mobile += 1,
            PrizeType::Bike => self.bike += 1,
            PrizeType::Fan => self.fan += 1,
        }
    }
}

/// 轮询刷新任务产出的派生视图快照
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsSnapshot {
    pub stats: PrizeStats,
    pub winners_total: i64,
    pub announcement: Announcement,
    /// 跑马灯文案
    pub ticker: Vec<String>,
    /// 任一存储读取失败时置为 false，下次成功刷新恢复
    pub healthy: bool,
    pub refreshed_at: DateTime<Utc>,
}
