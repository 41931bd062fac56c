use chrono::Utc;

use crate::error::AppResult;
use crate::models::Announcement;
use crate::storage::{ANNOUNCEMENT_KEY, JsonStore, NEWS_ARCHIVE_KEY};

/// 从未广播过时展示的默认横幅
pub const DEFAULT_ANNOUNCEMENT: &str = "Network Sync Established. VIP Draw Node Active.";

/// 新闻档案上限，超出即丢弃最旧的
pub const ARCHIVE_LIMIT: usize = 50;

#[derive(Clone)]
pub struct AnnouncementService {
    store: JsonStore,
}

impl AnnouncementService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// 当前横幅；没有历史记录时返回固定默认文案
    pub fn current(&self) -> AppResult<Announcement> {
        Ok(self.store.read(ANNOUNCEMENT_KEY)?.unwrap_or_else(|| {
            Announcement {
                text: DEFAULT_ANNOUNCEMENT.to_string(),
                timestamp: Utc::now(),
                is_breaking: false,
            }
        }))
    }

    /// 档案，最新在前，最多 50 条
    pub fn archive(&self) -> AppResult<Vec<Announcement>> {
        Ok(self.store.read(NEWS_ARCHIVE_KEY)?.unwrap_or_default())
    }

    pub fn broadcast(&self, text: &str, is_breaking: bool) -> AppResult<Announcement> {
        let _guard = self.store.lock();
        self.broadcast_locked(text, is_breaking)
    }

    /// 调用方已持有存储锁时的广播入口（中奖声明的补偿序列会用到）
    pub(crate) fn broadcast_locked(&self, text: &str, is_breaking: bool) -> AppResult<Announcement> {
        let announcement = Announcement {
            text: text.to_string(),
            timestamp: Utc::now(),
            is_breaking,
        };
        self.store.write(ANNOUNCEMENT_KEY, &announcement)?;

        let mut archive: Vec<Announcement> = self.store.read(NEWS_ARCHIVE_KEY)?.unwrap_or_default();
        archive.insert(0, announcement.clone());
        archive.truncate(ARCHIVE_LIMIT);
        self.store.write(NEWS_ARCHIVE_KEY, &archive)?;

        Ok(announcement)
    }
}
