use crate::error::AppResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

// 各业务数据的存储键（键名即版本，无迁移逻辑）
pub const TICKETS_KEY: &str = "tickets_v2";
pub const WINNERS_KEY: &str = "winners_v1";
pub const ANNOUNCEMENT_KEY: &str = "announcement_v1";
pub const NEWS_ARCHIVE_KEY: &str = "news_archive_v1";
pub const CONFIG_KEY: &str = "config_v1";

/// 整记录 JSON 文件存储。
///
/// 每个键对应数据目录下的一个 `<key>.json` 文件，读写均为整条记录。
/// 进程启动时创建一次，克隆进各个 service（与数据库连接池的用法一致）。
#[derive(Clone)]
pub struct JsonStore {
    dir: PathBuf,
    // 进程内互斥，序列化 read-modify-write；跨进程仍是 last-writer-wins
    write_lock: Arc<Mutex<()>>,
}

impl JsonStore {
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// 获取变更锁。修改任何记录前先持有，避免本进程内交错写入。
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 读取一条记录；文件不存在返回 None
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 整条覆盖写入（临时文件 + rename）
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let bytes = serde_json::to_vec(value)?;
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, &bytes)?;
        std::fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    /// 读取原始字节快照，配合 [`restore`](Self::restore) 做补偿回滚
    pub fn snapshot(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 将记录恢复到快照状态；快照为 None 时删除文件
    pub fn restore(&self, key: &str, snapshot: Option<&[u8]>) -> AppResult<()> {
        match snapshot {
            Some(bytes) => {
                std::fs::write(self.path_for(key), bytes)?;
            }
            None => match std::fs::remove_file(self.path_for(key)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}
