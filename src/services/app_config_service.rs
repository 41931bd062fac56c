use crate::error::AppResult;
use crate::models::{AppConfig, PublicConfigResponse};
use crate::storage::{CONFIG_KEY, JsonStore};

#[derive(Clone)]
pub struct AppConfigService {
    store: JsonStore,
}

impl AppConfigService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// 读取运营配置；从未保存过时返回硬编码默认值
    pub fn get(&self) -> AppResult<AppConfig> {
        Ok(self.store.read(CONFIG_KEY)?.unwrap_or_default())
    }

    /// 参与者可见的配置视图（不含管理员凭据）
    pub fn public(&self) -> AppResult<PublicConfigResponse> {
        Ok(self.get()?.into())
    }

    /// 整条覆盖保存，不做字段校验
    pub fn set(&self, config: AppConfig) -> AppResult<AppConfig> {
        let _guard = self.store.lock();
        self.store.write(CONFIG_KEY, &config)?;
        Ok(config)
    }

    /// 明文凭据比对。通过时返回审核记录用的管理员标识
    /// （展示名，缺省回落到登录邮箱）。
    pub fn verify_admin(&self, email: &str, key: &str) -> AppResult<Option<String>> {
        let config = self.get()?;
        if config.admin_email == email && config.admin_key == key {
            let identifier = if config.admin_name.trim().is_empty() {
                config.admin_email
            } else {
                config.admin_name
            };
            Ok(Some(identifier))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrizeType;
    use crate::storage::json_store::testing::temp_store;

    #[test]
    fn test_default_config_when_nothing_persisted() {
        let service = AppConfigService::new(temp_store());
        let config = service.get().unwrap();

        assert_eq!(config.ticket_price, 100);
        assert_eq!(config.referral_requirement, 5);
        // 每个奖品类别都必须有展示图
        for prize in PrizeType::ALL {
            assert!(!config.prize_images.get(prize).is_empty());
        }
    }

    #[test]
    fn test_set_overwrites_whole_record() {
        let service = AppConfigService::new(temp_store());
        let mut config = service.get().unwrap();
        config.ticket_price = 250;
        config.jazz_cash = "0311-1112223".to_string();
        service.set(config).unwrap();

        let reloaded = service.get().unwrap();
        assert_eq!(reloaded.ticket_price, 250);
        assert_eq!(reloaded.jazz_cash, "0311-1112223");
    }

    #[test]
    fn test_verify_admin_plaintext_compare() {
        let service = AppConfigService::new(temp_store());
        let config = service.get().unwrap();

        let identifier = service
            .verify_admin(&config.admin_email, &config.admin_key)
            .unwrap();
        assert_eq!(identifier.as_deref(), Some("Master Admin"));

        assert!(
            service
                .verify_admin(&config.admin_email, "wrong-key")
                .unwrap()
                .is_none()
        );
        assert!(
            service
                .verify_admin("nobody@example.com", &config.admin_key)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_public_view_hides_credentials() {
        let service = AppConfigService::new(temp_store());
        let public = service.public().unwrap();
        let json = serde_json::to_value(&public).unwrap();

        assert!(json.get("admin_key").is_none());
        assert!(json.get("admin_email").is_none());
        assert_eq!(json["ticket_price"], 100);
    }
}
