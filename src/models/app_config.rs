use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::PrizeType;

/// 每个奖品类别对应的展示图链接。
/// 用结构体而不是 map，保证对 [`PrizeType`] 编译期全覆盖。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrizeImages {
    pub mobile: String,
    pub bike: String,
    pub fan: String,
}

impl PrizeImages {
    pub fn get(&self, prize: PrizeType) -> &str {
        match prize {
            PrizeType::Mobile => &self.mobile,
            PrizeType::Bike => &self.bike,
            PrizeType::Fan => &self.fan,
        }
    }
}

impl Default for PrizeImages {
    fn default() -> Self {
        Self {
            mobile: "https://images.unsplash.com/photo-1598327105666-5b89351aff97?q=80&w=800&auto=format&fit=crop".to_string(),
            bike: "https://images.unsplash.com/photo-1558981403-c5f9899a28bc?q=80&w=800&auto=format&fit=crop".to_string(),
            fan: "https://images.unsplash.com/photo-1591154665855-51fa6d6bb10c?q=80&w=800&auto=format&fit=crop".to_string(),
        }
    }
}

/// 运营可编辑的全局设置。单条记录，保存时整条覆盖，不做字段校验。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppConfig {
    pub jazz_cash: String,
    pub jazz_cash_name: String,
    pub easy_paisa: String,
    pub easy_paisa_name: String,
    pub bank_account: String,
    pub bank_account_name: String,
    pub ticket_price: i64,
    pub admin_email: String,
    pub admin_name: String,
    /// 明文管理密钥（对外接口不返回此字段）
    pub admin_key: String,
    /// 解锁免费票所需的已审核推荐数
    pub referral_requirement: i64,
    pub management_link: String,
    pub prize_images: PrizeImages,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jazz_cash: "0300-0000000".to_string(),
            jazz_cash_name: "Aura Treasury".to_string(),
            easy_paisa: "0345-0000000".to_string(),
            easy_paisa_name: "Aura Treasury".to_string(),
            bank_account: "1234567890123456".to_string(),
            bank_account_name: "Aura Platinum Executive".to_string(),
            ticket_price: 100,
            admin_email: "Shazib@Aura.com".to_string(),
            admin_name: "Master Admin".to_string(),
            admin_key: "Shazibpassword7756".to_string(),
            referral_requirement: 5,
            management_link: "https://wa.me/923000000000".to_string(),
            prize_images: PrizeImages::default(),
        }
    }
}

/// 面向参与者的配置视图，剥离管理员凭据
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicConfigResponse {
    pub jazz_cash: String,
    pub jazz_cash_name: String,
    pub easy_paisa: String,
    pub easy_paisa_name: String,
    pub bank_account: String,
    pub bank_account_name: String,
    pub ticket_price: i64,
    pub referral_requirement: i64,
    pub management_link: String,
    pub prize_images: PrizeImages,
}

impl From<AppConfig> for PublicConfigResponse {
    fn from(c: AppConfig) -> Self {
        PublicConfigResponse {
            jazz_cash: c.jazz_cash,
            jazz_cash_name: c.jazz_cash_name,
            easy_paisa: c.easy_paisa,
            easy_paisa_name: c.easy_paisa_name,
            bank_account: c.bank_account,
            bank_account_name: c.bank_account_name,
            ticket_price: c.ticket_price,
            referral_requirement: c.referral_requirement,
            management_link: c.management_link,
            prize_images: c.prize_images,
        }
    }
}
