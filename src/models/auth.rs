use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AdminLoginRequest {
    #[schema(example = "Shazib@Aura.com")]
    pub email: String,
    #[schema(example = "secret-key")]
    pub key: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    /// 审核记录里使用的管理员标识（展示名，缺省回落到登录邮箱）
    pub admin_name: String,
    pub email: String,
}
