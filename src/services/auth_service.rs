use crate::error::{AppError, AppResult};
use crate::models::{AdminLoginRequest, AdminLoginResponse};
use crate::services::AppConfigService;

/// 管理员登录：与配置里的邮箱/密钥做明文等值比对。
/// 无哈希、无会话过期；后续管理请求逐次重新校验。
#[derive(Clone)]
pub struct AuthService {
    config: AppConfigService,
}

impl AuthService {
    pub fn new(config: AppConfigService) -> Self {
        Self { config }
    }

    pub fn login(&self, request: AdminLoginRequest) -> AppResult<AdminLoginResponse> {
        match self.config.verify_admin(&request.email, &request.key)? {
            Some(admin_name) => Ok(AdminLoginResponse {
                admin_name,
                email: request.email,
            }),
            None => Err(AppError::AuthError(
                "Invalid Terminal Credentials".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json_store::testing::temp_store;

    #[test]
    fn test_login_with_default_credentials() {
        let config = AppConfigService::new(temp_store());
        let service = AuthService::new(config.clone());
        let defaults = config.get().unwrap();

        let response = service
            .login(AdminLoginRequest {
                email: defaults.admin_email.clone(),
                key: defaults.admin_key.clone(),
            })
            .unwrap();
        assert_eq!(response.admin_name, "Master Admin");
        assert_eq!(response.email, defaults.admin_email);
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let service = AuthService::new(AppConfigService::new(temp_store()));
        let err = service
            .login(AdminLoginRequest {
                email: "Shazib@Aura.com".to_string(),
                key: "guess".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(_)));
    }
}
