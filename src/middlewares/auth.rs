use actix_web::http::Method;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

use crate::error::AppError;
use crate::services::AppConfigService;

/// 鉴权通过后注入请求扩展的管理员标识（审核记录用）
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub String);

// 受保护路径配置：仅管理接口需要凭据，其余全部公开
struct ProtectedPaths {
    prefix_paths: Vec<&'static str>,
}

impl ProtectedPaths {
    fn new() -> Self {
        Self {
            prefix_paths: vec!["/api/v1/admin/", "/api/v1/admin"],
        }
    }

    fn is_protected(&self, path: &str) -> bool {
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

/// 管理接口鉴权中间件。
/// 每个请求都重新对配置里的邮箱/密钥做明文等值比对——无会话、无过期。
pub struct AdminAuthMiddleware {
    config: AppConfigService,
}

impl AdminAuthMiddleware {
    pub fn new(config: AppConfigService) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddlewareService {
            service,
            config: self.config.clone(),
            protected_paths: ProtectedPaths::new(),
        }))
    }
}

pub struct AdminAuthMiddlewareService<S> {
    service: S,
    config: AppConfigService,
    protected_paths: ProtectedPaths,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        if !self.protected_paths.is_protected(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let email = req
            .headers()
            .get("X-Admin-Email")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let key = req
            .headers()
            .get("X-Admin-Key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let (email, key) = match (email, key) {
            (Some(email), Some(key)) => (email, key),
            _ => {
                let error = AppError::AuthError("Missing admin credentials".to_string());
                return Box::pin(async move { Err(error.into()) });
            }
        };

        match self.config.verify_admin(&email, &key) {
            Ok(Some(identity)) => {
                // 将管理员标识添加到请求扩展中
                req.extensions_mut().insert(AdminIdentity(identity));
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Ok(None) => {
                let error = AppError::AuthError("Invalid Terminal Credentials".to_string());
                Box::pin(async move { Err(error.into()) })
            }
            Err(e) => Box::pin(async move { Err(e.into()) }),
        }
    }
}
