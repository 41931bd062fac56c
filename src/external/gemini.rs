use reqwest::Client;
use serde_json::json;

use crate::config::GeminiConfig;
use crate::error::{AppError, AppResult};

/// 生成接口失败时的兜底文案（与前端约定，不可随意改动）
pub const MANTRA_FALLBACK: &str = "The stars align for your inevitable victory.";
pub const MANTRA_EMPTY: &str = "Fortune has recognized your name today.";
pub const VERIFY_FALLBACK: &str = "Offline verification active.";
pub const VERIFY_EMPTY: &str = "Awaiting verification.";

/// Gemini generateContent 客户端。
/// 两个方法都只做锦上添花：任何失败都被吞掉并替换为兜底字符串，绝不向调用方抛错。
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// 为新票生成一句祝福语
    pub async fn lucky_mantra(&self, name: &str, prize: &str) -> String {
        let prompt = format!(
            "User {name} has entered for a {prize} draw. Generate a world-class, \
             1-sentence lucky blessing. Focus on victory, VIP status, and luxury. \
             Keep it concise."
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.9, "maxOutputTokens": 80 }
        });

        match self.generate(&body).await {
            Ok(Some(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => MANTRA_EMPTY.to_string(),
            Err(e) => {
                log::warn!("Lucky mantra generation failed: {e}");
                MANTRA_FALLBACK.to_string()
            }
        }
    }

    /// 收据截图"验证"。结论仅作参考，提交流程不以其结果做门禁。
    pub async fn verify_receipt(&self, base64_image: &str, mime_type: &str) -> String {
        let body = json!({
            "contents": [{ "parts": [
                { "inline_data": { "mime_type": mime_type, "data": base64_image } },
                { "text": "Analyze this transaction receipt. Verify: 1. It is a \
                   bank/UPI/JazzCash payment for approx 100 PKR. 2. It looks \
                   legitimate and recent. Return only 'VALID' if good, or \
                   'SUSPICIOUS: [reason]' if not. If the user name is visible, \
                   mention it at the end like 'VALID: [name]'." }
            ] }]
        });

        match self.generate(&body).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => VERIFY_EMPTY.to_string(),
            Err(e) => {
                log::warn!("Receipt verification call failed: {e}");
                VERIFY_FALLBACK.to_string()
            }
        }
    }

    async fn generate(&self, body: &serde_json::Value) -> AppResult<Option<String>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Gemini returned status {}",
                response.status()
            )));
        }

        let result: serde_json::Value = response.json().await?;
        Ok(result["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string()))
    }
}
