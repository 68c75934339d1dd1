//! Gemini APIのGenerationApi実装

use crate::config::ApiConfig;
use crate::domain::ModelName;
use crate::error::Error;
use crate::llm::invoker::{DiscoveredModel, GenerationApi, InvokeOutcome};
use serde_json::{json, Value};

/// Gemini APIクライアント
pub struct GeminiApi {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiApi {
    /// 新しいクライアントを作成
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// リクエストペイロードを生成する。
    /// JSON形式の出力を要求する固定形（responseMimeType）。
    fn make_request_payload(prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json"
            }
        })
    }

    /// レスポンスJSONからテキストを抽出する。
    /// candidates[0].content.parts[*].text をすべて連結する。
    fn extract_text(response_json: &str) -> Option<String> {
        let v: Value = serde_json::from_str(response_json).ok()?;
        let parts = v["candidates"][0]["content"]["parts"].as_array()?;
        let text: String = parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// エラーレスポンスを解析してメッセージを抽出する
fn error_message(body: &str, status: u16) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = v["error"]["message"].as_str() {
            return msg.to_string();
        }
    }
    format!("HTTP {}: {}", status, body)
}

impl GenerationApi for GeminiApi {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, model: &ModelName, prompt: &str) -> InvokeOutcome {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            model.as_str(),
            self.api_key
        );
        let payload = Self::make_request_payload(prompt);

        let response = match self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
        {
            Ok(r) => r,
            Err(e) => return InvokeOutcome::Transport(format!("HTTP request failed: {}", e)),
        };

        let status = response.status().as_u16();
        let body = match response.text() {
            Ok(t) => t,
            Err(e) => return InvokeOutcome::Transport(format!("Failed to read response: {}", e)),
        };

        if (200..300).contains(&status) {
            match Self::extract_text(&body) {
                Some(text) => InvokeOutcome::Success(text),
                // 2xxでもテキストが無ければこの候補は使いものにならない
                None => InvokeOutcome::NonRetryable(status, "no text in response".to_string()),
            }
        } else if status == 503 {
            InvokeOutcome::Retryable(status)
        } else {
            InvokeOutcome::NonRetryable(status, error_message(&body, status))
        }
    }

    fn list_models(&self) -> Result<Vec<DiscoveredModel>, Error> {
        let url = format!("{}/v1beta/models?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;
        if !status.is_success() {
            return Err(Error::http(format!(
                "model list error: {}",
                error_message(&body, status.as_u16())
            )));
        }
        let v: Value = serde_json::from_str(&body)
            .map_err(|e| Error::json(format!("Failed to parse model list: {}", e)))?;
        let models = v["models"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|m| {
                        let name = m["name"].as_str()?;
                        // APIは "models/gemini-..." 形式で返す
                        let name = name.strip_prefix("models/").unwrap_or(name).to_string();
                        let supports_generation = m["supportedGenerationMethods"]
                            .as_array()
                            .map(|methods| {
                                methods
                                    .iter()
                                    .any(|x| x.as_str() == Some("generateContent"))
                            })
                            .unwrap_or(false);
                        Some(DiscoveredModel {
                            name,
                            supports_generation,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_request_payload_shape() {
        let payload = GeminiApi::make_request_payload("テーマ「夜」から物語を");
        assert_eq!(
            payload["contents"][0]["parts"][0]["text"],
            "テーマ「夜」から物語を"
        );
        assert_eq!(
            payload["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\""},{"text":":\"A\"}"}]}}]}"#;
        assert_eq!(
            GeminiApi::extract_text(body).unwrap(),
            r#"{"title":"A"}"#
        );
    }

    #[test]
    fn test_extract_text_none_when_no_parts() {
        assert!(GeminiApi::extract_text(r#"{"candidates":[]}"#).is_none());
        assert!(GeminiApi::extract_text("not json").is_none());
        assert!(GeminiApi::extract_text(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#
        )
        .is_none());
    }

    #[test]
    fn test_error_message_prefers_api_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#;
        assert_eq!(error_message(body, 429), "Resource has been exhausted");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        let msg = error_message("service unavailable", 503);
        assert!(msg.contains("HTTP 503"));
        assert!(msg.contains("service unavailable"));
    }
}
