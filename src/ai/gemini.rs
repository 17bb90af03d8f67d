use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ai::traits::GenerativeClient;
use crate::config::Settings;
use crate::error::{DebtBreakerError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_parts(self) -> Vec<Part> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
    }
}

/// Gemini generateContent 接口的 HTTP 客户端
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    text_model: String,
    speech_model: String,
    voice_name: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.ai_request_timeout))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.gemini_base_url.trim_end_matches('/').to_string(),
            api_key: settings.gemini_api_key.clone(),
            text_model: settings.text_model.clone(),
            speech_model: settings.speech_model.clone(),
            voice_name: settings.voice_name.clone(),
        })
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DebtBreakerError::generation_error("GEMINI_API_KEY is not configured"))?;

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        debug!("Calling Gemini model {model}");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DebtBreakerError::generation_error(format!(
                "Gemini API returned status {status}: {body}"
            )));
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    fn text_request(text: String) -> Vec<Content> {
        vec![Content {
            parts: vec![Part {
                text: Some(text),
                inline_data: None,
            }],
        }]
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: Self::text_request(prompt.to_string()),
            generation_config: None,
        };

        let text = self
            .generate_content(&self.text_model, &request)
            .await?
            .first_parts()
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<String>();

        let text = text.trim();
        if text.is_empty() {
            return Err(DebtBreakerError::generation_error("Gemini returned no text"));
        }
        Ok(text.to_string())
    }

    async fn synthesize(&self, text: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: Self::text_request(text.to_string()),
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: self.voice_name.clone(),
                        },
                    },
                },
            }),
        };

        let inline = self
            .generate_content(&self.speech_model, &request)
            .await?
            .first_parts()
            .into_iter()
            .find_map(|p| p.inline_data)
            .ok_or_else(|| DebtBreakerError::generation_error("Gemini returned no audio"))?;

        debug!("Received {} base64 chars of {}", inline.data.len(), inline.mime_type);
        Ok(inline.data)
    }
}
