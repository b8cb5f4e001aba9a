use anyhow::{Result, anyhow, bail};
use super::AiProvider;
use crate::config::Settings;
use std::time::Duration;

/// Cerebras text-completions endpoint.
pub struct Cerebras {
    endpoint: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
    api_key: Option<String>,
}

#[derive(serde::Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: String,
    temperature: f64,
    max_tokens: u32,
}

#[derive(serde::Deserialize, Debug)]
struct CompletionResponse { choices: Vec<Choice> }
#[derive(serde::Deserialize, Debug)]
struct Choice { text: String }

impl Cerebras {
    pub fn from_settings(settings: &Settings) -> Self {
        let a = &settings.analysis;
        Self {
            endpoint: a.endpoint.clone(),
            model: a.model.clone(),
            temperature: a.temperature,
            max_tokens: a.max_tokens,
            timeout: Duration::from_secs(a.timeout_secs),
            api_key: settings.api_key.clone(),
        }
    }
}

impl AiProvider for Cerebras {
    fn name(&self) -> &'static str { "cerebras" }
    fn chat(&self, prompt: &str) -> Result<String> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() { bail!("empty prompt"); }
        let key = self.api_key.as_deref()
            .ok_or_else(|| anyhow!("CEREBRAS_API_KEY not set in environment"))?;
        let req = CompletionRequest {
            model: &self.model,
            prompt: format!("{trimmed}\n[END]"),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let resp = client
            .post(&self.endpoint)
            .bearer_auth(key)
            .header("Content-Type", "application/json")
            .json(&req)
            .send()?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            bail!("cerebras http error {status}: {text}");
        }
        let cr: CompletionResponse = resp.json()?;
        let text = cr.choices.first()
            .map(|c| c.text.trim().to_string())
            .ok_or_else(|| anyhow!("empty response"))?;
        crate::debug_log!("cerebras replied with {} chars", text.len());
        Ok(text)
    }
}
