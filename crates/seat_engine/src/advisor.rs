//! Itinerary narrative from a generative model.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The key travels in a header so it never appears in request URLs or the
/// errors that quote them.
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Upper bound on fragments embedded in one prompt.
pub const MAX_PROMPT_FRAGMENTS: usize = 400;

#[async_trait]
pub trait SeatAdvisor: Send + Sync {
    async fn advise(&self, fragments: &[String], source: &str, destination: &str)
        -> Result<String>;
}

pub fn build_itinerary_prompt(fragments: &[String], source: &str, destination: &str) -> String {
    let shown = &fragments[..fragments.len().min(MAX_PROMPT_FRAGMENTS)];
    let available = format!("[{}]", shown.join(", "));

    format!(
        r#"Role: Master Logistics Planner.
User Journey: {source} to {destination}.
Available Seats: {available}

YOUR GOAL:
Build the most complete "Stitched Itinerary" possible.
The user wants to reach the destination even if they have to change seats 10 times.

CRITICAL RULES:
1. **GROUP SEATS:** If multiple seats cover the EXACT SAME leg (e.g. B1-12, B3-9, B3-14 all go DDU->CNB), list them on ONE LINE.
   *Example:* "Seats B1-12, B3-9, B3-14 (DDU -> CNB)"
   *Do NOT make separate options for each seat.*

2. **MICRO-HOPS MATTER:** Do NOT ignore short journeys. If there is a seat for just 1 station (e.g. BBS->CTC), USE IT. Do not leave a gap if a short seat exists.

3. **FILL THE GAPS:** Try to cover every single mile. If there is absolutely no seat for a section, only then say "❌ NO SEAT".

4. **STATION NAMES:** Use Full Station Names + Codes (e.g. "Bhubaneswar (BBS)").

STRICT OUTPUT FORMAT:

### 🛤️ RECOMMENDED ITINERARY
* **Leg 1:** {source} -> [Next Station]
  - **Available:** Coach X-Y, Coach Z-A (List all seats for this leg here)

* **Leg 2:** [Prev Station] -> [Next Station]
  - **Available:** Coach B2-12, B5-40

... (Continue until {destination}) ...

(If a gap exists between legs):
* **⚠️ GAP:** [Station A] -> [Station B]
  - ❌ No vacant seats found for this section.

### 📝 SUMMARY
* **Total Switches:** (Count how many times user must move)
* **Best Path:** (Quick summary of the best coaches to stick to)
"#
    )
}

/// Calls the Generative Language `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiAdvisor {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        };

        let response: GenerateContentResponse = self
            .http
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .context("generateContent request failed")?
            .error_for_status()?
            .json()
            .await
            .context("generateContent response was not valid JSON")?;

        response.text()
    }
}

#[async_trait]
impl SeatAdvisor for GeminiAdvisor {
    async fn advise(
        &self,
        fragments: &[String],
        source: &str,
        destination: &str,
    ) -> Result<String> {
        info!(model = %self.model, fragments = fragments.len(), "requesting itinerary advice");
        let prompt = build_itinerary_prompt(fragments, source, destination);
        let text = self.generate(prompt).await?;
        debug!(advice = %text, "itinerary advice received");
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
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
    fn text(self) -> Result<String> {
        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or_else(|| anyhow!("generateContent returned no candidates"))?;
        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
        if text.trim().is_empty() {
            return Err(anyhow!("generateContent returned an empty candidate"));
        }
        Ok(text)
    }
}

#[cfg(test)]
#[path = "tests/advisor_tests.rs"]
mod tests;
