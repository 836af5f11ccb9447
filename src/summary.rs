use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::model::feature::Feature;

pub const OPENAI_API_BASE: &str = "https://api.openai.com";

const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const MAX_COMPLETION_TOKENS: u32 = 200;
const SAMPLING_TEMPERATURE: f64 = 0.5;

/// How many keywords the local summary keeps.
const TOP_KEYWORDS: usize = 10;

const SUMMARY_INSTRUCTION: &str = "You are a product manager assistant. Given the following list \
     of product stories, write a concise summary (3-5 sentences) describing what the product is, \
     its main modules, and its current focus.";

/// Outcome of the remote summarization tier.
///
/// `Failed` still renders as visible summary text (see [`Summary::into_text`])
/// so a broken OpenAI call degrades the output instead of aborting the run;
/// callers that need to tell a real summary from an error can match on the
/// variant instead of inspecting the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// The model produced a summary.
    Generated(String),
    /// The call was made but failed; the detail is the error chain.
    Failed(String),
    /// No API key was supplied, so the call was never attempted.
    Unavailable,
}

impl Summary {
    /// Text to print in the summary slot, if any. `Unavailable` yields `None`,
    /// telling the caller to fall back to the keyword summary.
    pub fn into_text(self) -> Option<String> {
        match self {
            Summary::Generated(text) => Some(text),
            Summary::Failed(detail) => Some(format!("[OpenAI error: {detail}]")),
            Summary::Unavailable => None,
        }
    }
}

/// Build the chat prompt: the fixed instruction, then one line per feature.
pub fn build_prompt(features: &[Feature]) -> String {
    let story_lines: Vec<String> = features
        .iter()
        .map(|f| format!("- {}: {}", f.name, f.description_text()))
        .collect();
    format!("{SUMMARY_INSTRUCTION}\n\n{}\n\nSummary:", story_lines.join("\n"))
}

pub struct OpenAiClient {
    auth_header: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, OPENAI_API_BASE.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            auth_header: format!("Bearer {api_key}"),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Ask the model for a backlog summary. Never returns an error: failures
    /// are folded into [`Summary::Failed`].
    pub async fn summarize(&self, features: &[Feature]) -> Summary {
        match self.chat(&build_prompt(features)).await {
            Ok(text) => Summary::Generated(text),
            Err(e) => {
                warn!("AI summary failed: {e:#}");
                Summary::Failed(format!("{e:#}"))
            }
        }
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": OPENAI_MODEL,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": SAMPLING_TEMPERATURE,
        });

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", &self.auth_header)
            .json(&body)
            .send()
            .await
            .context("OpenAI API request failed")?
            .error_for_status()
            .context("OpenAI API returned an error status")?;

        let chat: ChatResponse = resp.json().await.context("Failed to parse OpenAI response")?;
        let choice = chat
            .choices
            .into_iter()
            .next()
            .context("OpenAI response had no choices")?;

        Ok(choice.message.content.trim().to_string())
    }
}

/// Remote summarization tier. A missing or empty key is a signal to skip the
/// tier, not an error; the caller falls through to [`summarize_local`].
pub async fn summarize(features: &[Feature], api_key: Option<&str>) -> Summary {
    let key = match api_key.map(str::trim) {
        Some(k) if !k.is_empty() => k,
        _ => return Summary::Unavailable,
    };
    OpenAiClient::new(key.to_string()).summarize(features).await
}

/// Word-like runs of 4+ alphanumeric/underscore characters.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w{4,}\b").expect("keyword pattern compiles"));

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Common English function words and filler terms excluded from the keyword
/// summary. Kept as data so the list can be inspected and extended.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "are", "but", "not",
    "have", "has", "was", "you", "your", "all", "can", "will", "our", "their",
    "they", "them", "which", "when", "what", "how", "who", "where", "why",
    "about", "into", "more", "than", "also", "any", "each", "other", "use",
    "used", "using", "should", "could", "would", "may", "might", "must",
    "shall", "being", "been", "were", "had", "did", "does", "doing", "on",
    "in", "at", "by", "to", "of", "as", "is", "it", "if", "or", "an", "a",
    "be", "so", "we", "i", "he", "she", "his", "her", "its", "my", "me", "do",
    "up", "out", "no", "yes", "just", "now", "new", "get", "got", "make",
    "made", "see", "seen", "go", "went", "back", "off", "over", "under",
    "again", "still", "even", "very", "much", "such", "like", "one", "two",
    "three", "first", "last", "next", "previous", "current", "future", "past",
    "before", "after", "since", "because", "due", "per", "via", "etc", "etc.",
    "eg", "e.g.", "ie", "i.e.",
];

/// Extractive fallback: the ten most frequent non-stopword keywords across
/// all names and descriptions, rendered as `word (count)` pairs. Ties keep
/// first-encountered order. An empty or all-stopword corpus yields an empty
/// string.
pub fn summarize_local(features: &[Feature]) -> String {
    let corpus = features
        .iter()
        .map(|f| format!("{} {}", f.name, f.description_text()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for token in WORD_RE.find_iter(&corpus) {
        let word = token.as_str();
        if STOPWORD_SET.contains(word) {
            continue;
        }
        let count = counts.entry(word.to_string()).or_insert(0);
        if *count == 0 {
            first_seen.push(word.to_string());
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = first_seen
        .into_iter()
        .map(|word| {
            let count = counts.get(&word).copied().unwrap_or(0);
            (word, count)
        })
        .collect();
    // Stable sort, so equal counts stay in first-encountered order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_KEYWORDS);

    ranked
        .iter()
        .map(|(word, count)| format!("{word} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}
