//! Holiday greeting shown beside the tree.
//!
//! Text comes from an external generator as JSON. Any failure to fetch or
//! parse it yields the fixed fallback.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMPT: &str = "Generate a heartwarming, sophisticated, and short Christmas \
greeting message for a digital holiday card. Return JSON with 'title', 'message' and 'author'.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayGreeting {
    pub title: String,
    pub message: String,
    pub author: String,
}

impl HolidayGreeting {
    pub fn fallback() -> Self {
        Self {
            title: "Merry Christmas".into(),
            message: "May the warmth of the holiday season fill your heart with joy and peace."
                .into(),
            author: "Gemini AI".into(),
        }
    }
}

/// Something that turns a prompt into a JSON greeting body.
pub trait GreetingSource {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// A source with no generator behind it. Always fails, so callers get the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl GreetingSource for Offline {
    fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("no greeting generator configured")
    }
}

/// A fixed response body, e.g. one cached on disk.
#[derive(Debug, Clone)]
pub struct Canned(pub String);

impl GreetingSource for Canned {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

pub fn parse_greeting(body: &str) -> Result<HolidayGreeting> {
    serde_json::from_str(body.trim()).context("greeting is not a {title, message, author} object")
}

/// Ask `source` for a greeting, substituting the fallback on any error.
pub fn greeting_or_fallback(source: &dyn GreetingSource, prompt: Option<&str>) -> HolidayGreeting {
    let result = source
        .generate(prompt.unwrap_or(DEFAULT_PROMPT))
        .and_then(|body| parse_greeting(&body));
    match result {
        Ok(greeting) => greeting,
        Err(e) => {
            log::warn!("Greeting unavailable ({:#}), using fallback", e);
            HolidayGreeting::fallback()
        }
    }
}
