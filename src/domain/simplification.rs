use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SimplificationProvider {
    Cloud,
    Fallback,
}

impl SimplificationProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimplificationProvider::Cloud => "cloud",
            SimplificationProvider::Fallback => "fallback",
        }
    }
}

impl fmt::Display for SimplificationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimplificationResult {
    pub normalized_text: String,
    pub keywords: Vec<String>,
    pub gloss_sequence: Vec<String>,
    pub provider: SimplificationProvider,
}
