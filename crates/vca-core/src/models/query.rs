use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::AudioClip;
use crate::error::Rejection;

/// Language a query is asked in and an answer is given in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Parse a caller-supplied language code.
    ///
    /// Only `hi` selects Hindi; anything else (including an empty or unknown
    /// code) falls back to English.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("hi") {
            Language::Hi
        } else {
            Language::En
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Locale code understood by the speech backend
    pub fn locale(&self) -> &'static str {
        match self {
            Language::En => "en_IN",
            Language::Hi => "hi_IN",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map(Language::from_code).unwrap_or_default())
    }
}

/// A validated text query.
///
/// Immutable once created; lives for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    language: Language,
}

impl Query {
    /// Create a query, rejecting empty or whitespace-only text
    pub fn new(text: impl Into<String>, language: Language) -> Result<Self, Rejection> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Rejection::EmptyQuery);
        }
        Ok(Self { text, language })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// A spoken query as received from the caller, before validation
#[derive(Debug, Clone)]
pub struct VoiceQuery {
    pub audio: Option<AudioClip>,
    pub language: Language,
}

impl VoiceQuery {
    pub fn new(audio: Option<AudioClip>, language: Language) -> Self {
        Self { audio, language }
    }

    /// Take the audio payload, rejecting a missing or zero-length upload
    pub fn into_audio(self) -> Result<(AudioClip, Language), Rejection> {
        match self.audio {
            Some(clip) if !clip.is_empty() => Ok((clip, self.language)),
            _ => Err(Rejection::MissingAudio),
        }
    }
}
