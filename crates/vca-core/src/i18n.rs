//! Localized user-facing messages
//!
//! Every fixed string the pipeline can hand back to a user is looked up here
//! by `(MessageId, Language)`.

use serde::Serialize;

use crate::models::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
    /// Generation backend has no credential
    GenerationUnconfigured,
    /// Generation backend failed at runtime
    GenerationFailed,
    /// Speech backend has no credential
    SpeechUnconfigured,
    /// Speech backend failed at runtime
    SpeechFailed,
}

impl MessageId {
    pub const ALL: [MessageId; 4] = [
        MessageId::GenerationUnconfigured,
        MessageId::GenerationFailed,
        MessageId::SpeechUnconfigured,
        MessageId::SpeechFailed,
    ];
}

const GENERATION_UNCONFIGURED_EN: &str = "Important Notice: Groq API key is not available.

This Virtual Chartered Accountant app requires a Groq API key to function properly.
Please contact the administrator to provide a valid API key.

You can obtain an API key by visiting https://console.groq.com.";

const GENERATION_UNCONFIGURED_HI: &str = "महत्वपूर्ण सूचना: Groq API कुंजी उपलब्ध नहीं है।

इस वर्चुअल चार्टर्ड अकाउंटेंट ऐप को चलाने के लिए एक Groq API कुंजी की आवश्यकता है।
कृपया प्रशासक से संपर्क करें और उन्हें एक वैध API कुंजी प्रदान करने के लिए कहें।

आप API कुंजी प्राप्त करने के लिए https://console.groq.com पर जा सकते हैं।";

const GENERATION_FAILED_EN: &str = "Sorry, there was an error processing your query. Please try asking your question again or check your internet connection.";

const GENERATION_FAILED_HI: &str = "माफ़ करें, आपके प्रश्न का उत्तर देने में त्रुटि हुई है। कृपया अपना प्रश्न दोबारा पूछने का प्रयास करें या अपनी इंटरनेट कनेक्शन की जांच करें।";

const SPEECH_UNCONFIGURED_EN: &str = "Important Notice: Speech-to-text API key is not available.

To use voice input, the Virtual Chartered Accountant app requires a Reverie API key.
Please contact the administrator. In the meantime, please use text input.";

const SPEECH_UNCONFIGURED_HI: &str = "महत्वपूर्ण सूचना: स्पीच-टू-टेक्स्ट API कुंजी उपलब्ध नहीं है।

आवाज़ इनपुट का उपयोग करने के लिए, वर्चुअल चार्टर्ड अकाउंटेंट ऐप को Reverie API कुंजी की आवश्यकता है।
कृपया प्रशासक से संपर्क करें। तब तक, कृपया टेक्स्ट इनपुट का उपयोग करें।";

const SPEECH_FAILED_EN: &str =
    "Error converting speech to text. Please try again or use text input instead.";

const SPEECH_FAILED_HI: &str =
    "आवाज़ को टेक्स्ट में बदलने में त्रुटि। कृपया पुनः प्रयास करें या टेक्स्ट इनपुट का उपयोग करें।";

/// Resolve a message for a language
pub fn message(id: MessageId, language: Language) -> &'static str {
    match (id, language) {
        (MessageId::GenerationUnconfigured, Language::En) => GENERATION_UNCONFIGURED_EN,
        (MessageId::GenerationUnconfigured, Language::Hi) => GENERATION_UNCONFIGURED_HI,
        (MessageId::GenerationFailed, Language::En) => GENERATION_FAILED_EN,
        (MessageId::GenerationFailed, Language::Hi) => GENERATION_FAILED_HI,
        (MessageId::SpeechUnconfigured, Language::En) => SPEECH_UNCONFIGURED_EN,
        (MessageId::SpeechUnconfigured, Language::Hi) => SPEECH_UNCONFIGURED_HI,
        (MessageId::SpeechFailed, Language::En) => SPEECH_FAILED_EN,
        (MessageId::SpeechFailed, Language::Hi) => SPEECH_FAILED_HI,
    }
}
