use serde::{Deserialize, Serialize};

/// Encoding hint sent to the speech backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioEncoding {
    #[default]
    Wav,
    Webm,
    Ogg,
    Mp3,
    Flac,
}

impl AudioEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Wav => "wav",
            AudioEncoding::Webm => "webm",
            AudioEncoding::Ogg => "ogg",
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::Flac => "flac",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioEncoding::Wav => "audio/wav",
            AudioEncoding::Webm => "audio/webm",
            AudioEncoding::Ogg => "audio/ogg",
            AudioEncoding::Mp3 => "audio/mpeg",
            AudioEncoding::Flac => "audio/flac",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "wav" | "wave" | "x-wav" => Some(AudioEncoding::Wav),
            "webm" => Some(AudioEncoding::Webm),
            "ogg" | "oga" | "opus" => Some(AudioEncoding::Ogg),
            "mp3" | "mpeg" => Some(AudioEncoding::Mp3),
            "flac" | "x-flac" => Some(AudioEncoding::Flac),
            _ => None,
        }
    }

    /// Infer the encoding from an upload's file name and content type.
    ///
    /// The file extension wins over the content type; unknown or missing
    /// hints fall back to WAV.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        let from_name = file_name
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| Self::from_token(ext));

        let from_type = || {
            content_type
                .and_then(|ct| ct.split(';').next())
                .and_then(|ct| ct.trim().strip_prefix("audio/"))
                .and_then(Self::from_token)
        };

        from_name.or_else(from_type).unwrap_or_default()
    }
}

/// Raw audio payload of a voice query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    bytes: Vec<u8>,
    encoding: AudioEncoding,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, encoding: AudioEncoding) -> Self {
        Self { bytes, encoding }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> AudioEncoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
