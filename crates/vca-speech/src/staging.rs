use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use vca_core::{AudioClip, AudioEncoding};

/// An audio clip written to a temporary file.
///
/// The file exists for as long as this value does; dropping it (or calling
/// [`StagedAudio::release`]) deletes the file.
#[derive(Debug)]
pub struct StagedAudio {
    file: NamedTempFile,
    encoding: AudioEncoding,
}

impl StagedAudio {
    /// Write the clip to a fresh temporary file named after its encoding
    pub fn stage(clip: &AudioClip) -> io::Result<Self> {
        let suffix = format!(".{}", clip.encoding().as_str());
        let mut file = tempfile::Builder::new().prefix("vca-voice-").suffix(&suffix).tempfile()?;
        file.write_all(clip.bytes())?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), bytes = clip.len(), "Staged audio");

        Ok(Self {
            file,
            encoding: clip.encoding(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn encoding(&self) -> AudioEncoding {
        self.encoding
    }

    /// Delete the staged file, reporting any failure
    pub fn release(self) -> io::Result<()> {
        self.file.close()
    }
}
