/// An opaque audio clip plus the MIME hint the client declared for it.
/// Consumed once by transcription; never persisted.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    data: Vec<u8>,
    mime_type: String,
}

impl AudioPayload {
    pub const DEFAULT_MIME_TYPE: &'static str = "audio/m4a";

    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Synthetic filename for providers that want a multipart file upload.
    pub fn file_name(&self) -> String {
        let extension = self
            .mime_type
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .filter(|s| !s.is_empty())
            .unwrap_or("bin");
        format!("audio.{}", extension)
    }
}
