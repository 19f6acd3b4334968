/// A short piece of captured audio as it arrives from the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioChunk {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub locale: Option<String>,
}

impl AudioChunk {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, locale: Option<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            locale,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
