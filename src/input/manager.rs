//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{Result, ResumeExtractorError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_chars: Option<usize>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            max_chars: None,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        let max_chars = (config.max_input_chars > 0).then_some(config.max_input_chars);
        Self::new().with_cache(config.enable_caching).with_max_chars(max_chars)
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_max_chars(mut self, max_chars: Option<usize>) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeExtractorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        info!("Reading {} resume: {}", file_type, path.display());

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(ResumeExtractorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };
        debug!("Extracted {} characters from {}", text.chars().count(), path.display());

        self.check_length(&text, path)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn check_length(&self, text: &str, path: &Path) -> Result<()> {
        match self.max_chars {
            Some(limit) if text.chars().count() > limit => Err(ResumeExtractorError::InvalidInput(format!(
                "{} is longer than the {} character limit",
                path.display(),
                limit
            ))),
            _ => Ok(()),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            ResumeExtractorError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
