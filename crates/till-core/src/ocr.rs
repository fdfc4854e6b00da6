//! OCR engine seam
//!
//! Text recognition itself happens outside Till. An engine turns image bytes
//! into ordered [`TextFragment`]s; the detection pipeline only ever sees those.
//!
//! - [`CommandOcr`] runs an external program (e.g. an EasyOCR wrapper script)
//!   that prints JSON on stdout.
//! - [`CachedOcr`] memoizes any engine per image content, so re-processing the
//!   same receipt does not pay for OCR twice. The cache holds at most a fixed
//!   number of images and evicts the least recently used one.

use std::io::Write;
use std::num::NonZeroUsize;
use std::process::Command;
use std::sync::Mutex;

use lru::LruCache;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::TextFragment;

/// Environment variable naming the external OCR command
pub const OCR_COMMAND_ENV: &str = "TILL_OCR_COMMAND";

/// Images remembered by [`CachedOcr::new`]
pub const DEFAULT_OCR_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => unreachable!(),
};

/// Anything that can read text off a receipt image
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8]) -> Result<Vec<TextFragment>>;
}

/// Hex SHA-256 of image content
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Accepted shapes for one OCR result entry
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFragment {
    /// EasyOCR `readtext` output: `[bbox, text, confidence]`
    Triple(serde_json::Value, String, f64),
    /// `{ "text": ..., "confidence": ..., "bbox": ... }`
    Object(TextFragment),
    /// EasyOCR with `detail=0`: bare strings
    Plain(String),
}

/// Parse OCR engine output into fragments, preserving order
pub fn parse_ocr_json(json: &str) -> Result<Vec<TextFragment>> {
    let raw: Vec<RawFragment> = serde_json::from_str(json)?;

    Ok(raw
        .into_iter()
        .map(|entry| match entry {
            RawFragment::Triple(bbox, text, confidence) => TextFragment {
                bbox: serde_json::from_value(bbox).ok(),
                text,
                confidence,
            },
            RawFragment::Object(fragment) => fragment,
            RawFragment::Plain(text) => TextFragment::new(text, 0.0),
        })
        .collect())
}

/// OCR via an external program that takes an image path and prints JSON
#[derive(Debug, Clone)]
pub struct CommandOcr {
    program: String,
    args: Vec<String>,
}

impl CommandOcr {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a whitespace-separated command line, e.g. `python3 ocr.py --gpu`
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| Error::Ocr("Empty OCR command".to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Build from `TILL_OCR_COMMAND` if it is set
    pub fn from_env() -> Option<Self> {
        let command = std::env::var(OCR_COMMAND_ENV).ok()?;
        match Self::from_command_line(&command) {
            Ok(ocr) => Some(ocr),
            Err(e) => {
                warn!(error = %e, "Ignoring {}", OCR_COMMAND_ENV);
                None
            }
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl OcrEngine for CommandOcr {
    fn recognize(&self, image: &[u8]) -> Result<Vec<TextFragment>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(image)?;
        file.flush()?;

        debug!(program = %self.program, bytes = image.len(), "Running OCR command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(file.path())
            .output()
            .map_err(|e| Error::Ocr(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ocr(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_ocr_json(&stdout)
            .map_err(|e| Error::Ocr(format!("Unreadable output from {}: {}", self.program, e)))
    }
}

/// Per-image memoization around another engine, bounded by an LRU
pub struct CachedOcr<E> {
    inner: E,
    cache: Mutex<LruCache<String, Vec<TextFragment>>>,
}

impl<E: OcrEngine> CachedOcr<E> {
    pub fn new(inner: E) -> Self {
        Self::with_capacity(inner, DEFAULT_OCR_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: E, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of images currently held
    pub fn cached_images(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl<E: OcrEngine> OcrEngine for CachedOcr<E> {
    fn recognize(&self, image: &[u8]) -> Result<Vec<TextFragment>> {
        let key = content_hash(image);

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&key) {
                debug!(hash = %key, "OCR cache hit");
                return Ok(hit.clone());
            }
        }

        // Lock is not held while the engine runs
        let fragments = self.inner.recognize(image)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, fragments.clone());
        }
        Ok(fragments)
    }
}
