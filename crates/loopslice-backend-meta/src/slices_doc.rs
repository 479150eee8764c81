//! `.slices` text document writer.
//!
//! The document lists slice start times in seconds for the WAV file it sits
//! next to:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <audio filename="drums.wav">
//!        <slice start="0.000000" />
//!        <slice start="0.500000" />
//! </audio>
//! ```

use std::fmt::Write as _;

/// XML declaration opening every document.
pub const SLICES_XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Indentation before each slice entry.
const SLICE_INDENT: &str = "       ";

/// A slice-position document for one audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct SlicesDocument {
    /// File name of the paired audio file (`<base>.wav`).
    pub audio_file_name: String,
    /// Slice start times in seconds, in slice order.
    pub starts_seconds: Vec<f64>,
}

impl SlicesDocument {
    /// Build a document from slice start frames.
    ///
    /// # Arguments
    /// * `base_name` - Base name of the audio file, without extension
    /// * `starts` - Slice start frames in slice order
    /// * `sample_rate` - Sample rate in Hz
    pub fn from_frames(base_name: &str, starts: &[u32], sample_rate: u32) -> Self {
        Self {
            audio_file_name: format!("{}.wav", base_name),
            starts_seconds: starts
                .iter()
                .map(|&frame| frame as f64 / sample_rate as f64)
                .collect(),
        }
    }

    /// Render the document text.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(128 + self.starts_seconds.len() * 36);
        out.push_str(SLICES_XML_DECL);
        out.push('\n');
        // Writing into a String cannot fail
        let _ = writeln!(
            out,
            "<audio filename=\"{}\">",
            escape_attr(&self.audio_file_name)
        );
        for start in &self.starts_seconds {
            let _ = writeln!(out, "{}<slice start=\"{:.6}\" />", SLICE_INDENT, start);
        }
        out.push_str("</audio>\n");
        out
    }

    /// Render the document as UTF-8 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }

    /// Compute the BLAKE3 hash of the document bytes.
    pub fn compute_hash(&self) -> String {
        crate::content_hash(&self.to_bytes())
    }
}

/// Escape a string for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
