//! Image handles
//!
//! Images are character art: one string per row. The terminal draws them
//! directly; other surfaces can treat each character as a pixel.

use std::path::Path;

use anyhow::{Context, Result, bail};

/// A drawable image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    rows: Vec<String>,
    width: usize,
}

impl Image {
    /// Build from text; trailing blank lines are dropped. `None` if nothing is left.
    pub fn from_text(text: &str) -> Option<Self> {
        let mut rows: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        let width = rows.iter().map(|r| r.chars().count()).max()?;
        if width == 0 {
            return None;
        }
        Some(Self { rows, width })
    }

    /// Load an image from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot load image {}", path.display()))?;
        match Self::from_text(&text) {
            Some(image) => {
                log::debug!("Loaded image {} ({}x{})", path.display(), image.width, image.height());
                Ok(image)
            }
            None => bail!("image {} is empty", path.display()),
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let image = Image::from_text("  ab  \ncdef\n\n\n").unwrap();
        assert_eq!(image.height(), 2);
        assert_eq!(image.width(), 4);
        assert_eq!(image.rows()[0], "  ab");
    }

    #[test]
    fn test_blank_text_is_not_an_image() {
        assert_eq!(Image::from_text(""), None);
        assert_eq!(Image::from_text("\n   \n"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Image::load(Path::new("definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("cannot load image"));
    }
}
