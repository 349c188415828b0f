//! Deck files: a YAML list of slides plus optional title and options.
//!
//! ```yaml
//! title: Rust at the edge
//! options:
//!   navigation: true
//! slides:
//!   - kind: text
//!     heading: Hello
//!     notes: Introduce yourself
//!   - kind: image
//!     src: images/ferris.png
//!     alt: Ferris
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::OptionOverrides;
use crate::error::{DeckError, Result};
use crate::slide::{SlideSequence, SlideUnit};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub options: OptionOverrides,

    pub slides: Vec<SlideUnit>,
}

/// A deck file read from disk, ready to mount.
#[derive(Debug, Clone)]
pub struct LoadedDeck {
    pub title: String,
    pub options: OptionOverrides,
    pub slides: SlideSequence,
    /// Directory relative slide assets resolve against.
    pub base_path: PathBuf,
}

pub fn parse(content: &str, path: &Path) -> Result<LoadedDeck> {
    let file: DeckFile = serde_yaml::from_str(content).map_err(|source| DeckError::ParseDeck {
        path: path.to_path_buf(),
        source,
    })?;
    let title = file.title.unwrap_or_else(|| {
        path.file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    });
    Ok(LoadedDeck {
        title,
        options: file.options,
        slides: SlideSequence::new(file.slides)?,
        base_path: path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf(),
    })
}

pub fn load(path: &Path) -> Result<LoadedDeck> {
    let content = std::fs::read_to_string(path).map_err(|source| DeckError::ReadDeck {
        path: path.to_path_buf(),
        source,
    })?;
    let deck = parse(&content, path)?;
    tracing::debug!(path = %path.display(), slides = deck.slides.len(), "deck file loaded");
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideContent;

    const SAMPLE: &str = r#"
title: Rust at the edge
options:
  navigation: true
  footer: "@mklab"
slides:
  - kind: text
    heading: Hello
    body: Welcome
    notes: Introduce yourself
  - kind: quote
    text: Fearless concurrency
    quotee: The Rust Book
  - kind: video
    src: demo.mp4
    autoplay: true
"#;

    #[test]
    fn test_parse_sample() {
        let deck = parse(SAMPLE, Path::new("talks/edge.yaml")).unwrap();
        assert_eq!(deck.title, "Rust at the edge");
        assert_eq!(deck.slides.len(), 3);
        assert_eq!(deck.options.navigation, Some(true));
        assert_eq!(deck.options.footer.as_deref(), Some("@mklab"));
        assert_eq!(deck.base_path, Path::new("talks"));
        assert!(matches!(deck.slides[1].content, SlideContent::Quote(_)));
        assert_eq!(deck.slides[0].notes.as_deref(), Some("Introduce yourself"));
        assert!(deck.slides[2].notes.is_none());
    }

    #[test]
    fn test_title_defaults_to_file_stem() {
        let deck = parse("slides:\n  - kind: text\n    heading: Only\n", Path::new("intro.yaml")).unwrap();
        assert_eq!(deck.title, "intro");
        assert_eq!(deck.options, OptionOverrides::default());
    }

    #[test]
    fn test_empty_deck_rejected() {
        let err = parse("slides: []\n", Path::new("empty.yaml")).unwrap_err();
        assert!(matches!(err, DeckError::EmptyDeck));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = parse(
            "slides:\n  - kind: chart\n    data: 1\n",
            Path::new("bad.yaml"),
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::ParseDeck { .. }));
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn test_bundled_sample_deck() {
        let deck = parse(
            include_str!("../../../demos/sample.yaml"),
            Path::new("demos/sample.yaml"),
        )
        .unwrap();
        assert_eq!(deck.title, "Diorama tour");
        assert_eq!(deck.slides.len(), 4);
        assert!(matches!(deck.slides[3].content, SlideContent::Video(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/deck.yaml")).unwrap_err();
        assert!(matches!(err, DeckError::ReadDeck { .. }));
    }
}
