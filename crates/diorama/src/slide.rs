use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};

/// One renderable unit of a deck plus the notes only the presenter sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideUnit {
    #[serde(flatten)]
    pub content: SlideContent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SlideUnit {
    pub fn new(content: SlideContent) -> Self {
        Self {
            content,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Short human-readable label, used for titles and previews.
    pub fn label(&self) -> String {
        match &self.content {
            SlideContent::Text(t) => t.heading.clone(),
            SlideContent::Image(i) => i.alt.clone(),
            SlideContent::Quote(q) => match &q.quotee {
                Some(quotee) => format!("Quote: {quotee}"),
                None => "Quote".to_string(),
            },
            SlideContent::Video(v) => format!("Video: {}", v.src),
        }
    }

    /// Classes set on the slide itself; empty for text slides.
    pub fn class_name(&self) -> &str {
        match &self.content {
            SlideContent::Text(_) => "",
            SlideContent::Image(i) => &i.class_name,
            SlideContent::Quote(q) => &q.class_name,
            SlideContent::Video(v) => &v.class_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SlideContent {
    Text(TextSlide),
    Image(ImageSlide),
    Quote(QuoteSlide),
    Video(VideoSlide),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSlide {
    pub heading: String,

    #[serde(default)]
    pub body: String,

    /// Buttons that jump straight to another slide.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<SlideLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideLink {
    pub label: String,
    /// 0-based index of the target slide.
    pub slide: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSlide {
    pub src: String,
    pub alt: String,

    /// Overlay color drawn on top of the image, as `#rrggbb` or `#rrggbbaa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Fill the whole slide instead of the padded content area.
    #[serde(default)]
    pub full: bool,

    /// Fit inside the target rect, preserving aspect ratio.
    #[serde(default)]
    pub contain: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSlide {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotee: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSlide {
    pub src: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default)]
    pub full: bool,

    #[serde(default)]
    pub autoplay: bool,

    #[serde(default, rename = "loop")]
    pub looped: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class_name: String,
}

/// The ordered slides of a deck, fixed for the session and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSequence {
    slides: Vec<SlideUnit>,
}

#[allow(clippy::len_without_is_empty)]
impl SlideSequence {
    pub fn new(slides: Vec<SlideUnit>) -> Result<Self> {
        if slides.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&SlideUnit> {
        self.slides.get(index)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.slides.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlideUnit> {
        self.slides.iter()
    }
}

impl std::ops::Index<usize> for SlideSequence {
    type Output = SlideUnit;

    fn index(&self, index: usize) -> &SlideUnit {
        &self.slides[index]
    }
}

#[cfg(test)]
pub(crate) fn text_slides(count: usize) -> SlideSequence {
    let slides = (0..count)
        .map(|i| {
            SlideUnit::new(SlideContent::Text(TextSlide {
                heading: format!("Slide {i}"),
                body: String::new(),
                links: Vec::new(),
            }))
            .with_notes(format!("notes {i}"))
        })
        .collect();
    SlideSequence::new(slides).expect("test decks are never empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(matches!(
            SlideSequence::new(Vec::new()),
            Err(DeckError::EmptyDeck)
        ));
    }

    #[test]
    fn test_bounds() {
        let slides = text_slides(3);
        assert_eq!(slides.len(), 3);
        assert_eq!(slides.last_index(), 2);
        assert!(slides.contains_index(2));
        assert!(!slides.contains_index(3));
        assert!(slides.get(3).is_none());
        assert_eq!(slides[1].notes.as_deref(), Some("notes 1"));
    }

    #[test]
    fn test_slide_yaml_tagged_by_kind() {
        let yaml = "kind: image\nsrc: cat.png\nalt: A cat\nfull: true\nnotes: Mention the cat\n";
        let slide: SlideUnit = serde_yaml::from_str(yaml).unwrap();
        match &slide.content {
            SlideContent::Image(image) => {
                assert_eq!(image.src, "cat.png");
                assert!(image.full);
                assert!(!image.contain);
                assert!(image.color.is_none());
            }
            other => panic!("expected image slide, got {other:?}"),
        }
        assert_eq!(slide.notes.as_deref(), Some("Mention the cat"));
    }

    #[test]
    fn test_video_loop_field() {
        let yaml = "kind: video\nsrc: intro.mp4\nloop: true\n";
        let slide: SlideUnit = serde_yaml::from_str(yaml).unwrap();
        let SlideContent::Video(video) = slide.content else {
            panic!("expected video slide");
        };
        assert!(video.looped);
        assert!(!video.autoplay);
    }

    #[test]
    fn test_text_links() {
        let yaml = "kind: text\nheading: Agenda\nlinks:\n  - label: Demo\n    slide: 4\n";
        let slide: SlideUnit = serde_yaml::from_str(yaml).unwrap();
        let SlideContent::Text(text) = slide.content else {
            panic!("expected text slide");
        };
        assert_eq!(text.body, "");
        assert_eq!(
            text.links,
            vec![SlideLink {
                label: "Demo".to_string(),
                slide: 4
            }]
        );
    }

    #[test]
    fn test_labels() {
        let quote = SlideUnit::new(SlideContent::Quote(QuoteSlide {
            text: "Simplicity is prerequisite for reliability.".to_string(),
            quotee: Some("Dijkstra".to_string()),
            class_name: String::new(),
        }));
        assert_eq!(quote.label(), "Quote: Dijkstra");
        assert_eq!(quote.class_name(), "");
        assert_eq!(text_slides(1)[0].label(), "Slide 0");
    }
}
