//! Displayable content entries.
//!
//! Entries are immutable once loaded. The deck only ever reorders indices
//! into the loaded slice; it never touches the entries themselves.

pub mod catalog;
pub mod markup;

use serde::{Deserialize, Serialize};

/// One card in the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentEntry {
    /// Landing card. Always shown first.
    Intro {
        title: String,
        #[serde(default)]
        content: String,
    },
    Publication {
        title: String,
        #[serde(default)]
        venue: String,
        #[serde(default)]
        year: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        link: Option<String>,
    },
    Text {
        title: String,
        #[serde(default)]
        content: String,
    },
    Image {
        title: String,
        src: String,
        #[serde(default)]
        caption: String,
    },
    Video {
        title: String,
        #[serde(rename = "embedUrl", alias = "embed_url")]
        embed_url: String,
        #[serde(default)]
        description: String,
    },
    Code {
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        tech: Vec<String>,
        #[serde(default)]
        link: Option<String>,
    },
    /// Live visualization mounted by handler id.
    Interactive {
        title: String,
        #[serde(rename = "interactive", alias = "handler")]
        handler: String,
        #[serde(default)]
        description: String,
    },
}

impl ContentEntry {
    pub fn title(&self) -> &str {
        match self {
            Self::Intro { title, .. }
            | Self::Publication { title, .. }
            | Self::Text { title, .. }
            | Self::Image { title, .. }
            | Self::Video { title, .. }
            | Self::Code { title, .. }
            | Self::Interactive { title, .. } => title,
        }
    }

    pub fn is_intro(&self) -> bool {
        matches!(self, Self::Intro { .. })
    }

    /// Handler id for interactive cards.
    pub fn interactive_id(&self) -> Option<&str> {
        match self {
            Self::Interactive { handler, .. } => Some(handler),
            _ => None,
        }
    }

    /// Short lowercase label, matching the serialized tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Intro { .. } => "intro",
            Self::Publication { .. } => "publication",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
            Self::Code { .. } => "code",
            Self::Interactive { .. } => "interactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_entries() {
        let json = r#"[
            {"type": "intro", "title": "hello"},
            {"type": "video", "title": "Waves", "embedUrl": "https://player.vimeo.com/video/1"},
            {"type": "interactive", "title": "Attractor", "interactive": "mobius-attractor"},
            {"type": "code", "title": "tool", "tech": ["rust", "egui"]}
        ]"#;
        let entries: Vec<ContentEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries[0].is_intro());
        match &entries[1] {
            ContentEntry::Video { embed_url, .. } => {
                assert_eq!(embed_url, "https://player.vimeo.com/video/1")
            }
            other => panic!("expected video, got {:?}", other),
        }
        assert_eq!(entries[2].interactive_id(), Some("mobius-attractor"));
        assert_eq!(entries[3].kind(), "code");
    }

    #[test]
    fn unknown_type_is_rejected() {
        let json = r#"{"type": "podcast", "title": "x"}"#;
        assert!(serde_json::from_str::<ContentEntry>(json).is_err());
    }
}
