use serde::{Deserialize, Serialize};

/// One content block of a blog.
///
/// `id` is the render key and must be unique within a blog's block list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogBlock {
    pub id: String,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl BlogBlock {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Wire name of the block type.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// Closed set of block types understood by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Paragraph {
        text: String,
    },
    Code {
        code: String,
        language: Option<String>,
        filename: Option<String>,
    },
    Image {
        src: String,
        alt: String,
        caption: Option<String>,
    },
    Callout {
        variant: CalloutVariant,
        title: Option<String>,
        content: String,
    },
    List {
        style: ListStyle,
        items: Vec<String>,
    },
    Quote {
        text: String,
        author: Option<String>,
    },
    Divider,
    /// A block type this client does not know; kept so it can be reported
    /// and skipped at render time.
    Unsupported {
        kind: String,
    },
}

impl BlockKind {
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Heading { .. } => "heading",
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Code { .. } => "code",
            BlockKind::Image { .. } => "image",
            BlockKind::Callout { .. } => "callout",
            BlockKind::List { .. } => "list",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Divider => "divider",
            BlockKind::Unsupported { kind } => kind,
        }
    }
}

/// Heading level, clamped to `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const DEFAULT: HeadingLevel = HeadingLevel(2);

    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HeadingLevel::new(value).ok_or_else(|| format!("heading level {value} out of range"))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl CalloutVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "success" => Some(Self::Success),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    Unordered,
}

impl ListStyle {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ordered" => Some(Self::Ordered),
            "unordered" => Some(Self::Unordered),
            _ => None,
        }
    }
}
