use serde::{Deserialize, Serialize};

/// Horizontal anchoring of a command relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// What a piece of text is, independent of where it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Title,
    Subtitle,
    SectionHeader,
    EntryTitle,
    EntryMeta,
    Body,
    Skill,
}

/// A single line, or a block of pre-wrapped lines stacked `line_height` apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TextBlock {
    Line(String),
    Lines(Vec<String>),
}

impl TextBlock {
    pub fn line_count(&self) -> usize {
        match self {
            TextBlock::Line(_) => 1,
            TextBlock::Lines(lines) => lines.len(),
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        match self {
            TextBlock::Line(line) => vec![line.as_str()],
            TextBlock::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }
}

/// One positioned unit of text on one page. Never modified after emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub page_index: u32,
    pub text: TextBlock,
    pub role: TextRole,
    pub font_size: f32,
    pub x: f32,
    /// Baseline of the first line, measured from the top edge.
    pub y: f32,
    pub alignment: Alignment,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub commands: Vec<DrawCommand>,
    pub page_count: u32,
}

impl LayoutResult {
    /// Commands placed on `page_index`, in emission order.
    pub fn page(&self, page_index: u32) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |c| c.page_index == page_index)
    }
}
