//! Paginated résumé layout. Turns a `ResumeDocument` into positioned draw commands.
//!
//! # Flow
//! - Header (name, role) is a fixed preamble on page 1 and never break-checked.
//! - Sections follow in fixed order: Experience, Education, Skills.
//! - The page-break rule runs before every section header, every entry and
//!   every skill row, never in the middle of an entry.
//! - A single cursor only moves down, or to the top margin of a new page.
//!
//! The pass is pure and synchronous. Async callers run it on a blocking thread.

use tracing::debug;

use crate::layout::command::{Alignment, DrawCommand, LayoutResult, TextBlock, TextRole};
use crate::layout::config::LayoutConfig;
use crate::layout::cursor::LayoutCursor;
use crate::layout::error::LayoutError;
use crate::layout::font_metrics::{get_metrics, FontMetricTable};
use crate::layout::wrap::wrap_text;
use crate::models::resume::{Education, Experience, PersonalInfo, ResumeDocument, Skill};

/// Stateless engine; every call to `layout` owns its own cursor.
#[derive(Debug, Clone)]
pub struct PaginatedLayoutEngine {
    config: LayoutConfig,
}

impl PaginatedLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        PaginatedLayoutEngine { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out a full résumé. Either every command is produced or none are.
    pub fn layout(&self, document: &ResumeDocument) -> Result<LayoutResult, LayoutError> {
        document.validate()?;

        let mut pass = LayoutPass::new(&self.config);
        pass.header(&document.personal_info)?;
        pass.experience_section(&document.experiences)?;
        pass.education_section(&document.education)?;
        pass.skills_section(&document.skills)?;

        let result = pass.finish();
        debug!(
            commands = result.commands.len(),
            pages = result.page_count,
            "Résumé layout complete"
        );
        Ok(result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Single layout pass
// ────────────────────────────────────────────────────────────────────────────

struct LayoutPass<'a> {
    config: &'a LayoutConfig,
    metrics: &'static FontMetricTable,
    cursor: LayoutCursor,
    commands: Vec<DrawCommand>,
}

impl<'a> LayoutPass<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        LayoutPass {
            config,
            metrics: get_metrics(&config.font),
            cursor: LayoutCursor::new(
                config.content_start_y,
                config.top_margin,
                config.usable_height,
            ),
            commands: Vec::new(),
        }
    }

    fn finish(self) -> LayoutResult {
        LayoutResult {
            page_count: self.cursor.page_count(),
            commands: self.commands,
        }
    }

    fn header(&mut self, info: &PersonalInfo) -> Result<(), LayoutError> {
        let cfg = self.config;
        self.emit(
            TextBlock::Line(info.name.clone()),
            TextRole::Title,
            cfg.header_center_x,
            cfg.title_y,
            Alignment::Center,
        )?;
        self.emit(
            TextBlock::Line(info.role.clone()),
            TextRole::Subtitle,
            cfg.header_center_x,
            cfg.subtitle_y,
            Alignment::Center,
        )
    }

    fn section_header(&mut self, title: &str) -> Result<(), LayoutError> {
        self.page_break_rule(0.0);
        self.emit_at_cursor(TextBlock::Line(title.to_string()), TextRole::SectionHeader)?;
        self.cursor.advance(self.config.section_header_advance);
        Ok(())
    }

    fn experience_section(&mut self, experiences: &[Experience]) -> Result<(), LayoutError> {
        let cfg = self.config;
        self.section_header(&cfg.section_titles.experience)?;
        for exp in experiences {
            self.experience_entry(exp)?;
        }
        Ok(())
    }

    fn experience_entry(&mut self, exp: &Experience) -> Result<(), LayoutError> {
        let cfg = self.config;
        let lh = cfg.line_height;
        let description = wrap_text(
            &exp.description,
            self.metrics,
            cfg.wrap_width,
            cfg.font_sizes.body,
            cfg.points_per_unit,
        );

        // offset of the description's last line below the title
        let extent = lh * (description.len() + 1) as f32;
        self.page_break_rule(extent);

        self.emit_at_cursor(
            TextBlock::Line(format!("{} at {}", exp.title, exp.company)),
            TextRole::EntryTitle,
        )?;
        self.cursor.advance(lh);

        let meta = if exp.location.trim().is_empty() {
            exp.period.clone()
        } else {
            format!("{} | {}", exp.period, exp.location)
        };
        self.emit_at_cursor(TextBlock::Line(meta), TextRole::EntryMeta)?;
        self.cursor.advance(lh);

        self.description_block(description)?;
        self.cursor.advance(cfg.experience_trailing_gap);
        Ok(())
    }

    /// Places wrapped lines as one block. Only an entry already moved to a
    /// fresh page can still be too tall; its remaining lines continue as
    /// further blocks on the following pages.
    fn description_block(&mut self, lines: Vec<String>) -> Result<(), LayoutError> {
        let lh = self.config.line_height;
        let bound = self.cursor.usable_height();
        let mut chunk: Vec<String> = Vec::new();

        for line in lines {
            let line_y = self.cursor.y() + lh * chunk.len() as f32;
            if !chunk.is_empty() && line_y > bound {
                let full = std::mem::take(&mut chunk);
                self.emit_at_cursor(TextBlock::Lines(full), TextRole::Body)?;
                self.cursor.break_page();
                debug!(
                    page = self.cursor.page_index(),
                    "Description continues on next page"
                );
            }
            chunk.push(line);
        }

        let count = chunk.len();
        self.emit_at_cursor(TextBlock::Lines(chunk), TextRole::Body)?;
        self.cursor.advance(lh * count as f32);
        Ok(())
    }

    fn education_section(&mut self, education: &[Education]) -> Result<(), LayoutError> {
        let cfg = self.config;
        self.section_header(&cfg.section_titles.education)?;
        for edu in education {
            self.education_entry(edu)?;
        }
        Ok(())
    }

    fn education_entry(&mut self, edu: &Education) -> Result<(), LayoutError> {
        let lh = self.config.line_height;
        self.page_break_rule(lh);

        self.emit_at_cursor(TextBlock::Line(edu.degree.clone()), TextRole::EntryTitle)?;
        self.cursor.advance(lh);
        self.emit_at_cursor(
            TextBlock::Line(format!("{}, {}", edu.institution, edu.year)),
            TextRole::EntryMeta,
        )?;
        self.cursor.advance(lh + self.config.education_trailing_gap);
        Ok(())
    }

    fn skills_section(&mut self, skills: &[Skill]) -> Result<(), LayoutError> {
        let cfg = self.config;
        self.section_header(&cfg.section_titles.skills)?;
        for row in skills.chunks(cfg.skills_per_row.max(1)) {
            self.page_break_rule(0.0);
            let names: Vec<&str> = row.iter().map(|s| s.name.as_str()).collect();
            self.emit_at_cursor(
                TextBlock::Line(names.join(&cfg.skill_separator)),
                TextRole::Skill,
            )?;
            self.cursor.advance(cfg.line_height);
        }
        Ok(())
    }

    // ── placement helpers ───────────────────────────────────────────────────

    fn page_break_rule(&mut self, extent: f32) {
        let from_y = self.cursor.y();
        if self.cursor.ensure_room(extent) {
            debug!(
                page = self.cursor.page_index(),
                from_y,
                extent,
                "Page break"
            );
        }
    }

    fn emit_at_cursor(&mut self, text: TextBlock, role: TextRole) -> Result<(), LayoutError> {
        let (x, y) = (self.config.left_margin, self.cursor.y());
        self.emit(text, role, x, y, Alignment::Left)
    }

    /// Bound check plus push. The check covers the last line of a block.
    fn emit(
        &mut self,
        text: TextBlock,
        role: TextRole,
        x: f32,
        y: f32,
        alignment: Alignment,
    ) -> Result<(), LayoutError> {
        let bound = self.cursor.usable_height();
        let last_y = y + self.config.line_height * text.line_count().saturating_sub(1) as f32;
        if last_y > bound {
            return Err(LayoutError::Overflow {
                page_index: self.cursor.page_index(),
                y: last_y,
                bound,
            });
        }

        self.commands.push(DrawCommand {
            page_index: self.cursor.page_index(),
            text,
            role,
            font_size: font_size_for(self.config, role),
            x,
            y,
            alignment,
        });
        Ok(())
    }
}

fn font_size_for(config: &LayoutConfig, role: TextRole) -> f32 {
    let sizes = &config.font_sizes;
    match role {
        TextRole::Title => sizes.title,
        TextRole::Subtitle => sizes.subtitle,
        TextRole::SectionHeader => sizes.section_header,
        TextRole::EntryTitle => sizes.entry_title,
        TextRole::EntryMeta => sizes.entry_meta,
        TextRole::Body => sizes.body,
        TextRole::Skill => sizes.skill,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
