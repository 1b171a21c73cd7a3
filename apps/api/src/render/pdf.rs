//! PDF adapter: writes a `LayoutResult` as a PDF 1.7 document with pdf-writer.
//!
//! Layout coordinates are top-down in layout units; PDF user space is
//! bottom-up in points. Every baseline is mapped through
//! `(x * k, (page_height - y) * k)` with `k = points_per_unit`.
//! Text uses a single unembedded base-14 font with WinAnsiEncoding.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use thiserror::Error;

use crate::layout::font_metrics::{get_metrics, FontMetricTable};
use crate::layout::{Alignment, DrawCommand, LayoutConfig, LayoutResult};

const FONT_NAME: Name<'static> = Name(b"F1");
const PRODUCER: &str = concat!("portfolio-api ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Layout has no pages")]
    EmptyLayout,

    #[error("Command on page {page_index} but layout has {page_count} pages")]
    PageOutOfRange { page_index: u32, page_count: u32 },
}

/// Renders all pages of `layout` and returns the finished PDF bytes.
pub fn render_pdf(
    layout: &LayoutResult,
    config: &LayoutConfig,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    if layout.page_count == 0 {
        return Err(RenderError::EmptyLayout);
    }
    let page_count = layout.page_count as usize;
    let metrics = get_metrics(&config.font);

    if let Some(stray) = layout
        .commands
        .iter()
        .find(|c| c.page_index >= layout.page_count)
    {
        return Err(RenderError::PageOutOfRange {
            page_index: stray.page_index,
            page_count: layout.page_count,
        });
    }

    let contents: Vec<Content> = (0..layout.page_count)
        .map(|page_index| {
            let mut content = Content::new();
            for cmd in layout.page(page_index) {
                write_command(&mut content, cmd, metrics, config);
            }
            content
        })
        .collect();

    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };
    let catalog_id = alloc();
    let page_tree_id = alloc();
    let font_id = alloc();
    let info_id = alloc();
    let page_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..page_count).map(|_| alloc()).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_count as i32);
    pdf.type1_font(font_id)
        .base_font(Name(config.font.base_font_name().as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let k = config.points_per_unit;
    for (i, content) in contents.into_iter().enumerate() {
        {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(
                0.0,
                0.0,
                config.page_width * k,
                config.page_height * k,
            ))
            .parent(page_tree_id)
            .contents(content_ids[i]);
            let mut resources = page.resources();
            resources.fonts().pair(FONT_NAME, font_id);
            resources.finish();
            page.finish();
        }
        pdf.stream(content_ids[i], &content.finish());
    }

    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(PRODUCER));

    Ok(pdf.finish())
}

fn write_command(
    content: &mut Content,
    cmd: &DrawCommand,
    metrics: &FontMetricTable,
    config: &LayoutConfig,
) {
    let k = config.points_per_unit;
    for (i, line) in cmd.text.lines().into_iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = cmd.y + config.line_height * i as f32;
        let width = metrics.text_width(line, cmd.font_size, k);
        let x = aligned_x(cmd.x, width, cmd.alignment);
        let encoded = encode_win_ansi(line);

        content.begin_text();
        content.set_font(FONT_NAME, cmd.font_size);
        content.next_line(x * k, (config.page_height - y) * k);
        content.show(Str(&encoded));
        content.end_text();
    }
}

/// Left edge of a line of `width` anchored at `x`.
fn aligned_x(x: f32, width: f32, alignment: Alignment) -> f32 {
    match alignment {
        Alignment::Left => x,
        Alignment::Center => x - width / 2.0,
        Alignment::Right => x - width,
    }
}

/// Encodes text for a base-14 font's WinAnsiEncoding. Characters the
/// encoding cannot represent become `?`; control characters become spaces.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            c if c.is_control() => b' ',
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
