//! Serializes a report layout with `docx-rs`.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    LineSpacing, NumberFormat, Numbering, NumberingId, PageMargin, PageOrientationType,
    Paragraph, Pic, Run, RunFonts, Shading, SpecialIndentType, Start, Style, StyleType, Table,
    TableCell, TableRow, VMergeType, WidthType,
};

use crate::config::ReportSettings;
use crate::document::layout::{Align, Block, Cell, Merge, Para, LOGO_HEIGHT_PX, LOGO_WIDTH_PX};
use crate::errors::AppError;

const BULLET_NUMBERING_ID: usize = 1;

/// A4 landscape, in twips.
const PAGE_WIDTH: u32 = 16838;
const PAGE_HEIGHT: u32 = 11906;
/// 6 mm in twips.
const PAGE_MARGIN: i32 = 340;

const BODY_SIZE: usize = 24;
const EMU_PER_PX: u32 = 9525;
/// Table widths are expressed in fiftieths of a percent.
const PCT_SCALE: usize = 50;

pub fn render_docx(blocks: &[Block], settings: &ReportSettings) -> Result<Vec<u8>, AppError> {
    let fonts = run_fonts(&settings.font);

    let mut docx = Docx::new()
        .page_size(PAGE_WIDTH, PAGE_HEIGHT)
        .page_orient(PageOrientationType::Landscape)
        .page_margin(
            PageMargin::new()
                .top(PAGE_MARGIN)
                .right(PAGE_MARGIN)
                .bottom(PAGE_MARGIN)
                .left(PAGE_MARGIN),
        )
        .default_fonts(fonts.clone())
        .default_size(BODY_SIZE)
        .add_style(
            Style::new("Label", StyleType::Paragraph)
                .name("Label")
                .based_on("Normal")
                .bold(),
        )
        .add_style(
            Style::new("TableGroupHeader", StyleType::Paragraph)
                .name("Table Group Header")
                .based_on("Normal")
                .bold(),
        )
        .add_style(
            Style::new("TableSkillsLabel", StyleType::Paragraph)
                .name("Table Skills Label")
                .based_on("Normal"),
        )
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("\u{2022}"),
                    LevelJc::new("left"),
                )
                .indent(Some(360), Some(SpecialIndentType::Hanging(240)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    for block in blocks {
        docx = match block {
            Block::Paragraph(para) => docx.add_paragraph(paragraph(para, &fonts)),
            Block::Table(rows) => docx.add_table(table(rows, &fonts)),
            Block::PageBreak => {
                docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            }
            Block::Logo => match &settings.logo {
                Some(bytes) => docx.add_paragraph(logo(bytes)),
                None => docx,
            },
        };
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| AppError::Document(format!("Failed to pack docx: {e}")))?;
    Ok(buf.into_inner())
}

fn run_fonts(font: &str) -> RunFonts {
    RunFonts::new().ascii(font).hi_ansi(font).cs(font)
}

fn paragraph(para: &Para, fonts: &RunFonts) -> Paragraph {
    let mut p = Paragraph::new();

    for span in &para.spans {
        let mut run = Run::new().add_text(span.text.as_str()).fonts(fonts.clone());
        if span.bold {
            run = run.bold();
        }
        if let Some(size) = span.size {
            run = run.size(size);
        }
        p = p.add_run(run);
    }

    if let Some(style) = para.style {
        p = p.style(style);
    }
    if para.align == Align::Center {
        p = p.align(AlignmentType::Center);
    }
    if para.bullet {
        p = p.numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0));
    }
    if para.space_before > 0 || para.space_after > 0 {
        p = p.line_spacing(
            LineSpacing::new()
                .before(para.space_before)
                .after(para.space_after),
        );
    }
    p
}

fn table(rows: &[Vec<Cell>], fonts: &RunFonts) -> Table {
    let rows = rows
        .iter()
        .map(|row| TableRow::new(row.iter().map(|c| cell(c, fonts)).collect()))
        .collect();
    Table::new(rows).width(100 * PCT_SCALE, WidthType::Pct)
}

fn cell(cell: &Cell, fonts: &RunFonts) -> TableCell {
    let mut tc = TableCell::new().width(cell.width_pct * PCT_SCALE, WidthType::Pct);

    if let Some(fill) = cell.fill {
        tc = tc.shading(Shading::new().fill(fill));
    }
    if cell.column_span > 1 {
        tc = tc.grid_span(cell.column_span);
    }
    match cell.vertical_merge {
        Some(Merge::Restart) => tc = tc.vertical_merge(VMergeType::Restart),
        Some(Merge::Continue) => tc = tc.vertical_merge(VMergeType::Continue),
        None => {}
    }

    // Word requires at least one paragraph per cell.
    if cell.paragraphs.is_empty() {
        return tc.add_paragraph(Paragraph::new());
    }
    for para in &cell.paragraphs {
        tc = tc.add_paragraph(paragraph(para, fonts));
    }
    tc
}

fn logo(bytes: &[u8]) -> Paragraph {
    let pic = Pic::new_with_dimensions(bytes.to_vec(), LOGO_WIDTH_PX, LOGO_HEIGHT_PX)
        .size(LOGO_WIDTH_PX * EMU_PER_PX, LOGO_HEIGHT_PX * EMU_PER_PX);
    Paragraph::new()
        .add_run(Run::new().add_image(pic))
        .align(AlignmentType::Center)
}
