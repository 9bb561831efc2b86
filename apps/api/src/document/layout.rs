//! Annual report layout as plain data.
//!
//! Widths are percentages of the table width. Shading values are hex fills.

use crate::config::ReportSettings;
use crate::models::report::{ReportContent, ReportField};
use crate::models::student::{Progress, StudentRecord};
use crate::report::catalog::{skill_values, SkillGroupValues, EFFECTIVE_LEARNING};

/// Fill for table header rows.
pub const HEADER_FILL: &str = "ADD8E6";
/// Fill marking the level a child has reached.
pub const GREEN: &str = "92D050";

pub const LOGO_WIDTH_PX: u32 = 300;
pub const LOGO_HEIGHT_PX: u32 = 210;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    /// Half-points.
    pub size: Option<usize>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            bold: false,
            size: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            bold: true,
            size: None,
        }
    }

    fn sized(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Para {
    pub spans: Vec<Span>,
    pub align: Align,
    pub style: Option<&'static str>,
    pub bullet: bool,
    /// Twips.
    pub space_before: u32,
    /// Twips.
    pub space_after: u32,
}

impl Para {
    pub fn empty() -> Self {
        Para {
            spans: Vec::new(),
            align: Align::Left,
            style: None,
            bullet: false,
            space_before: 0,
            space_after: 0,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Para::empty().span(Span::plain(text))
    }

    pub fn span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    fn styled(mut self, style: &'static str) -> Self {
        self.style = Some(style);
        self
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    fn spacing(mut self, before: u32, after: u32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    /// Concatenated text of all spans.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    Restart,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub paragraphs: Vec<Para>,
    pub width_pct: usize,
    pub fill: Option<&'static str>,
    pub column_span: usize,
    pub vertical_merge: Option<Merge>,
}

impl Cell {
    pub fn new(width_pct: usize) -> Self {
        Cell {
            paragraphs: Vec::new(),
            width_pct,
            fill: None,
            column_span: 1,
            vertical_merge: None,
        }
    }

    pub fn para(mut self, para: Para) -> Self {
        self.paragraphs.push(para);
        self
    }

    fn fill(mut self, fill: Option<&'static str>) -> Self {
        self.fill = fill;
        self
    }

    fn span(mut self, columns: usize) -> Self {
        self.column_span = columns;
        self
    }

    fn merge(mut self, merge: Merge) -> Self {
        self.vertical_merge = Some(merge);
        self
    }

    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Para::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub type Row = Vec<Cell>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Para),
    Table(Vec<Row>),
    PageBreak,
    Logo,
}

// ────────────────────────────────────────────────────────────────────────────
// Full report
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the report.
///
/// The first page carries effective learning and signatures on the left and the
/// cover (logo, title, name, class, attendance) on the right; the second page
/// carries the skills and Religious Education tables.
pub fn report_layout(
    record: &StudentRecord,
    content: &ReportContent,
    settings: &ReportSettings,
) -> Vec<Block> {
    let mut blocks = vec![
        Block::Table(effective_learning_table(content)),
        Block::Paragraph(Para::empty().spacing(0, 400)),
        Block::Table(signature_table(&settings.class_teachers)),
        Block::PageBreak,
    ];

    if settings.logo.is_some() {
        blocks.push(Block::Logo);
    }

    blocks.extend([
        Block::Paragraph(
            Para::empty()
                .span(Span::bold(format!("ANNUAL REPORT {}", settings.academic_year)).sized(36))
                .centered()
                .spacing(1600, 400),
        ),
        Block::Paragraph(
            Para::empty()
                .span(Span::bold(record.student_name.trim()).sized(36))
                .centered()
                .spacing(0, 400),
        ),
        Block::Paragraph(
            Para::empty()
                .span(Span::plain(settings.class_name.as_str()).sized(24))
                .centered()
                .spacing(0, 1600),
        ),
        Block::Table(attendance_table(
            record.attendance.trim(),
            &settings.attendance_target,
        )),
        Block::PageBreak,
        Block::Table(skills_table(&skill_values(record, Some(content)))),
        Block::Paragraph(Para::empty()),
        Block::Table(religious_education_table(
            record.religious_education_progress,
            content,
        )),
    ]);

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Tables
// ────────────────────────────────────────────────────────────────────────────

pub fn effective_learning_table(content: &ReportContent) -> Vec<Row> {
    let mut rows = vec![vec![Cell::new(100)
        .fill(Some(HEADER_FILL))
        .span(2)
        .para(Para::text("Characteristics of Effective Learning"))]];

    for item in EFFECTIVE_LEARNING {
        let mut label = Cell::new(33).para(Para::text(item.label).styled("Label"));
        for bullet in item.bullets {
            let mut para = Para::text(*bullet);
            para.bullet = true;
            label = label.para(para);
        }
        rows.push(vec![
            label,
            Cell::new(66).para(Para::text(content.get(item.field))),
        ]);
    }
    rows
}

pub fn signature_table(class_teachers: &str) -> Vec<Row> {
    vec![
        vec![
            Cell::new(20).merge(Merge::Restart).para(Para::text("Signed")),
            Cell::new(40).para(Para::text(class_teachers)),
            Cell::new(40).para(Para::text("Class Teachers")),
        ],
        vec![
            Cell::new(20).merge(Merge::Continue),
            Cell::new(40),
            Cell::new(40).para(Para::text("Academy Principal")),
        ],
    ]
}

pub fn attendance_table(attendance: &str, target: &str) -> Vec<Row> {
    vec![
        vec![Cell::new(100)
            .fill(Some(HEADER_FILL))
            .para(Para::text("Percentage Attendance"))],
        vec![Cell::new(100).para(Para::text(format!("Attendance: {attendance}")))],
        vec![Cell::new(100).para(Para::text(format!(
            "At this school {target} or above is considered acceptable attendance."
        )))],
    ]
}

pub fn skills_table(groups: &[SkillGroupValues<'_>]) -> Vec<Row> {
    let header = |text: &str, width: usize| {
        Cell::new(width)
            .fill(Some(HEADER_FILL))
            .para(Para::text(text).styled("TableGroupHeader"))
    };

    let mut rows = Vec::new();
    for group in groups {
        rows.push(vec![
            header(group.title, 70),
            header("Emerging", 15),
            header("Expected", 15),
        ]);

        for skill in &group.skills {
            rows.push(vec![
                Cell::new(70).para(Para::text(skill.label).styled("TableSkillsLabel")),
                Cell::new(15).fill((!skill.value).then_some(GREEN)),
                Cell::new(15).fill(skill.value.then_some(GREEN)),
            ]);
        }

        rows.push(vec![Cell::new(100).span(3).para(
            Para::empty()
                .span(Span::bold("Next Steps: "))
                .span(Span::plain(group.next_steps.unwrap_or_default())),
        )]);
    }
    rows
}

pub fn religious_education_table(
    progress: Option<Progress>,
    content: &ReportContent,
) -> Vec<Row> {
    let mut progress_row = vec![Cell::new(25).para(Para::text("Progress"))];
    for band in Progress::ALL {
        progress_row.push(
            Cell::new(25)
                .fill((progress == Some(band)).then_some(GREEN))
                .para(Para::text(band.label())),
        );
    }

    let header = |text: &str| {
        vec![Cell::new(100)
            .span(4)
            .fill(Some(HEADER_FILL))
            .para(Para::text(text).styled("TableGroupHeader"))]
    };

    vec![
        header("Religious Education"),
        progress_row,
        vec![Cell::new(100).span(4).para(
            Para::empty()
                .span(Span::bold("Comments: ").sized(24))
                .span(
                    Span::plain(content.get(ReportField::ReligiousEducationComments)).sized(24),
                ),
        )],
        header("General Comments"),
        vec![Cell::new(100)
            .span(4)
            .para(Para::text(content.get(ReportField::GeneralComments)))],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::{Skill, SkillToggles};

    fn tables(blocks: &[Block]) -> Vec<&Vec<Row>> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(rows) => Some(rows),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_report_layout_order() {
        let blocks = report_layout(
            &StudentRecord::sample(),
            &ReportContent::sample("t"),
            &ReportSettings::default(),
        );

        assert_eq!(tables(&blocks).len(), 5);
        assert_eq!(
            blocks.iter().filter(|b| **b == Block::PageBreak).count(),
            2
        );
        assert!(!blocks.contains(&Block::Logo), "no logo configured");

        let titles: Vec<String> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) if p.align == Align::Center => Some(p.plain_text()),
                _ => None,
            })
            .collect();
        assert!(titles[0].starts_with("ANNUAL REPORT "));
        assert_eq!(titles[1], "Jane Doe");
        assert_eq!(titles[2], "Reception");
    }

    #[test]
    fn test_logo_is_placed_before_title_when_configured() {
        let settings = ReportSettings {
            logo: Some(b"GIF89a".to_vec()),
            ..ReportSettings::default()
        };
        let blocks = report_layout(
            &StudentRecord::sample(),
            &ReportContent::sample("t"),
            &settings,
        );

        let logo_at = blocks.iter().position(|b| *b == Block::Logo).unwrap();
        assert_eq!(blocks[logo_at - 1], Block::PageBreak);
        assert!(matches!(
            &blocks[logo_at + 1],
            Block::Paragraph(p) if p.plain_text().starts_with("ANNUAL REPORT")
        ));
    }

    #[test]
    fn test_effective_learning_rows_carry_comments() {
        let rows = effective_learning_table(&ReportContent::sample("el"));

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0].column_span, 2);
        assert_eq!(rows[0][0].fill, Some(HEADER_FILL));
        assert_eq!(rows[2][0].paragraphs[0].plain_text(), "Active learning");
        assert_eq!(rows[2][0].paragraphs[0].style, Some("Label"));
        assert_eq!(rows[2][0].paragraphs.len(), 4);
        assert!(rows[2][0].paragraphs[1..].iter().all(|p| p.bullet));
        assert_eq!(rows[2][1].plain_text(), "el activeLearning");
    }

    #[test]
    fn test_skills_table_shades_expected_or_emerging() {
        let mut record = StudentRecord::sample();
        record.skills = SkillToggles::default().with(Skill::Speaking);
        let content = ReportContent::sample("s");
        let rows = skills_table(&skill_values(&record, Some(&content)));

        // 7 headers + 17 skills + 7 next-steps rows
        assert_eq!(rows.len(), 31);

        let listening = &rows[1];
        assert_eq!(listening[0].plain_text(), "Listening, Attention and Understanding");
        assert_eq!(listening[1].fill, Some(GREEN), "emerging");
        assert_eq!(listening[2].fill, None);

        let speaking = &rows[2];
        assert_eq!(speaking[1].fill, None);
        assert_eq!(speaking[2].fill, Some(GREEN), "expected");

        let next_steps = &rows[3];
        assert_eq!(next_steps[0].column_span, 3);
        assert_eq!(
            next_steps[0].plain_text(),
            "Next Steps: s communicationAndLanguageNextSteps"
        );
    }

    #[test]
    fn test_religious_education_highlights_selected_band() {
        let content = ReportContent::sample("re");
        let rows = religious_education_table(Some(Progress::VeryGood), &content);

        let fills: Vec<_> = rows[1].iter().map(|c| c.fill).collect();
        assert_eq!(fills, vec![None, None, None, Some(GREEN)]);
        assert_eq!(rows[2][0].plain_text(), "Comments: re religiousEducationComments");
        assert_eq!(rows[3][0].plain_text(), "General Comments");
        assert_eq!(rows[4][0].plain_text(), "re generalComments");
    }

    #[test]
    fn test_signature_and_attendance_tables() {
        let sig = signature_table("Mrs Smith & Mr Jones");
        assert_eq!(sig[0][0].vertical_merge, Some(Merge::Restart));
        assert_eq!(sig[1][0].vertical_merge, Some(Merge::Continue));
        assert_eq!(sig[0][1].plain_text(), "Mrs Smith & Mr Jones");
        assert_eq!(sig[1][2].plain_text(), "Academy Principal");

        let att = attendance_table("97%", "96%");
        assert_eq!(att[1][0].plain_text(), "Attendance: 97%");
        assert_eq!(
            att[2][0].plain_text(),
            "At this school 96% or above is considered acceptable attendance."
        );
    }
}
