use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::analysis::AnalysisReport;
use crate::error::Result;
use crate::models::{AnalysisResult, AnnotatedComment, Sentiment, Toxicity};
use crate::report::{ReportRow, HEADERS};

/// Fixed sheets, in workbook order. `Flagged` is appended when the run
/// computed toxicity.
pub const SHEET_NAMES: [&str; 7] = [
    "Summary",
    "All Comments",
    "Leads",
    "Questions",
    "Positive",
    "Neutral",
    "Negative",
];
pub const FLAGGED_SHEET: &str = "Flagged";

const GREEN: u32 = 0xC6EFCE;
const YELLOW: u32 = 0xFFEB9C;
const RED: u32 = 0xFFC7CE;

const COLUMN_WIDTHS: [f64; 10] = [22.0, 70.0, 12.0, 12.0, 10.0, 8.0, 10.0, 8.0, 9.0, 18.0];

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::RGB(GREEN),
        Sentiment::Neutral => Color::RGB(YELLOW),
        Sentiment::Negative => Color::RGB(RED),
    }
}

pub fn safety_color(toxicity: Toxicity) -> Color {
    match toxicity {
        Toxicity::Safe => Color::RGB(GREEN),
        Toxicity::Flagged => Color::RGB(RED),
    }
}

struct Formats {
    header: Format,
    percent: Format,
    decimal: Format,
    wrap: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0x1F1F1F))
                .set_font_color(Color::White),
            percent: Format::new().set_num_format("0.0%"),
            decimal: Format::new().set_num_format("0.000"),
            wrap: Format::new().set_text_wrap(),
        }
    }

    fn fill(color: Color) -> Format {
        Format::new().set_background_color(color)
    }
}

/// Multi-sheet workbook for one analysis run.
pub struct SpreadsheetReport<'a> {
    report: &'a AnalysisReport,
}

impl<'a> SpreadsheetReport<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self { report }
    }

    /// Comment sheets and the rows that go on each.
    pub fn comment_sheets(result: &AnalysisResult) -> Vec<(&'static str, Vec<&AnnotatedComment>)> {
        let mut sheets = vec![
            (SHEET_NAMES[1], result.iter().collect()),
            (SHEET_NAMES[2], result.leads().collect()),
            (SHEET_NAMES[3], result.questions().collect()),
            (SHEET_NAMES[4], result.with_sentiment(Sentiment::Positive).collect()),
            (SHEET_NAMES[5], result.with_sentiment(Sentiment::Neutral).collect()),
            (SHEET_NAMES[6], result.with_sentiment(Sentiment::Negative).collect()),
        ];
        if result.has_toxicity() {
            sheets.push((FLAGGED_SHEET, result.flagged().collect()));
        }
        sheets
    }

    pub fn build(&self) -> Result<Workbook> {
        let formats = Formats::new();
        let mut workbook = Workbook::new();

        let summary_sheet = workbook.add_worksheet();
        self.write_summary(summary_sheet, &formats)?;

        for (name, rows) in Self::comment_sheets(&self.report.result) {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name)?;
            write_comment_rows(worksheet, &rows, &formats)?;
        }

        Ok(workbook)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = self.build()?;
        workbook.save(path.as_ref())?;
        tracing::info!("Spreadsheet written to: {}", path.as_ref().display());
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = self.build()?;
        Ok(workbook.save_to_buffer()?)
    }

    fn write_summary(&self, worksheet: &mut Worksheet, formats: &Formats) -> Result<()> {
        let summary = &self.report.summary;
        worksheet.set_name(SHEET_NAMES[0])?;
        worksheet.set_column_width(0, 28)?;
        worksheet.set_column_width(1, 16)?;
        worksheet.set_column_width(2, 12)?;

        worksheet.write_string_with_format(0, 0, "Metric", &formats.header)?;
        worksheet.write_string_with_format(0, 1, "Count", &formats.header)?;
        worksheet.write_string_with_format(0, 2, "Share", &formats.header)?;

        let mut row = 1;
        worksheet.write_string(row, 0, "Video ID")?;
        worksheet.write_string(row, 1, self.report.video_id.as_str())?;
        row += 1;
        worksheet.write_string(row, 0, "Analyzed at (UTC)")?;
        worksheet.write_string(
            row,
            1,
            self.report.analyzed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        )?;
        row += 1;
        worksheet.write_string(row, 0, "Comments requested")?;
        worksheet.write_number(row, 1, self.report.requested)?;
        row += 1;
        worksheet.write_string(row, 0, "Comments analyzed")?;
        worksheet.write_number(row, 1, summary.total as f64)?;
        row += 1;

        for share in &summary.sentiments {
            worksheet.write_string_with_format(
                row,
                0,
                share.sentiment.label(),
                &Formats::fill(sentiment_color(share.sentiment)),
            )?;
            worksheet.write_number(row, 1, share.count as f64)?;
            worksheet.write_number_with_format(row, 2, share.percentage / 100.0, &formats.percent)?;
            row += 1;
        }

        worksheet.write_string(row, 0, "Leads")?;
        worksheet.write_number(row, 1, summary.leads as f64)?;
        worksheet.write_number_with_format(row, 2, summary.lead_percentage / 100.0, &formats.percent)?;
        row += 1;

        worksheet.write_string(row, 0, "Questions")?;
        worksheet.write_number(row, 1, summary.questions as f64)?;
        worksheet.write_number_with_format(
            row,
            2,
            summary.question_percentage / 100.0,
            &formats.percent,
        )?;
        row += 1;

        if let Some(flagged) = summary.flagged {
            worksheet.write_string_with_format(
                row,
                0,
                "Flagged (brand safety)",
                &Formats::fill(safety_color(Toxicity::Flagged)),
            )?;
            worksheet.write_number(row, 1, flagged as f64)?;
            worksheet.write_number_with_format(
                row,
                2,
                crate::analysis::aggregator::percentage(flagged, summary.total) / 100.0,
                &formats.percent,
            )?;
        }

        Ok(())
    }
}

fn write_comment_rows(
    worksheet: &mut Worksheet,
    rows: &[&AnnotatedComment],
    formats: &Formats,
) -> Result<()> {
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
        worksheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (i, comment) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        let record = ReportRow::from(*comment);

        worksheet.write_string(row, 0, record.author.as_str())?;
        worksheet.write_string_with_format(row, 1, record.comment.as_str(), &formats.wrap)?;
        worksheet.write_string_with_format(
            row,
            2,
            record.sentiment,
            &Formats::fill(sentiment_color(comment.annotation.sentiment)),
        )?;
        worksheet.write_number_with_format(row, 3, record.confidence, &formats.decimal)?;
        if let Some(toxicity) = comment.annotation.toxicity {
            worksheet.write_string_with_format(
                row,
                4,
                record.safety,
                &Formats::fill(safety_color(toxicity)),
            )?;
        }
        worksheet.write_boolean(row, 5, record.lead)?;
        worksheet.write_boolean(row, 6, record.question)?;
        worksheet.write_number(row, 7, record.likes as f64)?;
        worksheet.write_number(row, 8, record.replies as f64)?;
        worksheet.write_string(row, 9, record.published.as_str())?;
    }

    if !rows.is_empty() {
        worksheet.autofilter(0, 0, rows.len() as u32, (HEADERS.len() - 1) as u16)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Aggregator;
    use crate::models::{Annotation, Comment, RawComment};
    use chrono::Utc;

    fn result(with_toxicity: bool) -> AnalysisResult {
        let rows = [
            ("precio?", Sentiment::Neutral, true, true, Toxicity::Safe),
            ("me encanta", Sentiment::Positive, false, false, Toxicity::Safe),
            ("idiota", Sentiment::Negative, false, false, Toxicity::Flagged),
        ];
        rows.iter()
            .map(|(text, sentiment, lead, question, toxicity)| AnnotatedComment {
                comment: Comment::new(
                    RawComment {
                        author: "viewer".to_string(),
                        text: text.to_string(),
                        ..Default::default()
                    },
                    text.to_string(),
                ),
                annotation: Annotation {
                    sentiment: *sentiment,
                    confidence: 0.8,
                    toxicity: with_toxicity.then_some(*toxicity),
                    is_lead: *lead,
                    is_question: *question,
                },
            })
            .collect()
    }

    fn report(result: AnalysisResult) -> AnalysisReport {
        AnalysisReport {
            video_id: "dQw4w9WgXcQ".to_string(),
            requested: 3,
            partial: false,
            analyzed_at: Utc::now(),
            summary: Aggregator::default().summarize(&result),
            result,
        }
    }

    #[test]
    fn test_sheet_slices() {
        let result = result(false);
        let sheets = SpreadsheetReport::comment_sheets(&result);
        let counts: Vec<(&str, usize)> = sheets.iter().map(|(n, r)| (*n, r.len())).collect();
        assert_eq!(
            counts,
            vec![
                ("All Comments", 3),
                ("Leads", 1),
                ("Questions", 1),
                ("Positive", 1),
                ("Neutral", 1),
                ("Negative", 1),
            ]
        );
    }

    #[test]
    fn test_flagged_sheet_only_with_toxicity() {
        let result = result(true);
        let sheets = SpreadsheetReport::comment_sheets(&result);
        let (name, rows) = sheets.last().unwrap();
        assert_eq!(*name, FLAGGED_SHEET);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(sentiment_color(Sentiment::Positive), Color::RGB(GREEN));
        assert_eq!(sentiment_color(Sentiment::Neutral), Color::RGB(YELLOW));
        assert_eq!(sentiment_color(Sentiment::Negative), Color::RGB(RED));
        assert_eq!(safety_color(Toxicity::Flagged), Color::RGB(RED));
    }

    #[test]
    fn test_workbook_serializes() {
        let report = report(result(true));
        let bytes = SpreadsheetReport::new(&report).to_bytes().unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_empty_workbook_serializes() {
        let report = report(AnalysisResult::default());
        let bytes = SpreadsheetReport::new(&report).to_bytes().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
