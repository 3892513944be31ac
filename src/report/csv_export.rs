use std::io::Write;

use csv::WriterBuilder;

use crate::error::Result;
use crate::models::AnalysisResult;
use crate::report::{ReportRow, HEADERS};

/// Writes every comment as one CSV row. The header is always present, even
/// for an empty result.
pub fn write_csv<W: Write>(result: &AnalysisResult, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADERS)?;
    for comment in result.iter() {
        wtr.serialize(ReportRow::from(comment))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnotatedComment, Annotation, Comment, RawComment, Sentiment};

    #[test]
    fn test_header_and_rows() {
        let result: AnalysisResult = vec![AnnotatedComment {
            comment: Comment::new(
                RawComment {
                    author: "@ana".to_string(),
                    text: "Precio, por favor".to_string(),
                    like_count: 4,
                    reply_count: 2,
                    ..Default::default()
                },
                "precio, por favor".to_string(),
            ),
            annotation: Annotation {
                sentiment: Sentiment::Neutral,
                confidence: 0.5,
                toxicity: None,
                is_lead: true,
                is_question: false,
            },
        }]
        .into_iter()
        .collect();

        let mut buf = Vec::new();
        write_csv(&result, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "Author,Comment,Sentiment,Confidence,Safety,Lead,Question,Likes,Replies,Published"
        );
        assert_eq!(lines[1], "@ana,\"Precio, por favor\",Neutral,0.5,,true,false,4,2,");
    }

    #[test]
    fn test_empty_result_has_header_only() {
        let mut buf = Vec::new();
        write_csv(&AnalysisResult::default(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
