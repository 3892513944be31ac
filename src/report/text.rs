use crate::analysis::AnalysisReport;
use crate::models::{Sentiment, TopComment};

const EXCERPT_CHARS: usize = 90;

fn excerpt(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(EXCERPT_CHARS).collect();
        format!("{}…", cut)
    }
}

fn sentiment_marker(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "+",
        Sentiment::Neutral => "=",
        Sentiment::Negative => "-",
    }
}

pub fn format_text(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    output.push_str(&format!("\n=== Audience Analysis: {} ===\n\n", report.video_id));
    output.push_str(&format!("Comments analyzed: {}", summary.total));
    if report.partial {
        output.push_str(&format!(" (video has fewer than {} requested)", report.requested));
    }
    output.push('\n');

    if let Some(dominant) = summary.dominant() {
        output.push_str(&format!("Dominant sentiment: {}\n", dominant));
    }

    output.push_str("\nSentiment:\n");
    for share in &summary.sentiments {
        output.push_str(&format!(
            "  {} {:<9} {:>5}  ({:.1}%)\n",
            sentiment_marker(share.sentiment),
            share.sentiment.label(),
            share.count,
            share.percentage
        ));
    }

    output.push_str(&format!(
        "\nLeads: {} ({:.1}%)\nQuestions: {} ({:.1}%)\n",
        summary.leads, summary.lead_percentage, summary.questions, summary.question_percentage
    ));
    if let Some(flagged) = summary.flagged {
        output.push_str(&format!("Flagged for brand safety: {}\n", flagged));
    }

    for sentiment in Sentiment::ALL {
        let top = summary.top(sentiment);
        if top.is_empty() {
            continue;
        }
        output.push_str(&format!("\nTop {} comments:\n", sentiment.label().to_lowercase()));
        for comment in top {
            output.push_str(&format!(
                "  - [{:.0}%] {}: {}\n",
                comment.confidence * 100.0,
                comment.author,
                excerpt(&comment.text)
            ));
        }
    }

    if !summary.top_liked.is_empty() {
        output.push_str("\nMost liked:\n");
        for comment in &summary.top_liked {
            output.push_str(&format!(
                "  - ({} likes) {}: {}\n",
                comment.like_count,
                comment.author,
                excerpt(&comment.text)
            ));
        }
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn markdown_cell(text: &str) -> String {
    excerpt(text).replace('|', "\\|")
}

fn markdown_top(output: &mut String, title: &str, comments: &[TopComment]) {
    if comments.is_empty() {
        return;
    }
    output.push_str(&format!("\n### {}\n\n", title));
    output.push_str("| Author | Comment | Confidence | Likes |\n");
    output.push_str("|--------|---------|------------|-------|\n");
    for comment in comments {
        output.push_str(&format!(
            "| {} | {} | {:.0}% | {} |\n",
            markdown_cell(&comment.author),
            markdown_cell(&comment.text),
            comment.confidence * 100.0,
            comment.like_count
        ));
    }
}

pub fn format_markdown(report: &AnalysisReport) -> String {
    let summary = &report.summary;
    let mut output = String::new();

    output.push_str(&format!("# Audience Analysis: {}\n\n", report.video_id));
    if report.partial {
        output.push_str(&format!(
            "> Only {} of {} requested comments were available.\n\n",
            summary.total, report.requested
        ));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Count | Share |\n|--------|-------|-------|\n");
    output.push_str(&format!("| Comments | {} | 100% |\n", summary.total));
    for share in &summary.sentiments {
        output.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            share.sentiment.label(),
            share.count,
            share.percentage
        ));
    }
    output.push_str(&format!(
        "| Leads | {} | {:.1}% |\n",
        summary.leads, summary.lead_percentage
    ));
    output.push_str(&format!(
        "| Questions | {} | {:.1}% |\n",
        summary.questions, summary.question_percentage
    ));
    if let Some(flagged) = summary.flagged {
        output.push_str(&format!("| Flagged | {} | |\n", flagged));
    }

    output.push_str("\n## Top Comments\n");
    for sentiment in Sentiment::ALL {
        markdown_top(&mut output, sentiment.label(), summary.top(sentiment));
    }
    markdown_top(&mut output, "Most liked", &summary.top_liked);

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
