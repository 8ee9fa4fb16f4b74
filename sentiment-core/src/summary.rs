//! # Report and Spoken Summary
//!
//! Renders an [`AnalysisResult`] into human-readable text. Two surfaces:
//!
//! - [`render_report`]: a Markdown report for the dashboard — overall
//!   verdict, distribution percentages, the most positive and most negative
//!   sentences, and the dominant topics.
//! - [`render_spoken_summary`]: short plain sentences suitable for the
//!   audio-synthesis collaborator downstream; no markup, no symbols a TTS
//!   engine would stumble over.
//!
//! Rendering never fails and makes no assumption about how (or whether) the
//! output is displayed.

use crate::aggregate::SentimentLabel;
use crate::pipeline::AnalysisResult;
use crate::scorer::SentenceScore;

fn label_word(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "positive",
        SentimentLabel::Neutral => "neutral",
        SentimentLabel::Negative => "negative",
    }
}

fn most_positive(scores: &[SentenceScore]) -> Option<&SentenceScore> {
    scores
        .iter()
        .max_by(|a, b| a.valence.total_cmp(&b.valence))
}

fn most_negative(scores: &[SentenceScore]) -> Option<&SentenceScore> {
    scores
        .iter()
        .min_by(|a, b| a.valence.total_cmp(&b.valence))
}

/// Renders the full Markdown report.
pub fn render_report(subject: &str, result: &AnalysisResult, topics: &[String]) -> String {
    let mut report = String::new();
    report.push_str(&format!("## Sentiment Analysis Report for {subject}\n\n"));

    if result.sentence_count == 0 {
        report.push_str("No analyzable sentences were found in the input.\n");
        return report;
    }

    report.push_str(&format!(
        "Across {} sentences the overall sentiment toward {} is **{}** \
         with an average score of **{:.2}** (scale -1 to 1).\n\n",
        result.sentence_count,
        subject,
        label_word(result.label).to_uppercase(),
        result.overall_score,
    ));

    report.push_str("### Distribution\n");
    report.push_str(&format!(
        "- Positive sentences: {:.1}%\n- Neutral sentences: {:.1}%\n- Negative sentences: {:.1}%\n\n",
        result.positive_ratio * 100.0,
        result.neutral_ratio * 100.0,
        result.negative_ratio * 100.0,
    ));

    if result.language.was_translated {
        report.push_str(&format!(
            "The source text was translated from '{}' before scoring.\n\n",
            result.language.original
        ));
    } else if result.language.fallback {
        report.push_str(&format!(
            "Note: the text appears to be in '{}' but was scored untranslated.\n\n",
            result.language.original
        ));
    }

    if let Some(best) = most_positive(&result.sentence_scores) {
        if best.valence > 0.0 {
            report.push_str("### Most positive sentence\n");
            report.push_str(&format!("> {} ({:.2})\n\n", best.text, best.valence));
        }
    }
    if let Some(worst) = most_negative(&result.sentence_scores) {
        if worst.valence < 0.0 {
            report.push_str("### Most negative sentence\n");
            report.push_str(&format!("> {} ({:.2})\n\n", worst.text, worst.valence));
        }
    }

    if !topics.is_empty() {
        report.push_str("### Dominant topics\n");
        for topic in topics {
            report.push_str(&format!("- {topic}\n"));
        }
        report.push('\n');
    }

    report.push_str("### Reading\n");
    if result.positive_ratio > result.negative_ratio + 0.2 {
        report.push_str(&format!(
            "{subject} is receiving predominantly positive coverage in this text.\n"
        ));
    } else if result.negative_ratio > result.positive_ratio + 0.2 {
        report.push_str(&format!(
            "{subject} faces notably negative coverage in this text.\n"
        ));
    } else {
        report.push_str(&format!(
            "Coverage of {subject} is mixed or balanced in this text.\n"
        ));
    }

    report
}

/// Renders the short plain-text summary handed to audio synthesis.
pub fn render_spoken_summary(subject: &str, result: &AnalysisResult) -> String {
    if result.sentence_count == 0 {
        return format!("No analyzable content was found for {subject}.");
    }
    format!(
        "Sentiment report for {subject}. Based on {} sentences, the overall sentiment is {}. \
         {:.0} percent of sentences were positive, {:.0} percent neutral, and {:.0} percent negative. \
         The average sentiment score was {:.2} on a scale from minus one to one.",
        result.sentence_count,
        label_word(result.label),
        result.positive_ratio * 100.0,
        result.neutral_ratio * 100.0,
        result.negative_ratio * 100.0,
        result.overall_score,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::LanguageInfo;

    fn result_with(scores: Vec<(f64, &str)>) -> AnalysisResult {
        let sentence_scores: Vec<SentenceScore> = scores
            .iter()
            .map(|(v, t)| SentenceScore {
                text: t.to_string(),
                valence: *v,
                matched_terms: vec![],
            })
            .collect();
        let count = sentence_scores.len();
        let positive = sentence_scores.iter().filter(|s| s.valence > 0.05).count();
        let negative = sentence_scores.iter().filter(|s| s.valence < -0.05).count();
        let overall = if count == 0 {
            0.0
        } else {
            sentence_scores.iter().map(|s| s.valence).sum::<f64>() / count as f64
        };
        AnalysisResult {
            overall_score: overall,
            label: if overall > 0.05 {
                SentimentLabel::Positive
            } else if overall < -0.05 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            },
            positive_ratio: if count == 0 { 0.0 } else { positive as f64 / count as f64 },
            negative_ratio: if count == 0 { 0.0 } else { negative as f64 / count as f64 },
            neutral_ratio: if count == 0 {
                0.0
            } else {
                (count - positive - negative) as f64 / count as f64
            },
            sentence_count: count,
            sentence_scores,
            language: LanguageInfo {
                original: "en".into(),
                was_translated: false,
                fallback: false,
            },
        }
    }

    #[test]
    fn test_report_names_subject_and_verdict() {
        let result = result_with(vec![(0.6, "Strong growth."), (0.1, "Fine quarter.")]);
        let report = render_report("Acme", &result, &[]);
        assert!(report.contains("Acme"));
        assert!(report.contains("POSITIVE"));
    }

    #[test]
    fn test_report_quotes_extreme_sentences() {
        let result = result_with(vec![
            (0.8, "Record profits delighted investors."),
            (-0.7, "The lawsuit alarmed shareholders."),
        ]);
        let report = render_report("Acme", &result, &[]);
        assert!(report.contains("Record profits delighted investors."));
        assert!(report.contains("The lawsuit alarmed shareholders."));
    }

    #[test]
    fn test_report_empty_result() {
        let result = result_with(vec![]);
        let report = render_report("Acme", &result, &[]);
        assert!(report.contains("No analyzable sentences"));
    }

    #[test]
    fn test_report_lists_topics() {
        let result = result_with(vec![(0.2, "x")]);
        let report = render_report("Acme", &result, &["cloud revenue".to_string()]);
        assert!(report.contains("cloud revenue"));
    }

    #[test]
    fn test_spoken_summary_is_plain_text() {
        let result = result_with(vec![(0.6, "Great."), (-0.2, "Concerning.")]);
        let spoken = render_spoken_summary("Acme", &result);
        assert!(!spoken.contains('*'));
        assert!(!spoken.contains('#'));
        assert!(!spoken.contains('%'));
        assert!(spoken.contains("Acme"));
    }
}
