//! HTML report for single-run analysis
//!
//! A self-contained page with the ranked score table and an inline SVG bar
//! chart of overall scores. Styling comes from an explicit `ReportStyle`
//! value passed to the renderer, never from process-global state.

use crate::report::{MetricRecord, CANONICAL_TEST_CASES};
use crate::score::ScoreRecord;
use std::collections::HashMap;

/// Explicit styling configuration for the rendered report
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub font_family: String,
    /// Base font size in px
    pub font_size: u32,
    /// Title font size in px
    pub title_size: u32,
    /// Fill color of the score bars
    pub bar_color: String,
    /// Header background of the score table
    pub header_color: String,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            font_size: 14,
            title_size: 20,
            bar_color: "#87ceeb".to_string(),
            header_color: "#4a90d9".to_string(),
        }
    }
}

/// HTML report renderer
#[derive(Debug)]
pub struct HtmlReport {
    style: ReportStyle,
}

impl HtmlReport {
    pub fn new(style: ReportStyle) -> Self {
        Self { style }
    }

    /// Escape HTML special characters
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Embedded CSS generated from the style configuration
    fn generate_styles(&self) -> String {
        format!(
            r#"
        body {{
            font-family: {font};
            font-size: {size}px;
            margin: 20px;
            background-color: #f5f5f5;
        }}
        h1 {{
            color: #333;
            font-size: {title}px;
        }}
        table {{
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }}
        th, td {{
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }}
        th {{
            background-color: {header};
            color: white;
            font-weight: bold;
        }}
        tr:nth-child(even) {{
            background-color: #f9f9f9;
        }}
        .score {{
            font-family: monospace;
        }}
        .footer {{
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }}
        "#,
            font = self.style.font_family,
            size = self.style.font_size,
            title = self.style.title_size,
            header = self.style.header_color,
        )
    }

    /// Ranked score table, best overall score first
    fn render_score_table(
        &self,
        records: &HashMap<String, MetricRecord>,
        scores: &HashMap<String, ScoreRecord>,
    ) -> String {
        let mut html = String::new();
        html.push_str("    <table>\n");
        html.push_str(
            "        <tr><th>Rank</th><th>Test Case</th><th>Overall Score</th>\
             <th>Grade</th><th>Jitter (cycles)</th><th>CV</th><th>P99/Avg</th></tr>\n",
        );

        for (rank, (name, score)) in Self::ranked(scores).iter().enumerate() {
            let (jitter, cv) = records
                .get(name.as_str())
                .map_or((0, 0.0), |r| (r.jitter, r.cv));
            html.push_str(&format!(
                "        <tr><td>{}</td><td>{}</td><td class=\"score\">{:.1}</td>\
                 <td>{}</td><td class=\"score\">{}</td><td class=\"score\">{:.4}</td>\
                 <td class=\"score\">{:.3}</td></tr>\n",
                rank + 1,
                Self::escape_html(name),
                score.overall_score,
                score.rt_grade.label(),
                jitter,
                cv,
                score.p99_avg_ratio,
            ));
        }

        html.push_str("    </table>\n");
        html
    }

    /// Inline SVG bar chart of overall scores, canonical test-case order
    fn render_score_chart(&self, scores: &HashMap<String, ScoreRecord>) -> String {
        const BAR_WIDTH: u32 = 90;
        const BAR_GAP: u32 = 30;
        const CHART_HEIGHT: u32 = 240;
        const BASELINE: u32 = 200;

        let present: Vec<&str> = CANONICAL_TEST_CASES
            .iter()
            .copied()
            .filter(|name| scores.contains_key(*name))
            .collect();

        let width = present.len() as u32 * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
        let mut svg = format!(
            "    <svg width=\"{}\" height=\"{}\" role=\"img\">\n",
            width, CHART_HEIGHT
        );

        for (i, name) in present.iter().enumerate() {
            let score = scores[*name].overall_score;
            let bar_height = (score / 100.0 * f64::from(BASELINE - 20)) as u32;
            let x = BAR_GAP + i as u32 * (BAR_WIDTH + BAR_GAP);
            let y = BASELINE - bar_height;

            svg.push_str(&format!(
                "        <rect x=\"{x}\" y=\"{y}\" width=\"{BAR_WIDTH}\" height=\"{bar_height}\" fill=\"{}\"/>\n",
                self.style.bar_color,
            ));
            svg.push_str(&format!(
                "        <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{}\">{:.1}</text>\n",
                x + BAR_WIDTH / 2,
                y.saturating_sub(6),
                self.style.font_size,
                score,
            ));
            svg.push_str(&format!(
                "        <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{}\">{}</text>\n",
                x + BAR_WIDTH / 2,
                BASELINE + 20,
                self.style.font_size - 2,
                Self::escape_html(name),
            ));
        }

        svg.push_str("    </svg>\n");
        svg
    }

    fn ranked(scores: &HashMap<String, ScoreRecord>) -> Vec<(&String, &ScoreRecord)> {
        let mut ranked: Vec<(&String, &ScoreRecord)> = scores.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.overall_score
                .partial_cmp(&a.1.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Generate the complete HTML document
    pub fn to_html(
        &self,
        records: &HashMap<String, MetricRecord>,
        scores: &HashMap<String, ScoreRecord>,
        platform: &str,
    ) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str("    <title>Real-time Performance Analysis</title>\n");
        html.push_str("    <style>");
        html.push_str(&self.generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");
        html.push_str("<body>\n");
        html.push_str("    <h1>Real-time Performance Analysis</h1>\n");
        html.push_str(&format!(
            "    <p>Platform: {}</p>\n",
            Self::escape_html(platform)
        ));

        html.push_str(&self.render_score_table(records, scores));
        html.push_str("    <h2>Overall Real-time Score</h2>\n");
        html.push_str(&self.render_score_chart(scores));

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by Tasar - Real-time Fitness Analyzer\n");
        html.push_str("    </div>\n");
        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::score_records;

    fn sample_records() -> HashMap<String, MetricRecord> {
        let mut records = HashMap::new();
        records.insert(
            "Pure Computation".to_string(),
            MetricRecord {
                min: 1000,
                max: 1100,
                avg: 1020,
                jitter: 100,
                std_dev: 20.0,
                p95: 1080,
                p99: 1095,
                cv: 0.0196,
            },
        );
        records.insert(
            "Memory + Branch Mixed".to_string(),
            MetricRecord {
                min: 900,
                max: 1800,
                avg: 1100,
                jitter: 900,
                std_dev: 120.0,
                p95: 1500,
                p99: 1700,
                cv: 0.1091,
            },
        );
        records
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            HtmlReport::escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_html_document_structure() {
        let records = sample_records();
        let scores = score_records(&records).unwrap();
        let html = HtmlReport::new(ReportStyle::default()).to_html(&records, &scores, "TestCPU");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Real-time Performance Analysis</title>"));
        assert!(html.contains("Platform: TestCPU"));
        assert!(html.contains("Pure Computation"));
        assert!(html.contains("<svg"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_style_configuration_is_applied() {
        let style = ReportStyle {
            font_family: "Courier".to_string(),
            font_size: 11,
            title_size: 28,
            bar_color: "#123456".to_string(),
            header_color: "#abcdef".to_string(),
        };
        let records = sample_records();
        let scores = score_records(&records).unwrap();
        let html = HtmlReport::new(style).to_html(&records, &scores, "Unknown");

        assert!(html.contains("font-family: Courier"));
        assert!(html.contains("fill=\"#123456\""));
        assert!(html.contains("background-color: #abcdef"));
    }

    #[test]
    fn test_table_ranks_best_first() {
        let records = sample_records();
        let scores = score_records(&records).unwrap();
        let html = HtmlReport::new(ReportStyle::default()).to_html(&records, &scores, "Unknown");

        let pure = html.find("Pure Computation").unwrap();
        let mixed = html.find("Memory + Branch Mixed").unwrap();
        assert!(pure < mixed);
    }

    #[test]
    fn test_chart_contains_one_bar_per_present_case() {
        let records = sample_records();
        let scores = score_records(&records).unwrap();
        let chart = HtmlReport::new(ReportStyle::default()).render_score_chart(&scores);

        assert_eq!(chart.matches("<rect").count(), 2);
    }
}
