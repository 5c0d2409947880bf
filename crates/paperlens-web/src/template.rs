use axum::response::Html;
use paperlens_core::{PipelineState, ResearchAnalysis, messages};

const INDEX_HTML: &str = include_str!("../templates/index.html");

const ABSENT: &str = "\u{2014}";
const HEADLINE: &str = "مساعدك الذكي في تحليل الأبحاث";
const INTRO: &str = "ارفع ملف الـ PDF الخاص بالبحث، وسيقوم نظامنا المدعوم بالذكاء الاصطناعي باستخراج العناصر الجوهرية لك في ثوانٍ معدودة.";
const PICK_FILE: &str = "اسحب الملف هنا أو انقر للاختيار";
const PAGE_LIMIT_HINT: &str = "يدعم ملفات PDF البحثية (الحد الأقصى 30 صفحة للتحليل السريع)";
const RESULTS_HEADING: &str = "نتائج التحليل الأكاديمي";
const ANALYZE_ANOTHER: &str = "تحليل بحث آخر";
const RETRY: &str = "إعادة المحاولة";

/// Render the page for a pipeline state.
pub fn render_index(state: &PipelineState) -> Html<String> {
    let content = match state {
        PipelineState::Idle => render_idle(),
        PipelineState::Extracting => render_progress(messages::STATUS_EXTRACTING),
        PipelineState::Analyzing => render_progress(messages::STATUS_ANALYZING),
        PipelineState::Completed(analysis) => render_completed(analysis),
        PipelineState::Error(message) => render_error(message),
    };
    let html = INDEX_HTML
        .replace("{{ status }}", state.status().as_str())
        .replace("{{ status_extracting }}", messages::STATUS_EXTRACTING)
        .replace("{{ status_analyzing }}", messages::STATUS_ANALYZING)
        .replace("{{ not_a_pdf }}", messages::NOT_A_PDF)
        .replace("{{ content }}", &content);
    Html(html)
}

fn render_idle() -> String {
    format!(
        r#"<section class="intro">
  <h2>{HEADLINE}</h2>
  <p>{INTRO}</p>
  <label class="uploader">
    <h4>{PICK_FILE}</h4>
    <p>{PAGE_LIMIT_HINT}</p>
    <input id="pdf-input" type="file" accept="application/pdf">
  </label>
  <p id="notice" class="notice" role="alert"></p>
</section>"#
    )
}

fn render_progress(message: &str) -> String {
    format!(
        r#"<div class="progress"><div class="spinner"></div><p>{}</p></div>"#,
        escape(message)
    )
}

fn render_error(message: &str) -> String {
    format!(
        r#"<div class="error">
  <p>{}</p>
  <button type="button" data-action="reset">{RETRY}</button>
</div>"#,
        escape(message)
    )
}

fn render_completed(analysis: &ResearchAnalysis) -> String {
    let cards = [
        list_card(messages::TITLE_OBJECTIVES, analysis.objectives.as_deref()),
        text_card(messages::TITLE_METHODOLOGY, analysis.methodology.as_deref()),
        list_card(messages::TITLE_TOOLS, analysis.tools.as_deref()),
        text_card(messages::TITLE_SAMPLE, analysis.sample.as_deref()),
        list_card(messages::TITLE_RESULTS, analysis.results.as_deref()),
        list_card(
            messages::TITLE_RECOMMENDATIONS,
            analysis.recommendations.as_deref(),
        ),
    ]
    .concat();

    format!(
        r#"<div class="toolbar">
  <h3>{RESULTS_HEADING}</h3>
  <button type="button" data-action="reset">{ANALYZE_ANOTHER}</button>
</div>
<div class="cards">
{cards}</div>"#
    )
}

fn text_card(title: &str, value: Option<&str>) -> String {
    let body = match value {
        Some(text) => format!("<p>{}</p>", escape(text)),
        None => format!(r#"<p class="absent">{ABSENT}</p>"#),
    };
    format!("<article class=\"card\"><h4>{}</h4>{}</article>\n", title, body)
}

fn list_card(title: &str, items: Option<&[String]>) -> String {
    let body = match items {
        Some(items) => {
            let lis: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", escape(item)))
                .collect();
            format!("<ul>{}</ul>", lis)
        }
        None => format!(r#"<p class="absent">{ABSENT}</p>"#),
    };
    format!("<article class=\"card\"><h4>{}</h4>{}</article>\n", title, body)
}

/// Escape text for inclusion in HTML element content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
