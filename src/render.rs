//! Pure HTML rendering of search outcomes. Nothing here touches the network
//! or any view state.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::data_models::{Mode, SearchResponse, Source};

/// Snippets are cut to this many characters before the ellipsis.
pub const SNIPPET_CHARS: usize = 150;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Translates the lightweight markup the backend emits into HTML:
/// newlines become `<br>`, `**x**` strong and `*x*` emphasis.
pub fn format_answer(answer: &str) -> String {
    let escaped = html_escape(answer).replace('\n', "<br>");
    let bolded = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    ITALIC.replace_all(&bolded, "<em>$1</em>").into_owned()
}

/// First [`SNIPPET_CHARS`] characters of the snippet plus `...`.
pub fn truncate_snippet(snippet: &str) -> String {
    let mut cut: String = snippet.chars().take(SNIPPET_CHARS).collect();
    cut.push_str("...");
    cut
}

pub fn render_results(response: &SearchResponse, mode: Mode) -> String {
    let answer_html = format!(
        concat!(
            "<div class=\"answer-card\">",
            "<div class=\"answer-title\">Answer ({} search):</div>",
            "<div class=\"answer-content\">{}</div>",
            "</div>"
        ),
        mode,
        format_answer(&response.answer)
    );

    answer_html + &render_sources(&response.sources)
}

fn render_sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return "<div class=\"sources\"><div class=\"sources-title\">No sources available</div></div>"
            .to_string();
    }

    let items: String = sources
        .iter()
        .enumerate()
        .map(|(i, src)| render_source(i + 1, src))
        .collect();

    format!(
        "<div class=\"sources\"><div class=\"sources-title\">Sources ({}):</div>{}</div>",
        sources.len(),
        items
    )
}

/// Only web URLs become links; anything else (`javascript:`, `data:`,
/// relative paths) is shown as text.
fn is_web_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| u.scheme() == "http" || u.scheme() == "https")
        .unwrap_or(false)
}

fn render_source(position: usize, src: &Source) -> String {
    let url = html_escape(&src.url);
    let link = if is_web_url(&src.url) {
        format!(
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener\" class=\"source-url\">{url}</a>"
        )
    } else {
        format!("<span class=\"source-url\">{url}</span>")
    };
    let snippet = src
        .snippet()
        .map(|s| {
            format!(
                "<div class=\"source-snippet\">{}</div>",
                html_escape(&truncate_snippet(s))
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            "<div class=\"source-item\">",
            "<div class=\"source-title\">{}. {}</div>",
            "{}",
            "{}",
            "</div>"
        ),
        position,
        html_escape(src.display_title()),
        link,
        snippet
    )
}

pub fn render_error(message: &str) -> String {
    format!("<div class=\"error\">{}</div>", html_escape(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_answer_bold_and_breaks() {
        assert_eq!(
            format_answer("**Hi** there\nfriend"),
            "<strong>Hi</strong> there<br>friend"
        );
    }

    #[test]
    fn test_format_answer_italic() {
        assert_eq!(
            format_answer("a *b* and **c** *d*"),
            "a <em>b</em> and <strong>c</strong> <em>d</em>"
        );
    }

    #[test]
    fn test_format_answer_emphasis_across_line_break() {
        assert_eq!(
            format_answer("**open\nclose**"),
            "<strong>open<br>close</strong>"
        );
    }

    #[test]
    fn test_format_answer_escapes_markup() {
        assert_eq!(
            format_answer("<script>x</script> & **b**"),
            "&lt;script&gt;x&lt;/script&gt; &amp; <strong>b</strong>"
        );
    }

    #[test]
    fn test_truncate_snippet() {
        let long = "a".repeat(300);
        let cut = truncate_snippet(&long);
        assert_eq!(cut, format!("{}...", "a".repeat(150)));

        assert_eq!(truncate_snippet("short"), "short...");

        let wide = "é".repeat(200);
        assert_eq!(truncate_snippet(&wide).chars().count(), 153);
    }

    #[test]
    fn test_only_web_urls_become_links() {
        assert!(is_web_url("https://example.com/a?b=c"));
        assert!(is_web_url("HTTP://EXAMPLE.COM"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url("data:text/html,<b>x</b>"));
        assert!(!is_web_url("/relative/path"));
        assert!(!is_web_url(""));
    }

    #[test]
    fn test_render_error() {
        assert_eq!(
            render_error("Network error: <boom>"),
            "<div class=\"error\">Network error: &lt;boom&gt;</div>"
        );
    }
}
