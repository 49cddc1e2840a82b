use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</(div|p|li|h[1-6]|br)>").unwrap());
static BR_HR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(br|hr)\s*/?>").unwrap());
static LI_OPEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<li[^>]*>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static EXCESS_NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static LINE_TRAILING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());
static LINE_LEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]+").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Upstream feeds regularly double-encode entities (`&amp;#8211;`), so the
/// decode pass runs exactly twice.
fn decode_entities(text: &str) -> String {
    let once = html_escape::decode_html_entities(text);
    html_escape::decode_html_entities(once.as_ref()).into_owned()
}

/// Convert an HTML job description to plain text, keeping paragraph and list
/// structure as whitespace. Idempotent: cleaning already-clean text is a no-op.
pub fn clean_description(html: &str) -> String {
    let text = decode_entities(html);

    // Block-level structure becomes line breaks before markup is stripped.
    let text = BLOCK_CLOSE_RE.replace_all(&text, "\n");
    let text = BR_HR_RE.replace_all(&text, "\n");
    let text = LI_OPEN_RE.replace_all(&text, "\n\u{2022} ");
    let text = TAG_RE.replace_all(&text, "");

    let text = EXCESS_NEWLINES_RE.replace_all(&text, "\n\n");
    let text = LINE_TRAILING_RE.replace_all(&text, "");
    let text = LINE_LEADING_RE.replace_all(&text, "");

    text.trim().to_string()
}

/// Clean a single-line field (title, company, location, salary): decode
/// entities, strip markup, fold whitespace runs to one space.
pub fn clean_text(text: &str) -> String {
    let text = decode_entities(text);
    let text = TAG_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Clean each tag independently. Order is preserved and duplicates are left
/// alone; deduplication is the extractor's concern.
pub fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|tag| clean_text(tag)).collect()
}
