//! Title extraction for starring a recipe.
//!
//! The model is asked to open with `<h3>Title</h3>`. When it does not, the
//! title is guessed from the free text that precedes the first structured
//! section.

pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

const SECTION_MARKERS: [&str; 3] = ["<h4", "<ul", "<ol"];
const SKIPPED_PHRASES: [&str; 2] = ["here's", "recipe"];
const MIN_TITLE_CHARS: usize = 4;
const MAX_TITLE_CHARS: usize = 99;

/// Best-effort title for a recipe HTML fragment.
pub fn extract_title(recipe: &str) -> String {
    if let Some(title) = heading_title(recipe)
        && !title.is_empty()
    {
        return title;
    }

    let intro = SECTION_MARKERS
        .iter()
        .filter_map(|marker| recipe.find(marker))
        .min()
        .map_or(recipe, |end| &recipe[..end]);

    split_lines(intro)
        .into_iter()
        .rev()
        .map(|line| strip_tags(line).trim().to_string())
        .find(|line| is_title_candidate(line))
        .unwrap_or_else(|| UNTITLED_RECIPE.to_string())
}

/// Text of the first `<h3 ...>...</h3>` element, tags stripped.
fn heading_title(html: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<h3")?;
    let body_start = open + lower[open..].find('>')? + 1;
    let body_end = body_start + lower[body_start..].find("</h3>")?;
    Some(strip_tags(&html[body_start..body_end]).trim().to_string())
}

fn is_title_candidate(line: &str) -> bool {
    if line.is_empty() {
        return false;
    }
    let lower = line.to_lowercase();
    if SKIPPED_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return false;
    }
    let chars = line.chars().count();
    (MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&chars)
}

/// Split on newlines and `<br>`, `<br/>`, `<br />` tags.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let mut start = 0;
        let mut search = 0;
        while let Some(rel) = segment[search..].find("<br") {
            let pos = search + rel;
            match br_tag_len(&segment[pos..]) {
                Some(len) => {
                    lines.push(&segment[start..pos]);
                    start = pos + len;
                    search = start;
                }
                // `<brand>` and friends are not line breaks
                None => search = pos + "<br".len(),
            }
        }
        lines.push(&segment[start..]);
    }
    lines
}

/// Length of a `<br\s*/?>` tag at the start of `s`.
fn br_tag_len(s: &str) -> Option<usize> {
    let after = &s["<br".len()..];
    let trimmed = after.trim_start();
    let ws = after.len() - trimmed.len();
    let (slash, tail) = match trimmed.strip_prefix('/') {
        Some(tail) => (1, tail),
        None => (0, trimmed),
    };
    tail.starts_with('>').then_some("<br".len() + ws + slash + 1)
}

/// Remove `<...>` tags; an unterminated `<` is kept as text.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}
