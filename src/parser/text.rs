use regex::Regex;
use scraper::node::Node;
use scraper::ElementRef;

/// Subtrees that never carry visible question content.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Collapse every whitespace run to a single space and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalised text content of an element, ignoring script-like subtrees.
pub fn element_text(el: ElementRef) -> String {
    let mut raw = String::new();
    collect_text(el, &mut raw);
    clean_text(&raw)
}

fn collect_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if is_non_content(e.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

pub fn is_non_content(tag: &str) -> bool {
    NON_CONTENT_TAGS.contains(&tag)
}

/// Drop every boilerplate match, then re-normalise whitespace.
pub fn strip_boilerplate(text: &str, patterns: &[Regex]) -> String {
    let mut out = text.to_string();
    for re in patterns {
        out = re.replace_all(&out, "").into_owned();
    }
    clean_text(&out)
}

/// First `max` characters of `text`, with `...` appended only when something was cut.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, sel: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(sel).unwrap()).next().unwrap()
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_text("  a \n\t b   c "), "a b c");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn element_text_skips_scripts() {
        let doc = Html::parse_fragment(
            "<div id=x>Stem <script>var q = 1;</script><b>bold</b>\n <style>.a{}</style>tail</div>",
        );
        assert_eq!(element_text(first(&doc, "#x")), "Stem bold tail");
    }

    #[test]
    fn element_text_joins_inline_runs_without_padding() {
        let doc = Html::parse_fragment("<p id=x>H<sub>2</sub>O</p>");
        assert_eq!(element_text(first(&doc, "#x")), "H2O");
    }

    #[test]
    fn boilerplate_is_case_insensitive() {
        let patterns = vec![
            Regex::new(r"(?i)Answer [A-E] is incorrect because").unwrap(),
            Regex::new(r"(?i)Comment Here\s*Reference:").unwrap(),
        ];
        let out = strip_boilerplate(
            "Core text. answer c IS INCORRECT BECAUSE it is rare. Comment Here  Reference: Breast",
            &patterns,
        );
        assert_eq!(out, "Core text. it is rare. Breast");
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        let long = "é".repeat(120);
        let p = preview(&long, 100);
        assert!(p.ends_with("..."));
        assert_eq!(p.trim_end_matches("...").chars().count(), 100);
    }

    #[test]
    fn preview_leaves_short_text_alone() {
        let exact = "x".repeat(100);
        assert_eq!(preview(&exact, 100), exact);
        assert_eq!(preview("short", 100), "short");
    }
}
