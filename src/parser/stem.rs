use scraper::node::Node;
use scraper::{ElementRef, Selector};

use super::text::{clean_text, element_text, is_non_content};

pub const UNTITLED: &str = "Untitled Question";

pub fn extract_title(block: ElementRef, title_sel: &Selector) -> String {
    block
        .select(title_sel)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Stem text of a question: everything in the body ahead of the options list.
///
/// Two passes over the body's children. The first finds the boundary (the
/// first `<ol>`), the second reads only what precedes it.
pub fn extract_stem(block: ElementRef, body_sel: &Selector, image_classes: &[String]) -> String {
    let Some(body) = block.select(body_sel).next() else {
        return String::new();
    };

    let children: Vec<_> = body.children().collect();
    let boundary = children
        .iter()
        .position(|c| matches!(c.value(), Node::Element(e) if e.name() == "ol"))
        .unwrap_or(children.len());

    let mut parts = Vec::new();
    for child in &children[..boundary] {
        match child.value() {
            Node::Text(t) => parts.push(clean_text(t)),
            Node::Element(e) if is_non_content(e.name()) || e.name() == "br" => {}
            Node::Element(_) => {
                let Some(el) = ElementRef::wrap(*child) else { continue };
                if is_image_container(el, image_classes) {
                    continue;
                }
                parts.push(element_text(el));
            }
            _ => {}
        }
    }

    clean_text(&parts.join(" "))
}

fn is_image_container(el: ElementRef, image_classes: &[String]) -> bool {
    let v = el.value();
    if v.name() != "div" {
        return false;
    }
    v.classes().any(|c| image_classes.iter().any(|ic| ic == c))
        || el.descendants().any(|n| matches!(n.value(), Node::Element(e) if e.name() == "img"))
}
