use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;
use url::Url;

use super::blocks::AnswerBlock;
use super::text::{element_text, strip_boilerplate};
use super::urls::{is_trusted, resolve};

static LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([A-Z])\.?$").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAnswer {
    pub correct: Option<char>,
    pub explanation: String,
    pub reference: Option<String>,
}

/// What the answer parser needs to know about the page conventions.
pub struct AnswerRules<'a> {
    pub body_sel: &'a Selector,
    pub bold_sel: &'a Selector,
    pub link_sel: &'a Selector,
    pub boilerplate: &'a [Regex],
    pub base_url: &'a Url,
    pub trusted_domain: &'a str,
    pub reference_path: &'a str,
}

pub fn parse_answer(answer: &AnswerBlock, rules: &AnswerRules) -> ParsedAnswer {
    // fall back to the container when the inner answer body is missing
    let body = answer.el.select(rules.body_sel).next().unwrap_or(answer.el);

    let bold_text = body.select(rules.bold_sel).next().map(element_text);
    let correct = bold_text
        .as_deref()
        .and_then(|t| LETTER_RE.captures(t))
        .and_then(|c| c[1].chars().next());

    let mut explanation = element_text(body);
    if let Some(bold) = bold_text.as_deref().filter(|b| !b.is_empty()) {
        explanation = explanation.replacen(bold, "", 1);
    }
    let explanation = strip_boilerplate(&explanation, rules.boilerplate);

    let reference = body.select(rules.link_sel).find_map(|a| {
        let url = resolve(rules.base_url, a.value().attr("href")?)?;
        (is_trusted(&url, rules.trusted_domain) && url.path().starts_with(rules.reference_path))
            .then(|| String::from(url))
    });

    ParsedAnswer {
        correct,
        explanation,
        reference,
    }
}
