use tracing::debug;

use super::blocks::{AnswerBlock, IdIndex, QuestionBlock};

/// Produces one candidate answer id from a question id.
pub trait CandidateRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn candidate(&self, question_id: &str) -> Option<String>;
}

/// `Q1practicequestion7` → `Q1practiceanswer7`.
pub struct MarkerSwap {
    pub question_marker: String,
    pub answer_marker: String,
}

impl CandidateRule for MarkerSwap {
    fn name(&self) -> &'static str {
        "marker-swap"
    }

    fn candidate(&self, question_id: &str) -> Option<String> {
        swap_marker(question_id, &self.question_marker, &self.answer_marker)
    }
}

/// `Q1practicequestion7` → `Q1practiceanswer8`.
pub struct NextNumber {
    pub question_marker: String,
    pub answer_marker: String,
}

impl CandidateRule for NextNumber {
    fn name(&self) -> &'static str {
        "next-number"
    }

    fn candidate(&self, question_id: &str) -> Option<String> {
        let swapped = swap_marker(question_id, &self.question_marker, &self.answer_marker)?;
        let stem = swapped.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &swapped[stem.len()..];
        let next = digits.parse::<u64>().ok()?.checked_add(1)?;
        Some(format!("{}{}", stem, next))
    }
}

// An id without the marker would "swap" to itself and link the question to itself.
fn swap_marker(id: &str, from: &str, to: &str) -> Option<String> {
    if from.is_empty() || !id.contains(from) {
        return None;
    }
    Some(id.replace(from, to))
}

#[derive(Debug, Clone, Copy)]
pub enum Link<'a> {
    Answer {
        block: AnswerBlock<'a>,
        rule: &'static str,
    },
    Unlinked,
}

/// Ordered candidate rules; the first candidate that names an element wins.
pub struct Linker {
    rules: Vec<Box<dyn CandidateRule>>,
}

impl Linker {
    pub fn new(question_marker: &str, answer_marker: &str) -> Self {
        Linker::with_rules(vec![
            Box::new(MarkerSwap {
                question_marker: question_marker.to_string(),
                answer_marker: answer_marker.to_string(),
            }),
            Box::new(NextNumber {
                question_marker: question_marker.to_string(),
                answer_marker: answer_marker.to_string(),
            }),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn CandidateRule>>) -> Self {
        Linker { rules }
    }

    pub fn link<'a>(&self, question: &QuestionBlock<'a>, index: &IdIndex<'a>) -> Link<'a> {
        let Some(qid) = question.id else {
            return Link::Unlinked;
        };
        for rule in &self.rules {
            let Some(candidate) = rule.candidate(qid) else {
                continue;
            };
            if let Some(block) = index.get(&candidate) {
                return Link::Answer {
                    block,
                    rule: rule.name(),
                };
            }
        }
        debug!(question = qid, "no answer block found");
        Link::Unlinked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::locate_questions;
    use scraper::{Html, Selector};

    fn link_first(html: &str) -> Option<(String, &'static str)> {
        let doc = Html::parse_document(html);
        let sel = Selector::parse("div.question").unwrap();
        let q = locate_questions(&doc, &sel)[0];
        let index = IdIndex::build(&doc);
        match Linker::new("practicequestion", "practiceanswer").link(&q, &index) {
            Link::Answer { block, rule } => Some((block.id.to_string(), rule)),
            Link::Unlinked => None,
        }
    }

    #[test]
    fn same_number_links_by_marker_swap() {
        let got = link_first(
            r#"<div class="question" id="Q1practicequestion7"></div><div id="Q1practiceanswer7"></div>"#,
        );
        assert_eq!(got, Some(("Q1practiceanswer7".into(), "marker-swap")));
    }

    #[test]
    fn incremented_number_links_by_fallback() {
        let got = link_first(
            r#"<div class="question" id="Q1practicequestion7"></div><div id="Q1practiceanswer8"></div>"#,
        );
        assert_eq!(got, Some(("Q1practiceanswer8".into(), "next-number")));
    }

    #[test]
    fn primary_rule_wins_when_both_exist() {
        let got = link_first(
            r#"<div class="question" id="Q1practicequestion7"></div>
               <div id="Q1practiceanswer8"></div><div id="Q1practiceanswer7"></div>"#,
        );
        assert_eq!(got.map(|(id, _)| id).as_deref(), Some("Q1practiceanswer7"));
    }

    #[test]
    fn neither_present_is_unlinked() {
        let got = link_first(
            r#"<div class="question" id="Q1practicequestion7"></div><div id="Q1practiceanswer9"></div>"#,
        );
        assert_eq!(got, None);
    }

    #[test]
    fn missing_id_is_unlinked() {
        let got = link_first(r#"<div class="question"></div><div id="Q1practiceanswer1"></div>"#);
        assert_eq!(got, None);
    }

    #[test]
    fn id_without_marker_never_links_to_itself() {
        let got = link_first(r#"<div class="question" id="block12"></div>"#);
        assert_eq!(got, None);
    }

    #[test]
    fn next_number_candidates() {
        let rule = NextNumber {
            question_marker: "practicequestion".into(),
            answer_marker: "practiceanswer".into(),
        };
        assert_eq!(rule.candidate("Q1practicequestion9").as_deref(), Some("Q1practiceanswer10"));
        assert_eq!(rule.candidate("Q1practicequestion").as_deref(), None);
        assert_eq!(rule.candidate("Q1practicequestion18446744073709551615"), None);
    }

    struct Suffix;

    impl CandidateRule for Suffix {
        fn name(&self) -> &'static str {
            "suffix"
        }
        fn candidate(&self, question_id: &str) -> Option<String> {
            Some(format!("{}-answer", question_id))
        }
    }

    #[test]
    fn custom_rules_can_be_plugged_in() {
        let doc = Html::parse_document(r#"<div class="question" id="q5"></div><p id="q5-answer"></p>"#);
        let q = locate_questions(&doc, &Selector::parse("div.question").unwrap())[0];
        let index = IdIndex::build(&doc);
        let linker = Linker::with_rules(vec![Box::new(Suffix)]);
        assert!(matches!(linker.link(&q, &index), Link::Answer { rule: "suffix", .. }));
    }
}
