use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

/// A question container, numbered from 1 in document order.
#[derive(Debug, Clone, Copy)]
pub struct QuestionBlock<'a> {
    pub position: usize,
    pub id: Option<&'a str>,
    pub el: ElementRef<'a>,
}

/// The answer container a question was linked to.
#[derive(Debug, Clone, Copy)]
pub struct AnswerBlock<'a> {
    pub id: &'a str,
    pub el: ElementRef<'a>,
}

/// Every question container in the document, in document order.
pub fn locate_questions<'a>(doc: &'a Html, selector: &Selector) -> Vec<QuestionBlock<'a>> {
    doc.select(selector)
        .enumerate()
        .map(|(i, el)| QuestionBlock {
            position: i + 1,
            id: el.value().id().filter(|id| !id.trim().is_empty()),
            el,
        })
        .collect()
}

/// Elements addressable by id. The first element carrying an id wins,
/// matching `getElementById`.
pub struct IdIndex<'a> {
    by_id: HashMap<&'a str, ElementRef<'a>>,
}

impl<'a> IdIndex<'a> {
    pub fn build(doc: &'a Html) -> Self {
        let mut by_id = HashMap::new();
        for el in doc.root_element().descendants().filter_map(ElementRef::wrap) {
            if let Some(id) = el.value().id() {
                by_id.entry(id).or_insert(el);
            }
        }
        IdIndex { by_id }
    }

    pub fn get(&self, id: &str) -> Option<AnswerBlock<'a>> {
        self.by_id
            .get_key_value(id)
            .map(|(id, el)| AnswerBlock { id: *id, el: *el })
    }
}
