use scraper::{ElementRef, Selector};

use super::text::element_text;
use crate::error::QuestionError;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOption {
    pub letter: char,
    pub text: String,
}

/// Answer choices from the styled options list, lettered by list position.
///
/// Empty items are dropped but still consume their letter, so a gap in the
/// list shows up as a gap in the letters.
pub fn parse_options(
    block: ElementRef,
    list_sel: &Selector,
    item_sel: &Selector,
) -> Result<Vec<ParsedOption>, QuestionError> {
    let Some(list) = block.select(list_sel).next() else {
        return Ok(Vec::new());
    };

    let items: Vec<_> = list.select(item_sel).collect();
    if items.len() > 26 {
        return Err(QuestionError::TooManyOptions { count: items.len() });
    }

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(i, li)| {
            let text = element_text(li);
            (!text.is_empty()).then(|| ParsedOption {
                letter: letter_for(i),
                text,
            })
        })
        .collect())
}

fn letter_for(position: usize) -> char {
    (b'A' + position as u8) as char
}
