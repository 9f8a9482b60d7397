use super::answer::ParsedAnswer;
use super::options::ParsedOption;
use super::text::preview;
use crate::record::{AnswerOption, ImageDescriptor, Provenance, QuestionRecord};
use crate::settings::Settings;

/// Everything parsed out of one question block and its answer block.
#[derive(Debug, Clone)]
pub struct QuestionParts {
    pub title: String,
    pub stem: String,
    pub options: Vec<ParsedOption>,
    pub images: Vec<ImageDescriptor>,
    pub answer: Option<ParsedAnswer>,
}

/// Where a record came from.
#[derive(Debug, Clone, Copy)]
pub struct Origin<'a> {
    pub source_file: &'a str,
    pub category: &'a str,
}

pub fn assemble(parts: QuestionParts, settings: &Settings, origin: Origin) -> QuestionRecord {
    let answer = parts.answer.unwrap_or_default();
    let explanation = answer.explanation;

    let answer_options = parts
        .options
        .into_iter()
        .enumerate()
        .map(|(i, opt)| {
            let is_correct = answer.correct == Some(opt.letter);
            let option_explanation = if is_correct {
                explanation.clone()
            } else {
                incorrect_explanation(answer.correct, &explanation, settings.explanation_preview_chars)
            };
            AnswerOption {
                letter: opt.letter,
                text: opt.text,
                is_correct,
                explanation: option_explanation,
                order_index: i,
            }
        })
        .collect();

    let teaching_point = if explanation.chars().count() > settings.teaching_point_min_chars {
        explanation.clone()
    } else {
        default_teaching_point(origin.category)
    };

    let references = answer
        .reference
        .unwrap_or_else(|| format!("Source: {} ({})", settings.source_name, origin.source_file));

    QuestionRecord {
        title: parts.title,
        stem: parts.stem,
        difficulty: settings.difficulty.clone(),
        teaching_point,
        references,
        status: settings.status.clone(),
        answer_options,
        question_images: (!parts.images.is_empty()).then_some(parts.images),
        tag_ids: Vec::new(),
        category_ids: Vec::new(),
        provenance: Provenance {
            source: settings.source_name.clone(),
            source_file: origin.source_file.to_string(),
            category: origin.category.to_string(),
            database_set: settings.database_set.clone(),
        },
    }
}

fn incorrect_explanation(correct: Option<char>, explanation: &str, max_chars: usize) -> String {
    let rationale = preview(explanation, max_chars);
    match correct {
        Some(letter) => format!("Incorrect. The correct answer is {}. {}", letter, rationale)
            .trim_end()
            .to_string(),
        None => rationale,
    }
}

fn default_teaching_point(category: &str) -> String {
    let leaf = category.rsplit(" > ").next().unwrap_or(category);
    format!("This question tests knowledge of {}.", leaf)
}
