use serde::Serialize;

/// One extracted question, in the shape the downstream importer expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRecord {
    pub title: String,
    pub stem: String,
    pub difficulty: String,
    pub teaching_point: String,
    #[serde(rename = "question_references")]
    pub references: String,
    pub status: String,
    pub answer_options: Vec<AnswerOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_images: Option<Vec<ImageDescriptor>>,
    pub tag_ids: Vec<String>,
    pub category_ids: Vec<String>,
    #[serde(rename = "_metadata")]
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOption {
    #[serde(rename = "option_letter")]
    pub letter: char,
    pub text: String,
    pub is_correct: bool,
    pub explanation: String,
    pub order_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDescriptor {
    #[serde(rename = "image_url")]
    pub url: String,
    pub question_section: &'static str,
    pub order_index: usize,
    pub alt_text: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provenance {
    pub source: String,
    pub source_file: String,
    pub category: String,
    pub database_set: String,
}
