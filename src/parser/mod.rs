pub mod answer;
pub mod assemble;
pub mod blocks;
pub mod images;
pub mod linker;
pub mod options;
pub mod stem;
pub mod text;
pub mod urls;

use std::path::Path;

use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, DocumentError, QuestionError};
use crate::record::QuestionRecord;
use crate::settings::Settings;
use answer::{parse_answer, AnswerRules};
use assemble::{assemble, Origin, QuestionParts};
use blocks::{locate_questions, IdIndex, QuestionBlock};
use linker::{Link, Linker};

/// Selectors and patterns compiled once from [`Settings`].
struct Matchers {
    question: Selector,
    title: Selector,
    body: Selector,
    answer_body: Selector,
    options: Selector,
    option_item: Selector,
    image: Selector,
    bold: Selector,
    link: Selector,
    boilerplate: Vec<Regex>,
    base_url: Url,
}

impl Matchers {
    fn compile(s: &Settings) -> Result<Self, ConfigError> {
        Ok(Matchers {
            question: selector(&s.question_selector)?,
            title: selector(&format!(".{}", s.title_class))?,
            body: selector(&format!(".{}", s.body_class))?,
            answer_body: selector(&format!(".{}", s.answer_body_class))?,
            options: selector(&format!("ol.{}", s.options_class))?,
            option_item: selector("li")?,
            image: selector("img")?,
            bold: selector("b, strong")?,
            link: selector("a[href]")?,
            boilerplate: s
                .boilerplate_patterns
                .iter()
                .map(|p| {
                    RegexBuilder::new(p)
                        .case_insensitive(true)
                        .build()
                        .map_err(|source| ConfigError::Pattern {
                            pattern: p.clone(),
                            source,
                        })
                })
                .collect::<Result<_, _>>()?,
            base_url: Url::parse(&s.base_url).map_err(|source| ConfigError::BaseUrl {
                url: s.base_url.clone(),
                source,
            })?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Why a parsed question was not emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    EmptyStem,
    NoOptions,
}

/// Per-document result: emitted records plus what was dropped on the way.
#[derive(Debug, Default)]
pub struct DocumentReport {
    pub source_file: String,
    pub category: String,
    pub records: Vec<QuestionRecord>,
    pub discarded: usize,
    pub failed: usize,
}

impl DocumentReport {
    pub fn skipped(&self) -> usize {
        self.discarded + self.failed
    }
}

/// Document scanner: turns one HTML page into question records.
pub struct Pipeline {
    settings: Settings,
    matchers: Matchers,
    linker: Linker,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let matchers = Matchers::compile(&settings)?;
        let linker = Linker::new(&settings.question_marker, &settings.answer_marker);
        Ok(Pipeline {
            settings,
            matchers,
            linker,
        })
    }

    /// Read and scan one file. `category` overrides the filename lookup.
    pub fn scan_file(&self, path: &Path, category: Option<&str>) -> Result<DocumentReport, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let html = String::from_utf8_lossy(&bytes);
        if !html.contains('<') {
            return Err(DocumentError::NotHtml {
                path: path.to_path_buf(),
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let category = match category {
            Some(c) => c.to_string(),
            None => {
                let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
                self.settings.category_for(&stem).to_string()
            }
        };

        info!("Scraping {}", path.display());
        Ok(self.scan_document(&html, &file_name, &category))
    }

    /// Scan an already-loaded document. Never fails: broken questions are
    /// logged and counted, the rest are returned in document order.
    pub fn scan_document(&self, html: &str, source_file: &str, category: &str) -> DocumentReport {
        let doc = Html::parse_document(html);
        let index = IdIndex::build(&doc);
        let origin = Origin {
            source_file,
            category,
        };

        let mut report = DocumentReport {
            source_file: source_file.to_string(),
            category: category.to_string(),
            ..Default::default()
        };

        for question in locate_questions(&doc, &self.matchers.question) {
            match self.process_question(&question, &index, origin) {
                Ok(Ok(record)) => report.records.push(record),
                Ok(Err(reason)) => {
                    warn!(
                        "Skipping incomplete question {} in {} ({:?})",
                        question.position, source_file, reason
                    );
                    report.discarded += 1;
                }
                Err(e) => {
                    warn!(
                        "Error parsing question {} in {}: {}",
                        question.position, source_file, e
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            "Extracted {} questions from {} ({} skipped)",
            report.records.len(),
            source_file,
            report.skipped()
        );
        report
    }

    fn process_question(
        &self,
        question: &QuestionBlock,
        index: &IdIndex,
        origin: Origin,
    ) -> Result<Result<QuestionRecord, Discard>, QuestionError> {
        let m = &self.matchers;
        let s = &self.settings;

        let title = stem::extract_title(question.el, &m.title);
        let stem_text = stem::extract_stem(question.el, &m.body, &s.image_container_classes);
        let images = images::collect_images(question.el, &m.image, &m.base_url, &s.trusted_domain);
        let parsed_options = options::parse_options(question.el, &m.options, &m.option_item)?;

        let answer = match self.linker.link(question, index) {
            Link::Answer { block, rule } => {
                debug!(question = question.position, answer = block.id, rule, "linked answer block");
                Some(parse_answer(&block, &self.answer_rules()))
            }
            Link::Unlinked => None,
        };

        if stem_text.is_empty() {
            return Ok(Err(Discard::EmptyStem));
        }
        if parsed_options.is_empty() {
            return Ok(Err(Discard::NoOptions));
        }

        let parts = QuestionParts {
            title,
            stem: stem_text,
            options: parsed_options,
            images,
            answer,
        };
        Ok(Ok(assemble(parts, s, origin)))
    }

    fn answer_rules(&self) -> AnswerRules<'_> {
        AnswerRules {
            body_sel: &self.matchers.answer_body,
            bold_sel: &self.matchers.bold,
            link_sel: &self.matchers.link,
            boilerplate: &self.matchers.boilerplate,
            base_url: &self.matchers.base_url,
            trusted_domain: &self.settings.trusted_domain,
            reference_path: &self.settings.reference_path,
        }
    }
}
