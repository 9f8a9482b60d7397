use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

const ENV_PREFIX: &str = "PQ";

/// Every lookup table and markup convention the pipeline depends on.
///
/// Defaults describe the PathOutlines practice-question pages. Any field can
/// be overridden from a TOML file or `PQ_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source_name: String,
    pub database_set: String,
    pub base_url: String,
    pub trusted_domain: String,

    pub question_selector: String,
    pub title_class: String,
    pub body_class: String,
    pub answer_body_class: String,
    pub options_class: String,
    pub image_container_classes: Vec<String>,

    pub question_marker: String,
    pub answer_marker: String,
    pub reference_path: String,
    pub boilerplate_patterns: Vec<String>,

    pub teaching_point_min_chars: usize,
    pub explanation_preview_chars: usize,
    pub difficulty: String,
    pub status: String,

    pub uncategorized_label: String,
    pub categories: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source_name: "PathOutlines".into(),
            database_set: "Web".into(),
            base_url: "https://www.pathologyoutlines.com".into(),
            trusted_domain: "pathologyoutlines.com".into(),
            question_selector: "div.block_section.question".into(),
            title_class: "f12b".into(),
            body_class: "block_body".into(),
            answer_body_class: "answer_block".into(),
            options_class: "liststyle2".into(),
            image_container_classes: vec!["img1".into(), "img2".into()],
            question_marker: "practicequestion".into(),
            answer_marker: "practiceanswer".into(),
            reference_path: "/topic".into(),
            boilerplate_patterns: vec![
                r"Answer [A-E] is incorrect because".into(),
                r"Comment Here\s*Reference:".into(),
            ],
            teaching_point_min_chars: 10,
            explanation_preview_chars: 100,
            difficulty: "medium".into(),
            status: "draft".into(),
            uncategorized_label: "Uncategorized".into(),
            categories: default_categories(),
        }
    }
}

impl Settings {
    /// Defaults, then the optional TOML file, then `PQ_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    /// Category label for a document, keyed by its file stem.
    pub fn category_for(&self, file_stem: &str) -> &str {
        self.categories
            .get(file_stem)
            .map(String::as_str)
            .unwrap_or(&self.uncategorized_label)
    }
}

fn default_categories() -> HashMap<String, String> {
    const AP: &str = "Anatomic Pathology";
    const CP: &str = "Clinical Pathology";
    let table: &[(&str, &str, &str)] = &[
        ("adrenal", AP, "Endocrine"),
        ("anus", AP, "Gastrointestinal"),
        ("appendix", AP, "Gastrointestinal"),
        ("autopsy", AP, "Forensic"),
        ("bladder", AP, "Genitourinary"),
        ("body_cavities", AP, "General"),
        ("bone", AP, "Musculoskeletal"),
        ("bone_marrow", CP, "Hematopathology"),
        ("bone_marrow_benign", CP, "Hematopathology"),
        ("breast", AP, "Breast"),
        ("cervix", AP, "Gynecologic"),
        ("clinical_chemistry", CP, "Chemistry"),
        ("cns", AP, "Neuropathology"),
        ("csn_benign", AP, "Neuropathology"),
        ("coagulation", CP, "Coagulation"),
        ("colon", AP, "Gastrointestinal"),
        ("cyto", AP, "Cytopathology"),
        ("ear", AP, "Head and Neck"),
        ("esophagus", AP, "Gastrointestinal"),
        ("eye", AP, "Ophthalmic"),
        ("fallopian_tubes", AP, "Gynecologic"),
        ("gallbladder", AP, "Gastrointestinal"),
        ("heart", AP, "Cardiovascular"),
        ("hematology", CP, "Hematology"),
        ("ihc", CP, "Immunohistochemistry"),
        ("informatics", CP, "Informatics"),
        ("kidney", AP, "Genitourinary"),
        ("kidney_medical", AP, "Genitourinary"),
        ("lab_admin", CP, "Laboratory Management"),
        ("larynx", AP, "Head and Neck"),
        ("liver", AP, "Gastrointestinal"),
        ("lymph_node_nonneoplastic", CP, "Hematopathology"),
        ("lymphoma", CP, "Hematopathology"),
        ("mandible_and_maxilla", AP, "Head and Neck"),
        ("mediastinum", AP, "Thoracic"),
        ("microbiology", CP, "Microbiology"),
        ("molecular", CP, "Molecular"),
        ("muscle_and_nerve", AP, "Musculoskeletal"),
        ("nasopharynx", AP, "Head and Neck"),
        ("oral_cavity", AP, "Head and Neck"),
        ("ovary", AP, "Gynecologic"),
        ("pancreas", AP, "Gastrointestinal"),
        ("penis", AP, "Genitourinary"),
        ("placenta", AP, "Gynecologic"),
        ("prostate", AP, "Genitourinary"),
        ("salivary_gland", AP, "Head and Neck"),
        ("skin_melanocytic", AP, "Dermatopathology"),
        ("skin_non_tumor", AP, "Dermatopathology"),
        ("skin_tumor_nonmelanocytic", AP, "Dermatopathology"),
        ("small_intestine", AP, "Gastrointestinal"),
        ("soft_tissue", AP, "Musculoskeletal"),
        ("spleen", CP, "Hematopathology"),
        ("stomach", AP, "Gastrointestinal"),
        ("testis", AP, "Genitourinary"),
        ("thyroid", AP, "Endocrine"),
        ("transfusion", CP, "Transfusion Medicine"),
        ("uterus", AP, "Gynecologic"),
        ("vagina", AP, "Gynecologic"),
    ];
    table
        .iter()
        .map(|(stem, root, leaf)| (stem.to_string(), format!("{} > {}", root, leaf)))
        .collect()
}
