//! Per-language labels and descriptions

use serde::Deserialize;
use serde::Serialize;

/// Languages MOLGENIS stores translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Nl,
    De,
    Es,
    It,
    Pt,
    Fr,
    /// Placeholder language for custom translations.
    Xx,
}

/// The `labelXx` / `descriptionXx` attribute pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_nl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_nl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_de: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_de: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_es: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_es: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_it: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_it: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_pt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_pt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_fr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_fr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_xx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_xx: Option<String>,
}

impl LocalizedText {
    /// Returns the label translated to `language`, if present.
    pub fn label(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.label_en.as_deref(),
            Language::Nl => self.label_nl.as_deref(),
            Language::De => self.label_de.as_deref(),
            Language::Es => self.label_es.as_deref(),
            Language::It => self.label_it.as_deref(),
            Language::Pt => self.label_pt.as_deref(),
            Language::Fr => self.label_fr.as_deref(),
            Language::Xx => self.label_xx.as_deref(),
        }
    }

    /// Returns the description translated to `language`, if present.
    pub fn description(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.description_en.as_deref(),
            Language::Nl => self.description_nl.as_deref(),
            Language::De => self.description_de.as_deref(),
            Language::Es => self.description_es.as_deref(),
            Language::It => self.description_it.as_deref(),
            Language::Pt => self.description_pt.as_deref(),
            Language::Fr => self.description_fr.as_deref(),
            Language::Xx => self.description_xx.as_deref(),
        }
    }
}
