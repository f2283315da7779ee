//! Instruction text sent alongside each analysis request.

use serde::{Deserialize, Serialize};

use crate::models::{
    TextQuery, NOT_APPLICABLE, NOT_FOUND_EN, NOT_FOUND_ID, UNRANKED_EN, UNRANKED_ID,
};
use crate::utils::IdentifierKind;

/// Bibliographic databases the model is told to treat as ground truth.
pub const PRIMARY_SOURCES: [&str; 2] = ["Scopus", "SINTA"];

/// Language of the prompt and of the sentinel strings the model returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptLanguage {
    #[default]
    Indonesian,
    English,
}

impl PromptLanguage {
    /// Placeholder for a value that could not be found (ISSN, name).
    pub fn not_found(&self) -> &'static str {
        match self {
            PromptLanguage::Indonesian => NOT_FOUND_ID,
            PromptLanguage::English => NOT_FOUND_EN,
        }
    }

    /// Placeholder for a journal without a rank.
    pub fn unranked(&self) -> &'static str {
        match self {
            PromptLanguage::Indonesian => UNRANKED_ID,
            PromptLanguage::English => UNRANKED_EN,
        }
    }

    /// Placeholder for a metric that does not apply.
    pub fn not_applicable(&self) -> &'static str {
        NOT_APPLICABLE
    }
}

fn sources_phrase(language: PromptLanguage) -> String {
    let joiner = match language {
        PromptLanguage::Indonesian => " dan ",
        PromptLanguage::English => " and ",
    };
    PRIMARY_SOURCES.join(joiner)
}

fn kind_hint(kind: IdentifierKind, language: PromptLanguage) -> &'static str {
    match (language, kind) {
        (PromptLanguage::Indonesian, IdentifierKind::Issn) => "Input ini tampaknya berupa ISSN.",
        (PromptLanguage::Indonesian, IdentifierKind::Doi) => "Input ini tampaknya berupa DOI artikel.",
        (PromptLanguage::Indonesian, IdentifierKind::Url) => {
            "Input ini tampaknya berupa URL halaman jurnal."
        }
        (PromptLanguage::Indonesian, IdentifierKind::Name) => {
            "Input ini tampaknya berupa nama jurnal."
        }
        (PromptLanguage::English, IdentifierKind::Issn) => "The input appears to be an ISSN.",
        (PromptLanguage::English, IdentifierKind::Doi) => "The input appears to be an article DOI.",
        (PromptLanguage::English, IdentifierKind::Url) => {
            "The input appears to be a journal web page URL."
        }
        (PromptLanguage::English, IdentifierKind::Name) => "The input appears to be a journal name.",
    }
}

fn sentinel_clause(language: PromptLanguage) -> String {
    match language {
        PromptLanguage::Indonesian => format!(
            "Fokus pada data dari {}. Jika informasi tidak ditemukan, berikan jawaban '{}' atau '{}' pada kolom yang sesuai, jangan mengarang nilai.",
            sources_phrase(language),
            language.not_found(),
            language.not_applicable()
        ),
        PromptLanguage::English => format!(
            "Prioritize data from {}. If a piece of information cannot be found, answer '{}' or '{}' in the matching field; never invent values.",
            sources_phrase(language),
            language.not_found(),
            language.not_applicable()
        ),
    }
}

/// Prompt for a journal identifier typed by the user.
pub fn text_prompt(query: &TextQuery, language: PromptLanguage) -> String {
    let hint = kind_hint(query.kind(), language);
    match language {
        PromptLanguage::Indonesian => format!(
            "Analisis kualitas jurnal ilmiah berdasarkan informasi berikut: \"{}\". Input ini bisa berupa nama jurnal, ISSN, link DOI, atau URL halaman utama jurnal. {} {}",
            query.as_str(),
            hint,
            sentinel_clause(language)
        ),
        PromptLanguage::English => format!(
            "Assess the quality of the scientific journal identified by: \"{}\". The input may be a journal name, an ISSN, a DOI link, or the journal's home page URL. {} {}",
            query.as_str(),
            hint,
            sentinel_clause(language)
        ),
    }
}

/// Prompt for an attached document.
pub fn document_prompt(language: PromptLanguage) -> String {
    match language {
        PromptLanguage::Indonesian => format!(
            "Analisis kualitas jurnal ilmiah berdasarkan dokumen terlampir. Identifikasi nama jurnal, ISSN, dan metrik relevan lainnya dari dokumen tersebut. {}",
            sentinel_clause(language)
        ),
        PromptLanguage::English => format!(
            "Assess the quality of the scientific journal that published the attached document. Identify the journal name, ISSN and other relevant metrics from the document. {}",
            sentinel_clause(language)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_prompt_names_query_and_sources() {
        let query = TextQuery::new("Journal of Example Studies").unwrap();
        for language in [PromptLanguage::Indonesian, PromptLanguage::English] {
            let prompt = text_prompt(&query, language);
            assert!(prompt.contains("\"Journal of Example Studies\""));
            assert!(prompt.contains("Scopus"));
            assert!(prompt.contains("SINTA"));
            assert!(prompt.contains(language.not_found()));
            assert!(prompt.contains("N/A"));
        }
    }

    #[test]
    fn test_text_prompt_includes_kind_hint() {
        let query = TextQuery::new("0317-8471").unwrap();
        let prompt = text_prompt(&query, PromptLanguage::English);
        assert!(prompt.contains("appears to be an ISSN"));

        let query = TextQuery::new("https://doi.org/10.1038/nature12345").unwrap();
        let prompt = text_prompt(&query, PromptLanguage::Indonesian);
        assert!(prompt.contains("berupa DOI"));
    }

    #[test]
    fn test_document_prompt() {
        let prompt = document_prompt(PromptLanguage::Indonesian);
        assert!(prompt.contains("dokumen terlampir"));
        assert!(prompt.contains("Tidak Ditemukan"));
        assert!(prompt.contains("Scopus dan SINTA"));
    }

    #[test]
    fn test_language_serde() {
        let lang: PromptLanguage = serde_json::from_str("\"english\"").unwrap();
        assert_eq!(lang, PromptLanguage::English);
        assert_eq!(
            serde_json::to_string(&PromptLanguage::Indonesian).unwrap(),
            "\"indonesian\""
        );
    }
}
