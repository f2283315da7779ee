//! Response schema for constrained decoding.
//!
//! Uses the OpenAPI subset the generative service accepts (`OBJECT`,
//! `STRING`). Every top-level field, `metrics` included, is required.

use serde_json::{json, Value};

use super::prompt::PromptLanguage;

/// Top-level fields the service must always return.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "journalName",
    "issn",
    "indexing",
    "rank",
    "metrics",
    "reputationSummary",
    "reviewTimeEstimation",
    "tipsForAuthors",
];

/// Sub-fields of `metrics`.
pub const METRIC_FIELDS: [&str; 4] = ["sjr", "citeScore", "impactFactor", "hIndex"];

fn string_field(description: String) -> Value {
    json!({ "type": "STRING", "description": description })
}

/// Build the response schema with field descriptions in `language`.
pub fn response_schema(language: PromptLanguage) -> Value {
    let not_found = language.not_found();
    let unranked = language.unranked();
    let na = language.not_applicable();

    let d = |id: &str, en: &str| match language {
        PromptLanguage::Indonesian => id.to_string(),
        PromptLanguage::English => en.to_string(),
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "journalName": string_field(d("Nama lengkap jurnal", "Full journal name")),
            "issn": string_field(d(
                &format!("Nomor ISSN atau e-ISSN jurnal. Tulis '{}' jika tidak ada.", not_found),
                &format!("The journal's ISSN or e-ISSN. Write '{}' if none exists.", not_found),
            )),
            "indexing": string_field(d(
                "Indeksasi utama (misal: Scopus, Sinta, atau keduanya)",
                "Main indexing (e.g. Scopus, Sinta, or both)",
            )),
            "rank": string_field(d(
                &format!("Peringkat jurnal (misal: Q1, Q2, S1, S2). Tulis '{}' jika tidak ada peringkat.", unranked),
                &format!("Journal rank (e.g. Q1, Q2, S1, S2). Write '{}' if the journal has no rank.", unranked),
            )),
            "metrics": {
                "type": "OBJECT",
                "properties": {
                    "sjr": string_field(d(
                        &format!("SCImago Journal Rank (SJR). Tulis '{}' jika tidak berlaku.", na),
                        &format!("SCImago Journal Rank (SJR). Write '{}' if not applicable.", na),
                    )),
                    "citeScore": string_field(d(
                        &format!("CiteScore dari Scopus. Tulis '{}' jika tidak berlaku.", na),
                        &format!("Scopus CiteScore. Write '{}' if not applicable.", na),
                    )),
                    "impactFactor": string_field(d(
                        &format!("Impact Factor (JCR). Tulis '{}' jika tidak berlaku.", na),
                        &format!("Impact Factor (JCR). Write '{}' if not applicable.", na),
                    )),
                    "hIndex": string_field(d(
                        &format!("H-Index jurnal. Tulis '{}' jika tidak berlaku.", na),
                        &format!("Journal H-Index. Write '{}' if not applicable.", na),
                    )),
                }
            },
            "reputationSummary": string_field(d(
                "Ringkasan reputasi, bidang fokus, dan penerbit jurnal. Jelaskan secara singkat.",
                "Short summary of the journal's reputation, focus area and publisher.",
            )),
            "reviewTimeEstimation": string_field(d(
                "Estimasi waktu rata-rata dari submit hingga publikasi. Berikan rentang waktu (misal: 3-6 bulan).",
                "Average time from submission to publication, as a range (e.g. 3-6 months).",
            )),
            "tipsForAuthors": string_field(d(
                "Saran dan tips praktis untuk penulis yang ingin submit ke jurnal ini. Berikan dalam bentuk poin-poin.",
                "Practical tips for authors submitting to this journal, as bullet points.",
            )),
        },
        "required": REQUIRED_FIELDS,
    })
}
