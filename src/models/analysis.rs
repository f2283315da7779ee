//! Journal quality assessment returned by the analysis service.

use serde::{Deserialize, Serialize};

/// "Not found" sentinel used by Indonesian prompts.
pub const NOT_FOUND_ID: &str = "Tidak Ditemukan";

/// "Not found" sentinel used by English prompts.
pub const NOT_FOUND_EN: &str = "Not Found";

/// "Unranked" sentinel used by Indonesian prompts.
pub const UNRANKED_ID: &str = "Tidak Terindeks";

/// "Unranked" sentinel used by English prompts.
pub const UNRANKED_EN: &str = "Not Indexed";

/// "Not applicable" sentinel for metrics, shared by all prompt languages.
pub const NOT_APPLICABLE: &str = "N/A";

const SENTINELS: [&str; 5] = [
    NOT_FOUND_ID,
    NOT_FOUND_EN,
    UNRANKED_ID,
    UNRANKED_EN,
    NOT_APPLICABLE,
];

/// Returns true when `value` is one of the placeholder strings the model is
/// told to emit for data it could not determine.
pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(value))
}

/// Quality assessment of a single journal.
///
/// Every top-level field is required when deserializing. Absent data is
/// carried as a sentinel string, never as a missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Full journal name
    pub journal_name: String,

    /// ISSN or e-ISSN, or the "not found" sentinel
    pub issn: String,

    /// Main indexing databases (e.g. "Scopus", "Sinta", or both)
    pub indexing: String,

    /// Journal rank (e.g. Q1, S2), or the "unranked" sentinel
    pub rank: String,

    /// Bibliometric indicators
    pub metrics: Metrics,

    /// Reputation, focus and publisher summary
    pub reputation_summary: String,

    /// Submission-to-publication time, usually a range
    pub review_time_estimation: String,

    /// Practical advice for submitting authors
    pub tips_for_authors: String,
}

/// Bibliometric indicators. Each value is a number rendered as a string or
/// the "not applicable" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sjr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cite_score: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_factor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_index: Option<String>,
}

/// Identifies one of the four bibliometric indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Sjr,
    CiteScore,
    ImpactFactor,
    HIndex,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Sjr,
        Metric::CiteScore,
        Metric::ImpactFactor,
        Metric::HIndex,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Sjr => "SJR",
            Metric::CiteScore => "CiteScore",
            Metric::ImpactFactor => "Impact Factor",
            Metric::HIndex => "H-Index",
        }
    }

    /// Short explanation of what the indicator measures
    pub fn description(&self) -> &'static str {
        match self {
            Metric::Sjr => "SCImago Journal Rank: scientific influence weighted by the prestige of citing journals",
            Metric::CiteScore => "Average citations per document over a four-year window (Scopus)",
            Metric::ImpactFactor => "Average citations per article over a two-year window (JCR/Clarivate)",
            Metric::HIndex => "h articles each cited at least h times",
        }
    }
}

impl Metrics {
    /// Value of a single indicator, if the service returned one.
    pub fn get(&self, metric: Metric) -> Option<&str> {
        match metric {
            Metric::Sjr => self.sjr.as_deref(),
            Metric::CiteScore => self.cite_score.as_deref(),
            Metric::ImpactFactor => self.impact_factor.as_deref(),
            Metric::HIndex => self.h_index.as_deref(),
        }
    }
}

impl AnalysisResult {
    /// Indicators that carry a real value, in display order.
    pub fn visible_metrics(&self) -> Vec<(Metric, &str)> {
        Metric::ALL
            .iter()
            .filter_map(|m| self.metrics.get(*m).map(|v| (*m, v)))
            .filter(|(_, v)| !is_sentinel(v))
            .collect()
    }

    /// Coarse rank tier derived from the free-form rank label.
    pub fn rank_tier(&self) -> RankTier {
        classify_rank(&self.rank)
    }
}

/// Rank tier parsed from a free-form label. Scopus quartiles (Q1-Q4) and
/// SINTA levels (S1-S6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankTier {
    Q1,
    Q2,
    Q3,
    Q4,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
    Unranked,
}

impl RankTier {
    /// 1 for the best tier of either scale, 6 for the lowest SINTA level,
    /// `None` when unranked.
    pub fn level(&self) -> Option<u8> {
        match self {
            RankTier::Q1 | RankTier::S1 => Some(1),
            RankTier::Q2 | RankTier::S2 => Some(2),
            RankTier::Q3 | RankTier::S3 => Some(3),
            RankTier::Q4 | RankTier::S4 => Some(4),
            RankTier::S5 => Some(5),
            RankTier::S6 => Some(6),
            RankTier::Unranked => None,
        }
    }
}

/// Classify a rank label such as "Q1", "Sinta 2 (S2)" or "Q2 / S1".
///
/// Higher tiers win when a label names several, so "Q2 / S1" is S1.
pub fn classify_rank(rank: &str) -> RankTier {
    let lower = rank.to_lowercase();
    let has = |token: &str| {
        lower
            .match_indices(token)
            .any(|(i, _)| {
                let after = lower[i + token.len()..].chars().next();
                !matches!(after, Some(c) if c.is_ascii_digit())
            })
    };

    const ORDER: [(&str, &str, RankTier, RankTier); 4] = [
        ("q1", "s1", RankTier::Q1, RankTier::S1),
        ("q2", "s2", RankTier::Q2, RankTier::S2),
        ("q3", "s3", RankTier::Q3, RankTier::S3),
        ("q4", "s4", RankTier::Q4, RankTier::S4),
    ];
    for (q, s, q_tier, s_tier) in ORDER {
        if has(q) {
            return q_tier;
        }
        if has(s) {
            return s_tier;
        }
    }
    if has("s5") {
        return RankTier::S5;
    }
    if has("s6") {
        return RankTier::S6;
    }
    RankTier::Unranked
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"journalName":"Journal of Example Studies","issn":"1234-5678","indexing":"Scopus","rank":"Q2","metrics":{"sjr":"0.45","citeScore":"1.2","impactFactor":"N/A","hIndex":"N/A"},"reputationSummary":"...","reviewTimeEstimation":"3-6 months","tipsForAuthors":"..."}"#;

    #[test]
    fn test_deserialize_camel_case() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.journal_name, "Journal of Example Studies");
        assert_eq!(result.metrics.cite_score.as_deref(), Some("1.2"));
        assert_eq!(result.review_time_estimation, "3-6 months");
    }

    #[test]
    fn test_serialized_keys_match_wire_contract() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        let original: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(value, original);
    }

    #[test]
    fn test_missing_top_level_field_is_rejected() {
        let json = r#"{"journalName":"X","issn":"1234-5678","indexing":"Scopus","rank":"Q2","reputationSummary":"","reviewTimeEstimation":"","tipsForAuthors":""}"#;
        let result: Result<AnalysisResult, _> = serde_json::from_str(json);
        assert!(result.is_err(), "metrics must be present");
    }

    #[test]
    fn test_is_sentinel() {
        assert!(is_sentinel("N/A"));
        assert!(is_sentinel("n/a"));
        assert!(is_sentinel(" Tidak Ditemukan "));
        assert!(is_sentinel("tidak terindeks"));
        assert!(is_sentinel("Not Found"));
        assert!(is_sentinel(""));
        assert!(!is_sentinel("0.45"));
        assert!(!is_sentinel("Q1"));
    }

    #[test]
    fn test_visible_metrics_skips_sentinels() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE).unwrap();
        let visible = result.visible_metrics();
        assert_eq!(visible, vec![(Metric::Sjr, "0.45"), (Metric::CiteScore, "1.2")]);
    }

    #[test]
    fn test_classify_rank() {
        assert_eq!(classify_rank("Q1"), RankTier::Q1);
        assert_eq!(classify_rank("q3"), RankTier::Q3);
        assert_eq!(classify_rank("Sinta 2 (S2)"), RankTier::S2);
        assert_eq!(classify_rank("Q2 / S1"), RankTier::S1);
        assert_eq!(classify_rank("S5"), RankTier::S5);
        assert_eq!(classify_rank("Tidak Terindeks"), RankTier::Unranked);
        assert_eq!(classify_rank("S10"), RankTier::Unranked);
        assert_eq!(RankTier::S6.level(), Some(6));
        assert_eq!(RankTier::Unranked.level(), None);
    }
}
