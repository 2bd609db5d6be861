use serde::{Deserialize, Serialize};

/// Topic assigned when the query could not be classified
pub const DEFAULT_TOPIC: &str = "general";

/// Intent assigned when the query could not be classified
pub const DEFAULT_INTENT: &str = "information";

/// Search terms used when the query offers nothing to search for
pub const FALLBACK_SEARCH_TERMS: [&str; 3] = ["finance", "tax", "accounting"];

/// Structured interpretation of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Main financial/legal topic (taxation, GST, auditing, ...)
    pub topic: String,

    /// Ordered search terms for legal retrieval
    pub search_terms: Vec<String>,

    /// Probable intent (information, calculation, advice)
    pub intent: String,

    /// Financial values, dates, or organizations mentioned in the query
    pub entities: Vec<String>,
}

impl Analysis {
    /// A `general`/`information` analysis carrying the given search terms
    pub fn general(search_terms: Vec<String>) -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            search_terms,
            intent: DEFAULT_INTENT.to_string(),
            entities: Vec::new(),
        }
    }

    pub fn fallback_search_terms() -> Vec<String> {
        FALLBACK_SEARCH_TERMS.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_analysis_defaults() {
        let analysis = Analysis::general(vec!["gst".to_string()]);
        assert_eq!(analysis.topic, "general");
        assert_eq!(analysis.intent, "information");
        assert_eq!(analysis.search_terms, vec!["gst"]);
        assert!(analysis.entities.is_empty());
    }

    #[test]
    fn test_fallback_search_terms() {
        assert_eq!(Analysis::fallback_search_terms(), vec!["finance", "tax", "accounting"]);
    }
}
