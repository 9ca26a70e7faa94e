//! Keyword-scored knowledge retrieval
//!
//! A small in-memory document store over curated oceanography snippets.
//! Retrieval is plain lexical scoring, no embeddings: word overlap, phrase
//! containment, domain-term boosts and a priority weight. Used by the
//! query command to answer questions that parse to no filter at all.

use serde::{Deserialize, Serialize};

/// Relative importance of a document at ranking time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One retrievable knowledge snippet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDoc {
    pub id: String,
    pub text: String,
    pub category: String,
    /// Which measured quantity this snippet is about, when it is about one
    pub parameter: Option<String>,
    pub priority: Priority,
}

/// Domain terms that boost a match when present in query and document
const DOMAIN_TERMS: [&str; 9] = [
    "argo",
    "float",
    "temperature",
    "salinity",
    "depth",
    "ocean",
    "profile",
    "psu",
    "degc",
];

/// In-memory document store with keyword retrieval
pub struct KnowledgeStore {
    docs: Vec<KnowledgeDoc>,
}

impl KnowledgeStore {
    /// An empty store
    pub fn new() -> Self {
        Self { docs: Vec::new() }
    }

    /// A store preloaded with the built-in oceanography corpus
    pub fn with_builtin_corpus() -> Self {
        let mut store = Self::new();
        for doc in builtin_corpus() {
            store.upsert(doc);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Insert a document, replacing any existing one with the same id
    pub fn upsert(&mut self, doc: KnowledgeDoc) {
        match self.docs.iter_mut().find(|d| d.id == doc.id) {
            Some(existing) => *existing = doc,
            None => self.docs.push(doc),
        }
    }

    /// Return the top `k` documents for a query, best first
    ///
    /// A blank query returns the first `k` documents in insertion order.
    pub fn retrieve(&self, query: &str, k: usize) -> Vec<&KnowledgeDoc> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.docs.iter().take(k).collect();
        }

        let mut scored: Vec<(f64, &KnowledgeDoc)> = self
            .docs
            .iter()
            .map(|doc| (score(&q, doc), doc))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().take(k).map(|(_, d)| d).collect()
    }

    /// Compose a short answer from the best-matching context
    pub fn summarize(&self, query: &str, contexts: &[&KnowledgeDoc]) -> String {
        let Some(primary) = contexts.first() else {
            return "I don't have specific information about that query in my knowledge base."
                .to_string();
        };

        let q = query.to_lowercase();
        let has_temperature =
            q.contains("temperature") || q.contains("temp") || q.contains("°c");
        let has_salinity = q.contains("salinity") || q.contains("salt") || q.contains("psu");
        let has_depth = q.contains("depth") || q.contains('m');
        let has_location = ["lat", "lon", "equator", "pacific", "atlantic", "indian", "arctic"]
            .iter()
            .any(|term| q.contains(term));

        let text = primary.text.trim().replace('\n', " ");
        if has_temperature && has_salinity && has_depth {
            format!(
                "Based on ARGO float data, I can provide comprehensive analysis of \
                 temperature, salinity, and depth profiles. {}",
                text
            )
        } else if has_temperature {
            format!("Temperature analysis from ARGO data: {}", text)
        } else if has_salinity {
            format!("Salinity information from ARGO observations: {}", text)
        } else if has_location {
            format!("Regional ocean data analysis: {}", text)
        } else if ["argo", "float", "ocean"].iter().any(|t| q.contains(t)) {
            format!("From ARGO float data analysis: {}", text)
        } else {
            text
        }
    }

    /// Retrieve and summarise in one step
    pub fn answer(&self, query: &str, k: usize) -> String {
        let contexts = self.retrieve(query, k);
        self.summarize(query, &contexts)
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::with_builtin_corpus()
    }
}

fn score(query: &str, doc: &KnowledgeDoc) -> f64 {
    let text = doc.text.to_lowercase();
    let mut score = 0.0;

    let query_words: std::collections::HashSet<&str> = query.split_whitespace().collect();
    let text_words: std::collections::HashSet<&str> = text.split_whitespace().collect();
    score += query_words.intersection(&text_words).count() as f64 * 10.0;

    if text.contains(query) {
        score += 20.0;
    }

    for term in DOMAIN_TERMS {
        if query.contains(term) && text.contains(term) {
            score += 15.0;
        }
    }

    if let Some(parameter) = &doc.parameter {
        if query.contains(parameter.as_str()) {
            score += 25.0;
        }
    }

    score += match doc.priority {
        Priority::High => 10.0,
        Priority::Medium => 5.0,
        Priority::Low => 0.0,
    };

    // Longer snippets carry more context, capped so length never dominates
    score += (text.len().min(500) as f64) / 500.0 * 5.0;

    score
}

fn builtin_corpus() -> Vec<KnowledgeDoc> {
    let doc = |id: &str, category: &str, parameter: Option<&str>, priority, text: &str| {
        KnowledgeDoc {
            id: id.to_string(),
            text: text.to_string(),
            category: category.to_string(),
            parameter: parameter.map(str::to_string),
            priority,
        }
    };

    vec![
        doc(
            "argo_overview",
            "overview",
            None,
            Priority::High,
            "ARGO floats are autonomous profiling floats that collect temperature, \
             salinity, and pressure data in the upper ocean. They typically operate at \
             depths between 0-2000 meters, measuring temperature from -2°C to 40°C and \
             salinity from 20-40 PSU. ARGO floats surface every 10 days to transmit \
             data via satellite.",
        ),
        doc(
            "temperature_ranges",
            "parameter",
            Some("temperature"),
            Priority::High,
            "Ocean temperature ranges vary by location and depth. Surface temperatures \
             typically range from -2°C in polar regions to 35°C in equatorial regions. \
             Deep ocean temperatures are more stable, usually between 0-4°C. \
             Temperature decreases with depth in most ocean regions.",
        ),
        doc(
            "salinity_ranges",
            "parameter",
            Some("salinity"),
            Priority::High,
            "Ocean salinity typically ranges from 28-40 PSU (Practical Salinity \
             Units). Lower salinity values are found in polar regions and near river \
             mouths due to freshwater input, while higher values occur in subtropical \
             regions where evaporation exceeds precipitation.",
        ),
        doc(
            "depth_profiles",
            "methodology",
            None,
            Priority::High,
            "ARGO floats provide vertical profiles of temperature and salinity. The \
             mixed layer (surface to ~100m) shows strong seasonal variations, while \
             the deep ocean (below 1000m) is more stable. The thermocline region \
             (100-1000m) shows the strongest temperature gradients.",
        ),
        doc(
            "ocean_regions",
            "geography",
            None,
            Priority::Medium,
            "Major ocean regions include: Atlantic Ocean (temperature 2-28°C, salinity \
             33-37 PSU), Pacific Ocean (similar ranges), Indian Ocean (warmer surface \
             waters), Southern Ocean (cold temperatures around 0-10°C), Arctic Ocean \
             (very cold, low salinity).",
        ),
        doc(
            "seasonal_patterns",
            "temporal",
            None,
            Priority::Medium,
            "Ocean temperatures show strong seasonal cycles, especially in the mixed \
             layer. Northern hemisphere oceans are warmest in summer (July-August), \
             southern hemisphere in winter (January-February). Deep ocean temperatures \
             show minimal seasonal variation.",
        ),
        doc(
            "climate_patterns",
            "climate",
            None,
            Priority::Medium,
            "El Niño events cause warmer temperatures in the eastern Pacific, La Niña \
             causes cooler conditions. The Atlantic Meridional Overturning Circulation \
             affects North Atlantic temperatures. Climate change is causing ocean \
             warming at all depths.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_corpus_loads() {
        let store = KnowledgeStore::with_builtin_corpus();
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut store = KnowledgeStore::with_builtin_corpus();
        store.upsert(KnowledgeDoc {
            id: "argo_overview".to_string(),
            text: "replacement text".to_string(),
            category: "overview".to_string(),
            parameter: None,
            priority: Priority::Low,
        });
        assert_eq!(store.len(), 7);
        let docs = store.retrieve("", 7);
        assert_eq!(docs[0].text, "replacement text");
    }

    #[test]
    fn test_blank_query_returns_head() {
        let store = KnowledgeStore::with_builtin_corpus();
        let docs = store.retrieve("   ", 3);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].id, "argo_overview");
    }

    #[test]
    fn test_parameter_queries_rank_their_doc_first() {
        let store = KnowledgeStore::with_builtin_corpus();
        let docs = store.retrieve("what temperature ranges do floats see", 3);
        assert_eq!(docs[0].id, "temperature_ranges");

        let docs = store.retrieve("typical salinity values", 3);
        assert_eq!(docs[0].id, "salinity_ranges");
    }

    #[test]
    fn test_k_limits_results() {
        let store = KnowledgeStore::with_builtin_corpus();
        assert_eq!(store.retrieve("ocean", 2).len(), 2);
        assert_eq!(store.retrieve("ocean", 100).len(), 7);
    }

    #[test]
    fn test_summarize_without_context() {
        let store = KnowledgeStore::new();
        let answer = store.summarize("anything", &[]);
        assert!(answer.contains("don't have specific information"));
    }

    #[test]
    fn test_summarize_prefixes_by_topic() {
        let store = KnowledgeStore::with_builtin_corpus();
        let answer = store.answer("temperature near the equator", 3);
        assert!(answer.starts_with("Temperature analysis from ARGO data:"));

        let answer = store.answer("salinity in the atlantic", 3);
        assert!(answer.starts_with("Salinity information from ARGO observations:"));
    }
}
