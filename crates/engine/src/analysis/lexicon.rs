use std::collections::{BTreeMap, HashMap};

/// Per-topic technical vocabulary used for technical-term detection.
///
/// Topic keys and terms are stored lowercased; lookups are case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    topics: HashMap<String, Vec<String>>,
}

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "floorplanning",
        &["macro", "placement", "routing", "congestion", "utilization", "aspect ratio"],
    ),
    (
        "placement",
        &["timing", "setup", "hold", "slack", "skew", "fanout", "load"],
    ),
    (
        "routing",
        &["drc", "via", "metal layer", "resistance", "capacitance", "crosstalk"],
    ),
    (
        "timing",
        &["setup", "hold", "slack", "skew", "clock", "corner", "violation"],
    ),
    (
        "power",
        &["leakage", "dynamic power", "ir drop", "electromigration", "voltage", "power gating"],
    ),
];

impl Lexicon {
    /// The built-in physical design lexicons.
    pub fn builtin() -> Self {
        let mut lexicon = Self::default();
        for (topic, terms) in BUILTIN {
            lexicon.extend(topic, terms.iter().copied());
        }
        lexicon
    }

    /// Built-in lexicons plus configured extra terms.
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut lexicon = Self::builtin();
        for (topic, terms) in extra {
            lexicon.extend(topic, terms.iter().map(String::as_str));
        }
        lexicon
    }

    /// Add terms to a topic, skipping blanks and duplicates.
    pub fn extend<'a>(&mut self, topic: &str, terms: impl IntoIterator<Item = &'a str>) {
        let entry = self.topics.entry(topic.trim().to_lowercase()).or_default();
        for term in terms {
            let term = term.trim().to_lowercase();
            if !term.is_empty() && !entry.contains(&term) {
                entry.push(term);
            }
        }
    }

    pub fn terms(&self, topic: &str) -> Option<&[String]> {
        self.topics
            .get(&topic.trim().to_lowercase())
            .map(Vec::as_slice)
    }

    /// Number of distinct topic terms occurring as substrings of `lowered_text`.
    ///
    /// The caller lowercases the text once per answer.
    pub fn count_matches(&self, topic: &str, lowered_text: &str) -> u32 {
        self.terms(topic)
            .map(|terms| {
                terms
                    .iter()
                    .filter(|term| lowered_text.contains(term.as_str()))
                    .count() as u32
            })
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_topics_present() {
        let lexicon = Lexicon::builtin();
        for topic in ["floorplanning", "placement", "routing", "timing", "power"] {
            assert!(lexicon.terms(topic).is_some(), "missing {}", topic);
        }
        assert!(lexicon.terms("analog").is_none());
    }

    #[test]
    fn test_topic_lookup_is_case_insensitive() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.terms("Routing"), lexicon.terms("routing"));
    }

    #[test]
    fn test_uppercase_terms_still_match() {
        // "DRC" is stored lowercased so it matches lowered answer text.
        let lexicon = Lexicon::builtin();
        let text = "Fixing DRC errors near each via".to_lowercase();
        assert_eq!(lexicon.count_matches("routing", &text), 2);
    }

    #[test]
    fn test_multi_word_terms_match() {
        let lexicon = Lexicon::builtin();
        let text = "keep the aspect ratio near one".to_lowercase();
        assert_eq!(lexicon.count_matches("floorplanning", &text), 1);
    }

    #[test]
    fn test_unknown_topic_counts_nothing() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.count_matches("analog", "macro placement routing"), 0);
    }

    #[test]
    fn test_with_extra_merges_without_duplicates() {
        let mut extra = BTreeMap::new();
        extra.insert(
            "Routing".to_string(),
            vec!["Antenna".to_string(), "via".to_string(), "  ".to_string()],
        );
        extra.insert("dft".to_string(), vec!["scan chain".to_string()]);

        let lexicon = Lexicon::with_extra(&extra);
        let routing = lexicon.terms("routing").unwrap();
        assert!(routing.contains(&"antenna".to_string()));
        assert_eq!(routing.iter().filter(|t| *t == "via").count(), 1);
        assert_eq!(lexicon.terms("dft").unwrap(), ["scan chain".to_string()]);
    }
}
