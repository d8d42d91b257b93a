//! Vocabulary corpus: the built-in verb list and validated custom lists.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CoreError;
use crate::types::VocabularyEntry;

/// Built-in Spanish reflexive verbs with their English glosses.
const VERB_DATA: [(&str, &str); 31] = [
    ("Abrocharse", "To button / To tie / To fasten / To zip"),
    ("Aburrirse (de)", "To get bored (with)"),
    ("Acordarse (de)", "To remember"),
    ("Acostarse", "To lay down / To go to bed"),
    ("Afeitarse", "To shave"),
    ("Alegrarse (de)", "To be glad / happy / pleased (about)"),
    ("Arreglarse", "To groom / To get ready"),
    ("Bañarse", "To take a bath / shower"),
    ("Cepillarse", "To brush (hair, teeth)"),
    ("Darse cuenta de", "To realize"),
    ("Despertarse", "To wake up"),
    ("Divertirse (con)", "To have fun (with)"),
    ("Dormirse", "To fall asleep / To oversleep"),
    ("Ducharse", "To shower"),
    ("Enamorarse (de)", "To fall in love (with)"),
    ("Enojarse (con)", "To get or become angry (with)"),
    ("Irse / Marcharse", "To leave / To go away"),
    ("Lavarse", "To wash oneself"),
    ("Levantarse", "To get up / To stand up"),
    ("Llamarse", "To be named / To be called"),
    ("Maquillarse", "To put makeup on"),
    ("Olvidarse (de)", "To forget"),
    ("Peinarse", "To comb your hair"),
    ("Ponerse", "To put on (clothing) / To become"),
    ("Preocuparse por", "To worry about"),
    ("Quejarse de", "To complain about"),
    ("Quedarse", "To remain / To stay"),
    ("Quitarse", "To take off (clothing)"),
    ("Sentarse", "To sit down"),
    ("Sentirse", "To feel"),
    ("Vestirse", "To get dressed"),
];

/// An ordered, validated list of vocabulary entries.
///
/// Never mutated after construction. Every `source` is unique because it is
/// used as the pair key during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<VocabularyEntry>,
}

impl Corpus {
    /// The built-in reflexive verb list.
    pub fn builtin() -> Self {
        Self {
            entries: VERB_DATA
                .iter()
                .map(|&(source, target)| VocabularyEntry::new(source, target))
                .collect(),
        }
    }

    /// Validate and wrap a list of entries.
    pub fn from_entries(entries: Vec<VocabularyEntry>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::EmptyCorpus);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if entry.source.trim().is_empty() || entry.target.trim().is_empty() {
                return Err(CoreError::BlankEntry { index });
            }
            if !seen.insert(entry.source.as_str()) {
                return Err(CoreError::DuplicateSource(entry.source.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Parse a JSON array of `{"source": .., "target": ..}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<VocabularyEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a corpus file (see [`Corpus::from_json_str`] for the format).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabularyEntry> {
        self.entries.get(index)
    }

    /// Look up an entry by its pair key.
    pub fn find(&self, source: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.source == source)
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_corpus_is_valid() {
        let corpus = Corpus::builtin();
        assert_eq!(corpus.len(), 31);
        // Re-validating the built-in list must succeed.
        let revalidated = Corpus::from_entries(corpus.entries().to_vec()).unwrap();
        assert_eq!(revalidated, corpus);
    }

    #[test]
    fn builtin_corpus_contains_sentarse() {
        let corpus = Corpus::builtin();
        let entry = corpus.find("Sentarse").unwrap();
        assert_eq!(entry.target, "To sit down");
    }

    #[test]
    fn empty_corpus_rejected() {
        assert!(matches!(
            Corpus::from_entries(Vec::new()),
            Err(CoreError::EmptyCorpus)
        ));
    }

    #[test]
    fn blank_entry_rejected() {
        let entries = vec![
            VocabularyEntry::new("Lavarse", "To wash oneself"),
            VocabularyEntry::new("  ", "To feel"),
        ];
        assert!(matches!(
            Corpus::from_entries(entries),
            Err(CoreError::BlankEntry { index: 1 })
        ));
    }

    #[test]
    fn duplicate_source_rejected() {
        let entries = vec![
            VocabularyEntry::new("Lavarse", "To wash oneself"),
            VocabularyEntry::new("Lavarse", "To wash"),
        ];
        match Corpus::from_entries(entries) {
            Err(CoreError::DuplicateSource(s)) => assert_eq!(s, "Lavarse"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn parses_json_array() {
        let json = r#"[
            {"source": "Ducharse", "target": "To shower"},
            {"source": "Vestirse", "target": "To get dressed"}
        ]"#;
        let corpus = Corpus::from_json_str(json).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(1).unwrap().source, "Vestirse");
    }

    #[test]
    fn malformed_json_reports_json_error() {
        assert!(matches!(
            Corpus::from_json_str("{\"source\": 1}"),
            Err(CoreError::Json(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"source": "Peinarse", "target": "To comb your hair"}}]"#).unwrap();

        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.find("Peinarse").unwrap().target, "To comb your hair");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Corpus::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
