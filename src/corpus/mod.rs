//! Static corpora: conversational intents and crime entries.
//!
//! Both collections are loaded once at startup and never mutated. Loading is
//! all-or-nothing: a malformed or semantically invalid file is a fatal error,
//! the process must not serve with partially loaded data.

pub mod error;


pub use error::CorpusError;

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// A recognized conversational purpose with example phrasings and canned
/// replies.
#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    /// Stable identifier, e.g. `"greeting"`.
    pub id: String,
    /// Example phrasings; each is embedded separately at load time.
    pub patterns: Vec<String>,
    /// Canned replies; one is chosen per match by the response selector.
    pub responses: Vec<String>,
}

/// A crime category with trigger phrases and recommendation scenarios.
#[derive(Debug, Clone, Deserialize)]
pub struct CrimeEntry {
    /// Unique label, e.g. `"Burglary"`.
    pub crime: String,
    /// Informational description, used as the chat-mode reply when this entry
    /// wins disambiguation. Optional in the corpus format.
    #[serde(default)]
    pub description: String,
    /// Trigger prompts; embedded together with the label as one unit.
    #[serde(default)]
    pub prompts: Vec<String>,
    /// Recommendation scenarios owned by this entry.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl CrimeEntry {
    /// The text embedded for this entry: label concatenated with its prompts.
    pub fn match_text(&self) -> String {
        if self.prompts.is_empty() {
            return self.crime.clone();
        }
        format!("{} {}", self.crime, self.prompts.join(" "))
    }
}

/// A group of recommendation strings for one situation.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct IntentsFile {
    intents: Vec<Intent>,
}

#[derive(Debug, Deserialize)]
struct RecommendationsFile {
    crime_prevention_recommendations: Vec<CrimeEntry>,
}

/// The full static corpus, validated and indexed by crime label.
#[derive(Debug)]
pub struct Corpus {
    intents: Vec<Intent>,
    crimes: Vec<CrimeEntry>,
    label_index: HashMap<String, usize>,
}

impl Corpus {
    /// Builds a corpus from already-parsed collections, enforcing the load
    /// invariants (non-empty lists, unique labels).
    pub fn new(intents: Vec<Intent>, crimes: Vec<CrimeEntry>) -> Result<Self, CorpusError> {
        for intent in &intents {
            if intent.id.trim().is_empty() {
                return Err(CorpusError::EmptyIntentId);
            }
            if intent.patterns.is_empty() {
                return Err(CorpusError::IntentWithoutPatterns {
                    id: intent.id.clone(),
                });
            }
            if intent.responses.is_empty() {
                return Err(CorpusError::IntentWithoutResponses {
                    id: intent.id.clone(),
                });
            }
        }

        let mut label_index = HashMap::with_capacity(crimes.len());
        for (idx, entry) in crimes.iter().enumerate() {
            if entry.crime.trim().is_empty() {
                return Err(CorpusError::EmptyCrimeLabel { index: idx });
            }
            if label_index.insert(entry.crime.clone(), idx).is_some() {
                return Err(CorpusError::DuplicateCrimeLabel {
                    label: entry.crime.clone(),
                });
            }
        }

        Ok(Self {
            intents,
            crimes,
            label_index,
        })
    }

    /// Loads and validates both corpus files.
    pub fn load(intents_path: &Path, recommendations_path: &Path) -> Result<Self, CorpusError> {
        let intents = Self::load_intents(intents_path)?;
        let crimes = Self::load_crimes(recommendations_path)?;
        Self::new(intents, crimes)
    }

    fn load_intents(path: &Path) -> Result<Vec<Intent>, CorpusError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let file: IntentsFile =
            serde_json::from_str(&raw).map_err(|source| CorpusError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(file.intents)
    }

    fn load_crimes(path: &Path) -> Result<Vec<CrimeEntry>, CorpusError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let file: RecommendationsFile =
            serde_json::from_str(&raw).map_err(|source| CorpusError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(file.crime_prevention_recommendations)
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn crimes(&self) -> &[CrimeEntry] {
        &self.crimes
    }

    /// Exact-label lookup. Case-sensitive by design: labels are corpus keys,
    /// not user input.
    pub fn crime_by_label(&self, label: &str) -> Option<&CrimeEntry> {
        self.label_index.get(label).map(|&idx| &self.crimes[idx])
    }

    /// Total number of recommendation strings across all entries.
    pub fn recommendation_count(&self) -> usize {
        self.crimes
            .iter()
            .flat_map(|c| c.scenarios.iter())
            .map(|s| s.recommendations.len())
            .sum()
    }
}
