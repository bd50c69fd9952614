//! Test fixtures for integration tests.

use std::sync::Arc;

use vigil::corpus::{Corpus, CrimeEntry, Intent, Scenario};
use vigil::elaborate::Elaborator;
use vigil::embedding::TextEncoder;
use vigil::matcher::RoundRobinSelector;
use vigil::pipeline::{CrimeAssistant, PipelineSettings};
use vigil::sentiment::SentimentScorer;

/// Builder for synthetic corpora.
#[derive(Default)]
pub struct CorpusBuilder {
    intents: Vec<Intent>,
    crimes: Vec<CrimeEntry>,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intent(mut self, id: &str, patterns: &[&str], responses: &[&str]) -> Self {
        self.intents.push(Intent {
            id: id.to_string(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn crime(
        mut self,
        label: &str,
        description: &str,
        prompts: &[&str],
        recommendations: &[&str],
    ) -> Self {
        self.crimes.push(CrimeEntry {
            crime: label.to_string(),
            description: description.to_string(),
            prompts: prompts.iter().map(|s| s.to_string()).collect(),
            scenarios: vec![Scenario {
                recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
            }],
        });
        self
    }

    pub fn build(self) -> Arc<Corpus> {
        Arc::new(Corpus::new(self.intents, self.crimes).expect("fixture corpus is valid"))
    }
}

/// Assistant over stub models with deterministic response selection.
pub fn stub_assistant(corpus: Arc<Corpus>, settings: PipelineSettings) -> CrimeAssistant {
    CrimeAssistant::new(
        corpus,
        Arc::new(TextEncoder::stub()),
        Arc::new(SentimentScorer::stub()),
        Some(Elaborator::mock()),
        Box::new(RoundRobinSelector::new()),
        settings,
    )
    .expect("assistant builds")
}

/// Assistant over the corpus files shipped in `data/`.
pub fn shipped_assistant() -> CrimeAssistant {
    let corpus = Arc::new(
        Corpus::load(
            std::path::Path::new("./data/intents.json"),
            std::path::Path::new("./data/recommendations.json"),
        )
        .expect("shipped corpus loads"),
    );
    stub_assistant(corpus, PipelineSettings::default())
}
