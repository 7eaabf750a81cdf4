//! Domain entities for the agent ledger

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Expertise recorded when a caller does not provide one
pub const DEFAULT_EXPERTISE: &str = "generalista cuántico";

/// Domain level recorded when a caller does not provide one
pub const DEFAULT_DOMAIN_LEVEL: i64 = 1;

/// Open annotation map; the only untyped part of an agent
pub type AgentMeta = Map<String, Value>;

/// Agent record inside the ledger document.
///
/// `id` is unique within [`LedgerDocument::agents`]; the ledger enforces
/// it, the file format does not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique key
    pub id: String,

    /// Display name
    pub name: String,

    /// Mirror BTC balance; only grants and seed data change it
    #[serde(default)]
    pub balance_btc_mirror: f64,

    /// Set on creation and by every successful grant
    #[serde(default)]
    pub ai_unlocked: bool,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Free-form expertise
    #[serde(default = "default_expertise")]
    pub expertise: String,

    /// Display-only network names (no uniqueness)
    #[serde(default)]
    pub neural_networks: Vec<String>,

    /// Conventionally 1..=9, not enforced
    #[serde(default = "default_domain_level")]
    pub domain_level: i64,

    /// Entries drawn from the domain catalog
    #[serde(default)]
    pub domains: Vec<String>,

    /// Extension point
    #[serde(default)]
    pub meta: AgentMeta,
}

fn default_expertise() -> String {
    DEFAULT_EXPERTISE.to_string()
}

fn default_domain_level() -> i64 {
    DEFAULT_DOMAIN_LEVEL
}

/// Mutable fields accepted by `add_agent`.
///
/// Everything except `name` has a default, matching the optional
/// parameters of the operation.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentProfile {
    /// Display name
    pub name: String,
    /// Default: empty
    pub description: String,
    /// Default: [`DEFAULT_EXPERTISE`]
    pub expertise: String,
    /// Default: empty
    pub neural_networks: Vec<String>,
    /// Default: [`DEFAULT_DOMAIN_LEVEL`]
    pub domain_level: i64,
    /// Default: empty
    pub domains: Vec<String>,
    /// Default: empty
    pub meta: AgentMeta,
}

impl AgentProfile {
    /// Profile with only a name; every other field defaulted
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            expertise: default_expertise(),
            neural_networks: Vec::new(),
            domain_level: DEFAULT_DOMAIN_LEVEL,
            domains: Vec::new(),
            meta: AgentMeta::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the expertise
    pub fn with_expertise(mut self, expertise: impl Into<String>) -> Self {
        self.expertise = expertise.into();
        self
    }

    /// Set the neural network list
    pub fn with_neural_networks<I, S>(mut self, networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.neural_networks = networks.into_iter().map(Into::into).collect();
        self
    }

    /// Set the domain level
    pub fn with_domain_level(mut self, level: i64) -> Self {
        self.domain_level = level;
        self
    }

    /// Set the domain list
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// Add one meta entry
    pub fn with_meta_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Materialize a brand-new agent: zero balance, AI unlocked
    pub(crate) fn into_new_agent(self, id: &str) -> Agent {
        Agent {
            id: id.to_string(),
            name: self.name,
            balance_btc_mirror: 0.0,
            ai_unlocked: true,
            description: self.description,
            expertise: self.expertise,
            neural_networks: self.neural_networks,
            domain_level: self.domain_level,
            domains: self.domains,
            meta: self.meta,
        }
    }

    /// Overwrite every mutable field except balance and unlock flag
    pub(crate) fn apply_to(self, agent: &mut Agent) {
        agent.name = self.name;
        agent.description = self.description;
        agent.expertise = self.expertise;
        agent.neural_networks = self.neural_networks;
        agent.domain_level = self.domain_level;
        agent.domains = self.domains;
        agent.meta = self.meta;
    }
}

/// Template for bulk agent creation.
///
/// Written once at initialization and never touched again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentGenerator {
    /// Number of agents the template is meant to produce
    pub target_count: u64,
    /// Reference agents
    pub sample_agents: Vec<Agent>,
    /// Free-form note
    pub generator_note: String,
}

/// The single persisted ledger document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    /// Fixed at initialization
    pub domain_catalog: Vec<String>,
    /// Write-once template
    pub agent_generator: AgentGenerator,
    /// Mutable agent list
    pub agents: Vec<Agent>,
}

impl LedgerDocument {
    /// Position of the first agent with `id`
    pub fn position(&self, id: &str) -> Option<usize> {
        self.agents.iter().position(|agent| agent.id == id)
    }

    /// Ids appearing more than once (possible only through external edits)
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for agent in &self.agents {
            if !seen.insert(agent.id.as_str()) && !duplicates.contains(&agent.id) {
                duplicates.push(agent.id.clone());
            }
        }
        duplicates
    }
}

/// Which path `add_agent` took. Both are success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New agent appended
    Created,
    /// Existing agent overwritten in place
    Updated,
}
