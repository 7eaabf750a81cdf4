//! Default ledger contents, materialized the first time a ledger is opened

use serde_json::json;

use super::entities::{Agent, AgentGenerator, AgentMeta, LedgerDocument};

/// Agents the generator template is meant to produce
pub const GENERATOR_TARGET_COUNT: u64 = 10_000;

/// Note stored in the generator template
pub const GENERATOR_NOTE: &str =
    "Estructura de referencia para crear agentes en lote sin instanciar 10K en runtime.";

/// The fixed domain catalog
pub fn domain_catalog() -> Vec<String> {
    [
        "matemáticas avanzadas",
        "computación cuántica",
        "fusión nuclear",
        "criptografía",
        "sistemas distribuidos",
        "economía digital",
        "inteligencia artificial",
        "seguridad de redes",
        "robótica autónoma",
        "energía de plasma",
        "neurociencia aplicada",
        "ingeniería de materiales",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

struct SeedAgent {
    id: &'static str,
    name: &'static str,
    balance: f64,
    ai_unlocked: bool,
    description: &'static str,
    expertise: &'static str,
    neural_networks: [&'static str; 2],
    domain_level: i64,
    domains: [usize; 3],
    epoch_origin: &'static str,
}

const SEED_AGENTS: [SeedAgent; 4] = [
    SeedAgent {
        id: "bot_satoshi_mirror",
        name: "Satoshi Mirror Bot",
        balance: 0.0,
        ai_unlocked: false,
        description: "Bot focused on mirror mining and early economy.",
        expertise: "protocolos de consenso y minería espejo",
        neural_networks: ["MirrorNet-v3", "ConsensusForge"],
        domain_level: 7,
        domains: [5, 3, 4],
        epoch_origin: "2009",
    },
    SeedAgent {
        id: "bot_archivist_2009",
        name: "Archivist 2009",
        balance: 275.0,
        ai_unlocked: true,
        description: "Bot responsible for reading and synthesizing knowledge from bitcoin.org 2009.",
        expertise: "curación histórica y análisis de documentos",
        neural_networks: ["ArchiveMind", "TemporalIndex"],
        domain_level: 6,
        domains: [0, 3, 5],
        epoch_origin: "2009",
    },
    SeedAgent {
        id: "bot_quanta_fusion",
        name: "Quanta Fusion",
        balance: 88.0,
        ai_unlocked: true,
        description: "Bot dedicado a simular reactores de fusión y cadenas de suministro energéticas.",
        expertise: "simulación termo-nuclear y control de plasma",
        neural_networks: ["PlasmaWeave", "FusionCore-v2"],
        domain_level: 9,
        domains: [2, 9, 11],
        epoch_origin: "2041",
    },
    SeedAgent {
        id: "bot_quantum_oracle",
        name: "Quantum Oracle",
        balance: 144.0,
        ai_unlocked: true,
        description: "Bot oráculo para predicción de estados cuánticos y riesgos computacionales.",
        expertise: "modelado probabilístico cuántico",
        neural_networks: ["Q-Oracle", "SchroedingerTrace"],
        domain_level: 8,
        domains: [1, 0, 6],
        epoch_origin: "2035",
    },
];

/// The four canonical sample agents
pub fn example_agents() -> Vec<Agent> {
    let catalog = domain_catalog();
    SEED_AGENTS
        .iter()
        .map(|seed| {
            let mut meta = AgentMeta::new();
            meta.insert("epoch_origin".into(), json!(seed.epoch_origin));
            Agent {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                balance_btc_mirror: seed.balance,
                ai_unlocked: seed.ai_unlocked,
                description: seed.description.to_string(),
                expertise: seed.expertise.to_string(),
                neural_networks: seed.neural_networks.iter().map(|n| n.to_string()).collect(),
                domain_level: seed.domain_level,
                // Out-of-range indices are dropped rather than panicking
                domains: seed
                    .domains
                    .iter()
                    .filter_map(|&i| catalog.get(i).cloned())
                    .collect(),
                meta,
            }
        })
        .collect()
}

/// Generator template referencing the sample agents
pub fn agent_generator(target_count: u64) -> AgentGenerator {
    AgentGenerator {
        target_count,
        sample_agents: example_agents(),
        generator_note: GENERATOR_NOTE.to_string(),
    }
}

/// Complete default document
pub fn default_document() -> LedgerDocument {
    LedgerDocument {
        domain_catalog: domain_catalog(),
        agent_generator: agent_generator(GENERATOR_TARGET_COUNT),
        agents: example_agents(),
    }
}
