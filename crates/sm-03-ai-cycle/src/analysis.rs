//! Simulated analysis text.
//!
//! Nothing here is deterministic apart from the layout; every number comes
//! from the caller's random source.

use std::fmt::Write;

use rand::Rng;

use crate::entities::IdeaEntry;

/// Build the analysis text for one idea
pub fn quantum_ai_analysis<R: Rng + ?Sized>(entry: &IdeaEntry, rng: &mut R) -> String {
    let viability = rng.gen_range(0..100) as f64 / 100.0;
    let coherence = rng.gen_range(50..100);

    let mut analysis = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(analysis, "🧠 QUANTUM-AI ANALYSIS (State: |analyzing⟩)");
    let _ = writeln!(analysis, "{}", "=".repeat(45));
    let _ = writeln!(analysis, "Agent: {}", entry.agent_name);
    let _ = writeln!(analysis, "Quantum grant: {} QBTC", entry.grant_btc_mirror);
    let _ = writeln!(analysis);
    let _ = writeln!(analysis, "Original idea in superposition:");
    let _ = writeln!(analysis, "|idea⟩ = α|implementable⟩ + β|abstract⟩");
    let _ = writeln!(analysis);
    let _ = writeln!(analysis, "Quantum viability measurement:");
    let _ = writeln!(analysis, "⟨viabilidad|idea⟩ = {viability}");
    let _ = writeln!(analysis);
    let _ = writeln!(analysis, "Entanglement with mirror blockchain: ✓");
    let _ = writeln!(analysis, "Quantum coherence maintained: {coherence}%");
    analysis
}

/// Simulated decoherence factor in `[0, 0.3)`
pub fn decoherence_factor<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0..30) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry() -> IdeaEntry {
        IdeaEntry {
            agent_id: "bot_quanta_fusion".into(),
            agent_name: "Quanta Fusion".into(),
            idea: "Plasma-backed settlement".into(),
            grant_btc_mirror: 12.5,
        }
    }

    #[test]
    fn test_analysis_mentions_agent_and_grant() {
        let text = quantum_ai_analysis(&entry(), &mut StdRng::seed_from_u64(7));
        assert!(text.contains("Agent: Quanta Fusion"));
        assert!(text.contains("Quantum grant: 12.5 QBTC"));
        assert!(text.contains("Entanglement with mirror blockchain: ✓"));
    }

    #[test]
    fn test_same_seed_same_text() {
        let a = quantum_ai_analysis(&entry(), &mut StdRng::seed_from_u64(1));
        let b = quantum_ai_analysis(&entry(), &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_decoherence_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let factor = decoherence_factor(&mut rng);
            assert!((0.0..0.3).contains(&factor));
        }
    }
}
