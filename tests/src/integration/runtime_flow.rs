//! # Runtime Flow
//!
//! Full command paths through the orchestrator: mining, ledger, the idea
//! pass and the joint `quantum_synthesis` mode sharing one data directory.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;
    use tokio::sync::watch;

    use mirror_runtime::{MirrorConfig, Operation, OperationReport, Orchestrator};
    use sm_01_mirror_miner::read_chain;
    use sm_03_ai_cycle::IdeaOutput;
    use sm_04_energy_sensor::EnergyReading;

    fn config_in(dir: &TempDir) -> MirrorConfig {
        let mut config = MirrorConfig::default();
        config.storage.data_dir = dir.path().to_path_buf();
        config.mining.difficulty = 1;
        config.mining.block_interval_ms = 0;
        config.synthesis.energy_interval_secs = 0;
        config
    }

    fn write_ideas(config: &MirrorConfig, count: usize) {
        let lines: String = (0..count)
            .map(|i| {
                serde_json::json!({
                    "agent_id": format!("bot_{i}"),
                    "agent_name": format!("Bot {i}"),
                    "idea": format!("idea {i}"),
                    "grant_btc_mirror": i as f64,
                })
                .to_string()
                    + "\n"
            })
            .collect();
        std::fs::write(config.storage.ideas_path(), lines).unwrap();
    }

    fn jsonl<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Vec<T> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_quantum_synthesis_fills_every_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        write_ideas(&config, 2);
        let storage = config.storage.clone();
        let (_tx, rx) = watch::channel(false);
        let orchestrator = Orchestrator::new(config, rx);

        let report = tokio::time::timeout(
            Duration::from_secs(60),
            orchestrator.run(Operation::QuantumSynthesis),
        )
        .await
        .expect("synthesis should finish")
        .unwrap();

        assert!(matches!(report, OperationReport::Synthesis { .. }));
        assert_eq!(read_chain(&storage.chain_path()).unwrap().len(), 3);
        assert_eq!(jsonl::<IdeaOutput>(&storage.outputs_path()).len(), 2);
        assert_eq!(jsonl::<EnergyReading>(&storage.energy_path()).len(), 3);
    }

    #[tokio::test]
    async fn test_shutdown_before_synthesis_cancels_workers() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let storage = config.storage.clone();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let orchestrator = Orchestrator::new(config, rx);

        let report = orchestrator.run(Operation::QuantumSynthesis).await.unwrap();

        match report {
            OperationReport::Synthesis {
                blocks, readings, ..
            } => {
                assert!(blocks.is_empty());
                assert_eq!(readings, 0);
            }
            other => panic!("unexpected report: {other:?}"),
        }
        assert!(!storage.chain_path().exists());
    }

    #[tokio::test]
    async fn test_status_after_agent_and_mining() {
        let dir = TempDir::new().unwrap();
        let (_tx, rx) = watch::channel(false);
        let orchestrator = Orchestrator::new(config_in(&dir), rx);

        orchestrator
            .run(Operation::AddAgent {
                id: "bot_rami".into(),
                name: "Rami".into(),
                description: String::new(),
            })
            .await
            .unwrap();
        orchestrator.run(Operation::Mine { blocks: 1 }).await.unwrap();

        let OperationReport::Status(files) = orchestrator.run(Operation::Status).await.unwrap()
        else {
            panic!("expected status report");
        };
        let present: Vec<&str> = files
            .iter()
            .filter(|f| f.size.is_some())
            .map(|f| f.label)
            .collect();
        assert_eq!(present, vec!["chain", "ledger"]);
    }
}
