//! # Ledger Flow
//!
//! Agent ledger (sm-02) against a real file: first-run seeding, reloads,
//! and the persistence guarantees of each mutation.

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use sm_02_agent_ledger::{AgentProfile, Ledger, LedgerError, UpsertOutcome};

    #[test]
    fn test_fresh_ledger_reloads_seeds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents_ledger.json");

        drop(Ledger::open_file(&path).unwrap());
        let ledger = Ledger::open_file(&path).unwrap();

        let balances: Vec<f64> = ledger.agents().iter().map(|a| a.balance_btc_mirror).collect();
        let levels: Vec<i64> = ledger.agents().iter().map(|a| a.domain_level).collect();
        assert_eq!(balances, vec![0.0, 275.0, 88.0, 144.0]);
        assert_eq!(levels, vec![7, 6, 9, 8]);
        assert_eq!(ledger.domain_catalog().len(), 12);
        assert_eq!(ledger.document().agent_generator.target_count, 10_000);
    }

    #[test]
    fn test_missing_grant_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents_ledger.json");
        let mut ledger = Ledger::open_file(&path).unwrap();
        let before = std::fs::read(&path).unwrap();

        assert!(!ledger.grant_btc("missing", 1.0).unwrap());

        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_upsert_and_grants_survive_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents_ledger.json");
        {
            let mut ledger = Ledger::open_file(&path).unwrap();
            assert_eq!(
                ledger.add_agent("x", AgentProfile::new("X")).unwrap(),
                UpsertOutcome::Created
            );
            ledger.grant_btc("x", 5.0).unwrap();
            ledger.grant_btc("x", 3.0).unwrap();
            assert_eq!(
                ledger.add_agent("x", AgentProfile::new("Y")).unwrap(),
                UpsertOutcome::Updated
            );
        }

        let ledger = Ledger::open_file(&path).unwrap();
        let matching: Vec<_> = ledger.agents().iter().filter(|a| a.id == "x").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].name, "Y");
        assert_eq!(matching[0].balance_btc_mirror, 8.0);
        assert!(matching[0].ai_unlocked);
    }

    #[test]
    fn test_ledger_file_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents_ledger.json");
        drop(Ledger::open_file(&path).unwrap());

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value["agents"].is_array());
    }

    #[test]
    fn test_second_writer_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agents_ledger.json");
        let _first = Ledger::open_file(&path).unwrap();

        let second = Ledger::open_file(&path);

        assert!(matches!(second, Err(LedgerError::Locked { .. })));
    }
}
