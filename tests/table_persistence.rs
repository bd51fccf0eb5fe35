//! Save/load behaviour of the value table through the file store.

use std::fs;

use blackjack::{
    Action, AgentConfig, App, Error, State, adapters::MsgPackRepository,
    cli::commands::record, ports::TableRepository,
};
use tempfile::TempDir;

fn trained_config(dir: &TempDir) -> AgentConfig {
    AgentConfig::default()
        .with_storage(dir.path().join("q_table.msgpack"))
        .with_seed(21)
}

#[test]
fn test_first_run_starts_with_empty_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let agent = App::new().create_agent(trained_config(&temp_dir)).unwrap();
    assert!(agent.q_table().is_empty());
}

#[test]
fn test_save_then_reopen_reproduces_table_exactly() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = App::new();
    let mut agent = app.create_agent(trained_config(&temp_dir)).unwrap();

    let hands: [(&[&str], &str, Action, f64); 4] = [
        (&["10", "6"], "K", Action::Hit, -20.0),
        (&["10", "9"], "6", Action::Stand, 10.0),
        (&["A", "7"], "9", Action::Stand, 5.0),
        (&["5", "4", "A"], "2", Action::Hit, -10.0),
    ];
    for (cards, dealer, action, reward) in hands {
        let state = State::from_tokens(cards, dealer).unwrap();
        for _ in 0..3 {
            agent.update(&state, Some(action), reward / 3.0, &state);
        }
    }
    agent.save().unwrap();

    let restored = app.create_agent(trained_config(&temp_dir)).unwrap();
    assert_eq!(restored.q_table().len(), agent.q_table().len());
    for (state, values) in agent.q_table().iter() {
        let other = restored.values(state).expect("state missing after reload");
        assert_eq!(other.hit.to_bits(), values.hit.to_bits());
        assert_eq!(other.stand.to_bits(), values.stand.to_bits());
    }
}

#[test]
fn test_load_replaces_in_memory_changes() {
    let temp_dir = TempDir::new().unwrap();
    let mut agent = App::new().create_agent(trained_config(&temp_dir)).unwrap();
    let state = State::from_tokens(["9", "9"], "7").unwrap();

    agent.update(&state, Some(Action::Stand), 10.0, &state);
    agent.save().unwrap();
    agent.update(&state, Some(Action::Stand), -100.0, &state);

    agent.load().unwrap();
    assert_eq!(agent.values(&state).unwrap().stand, 5.0);
}

#[test]
fn test_corrupt_file_is_reported_and_not_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let config = trained_config(&temp_dir);
    fs::write(&config.storage, [0x93, 0x01]).unwrap();

    let result = App::new().create_agent(config.clone());
    assert!(matches!(result, Err(Error::StorageCorrupt { .. })));

    assert!(matches!(
        MsgPackRepository::new().load(&config.storage),
        Err(Error::StorageCorrupt { .. })
    ));
    assert_eq!(fs::read(&config.storage).unwrap(), vec![0x93, 0x01]);
}

#[test]
fn test_each_record_run_continues_epsilon_decay() {
    let temp_dir = TempDir::new().unwrap();
    let config = AgentConfig::default().with_storage(temp_dir.path().join("q_table.msgpack"));
    let body = r#"{
        "state": {"hand": {"10": 1, "6": 1}, "soft": false, "hand_value": 16, "dealer_card": "K"},
        "action": "Hit",
        "reward": -20,
        "next_state": {"hand": {"10": 1, "6": 1}, "soft": false, "hand_value": 16, "dealer_card": "K"}
    }"#;

    // Each run opens a fresh agent, as separate CLI invocations do.
    for _ in 0..2 {
        let mut agent = App::new().create_agent(config.clone()).unwrap();
        record::apply(&mut agent, body).unwrap();
    }

    let agent = App::new().create_agent(config).unwrap();
    assert_eq!(agent.epsilon(), 0.995 * 0.995);
    let state = State::from_tokens(["10", "6"], "K").unwrap();
    assert_eq!(agent.values(&state).unwrap().hit, -15.0);
}
