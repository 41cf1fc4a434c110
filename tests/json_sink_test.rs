use serde_json::Value;

use tui_blocks::core::{GameSession, SimpleRng, TickOutcome};
use tui_blocks::term::JsonLinesSink;
use tui_blocks::types::{EngineConfig, Key, TICK_MS};

fn headless_run(seed: u32) -> Vec<Value> {
    let config = EngineConfig {
        rows: 10,
        cols: 8,
        ..EngineConfig::default()
    };
    let mut game = GameSession::new(config, SimpleRng::new(seed)).unwrap();
    let mut sink = JsonLinesSink::new(Vec::new());
    game.key_down(Key::Start, &mut sink).unwrap();
    game.key_up(Key::Start);

    let mut now = 0;
    for _ in 0..20_000 {
        now += TICK_MS;
        if game.tick(now, &mut sink).unwrap() == TickOutcome::GameOver {
            break;
        }
    }

    let out = String::from_utf8(sink.into_inner()).unwrap();
    out.lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn json_lines_are_snapshots() {
    let frames = headless_run(9);
    assert!(frames.len() > 2);

    let first = &frames[0];
    assert_eq!(first["phase"], "playing");
    assert_eq!(first["running"], true);
    assert_eq!(first["rows"], 10);
    assert_eq!(first["cols"], 8);
    assert_eq!(first["grid"].as_array().unwrap().len(), 10);
    assert!(first["active"].is_null());

    let second = &frames[1];
    let active = &second["active"];
    assert_eq!(active["y"], -4);
    assert_eq!(active["rotation"], 0);
    assert_eq!(active["mask"].as_array().unwrap().len(), 4);
    assert_eq!(second["parts_spawned"], 1);
}

#[test]
fn json_lines_end_with_game_over() {
    let frames = headless_run(9);
    let last = frames.last().unwrap();
    assert_eq!(last["phase"], "gameOver");
    assert_eq!(last["running"], false);

    // Walls and floor survive the whole run.
    for frame in &frames {
        let grid = frame["grid"].as_array().unwrap();
        for row in grid {
            let row = row.as_array().unwrap();
            assert_eq!(row[0], 1);
            assert_eq!(row[7], 1);
        }
        assert!(grid[9].as_array().unwrap().iter().all(|c| c == 1));
    }
}

#[test]
fn json_lines_are_deterministic_per_seed() {
    assert_eq!(headless_run(1234), headless_run(1234));
}
