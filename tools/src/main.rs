//! hotel-runner: headless driver for the Hotel Manager engine.
//!
//! Usage:
//!   hotel-runner --seed 12345 --days 60 --db saves.db --slot weekend
//!   hotel-runner --ipc-mode --db saves.db

use anyhow::Result;
use hotel_core::{
    command::PlayerCommand,
    config::HotelConfig,
    engine::HotelEngine,
    event::HotelEvent,
    host::{load_assets, FsAssetLoader, DEFAULT_ASSET_MANIFEST},
    rng::{HotelRng, RngStream},
    snapshot::{GameOutcome, SaveSlotSummary, Statistics},
    state::{HotelState, RoomType, StateKey},
    store::SaveStore,
};
use std::env;
use std::io::{self, BufRead, Write};

/// One line of IPC input: a player command, or a runner-level request.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IpcLine {
    Request(IpcRequest),
    Command(PlayerCommand),
}

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    GetValue { key: String },
    ListSlots,
    Tick { count: u64 },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    ok: bool,
    tick: u64,
    paused: bool,
    outcome: GameOutcome,
    state: HotelState,
    statistics: Statistics,
    events: Vec<HotelEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 30u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let slot = string_arg(&args, "--slot").unwrap_or("autosave");

    let config = match string_arg(&args, "--config") {
        Some(path) => HotelConfig::load(path)?,
        None => HotelConfig::default(),
    };

    if let Some(root) = string_arg(&args, "--assets") {
        let mut loader = FsAssetLoader::new(root);
        if !load_assets(&mut loader, DEFAULT_ASSET_MANIFEST) {
            log::warn!("Some assets are missing; continuing without them");
        }
    }

    let store = SaveStore::open(db)?;
    store.migrate()?;
    let mut engine = HotelEngine::new(config, seed, store);

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        println!("Hotel Manager: hotel-runner");
        println!("  seed:  {seed}");
        println!("  days:  {days}");
        println!("  db:    {db}");
        println!("  slot:  {slot}");
        println!();
        run_batch(&mut engine, seed, days);
        if !engine.save_game(slot) {
            log::error!("Final save to '{slot}' failed");
        }
        print_summary(&engine);
    }

    Ok(())
}

/// Build starter rooms, then each day check in walk-ins, settle the
/// guests who are about to leave and advance the day.
fn run_batch(engine: &mut HotelEngine, seed: u64, days: u32) {
    let mut demand = HotelRng::new(seed, RngStream::Demand);

    for room_type in [RoomType::Single, RoomType::Single, RoomType::Double] {
        engine.build_room(room_type);
    }

    for _ in 0..days {
        // Each vacant room has a 60% chance of a walk-in.
        let vacant = engine.get_data().rooms.iter().filter(|r| !r.occupied).count();
        for _ in 0..vacant {
            if demand.chance(0.6) {
                engine.check_in_guest();
            }
        }

        let leaving: Vec<u32> = engine
            .get_data()
            .guests
            .iter()
            .filter(|g| g.stay_duration <= 1)
            .map(|g| g.id)
            .collect();
        for guest_id in leaving {
            engine.check_out_guest(guest_id);
        }

        // Grow while the bank balance allows a comfortable margin.
        if engine.money() > 5_000 && engine.guest_count() + 1 >= engine.max_guests() {
            engine.build_room(RoomType::Double);
        }

        engine.next_day();
        for event in engine.take_events() {
            match event {
                HotelEvent::GameOver { .. } | HotelEvent::GameWon { .. } => {
                    println!("  !! {}", event.type_name());
                }
                _ => log::debug!("{}", serde_json::to_string(&event).unwrap_or_default()),
            }
        }
        if engine.outcome() != GameOutcome::InProgress {
            break;
        }
    }
}

fn run_ipc_loop(engine: &mut HotelEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match handle_line(engine, &buffer)? {
            Some(reply) => writeln!(stdout, "{reply}")?,
            None => break,
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Answer one IPC line. `None` means the client asked to quit.
fn handle_line(engine: &mut HotelEngine, input: &str) -> Result<Option<String>> {
    let line: IpcLine = match serde_json::from_str(input) {
        Ok(l) => l,
        Err(e) => return Ok(Some(serde_json::json!({ "error": e.to_string() }).to_string())),
    };

    let reply = match line {
        IpcLine::Request(IpcRequest::Quit) => return Ok(None),
        IpcLine::Request(IpcRequest::GetState) => {
            let events = engine.take_events();
            state_reply(engine, true, events)?
        }
        IpcLine::Request(IpcRequest::Tick { count }) => {
            // tick() drains the queue itself; keep what every tick raised.
            let mut events = Vec::new();
            for _ in 0..count {
                events.extend(engine.tick());
            }
            state_reply(engine, true, events)?
        }
        IpcLine::Request(IpcRequest::GetValue { key }) => match key.parse::<StateKey>() {
            Ok(k) => serde_json::json!({ "key": key, "value": engine.get_value(k) }).to_string(),
            Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
        },
        IpcLine::Request(IpcRequest::ListSlots) => {
            let slots: Vec<SaveSlotSummary> = engine.get_save_slots();
            serde_json::to_string(&slots)?
        }
        IpcLine::Command(cmd) => {
            let ok = engine.apply(cmd);
            let events = engine.take_events();
            state_reply(engine, ok, events)?
        }
    };
    Ok(Some(reply))
}

fn state_reply(engine: &HotelEngine, ok: bool, events: Vec<HotelEvent>) -> Result<String> {
    let state = UiState {
        ok,
        tick: engine.clock.current_tick,
        paused: engine.clock.paused,
        outcome: engine.outcome(),
        state: engine.get_data(),
        statistics: engine.get_statistics(),
        events,
    };
    Ok(serde_json::to_string(&state)?)
}

fn print_summary(engine: &HotelEngine) {
    let stats = engine.get_statistics();
    let data = engine.get_data();

    println!("=== RUN SUMMARY ===");
    println!("  hotel:          {}", data.hotel_name);
    println!("  day:            {}", stats.days_played);
    println!("  money:          ${}", data.money);
    println!("  rooms:          {} ({} occupied)", stats.rooms_owned, stats.occupied_rooms);
    println!("  guests now:     {}/{}", data.guest_count, data.max_guests);
    println!("  total guests:   {}", stats.total_guests);
    println!("  total earnings: ${}", stats.total_earnings);
    println!("  satisfaction:   {}%", stats.average_satisfaction);
    println!("  reputation:     {:.1}", stats.reputation);
    println!("  outcome:        {:?}", engine.outcome());

    println!();
    println!("=== SAVE SLOTS ===");
    let slots = engine.get_save_slots();
    if slots.is_empty() {
        println!("  (none)");
    }
    for s in slots {
        let when = chrono::DateTime::from_timestamp_millis(s.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| s.timestamp.to_string());
        println!(
            "  {:<12} {}  {} | day {} | ${}",
            s.name, when, s.hotel_name, s.day, s.money
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(ticks_per_day: u32) -> HotelEngine {
        let store = SaveStore::in_memory().unwrap();
        store.migrate().unwrap();
        let config = HotelConfig { ticks_per_day, ..HotelConfig::default() };
        HotelEngine::new(config, 3, store)
    }

    fn reply(engine: &mut HotelEngine, line: &str) -> serde_json::Value {
        let text = handle_line(engine, line).unwrap().expect("a reply");
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn tick_reply_carries_day_advance_events() {
        let mut engine = engine(4);
        let v = reply(&mut engine, r#"{"type":"tick","count":4}"#);

        assert_eq!(v["state"]["day"], 2);
        let types: Vec<&str> = v["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["type"].as_str().unwrap())
            .collect();
        assert!(types.contains(&"day_advanced"), "events were {types:?}");
    }

    #[test]
    fn command_reply_reports_result_and_events() {
        let mut engine = engine(600);
        let v = reply(&mut engine, r#"{"cmd":"build_room","room_type":"double"}"#);
        assert_eq!(v["ok"], true);
        assert_eq!(v["events"].as_array().unwrap().len(), 1);

        let again = reply(&mut engine, r#"{"type":"get_state"}"#);
        assert!(again["events"].as_array().unwrap().is_empty(), "events are delivered once");
    }

    #[test]
    fn bad_json_and_quit() {
        let mut engine = engine(600);
        assert!(reply(&mut engine, "{ nope").get("error").is_some());
        assert!(handle_line(&mut engine, r#"{"type":"quit"}"#).unwrap().is_none());
    }
}
