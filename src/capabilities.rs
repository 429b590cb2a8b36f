use std::rc::Rc;
use std::thread;
use std::time::Duration;

use rhai::Engine;

use crate::client::{EntityInfo, RobotClient};

/// Installs the script-visible capability surface onto a fresh engine. This
/// runs once, at bridge construction; the registered set never changes for
/// the engine's lifetime and is the only way script code reaches the host.
/// rhai ships no filesystem or network builtins, so nothing outside this set
/// is reachable.
pub(crate) fn bind(engine: &mut Engine, client: Rc<dyn RobotClient>, max_sleep: Option<Duration>) {
    engine.set_fast_operators(true);

    // action capabilities: each dispatches one robot command and hands the
    // success flag back to the script as a plain bool
    let c = client.clone();
    engine.register_fn("move_shelf", move |shelf: &str, location: &str| -> bool {
        c.move_shelf(shelf, location).success
    });
    let c = client.clone();
    engine.register_fn("return_shelf", move |shelf: &str| -> bool { c.return_shelf(shelf).success });
    let c = client.clone();
    engine.register_fn("dock_shelf", move || -> bool { c.dock_shelf().success });
    let c = client.clone();
    engine.register_fn("undock_shelf", move || -> bool { c.undock_shelf().success });
    let c = client.clone();
    engine.register_fn("move_to_location", move |location: &str| -> bool {
        c.move_to_location(location).success
    });
    let c = client.clone();
    engine.register_fn("return_home", move || -> bool { c.return_home().success });
    let c = client.clone();
    engine.register_fn("speak", move |text: &str| -> bool { c.speak(text).success });

    // query capabilities: id -> display name snapshots from the client's
    // resolver, read-only
    let c = client.clone();
    engine.register_fn("get_location_list", move || -> rhai::Map { entity_map(c.get_locations()) });
    let c = client.clone();
    engine.register_fn("get_shelf_list", move || -> rhai::Map { entity_map(c.get_shelves()) });

    // utility capabilities
    engine.register_fn("sleep", move |seconds: f64| blocking_sleep(seconds, max_sleep));
    engine.register_fn("sleep", move |seconds: i64| blocking_sleep(seconds as f64, max_sleep));
}

fn entity_map(entries: Vec<EntityInfo>) -> rhai::Map {
    let mut map = rhai::Map::new();
    for entry in entries {
        map.insert(entry.id.into(), entry.name.into());
    }
    map
}

/// Blocks the whole execution context: the script, and any robot commands it
/// would issue afterwards, wait here. Negative and non-finite durations are
/// treated as zero; values too large for `Duration` saturate to `Duration::MAX`
/// (indistinguishable from any other unbounded delay) so no script argument
/// can panic the run.
fn blocking_sleep(seconds: f64, max_sleep: Option<Duration>) {
    if !seconds.is_finite() || seconds <= 0.0 {
        return;
    }
    let mut duration = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX);
    if let Some(cap) = max_sleep {
        duration = duration.min(cap);
    }
    thread::sleep(duration);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn sleep_ignores_negative_and_nan_durations() {
        let start = Instant::now();
        blocking_sleep(-5.0, None);
        blocking_sleep(f64::NAN, None);
        assert!(start.elapsed() < Duration::from_millis(50), "no blocking expected");
    }

    #[test]
    fn sleep_survives_durations_too_large_for_duration() {
        let start = Instant::now();
        blocking_sleep(1.0e300, Some(Duration::from_millis(10)));
        assert!(start.elapsed() < Duration::from_secs(1), "overflow must clamp, not panic");
    }

    #[test]
    fn sleep_honors_the_configured_cap() {
        let start = Instant::now();
        blocking_sleep(30.0, Some(Duration::from_millis(10)));
        assert!(start.elapsed() < Duration::from_secs(1), "cap should bound the delay");
    }
}
