use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use time::{Duration, OffsetDateTime};

use shadowops_core::{SignalStream, SIGNAL_BUFFER_CAPACITY};

use crate::app::App;
use crate::print_json;

/// Milliseconds between generated signals.
const TICK_MILLIS: i64 = 1500;

/// Fill a stream with `count` signals, one tick apart ending at `now`.
/// Only the ticks the buffer can hold are generated.
pub(crate) fn generate(project_id: &str, count: usize, seed: Option<u64>, now: OffsetDateTime) -> SignalStream {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut stream = SignalStream::new(project_id);
    let kept = count.min(SIGNAL_BUFFER_CAPACITY);
    for back in (0..kept as i64).rev() {
        let at = now
            .checked_sub(Duration::milliseconds(back * TICK_MILLIS))
            .unwrap_or(now);
        stream.tick(&mut rng, at);
    }
    stream
}

pub(crate) fn cmd_signals(app: &App, count: usize, seed: Option<u64>, csv: bool) {
    let project_id = app
        .store
        .nodes
        .first()
        .map(|n| n.project_id.as_str())
        .unwrap_or("alpha");
    let stream = generate(project_id, count, seed, OffsetDateTime::now_utc());

    if csv {
        print!("{}", stream.to_csv());
        return;
    }
    if app.is_json() {
        let entries: Vec<_> = stream.entries().collect();
        print_json(&json!({ "count": stream.len(), "signals": entries }));
        return;
    }

    for s in stream.entries() {
        let clock = format!(
            "{:02}:{:02}:{:02}",
            s.timestamp.hour(),
            s.timestamp.minute(),
            s.timestamp.second()
        );
        println!(
            "{}  {:<14} {:<7} {:<9} {:<8} {}",
            clock, s.signal_type, s.source_system, s.object_type, s.actor_role, s.object_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn seeded_streams_repeat() {
        let now = datetime!(2026-03-01 12:00 UTC);
        let a = generate("alpha", 5, Some(7), now);
        let b = generate("alpha", 5, Some(7), now);
        assert_eq!(a.to_csv(), b.to_csv());
    }

    #[test]
    fn newest_signal_is_stamped_now() {
        let now = datetime!(2026-03-01 12:00 UTC);
        let stream = generate("alpha", 4, Some(1), now);
        let stamps: Vec<_> = stream.entries().map(|s| s.timestamp).collect();
        assert_eq!(stamps[0], now);
        assert_eq!(stamps[1], now - Duration::milliseconds(1500));
        assert_eq!(stamps[3], now - Duration::milliseconds(4500));
    }

    #[test]
    fn large_counts_stay_bounded() {
        let stream = generate("alpha", 120, Some(3), datetime!(2026-03-01 12:00 UTC));
        assert_eq!(stream.len(), SIGNAL_BUFFER_CAPACITY);
    }

    #[test]
    fn huge_counts_do_not_overflow_timestamps() {
        let now = datetime!(2026-03-01 12:00 UTC);
        let stream = generate("alpha", 10_000_000_000_000, Some(1), now);
        assert_eq!(stream.len(), SIGNAL_BUFFER_CAPACITY);
        let stamps: Vec<_> = stream.entries().map(|s| s.timestamp).collect();
        assert_eq!(stamps[0], now);
        assert_eq!(
            stamps[SIGNAL_BUFFER_CAPACITY - 1],
            now - Duration::milliseconds(49 * 1500)
        );
    }
}
