use delve_pacer::config::Config;
use delve_pacer::display::RecordingSink;
use delve_pacer::runtime::{Runner, TranscriptSource};
use delve_pacer::tracker::PaceTracker;

fn replay(script: &str) -> Runner<RecordingSink> {
    let mut runner = Runner::new(PaceTracker::new(
        Config::default(),
        RecordingSink::default(),
    ));
    let mut source = TranscriptSource::new(script.as_bytes());
    runner.run(&mut source).expect("transcript replays cleanly");
    runner
}

#[test]
fn full_session_replay() {
    let script = "\
# A short session at Doom of Mokhaiotl.
login
logged-in
regions 14180

game: Delve level: 8 duration: 1:07.2
tick 152
game: Delve level: 8+ (9) duration: 1:31.2
tick 105
game: Delve level: 8+ (10) duration: 1:03.0
tick 160
game: Delve level: 8+ (11) duration: 1:36.0
";

    let runner = replay(script);
    let tracker = &runner.tracker;

    let est = tracker.current_estimate().expect("estimate after level 11");
    assert_eq!(est.projected_final_level, 266);
    assert_eq!(est.best_ticks, 105);

    let (_, average, best) = tracker.sink.last_shown().unwrap().clone();
    assert_eq!(average, "Average: 01:23.40");
    assert_eq!(best, "Best: 01:03.00");
}

#[test]
fn player_chat_quoting_the_announcement_does_not_count() {
    let script = "\
login
logged-in
regions 14180
public: Delve level: 8 duration: 1:07.2
tick 65
public: Delve level: 8+ (9) duration: 0:52.8
";

    let runner = replay(script);
    assert!(runner.tracker.current_estimate().is_none());
    assert!(runner.tracker.sink.shown.is_empty());
}

#[test]
fn region_change_mid_run_abandons_the_delve() {
    let script = "\
login
logged-in
regions 14180
game: Delve level: 8 duration: 1:07.2
tick 65
game: Delve level: 8+ (9) duration: 0:52.8
regions 12850
tick
";

    let runner = replay(script);
    assert!(!runner.tracker.sink.is_visible());
    assert!(runner.tracker.current_estimate().is_none());
    // Clock kept running through the abandonment tick.
    assert_eq!(runner.tracker.state.ticks_since_login, 67);
}

#[test]
fn hop_between_worlds_starts_a_fresh_session() {
    let script = "\
login
logged-in
regions 14180
game: Delve level: 8 duration: 1:07.2
tick 20
hop
logged-in
game: Delve level: 8 duration: 1:07.2
tick 65
game: Delve level: 8+ (9) duration: 0:52.8
";

    let runner = replay(script);
    let est = runner.tracker.current_estimate().unwrap();
    // Duration counted from the post-hop baseline only.
    assert_eq!(est.best_ticks, 65);
}

#[test]
fn malformed_transcript_is_an_error() {
    let mut runner = Runner::new(PaceTracker::new(
        Config::default(),
        RecordingSink::default(),
    ));
    let mut source = TranscriptSource::new("login\nfly away\n".as_bytes());
    assert!(runner.run(&mut source).is_err());
}
