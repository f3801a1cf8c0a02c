use std::io::{self, BufRead};

use tracing::debug;

use crate::display::EstimateSink;
use crate::tracker::PaceTracker;

/// Chat message classification. Only game announcements carry delve
/// completions; everything else is player-generated and untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Game,
    Public,
}

/// Login-state transitions relevant to the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    LoggingIn,
    Hopping,
    LoggedIn,
}

/// Unified host event consumed by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Chat { kind: MessageKind, text: String },
    /// One game tick, delivered after all per-tick packets.
    Tick,
    Session(SessionSignal),
    /// The set of loaded map regions changed.
    Regions(Vec<u32>),
}

/// Source of host events (a live client bridge, or a recorded transcript).
pub trait EventSource {
    /// Returns the next event, or None when the stream is exhausted.
    fn next_event(&mut self) -> io::Result<Option<HostEvent>>;
}

/// One parsed transcript line. `tick N` lines expand into repeated events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine {
    Event(HostEvent),
    Ticks(u32),
}

/// Parses one transcript line. Blank lines and `#` comments yield None.
///
/// Grammar, one directive per line:
///   login | hop | logged-in
///   tick [count]
///   regions [id ...]
///   game: <text>
///   public: <text>
pub fn parse_line(line: &str) -> io::Result<Option<ScriptLine>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if let Some(text) = line.strip_prefix("game:") {
        return Ok(Some(ScriptLine::Event(HostEvent::Chat {
            kind: MessageKind::Game,
            text: text.trim_start().to_string(),
        })));
    }
    if let Some(text) = line.strip_prefix("public:") {
        return Ok(Some(ScriptLine::Event(HostEvent::Chat {
            kind: MessageKind::Public,
            text: text.trim_start().to_string(),
        })));
    }

    let mut words = line.split_whitespace();
    let directive = words.next().unwrap_or_default();
    match directive {
        "login" => Ok(Some(ScriptLine::Event(HostEvent::Session(
            SessionSignal::LoggingIn,
        )))),
        "hop" => Ok(Some(ScriptLine::Event(HostEvent::Session(
            SessionSignal::Hopping,
        )))),
        "logged-in" => Ok(Some(ScriptLine::Event(HostEvent::Session(
            SessionSignal::LoggedIn,
        )))),
        "tick" => {
            let count = match words.next() {
                None => 1,
                Some(n) => n.parse().map_err(|_| bad_line(line))?,
            };
            Ok(Some(ScriptLine::Ticks(count)))
        }
        "regions" => {
            let ids: Result<Vec<u32>, _> = words.map(str::parse).collect();
            let ids = ids.map_err(|_| bad_line(line))?;
            Ok(Some(ScriptLine::Event(HostEvent::Regions(ids))))
        }
        _ => Err(bad_line(line)),
    }
}

fn bad_line(line: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("unrecognized transcript line: {line:?}"),
    )
}

/// Replays a recorded event transcript from any line-oriented reader.
pub struct TranscriptSource<R: BufRead> {
    reader: R,
    /// Ticks still owed from the last `tick N` line.
    pending_ticks: u32,
}

impl<R: BufRead> TranscriptSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending_ticks: 0,
        }
    }
}

impl<R: BufRead> EventSource for TranscriptSource<R> {
    fn next_event(&mut self) -> io::Result<Option<HostEvent>> {
        loop {
            if self.pending_ticks > 0 {
                self.pending_ticks -= 1;
                return Ok(Some(HostEvent::Tick));
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match parse_line(&line)? {
                None => continue,
                Some(ScriptLine::Ticks(n)) => self.pending_ticks = n,
                Some(ScriptLine::Event(event)) => return Ok(Some(event)),
            }
        }
    }
}

/// In-memory event source for tests.
pub struct VecSource {
    events: std::vec::IntoIter<HostEvent>,
}

impl VecSource {
    pub fn new(events: Vec<HostEvent>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

impl EventSource for VecSource {
    fn next_event(&mut self) -> io::Result<Option<HostEvent>> {
        Ok(self.events.next())
    }
}

/// Dispatches host events to a [`PaceTracker`], tracking the current map
/// regions on the tracker's behalf.
pub struct Runner<S: EstimateSink> {
    pub tracker: PaceTracker<S>,
    regions: Vec<u32>,
}

impl<S: EstimateSink> Runner<S> {
    pub fn new(tracker: PaceTracker<S>) -> Self {
        Self {
            tracker,
            regions: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::Chat { kind, text } => self.tracker.handle_chat_message(kind, &text),
            HostEvent::Tick => self.tracker.handle_tick(&self.regions),
            HostEvent::Session(signal) => self.tracker.handle_session_signal(signal),
            HostEvent::Regions(ids) => {
                debug!(?ids, "map regions changed");
                self.regions = ids;
            }
        }
    }

    /// Drains the source, dispatching every event in order.
    pub fn run(&mut self, source: &mut dyn EventSource) -> io::Result<()> {
        while let Some(event) = source.next_event()? {
            self.dispatch(event);
        }
        Ok(())
    }
}
