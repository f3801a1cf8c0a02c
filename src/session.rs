/// Last delve level of a "normal" run. Completing it arms deep-delve tracking
/// but is not itself a deep delve.
pub const LAST_NORMAL_DELVE: u32 = 8;

/// First delve level that counts as a deep delve.
pub const FIRST_DEEP_DELVE: u32 = 9;

#[derive(Debug, Clone)]
pub struct SessionState {
    /// The client's own tick counter increments *after* the event is posted,
    /// so its first reported value is 0. Rather than work around that (and
    /// break if it's ever fixed), we track our own count.
    pub ticks_since_login: u32,
    /// Caches whether the player is currently delving, so the tick handler
    /// only checks map regions while it matters.
    pub delving: bool,
    /// Tick (since login) when the player completed delve level 8.
    pub delve8_completion_tick: u32,
    /// Tick (since login) when the player completed the previous deep delve.
    pub previous_completion_tick: u32,
    /// Running total of ticks spent on deep delves, for the average.
    pub ticks_sum: u32,
    /// Fastest single deep delve of this session, if any has completed.
    pub best_ticks: Option<u32>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            ticks_since_login: 0,
            delving: false,
            delve8_completion_tick: 0,
            previous_completion_tick: 0,
            ticks_sum: 0,
            best_ticks: None,
        }
    }
}

impl SessionState {
    /// Clears everything recorded since the level 8 completion. The tick
    /// counter is left alone; callers that want a full reset (login, hop)
    /// reassign it themselves.
    pub fn clear_delve_tracking(&mut self) {
        self.delve8_completion_tick = 0;
        self.previous_completion_tick = 0;
        self.ticks_sum = 0;
        self.best_ticks = None;
        self.delving = false;
    }
}

/// The derived pacing projection, recomputed on every deep-delve completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Deep delve level the player is on pace to finish before forced logout.
    pub projected_final_level: u32,
    /// Average ticks per deep delve this session.
    pub average_ticks: f64,
    /// Fastest deep delve this session, in ticks.
    pub best_ticks: u32,
}
