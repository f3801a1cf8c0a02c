use tracing::warn;

use crate::config::Config;
use crate::display::EstimateSink;
use crate::format::ticks_to_time_display;
use crate::message::{self, DelveCompletion};
use crate::runtime::{MessageKind, SessionSignal};
use crate::session::{Estimate, SessionState, FIRST_DEEP_DELVE, LAST_NORMAL_DELVE};

/// Whether the player is inside the delve arena, given the currently loaded
/// map regions. Split out so abandonment detection can be tested without a
/// location-subsystem fake.
pub fn in_delve_region(regions: &[u32], delve_region_id: u32) -> bool {
    regions.contains(&delve_region_id)
}

/// Tracks deep-delve pacing for one session and publishes the projection to
/// an [`EstimateSink`].
///
/// Nothing is displayed until delve level 9 completes; level 8 only arms the
/// tracking. All handlers run to completion on the caller's thread, in the
/// order the host delivers events.
#[derive(Debug)]
pub struct PaceTracker<S: EstimateSink> {
    pub config: Config,
    pub state: SessionState,
    pub sink: S,
    /// Set on a login/hop signal and consumed when the session becomes
    /// active, so a stray active signal can't reset the session twice.
    pub armed: bool,
    estimate: Option<Estimate>,
}

impl<S: EstimateSink> PaceTracker<S> {
    pub fn new(config: Config, sink: S) -> Self {
        Self {
            config,
            state: SessionState::default(),
            sink,
            armed: false,
            estimate: None,
        }
    }

    /// Latest pacing projection, absent until a deep delve has completed
    /// since the last reset.
    pub fn current_estimate(&self) -> Option<&Estimate> {
        self.estimate.as_ref()
    }

    /// Scans a chat message for a delve-completion announcement. Only game
    /// messages are considered; player chat can quote the announcement text
    /// verbatim and must not count.
    pub fn handle_chat_message(&mut self, kind: MessageKind, text: &str) {
        if kind != MessageKind::Game {
            return;
        }

        match message::parse_completion(text) {
            Some(DelveCompletion::Baseline) => {
                self.state.delve8_completion_tick = self.state.ticks_since_login;
                self.state.delving = true;
            }
            Some(DelveCompletion::Deep(level)) => {
                if !self.state.delving {
                    // A reset or abandonment landed between the level 8
                    // completion and this one; without the baseline tick the
                    // duration would be garbage and the average can divide
                    // by zero.
                    warn!(level, "deep delve completion without a baseline, ignoring");
                    return;
                }
                if self.recompute_pace(level) {
                    // Must happen after the recompute reads the old value.
                    self.state.previous_completion_tick = self.state.ticks_since_login;
                }
            }
            None => {}
        }
    }

    /// Arm-then-fire session reset. Login and world-hop signals arm it; the
    /// session-active signal fires it once.
    pub fn handle_session_signal(&mut self, signal: SessionSignal) {
        match signal {
            SessionSignal::LoggingIn | SessionSignal::Hopping => self.armed = true,
            SessionSignal::LoggedIn => {
                if self.armed {
                    // Tick events arrive after all per-tick packets (chat
                    // included), so the count starts at 1, not 0.
                    self.state.ticks_since_login = 1;
                    self.state.clear_delve_tracking();
                    self.estimate = None;
                    self.armed = false;
                }
            }
        }
    }

    /// Advances the session clock and checks for an abandoned delve.
    /// `regions` is the set of currently loaded map regions.
    pub fn handle_tick(&mut self, regions: &[u32]) {
        let no_longer_delving =
            self.state.delving && !in_delve_region(regions, self.config.delve_region_id);

        if no_longer_delving {
            // The counter is only ever present from level 9 on.
            self.sink.hide();
            self.estimate = None;
            self.state.clear_delve_tracking();
        }

        self.state.ticks_since_login += 1; // do this last
    }

    /// Removes the on-screen estimate, e.g. when the plugin is disabled.
    pub fn shutdown(&mut self) {
        self.sink.hide();
    }

    /// Returns false when the completion was ignored and no state changed.
    fn recompute_pace(&mut self, level: u32) -> bool {
        let duration = if level == FIRST_DEEP_DELVE {
            self.state.ticks_since_login - self.state.delve8_completion_tick
        } else {
            self.state.ticks_since_login - self.state.previous_completion_tick
        };

        if self.state.ticks_sum + duration == 0 {
            // A completion on the same tick as the baseline would make the
            // average zero and the projection divide by it.
            warn!(level, "zero-duration delve completion, ignoring");
            return false;
        }

        // Level 9 seeds the best unconditionally; later levels only lower it.
        let best = match (level, self.state.best_ticks) {
            (FIRST_DEEP_DELVE, _) | (_, None) => duration,
            (_, Some(best)) => best.min(duration),
        };
        self.state.best_ticks = Some(best);

        self.state.ticks_sum += duration;
        let completed = level - LAST_NORMAL_DELVE;
        let average = f64::from(self.state.ticks_sum) / f64::from(completed);

        // Remaining budget before the forced logout; saturates once the
        // session has outlived it.
        let ticks_left = self.config.max_login_ticks.saturating_sub(self.state.ticks_since_login);
        let projected_final_level = level + (f64::from(ticks_left) / average) as u32;

        let average_line = format!("Average: {}", ticks_to_time_display(average));
        let best_line = format!("Best: {}", ticks_to_time_display(f64::from(best)));
        self.sink.show(projected_final_level, &average_line, &best_line);

        self.estimate = Some(Estimate {
            projected_final_level,
            average_ticks: average,
            best_ticks: best,
        });
        true
    }
}
