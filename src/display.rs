/// Write-only sink for the on-screen estimate. The real client renders an
/// info box; here it's a seam so the tracker can be driven headless.
pub trait EstimateSink {
    /// Create-or-update the persistent counter showing `level`, with the
    /// average and best clear times as tooltip lines.
    fn show(&mut self, level: u32, average_line: &str, best_line: &str);

    /// Remove the counter if present; no-op otherwise.
    fn hide(&mut self);
}

/// Sink used by the replay binary: prints updates as they happen.
#[derive(Debug, Default)]
pub struct StdoutSink {
    visible: bool,
}

impl EstimateSink for StdoutSink {
    fn show(&mut self, level: u32, average_line: &str, best_line: &str) {
        self.visible = true;
        println!("estimated final level: {level} ({average_line}, {best_line})");
    }

    fn hide(&mut self) {
        if self.visible {
            println!("estimate cleared");
            self.visible = false;
        }
    }
}

/// Records every call for assertions in unit and integration tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub shown: Vec<(u32, String, String)>,
    pub hide_calls: usize,
    visible: bool,
}

impl RecordingSink {
    pub fn last_shown(&self) -> Option<&(u32, String, String)> {
        self.shown.last()
    }

    /// Whether the counter would currently be on screen.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl EstimateSink for RecordingSink {
    fn show(&mut self, level: u32, average_line: &str, best_line: &str) {
        self.visible = true;
        self.shown
            .push((level, average_line.to_string(), best_line.to_string()));
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hide_calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_tracks_visibility() {
        let mut sink = RecordingSink::default();
        assert!(!sink.is_visible());

        sink.show(42, "Average: 00:39.00", "Best: 00:39.00");
        assert!(sink.is_visible());
        assert_eq!(sink.last_shown().unwrap().0, 42);

        sink.hide();
        assert!(!sink.is_visible());
        assert_eq!(sink.hide_calls, 1);
    }
}
