use once_cell::sync::Lazy;
use regex::Regex;

/// First form is delve level 8's completion: "Delve level: 8 duration:".
/// Later forms carry the level in parentheses: "Delve level: 8+ (x) duration:"
/// where x is 9 or anything with two or more digits.
static LEVEL_END_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Delve level: 8(?:\+ \((9|\d{2,})\))? duration:").unwrap());

/// A recognized delve-completion announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelveCompletion {
    /// Delve level 8 finished; deep-delve tracking starts here.
    Baseline,
    /// A deep delve (level 9+) finished.
    Deep(u32),
}

/// Scans a game message for a delve-completion marker. Anything else is not
/// an error, just noise.
pub fn parse_completion(text: &str) -> Option<DelveCompletion> {
    let caps = LEVEL_END_PATTERN.captures(text)?;
    match caps.get(1) {
        None => Some(DelveCompletion::Baseline),
        // The group only matches digit sequences, so this parse cannot fail.
        Some(level) => level.as_str().parse().ok().map(DelveCompletion::Deep),
    }
}
