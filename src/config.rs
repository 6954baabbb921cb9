use std::time::Duration;

use crate::search::lookahead::SelfCheck;

/// Engine tuning, from defaults or `KNIGHTLINE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Move-set memo capacity, in entries.
    pub cache_entries: usize,
    /// Exhaustive batches hold `line_budget / depth` lines.
    pub line_budget: usize,
    /// Pruned batches hold this many pairs.
    pub pruned_batch: usize,
    /// Idle cursors older than this are dropped.
    pub cursor_ttl: Duration,
    pub self_check: SelfCheck,
}

fn env_parse_usize(name: &str) -> Option<usize> { std::env::var(name).ok().and_then(|s| s.parse().ok()) }
fn env_parse_u64(name: &str) -> Option<u64> { std::env::var(name).ok().and_then(|s| s.parse().ok()) }

fn parse_self_check(s: &str) -> Option<SelfCheck> {
    match s.trim().to_ascii_lowercase().as_str() {
        "root" => Some(SelfCheck::Root),
        "every-ply" | "every_ply" | "all" => Some(SelfCheck::EveryPly),
        _ => None,
    }
}

impl EngineConfig {
    /// Defaults overridden by whichever variables are set and parse.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            cache_entries: env_parse_usize("KNIGHTLINE_CACHE_ENTRIES").unwrap_or(d.cache_entries),
            line_budget: env_parse_usize("KNIGHTLINE_LINE_BUDGET").unwrap_or(d.line_budget),
            pruned_batch: env_parse_usize("KNIGHTLINE_PRUNED_BATCH").unwrap_or(d.pruned_batch),
            cursor_ttl: env_parse_u64("KNIGHTLINE_CURSOR_TTL_SECS").map(Duration::from_secs).unwrap_or(d.cursor_ttl),
            self_check: std::env::var("KNIGHTLINE_SELF_CHECK")
                .ok()
                .and_then(|s| parse_self_check(&s))
                .unwrap_or(d.self_check),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_entries: 1 << 16,
            line_budget: 900,
            pruned_batch: 450,
            cursor_ttl: Duration::from_secs(300),
            self_check: SelfCheck::Root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = EngineConfig::default();
        assert_eq!(c.cache_entries, 65536);
        assert_eq!(c.line_budget, 900);
        assert_eq!(c.pruned_batch, 450);
        assert_eq!(c.cursor_ttl, Duration::from_secs(300));
        assert_eq!(c.self_check, SelfCheck::Root);
    }

    #[test]
    fn from_env_defaults() {
        // Nothing set in the test environment
        let c = EngineConfig::from_env();
        assert_eq!(c.line_budget, 900);
    }

    #[test]
    fn self_check_names() {
        assert_eq!(parse_self_check("Every-Ply"), Some(SelfCheck::EveryPly));
        assert_eq!(parse_self_check("root"), Some(SelfCheck::Root));
        assert_eq!(parse_self_check("sometimes"), None);
    }
}
