//! Dispatcher configuration.

/// Environment variable that turns on diagnostic trace output.
pub const TRACE_ENV_VAR: &str = "SIMPLE_EVENTS_TRACE";

/// Dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Name for logging
    pub name: String,
    /// Emit trace lines on subscribe/unsubscribe/invoke. Never changes behaviour.
    pub trace: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            name: "dispatcher".to_string(),
            trace: false,
        }
    }
}

impl DispatcherConfig {
    /// Defaults, with `trace` taken from `SIMPLE_EVENTS_TRACE` if set.
    pub fn from_env() -> Self {
        let trace = std::env::var(TRACE_ENV_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self::default().with_trace(trace)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
