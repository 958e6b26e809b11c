use {
    serde::Deserialize,
    serde_with::{DisplayFromStr, serde_as},
    tracing::Level,
};

#[serde_as]
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct Config {
    /// Filters spans and events based on a set of filter directives
    /// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
    pub(crate) filter: String,
    /// Minimum level at which events go to stderr instead of stdout
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub(crate) stderr_threshold: Option<Level>,
    /// Output log events as JSON
    pub(crate) json: bool,
}

impl Config {
    pub fn new(filter: &str, stderr_threshold: Option<Level>, json: bool) -> Self {
        Self {
            filter: filter.into(),
            stderr_threshold,
            json,
        }
    }

    pub fn with_json_format(mut self) -> Self {
        self.json = true;
        self
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = filter.to_string();
        self
    }

    pub fn with_stderr_threshold(mut self, stderr_threshold: Level) -> Self {
        self.stderr_threshold = Some(stderr_threshold);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: "info,auction=debug".to_string(),
            stderr_threshold: None,
            json: false,
        }
    }
}
