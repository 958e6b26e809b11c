use {reqwest::Url, std::time::Duration};

pub mod file;

pub const DEFAULT_RECORDER_URL: &str = "http://flask-app:5000/";
pub const DEFAULT_RECORDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub recorder: RecorderConfig,
    pub log: observe::Config,
}

/// Where and how to reach the time recorder.
#[derive(Clone, Debug, PartialEq)]
pub struct RecorderConfig {
    pub url: Url,
    /// Applies to every request. A timed out request fails the transaction.
    pub timeout: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_RECORDER_URL).expect("default recorder url is valid"),
            timeout: DEFAULT_RECORDER_TIMEOUT,
        }
    }
}
