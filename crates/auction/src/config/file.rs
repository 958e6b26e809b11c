use {
    serde::Deserialize,
    std::{path::Path, time::Duration},
    tokio::fs,
    url::Url,
};

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    #[serde(default)]
    recorder: RecorderConfig,

    /// Tracing setup, see [`observe::Config`].
    #[serde(default)]
    log: observe::Config,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RecorderConfig {
    /// Base URL of the time recorder API.
    #[serde(default = "default_url")]
    url: Url,

    /// Timeout of a single recorder request, e.g. `"10s"` or `"500ms"`.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    timeout: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_url() -> Url {
    super::RecorderConfig::default().url
}

fn default_timeout() -> Duration {
    super::DEFAULT_RECORDER_TIMEOUT
}

/// Load the chaincode configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> super::Config {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    load_str(&data).unwrap_or_else(|e| panic!("TOML syntax error while reading {path:?}: {e:?}"))
}

/// Parses the chaincode configuration from TOML. Missing sections and fields
/// take their defaults.
pub fn load_str(data: &str) -> Result<super::Config, toml::de::Error> {
    let config = toml::de::from_str::<Config>(data)?;
    Ok(super::Config {
        recorder: super::RecorderConfig {
            url: config.recorder.url,
            timeout: config.recorder.timeout,
        },
        log: config.log,
    })
}
