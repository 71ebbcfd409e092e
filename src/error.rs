/// Everything the core can reject. None of these are fatal: callers log and
/// carry on with the simulation untouched.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Input token that is not one of `left`, `up`, `right`, `down`
    #[error("unknown direction: {0:?}")]
    UnknownDirection(String),
    /// Score delta that is not a whole, finite number
    #[error("score delta is not a whole number: {0}")]
    MalformedScoreDelta(f64),
    /// Settings file could not be read
    #[error("cannot read settings: {0}")]
    SettingsIo(#[from] std::io::Error),
    /// Settings file is not valid JSON for `Settings`
    #[error("invalid settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
