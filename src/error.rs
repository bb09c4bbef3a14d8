use thiserror::Error;

/// Failures while loading the repo list. These are the only errors that
/// stop the run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config syntax: {0}")]
    Ini(#[from] ini::ParseError),

    #[error("Invalid config syntax: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Repo section [{section}] is missing `{key}`")]
    MissingKey { section: String, key: &'static str },

    #[error("Invalid repo section [{section}]: {source}")]
    Entry {
        section: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A single GET that didn't hand back a usable body.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {code}")]
    Status { url: String, code: u16 },
}

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Directory listing is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Everything that can go wrong while resolving one repo entry.
/// None of these abort the run; the driver logs them and moves on.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Malformed build list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error("No successful build")]
    NoBuild,

    #[error("No matching package archive")]
    NoArtifact,
}
