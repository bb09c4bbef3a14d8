use crate::error::ConfigError;
use ini::Ini;
use serde::Deserialize;
use std::path::Path;

/// One Copr project/package pair to resolve.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RepoEntry {
    pub owner: String,
    pub project: String,
    pub package: String,
}

/// Loads repo entries, one section per repo:
///
/// ```ini
/// ; extra tools
/// [widget]
/// owner = alice
/// project = tools
/// package = widget
/// ```
///
/// Files ending in `.toml` are read as TOML tables with the same keys, anything
/// else as INI. Entries come back in file order. Keys outside of any section
/// (the default section) are ignored.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<RepoEntry>, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext == "toml") {
        parse_toml(&content)
    } else {
        parse_ini(&content)
    }
}

pub fn parse_ini(content: &str) -> Result<Vec<RepoEntry>, ConfigError> {
    let ini = Ini::load_from_str(content)?;

    let mut entries = Vec::new();
    for (section, props) in ini.iter() {
        let Some(section) = section else {
            continue;
        };
        let key = |key: &'static str| {
            props
                .get(key)
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingKey {
                    section: section.to_string(),
                    key,
                })
        };
        entries.push(RepoEntry {
            owner: key("owner")?,
            project: key("project")?,
            package: key("package")?,
        });
    }
    Ok(entries)
}

pub fn parse_toml(content: &str) -> Result<Vec<RepoEntry>, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;

    let mut entries = Vec::new();
    for (section, value) in table {
        if !value.is_table() {
            continue;
        }
        let entry: RepoEntry = value
            .try_into()
            .map_err(|source| ConfigError::Entry {
                section: section.clone(),
                source,
            })?;
        entries.push(entry);
    }
    Ok(entries)
}
