use crate::error::ResolveError;
use crate::http::Fetcher;
use serde::Deserialize;

/// Response of `GET /api_3/build/list`. We only care about a handful of fields,
/// serde drops the rest.
#[derive(Debug, Deserialize)]
pub struct BuildList {
    pub items: Vec<BuildRecord>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BuildRecord {
    pub id: u64,
    pub state: BuildState,
    #[serde(default)]
    pub source_package: Option<SourcePackage>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SourcePackage {
    #[serde(default)]
    pub name: Option<String>,
}

/// Copr has a dozen build states (pending, running, failed, canceled, ...).
/// Only one of them gets us a downloadable package.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BuildState {
    Succeeded,
    #[serde(other)]
    Other,
}

impl BuildRecord {
    fn package_name(&self) -> Option<&str> {
        self.source_package.as_ref()?.name.as_deref()
    }
}

/// Picks the highest build id among succeeded builds of `package`.
/// Package names are compared ignoring ASCII case.
pub fn newest_succeeded(records: &[BuildRecord], package: &str) -> Option<u64> {
    records
        .iter()
        .filter(|r| r.state == BuildState::Succeeded)
        .filter(|r| {
            r.package_name()
                .is_some_and(|name| name.eq_ignore_ascii_case(package))
        })
        .map(|r| r.id)
        .max()
}

/// Talks to the Copr build API.
pub struct BuildResolver {
    fetcher: Fetcher,
    api_base: String,
}

impl BuildResolver {
    pub fn new(fetcher: Fetcher, api_base: impl Into<String>) -> Self {
        Self {
            fetcher,
            api_base: api_base.into(),
        }
    }

    /// Returns the id of the most recent successful build of `package` in
    /// `owner/project`.
    pub async fn latest_build(
        &self,
        owner: &str,
        project: &str,
        package: &str,
    ) -> Result<u64, ResolveError> {
        let url = format!("{}/api_3/build/list", self.api_base.trim_end_matches('/'));
        let body = self
            .fetcher
            .fetch_query(&url, &[("ownername", owner), ("projectname", project)])
            .await?;
        let list: BuildList = serde_json::from_slice(&body)?;
        log::debug!(
            "{}/{}: {} builds in history",
            owner,
            project,
            list.items.len()
        );

        newest_succeeded(&list.items, package).ok_or(ResolveError::NoBuild)
    }
}
