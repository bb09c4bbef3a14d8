use crate::artifact::ArtifactSelector;
use crate::builds::BuildResolver;
use crate::config::RepoEntry;
use crate::error::ResolveError;
use crate::http::Fetcher;
use crate::logger::Logger;
use indicatif::{ProgressBar, ProgressStyle};

/// Upstream endpoints and matching rules for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub download_url: String,
    pub target: String,
    pub extension: String,
}

/// Walks the repo list and turns each entry into a download URL.
///
/// Entries are resolved one after another. A failure only drops that entry,
/// the run always finishes with whatever it found.
pub struct Resolver {
    builds: BuildResolver,
    artifacts: ArtifactSelector,
    target: String,
}

impl Resolver {
    pub fn new(settings: Settings) -> Self {
        let fetcher = Fetcher::new();
        Self {
            builds: BuildResolver::new(fetcher.clone(), settings.api_url),
            artifacts: ArtifactSelector::new(fetcher, settings.download_url, settings.extension),
            target: settings.target,
        }
    }

    pub async fn resolve_all(&self, entries: &[RepoEntry]) -> Vec<String> {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        let mut links = Vec::with_capacity(entries.len());
        for entry in entries {
            pb.set_message(format!(
                "Resolving {}",
                Logger::highlight(format!("{}/{}", entry.owner, entry.project))
            ));

            // Spinner has to be out of the way while we log, or the lines get mangled.
            match self.resolve(entry).await {
                Ok(link) => {
                    pb.suspend(|| log::info!("{} -> {}", entry.package, link));
                    links.push(link);
                }
                Err(failure) => pb.suspend(|| failure.report(entry)),
            }
        }

        pb.finish_and_clear();
        links
    }

    async fn resolve(&self, entry: &RepoEntry) -> Result<String, Failure> {
        let build_id = self
            .builds
            .latest_build(&entry.owner, &entry.project, &entry.package)
            .await
            .map_err(Failure::Build)?;

        self.artifacts
            .select_artifact(
                &entry.owner,
                &entry.project,
                &entry.package,
                &self.target,
                build_id,
            )
            .await
            .map_err(|err| Failure::Artifact(build_id, err))
    }
}

/// Which stage an entry died in. Decides what context ends up in the log.
enum Failure {
    Build(ResolveError),
    Artifact(u64, ResolveError),
}

impl Failure {
    fn report(&self, entry: &RepoEntry) {
        match self {
            Failure::Build(ResolveError::NoBuild) => log::warn!(
                "No success build for {}/{}/{}",
                entry.owner,
                entry.project,
                entry.package
            ),
            Failure::Build(err) => log::warn!(
                "No success build for {}/{}/{}: {}",
                entry.owner,
                entry.project,
                entry.package,
                err
            ),
            Failure::Artifact(build_id, ResolveError::NoArtifact) => log::warn!(
                "No matching package for {} (build {})",
                entry.package,
                build_id
            ),
            Failure::Artifact(build_id, err) => log::warn!(
                "No matching package for {} (build {}): {}",
                entry.package,
                build_id,
                err
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn entry(owner: &str, project: &str, package: &str) -> RepoEntry {
        RepoEntry {
            owner: owner.to_string(),
            project: project.to_string(),
            package: package.to_string(),
        }
    }

    fn resolver_for(server: &MockServer, target: &str) -> Resolver {
        Resolver::new(Settings {
            api_url: server.uri(),
            download_url: server.uri(),
            target: target.to_string(),
            extension: "rpm".to_string(),
        })
    }

    async fn mount_builds(server: &MockServer, owner: &str, project: &str, items: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api_3/build/list"))
            .and(query_param("ownername", owner))
            .and(query_param("projectname", project))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(server)
            .await;
    }

    async fn mount_listing(server: &MockServer, dir: &str, html: &str) {
        Mock::given(method("GET"))
            .and(path(dir))
            .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn no_entries_no_links() {
        let server = MockServer::start().await;
        let links = resolver_for(&server, "fedora-rawhide-x86_64")
            .resolve_all(&[])
            .await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn resolves_entries_in_config_order() {
        let server = MockServer::start().await;
        mount_builds(
            &server,
            "zed",
            "apps",
            json!([{"id": 30, "state": "succeeded", "source_package": {"name": "zapp"}}]),
        )
        .await;
        mount_builds(
            &server,
            "amy",
            "libs",
            json!([
                {"id": 4, "state": "succeeded", "source_package": {"name": "alib"}},
                {"id": 6, "state": "failed", "source_package": {"name": "alib"}}
            ]),
        )
        .await;
        mount_listing(
            &server,
            "/results/zed/apps/fedora-rawhide-x86_64/030-zapp/",
            r#"<a href="zapp-1.0.x86_64.rpm">z</a>"#,
        )
        .await;
        mount_listing(
            &server,
            "/results/amy/libs/fedora-rawhide-x86_64/04-alib/",
            r#"<a href="alib-2.0.noarch.rpm">a</a>"#,
        )
        .await;

        let resolver = resolver_for(&server, "fedora-rawhide-x86_64");
        let entries = vec![entry("zed", "apps", "zapp"), entry("amy", "libs", "alib")];
        let links = resolver.resolve_all(&entries).await;

        assert_eq!(
            links,
            vec![
                format!(
                    "{}/results/zed/apps/fedora-rawhide-x86_64/030-zapp/zapp-1.0.x86_64.rpm",
                    server.uri()
                ),
                format!(
                    "{}/results/amy/libs/fedora-rawhide-x86_64/04-alib/alib-2.0.noarch.rpm",
                    server.uri()
                ),
            ]
        );

        // Same upstream, same answer.
        assert_eq!(resolver.resolve_all(&entries).await, links);
    }

    #[tokio::test]
    async fn only_source_and_debuginfo_is_skipped() {
        let server = MockServer::start().await;
        mount_builds(
            &server,
            "alice",
            "tools",
            json!([{"id": 12, "state": "succeeded", "source_package": {"name": "widget"}}]),
        )
        .await;
        mount_listing(
            &server,
            "/results/alice/tools/fedora-rawhide-x86_64/012-widget/",
            r#"<a href="widget-1.0-1.src.rpm">s</a>
               <a href="widget-1.0-1.x86_64-debuginfo.rpm">d</a>"#,
        )
        .await;

        let links = resolver_for(&server, "fedora-rawhide-x86_64")
            .resolve_all(&[entry("alice", "tools", "widget")])
            .await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn failing_entry_does_not_stop_the_rest() {
        let server = MockServer::start().await;
        // "broken" has no mock, so wiremock answers 404.
        mount_builds(
            &server,
            "alice",
            "tools",
            json!([{"id": 3, "state": "succeeded", "source_package": {"name": "widget"}}]),
        )
        .await;
        mount_listing(
            &server,
            "/results/alice/tools/fedora-41-aarch64/03-widget/",
            r#"<a href="widget-1.0.aarch64.rpm">w</a>"#,
        )
        .await;

        let entries = vec![
            entry("broken", "gone", "nothing"),
            entry("alice", "tools", "widget"),
        ];
        let links = resolver_for(&server, "fedora-41-aarch64")
            .resolve_all(&entries)
            .await;
        assert_eq!(
            links,
            vec![format!(
                "{}/results/alice/tools/fedora-41-aarch64/03-widget/widget-1.0.aarch64.rpm",
                server.uri()
            )]
        );
    }

    #[tokio::test]
    async fn no_successful_build_is_skipped() {
        let server = MockServer::start().await;
        mount_builds(
            &server,
            "alice",
            "tools",
            json!([{"id": 3, "state": "failed", "source_package": {"name": "widget"}}]),
        )
        .await;

        let links = resolver_for(&server, "fedora-rawhide-x86_64")
            .resolve_all(&[entry("alice", "tools", "widget")])
            .await;
        assert!(links.is_empty());
    }
}
