use crate::error::ResolveError;
use crate::http::Fetcher;
use crate::listing;

/// Architecture preference derived from a chroot name like `fedora-41-x86_64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
    Any,
}

impl Arch {
    pub fn from_target(target: &str) -> Self {
        if target.ends_with("x86_64") {
            Arch::X86_64
        } else if target.ends_with("aarch64") {
            Arch::Aarch64
        } else {
            Arch::Any
        }
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            Arch::X86_64 => Some("x86_64"),
            Arch::Aarch64 => Some("aarch64"),
            Arch::Any => None,
        }
    }
}

/// Picks the best file out of a directory listing.
///
/// Order of preference:
/// 1. packages built for `arch` (`.<arch>.<ext>`)
/// 2. `noarch` packages
/// 3. anything at all, but only when the target has no arch preference
///
/// Within a group the lexically smallest name wins. That is a plain string
/// sort, not a version comparison, so `a-1` beats `b-2`.
pub fn pick(candidates: &[String], arch: Arch, extension: &str) -> Option<String> {
    let noarch_marker = format!(".noarch.{}", extension);
    let arch_marker = arch.name().map(|a| format!(".{}.{}", a, extension));

    let mut arch_matches = Vec::new();
    let mut noarch_matches = Vec::new();
    for file in candidates {
        if file.contains(&noarch_marker) {
            noarch_matches.push(file);
        } else if arch_marker.as_ref().is_some_and(|m| file.contains(m)) {
            arch_matches.push(file);
        }
    }
    arch_matches.sort();
    noarch_matches.sort();

    if let Some(file) = arch_matches.first() {
        return Some((*file).clone());
    }
    if let Some(file) = noarch_matches.first() {
        return Some((*file).clone());
    }
    if arch == Arch::Any {
        return candidates.iter().min().cloned();
    }
    None
}

/// Where Copr publishes the results of one build for one chroot.
/// The build id is prefixed with a literal `0`, matching the backend layout.
pub fn results_dir_url(
    download_base: &str,
    owner: &str,
    project: &str,
    target: &str,
    build_id: u64,
    package: &str,
) -> String {
    format!(
        "{}/results/{}/{}/{}/0{}-{}/",
        download_base.trim_end_matches('/'),
        owner,
        project,
        target,
        build_id,
        package
    )
}

/// Finds the download URL of a built package in the results directory.
pub struct ArtifactSelector {
    fetcher: Fetcher,
    download_base: String,
    extension: String,
}

impl ArtifactSelector {
    pub fn new(
        fetcher: Fetcher,
        download_base: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            download_base: download_base.into(),
            extension: extension.into(),
        }
    }

    pub async fn select_artifact(
        &self,
        owner: &str,
        project: &str,
        package: &str,
        target: &str,
        build_id: u64,
    ) -> Result<String, ResolveError> {
        let arch = Arch::from_target(target);
        let dir = results_dir_url(&self.download_base, owner, project, target, build_id, package);

        let body = self.fetcher.fetch(&dir).await?;
        let candidates = listing::archive_files(&body, &self.extension)?;
        log::debug!("{}: {} candidate archives", dir, candidates.len());

        let file = pick(&candidates, arch, &self.extension).ok_or(ResolveError::NoArtifact)?;
        Ok(format!("{}{}", dir, file))
    }
}
