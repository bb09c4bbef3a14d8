//! Scraping of HTML directory indexes (the Copr results pages are plain
//! autoindex listings).

use crate::error::ListingError;
use scraper::{Html, Selector};

/// Returns true for hrefs that name a debuginfo/debugsource or source package.
/// Those are never download candidates.
pub fn is_excluded(href: &str, extension: &str) -> bool {
    href.contains("debug") || href.contains(&format!("src.{}", extension))
}

/// Collects every anchor href ending in `.<extension>`, minus the excluded
/// ones, in document order.
pub fn archive_files(html: &[u8], extension: &str) -> Result<Vec<String>, ListingError> {
    let text = std::str::from_utf8(html)?;
    let document = Html::parse_document(text);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Ok(Vec::new());
    };

    let suffix = format!(".{}", extension);
    let files = document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.ends_with(&suffix))
        .filter(|href| !is_excluded(href, extension))
        .map(str::to_string)
        .collect();

    Ok(files)
}
