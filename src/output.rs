/// Renders the resolved links for stdout.
///
/// Plain mode is one link per line. JSON mode is a pretty-printed array of
/// strings, `[]` when nothing was found.
pub fn render(links: &[String], json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string_pretty(links)
    } else {
        Ok(links.iter().map(|link| format!("{}\n", link)).collect())
    }
}
