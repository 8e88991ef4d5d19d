use anyhow::{Context, Result};
use reqwest::Url;
use tracing::info;

/// Hand a campsite image to the system viewer. The terminal cannot draw it.
pub fn open_image(url: &Url) -> Result<()> {
    info!(url = %url, "Opening campsite image");
    open::that(url.as_str()).with_context(|| format!("Failed to open {url}"))
}
