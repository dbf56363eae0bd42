use crate::commands::CmdResult;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::feed::render_rss;
use crate::store::ContentStore;

/// Renders the RSS feed without building the site.
pub fn run<S: ContentStore>(store: &S, config: &SiteConfig) -> Result<CmdResult> {
    let posts = store.posts()?;
    Ok(CmdResult::default().with_document(render_rss(config, &posts)?))
}
