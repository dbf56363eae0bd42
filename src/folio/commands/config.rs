use crate::commands::CmdResult;
use crate::config::SiteConfig;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// The effective configuration after layering.
    Show,
    /// A commented `folio.toml` with every key and default.
    Template,
}

pub fn run(config: &SiteConfig, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::Show => Ok(CmdResult::default().with_config(config.clone())),
        ConfigAction::Template => Ok(CmdResult::default().with_document(SiteConfig::template())),
    }
}
