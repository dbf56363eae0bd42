//! RSS 2.0 feed for published posts.
//!
//! Drafts never reach the feed, whatever the caller passes in. Items are ordered by
//! publication date, newest first. Each item links to `<site>/blog/<slug>/`, and the same
//! URL is the item's permalink `guid`.

use crate::config::SiteConfig;
use crate::error::{FolioError, Result};
use crate::model::{newest_first, Category, Post};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| FolioError::Feed(e.to_string()))
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

/// The link of a post in the feed.
pub fn item_link(config: &SiteConfig, slug: &str) -> Result<String> {
    config.absolute_url(&format!("blog/{}/", slug))
}

/// Renders the feed document.
pub fn render_rss(config: &SiteConfig, posts: &[Post]) -> Result<String> {
    let mut published: Vec<Post> = posts.iter().filter(|p| !p.draft).cloned().collect();
    newest_first(&mut published);

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write(
        &mut writer,
        Event::Start(BytesStart::new("rss").with_attributes([("version", "2.0")])),
    )?;
    write(&mut writer, Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &config.title)?;
    text_element(&mut writer, "description", &config.description)?;
    text_element(&mut writer, "link", config.site_url()?.as_str())?;
    if let Some(latest) = published.first() {
        text_element(&mut writer, "lastBuildDate", &latest.pub_date.to_rfc2822())?;
    }

    for post in &published {
        let link = item_link(config, &post.slug)?;
        write(&mut writer, Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &post.title)?;
        text_element(&mut writer, "link", &link)?;
        write(
            &mut writer,
            Event::Start(BytesStart::new("guid").with_attributes([("isPermaLink", "true")])),
        )?;
        write(&mut writer, Event::Text(BytesText::new(&link)))?;
        write(&mut writer, Event::End(BytesEnd::new("guid")))?;
        text_element(&mut writer, "description", &post.description)?;
        text_element(&mut writer, "pubDate", &post.pub_date.to_rfc2822())?;
        text_element(&mut writer, "category", post.pillar.label())?;
        write(&mut writer, Event::End(BytesEnd::new("item")))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("channel")))?;
    write(&mut writer, Event::End(BytesEnd::new("rss")))?;

    let bytes = writer.into_inner().into_inner();
    let mut xml = String::from_utf8(bytes).map_err(|e| FolioError::Feed(e.to_string()))?;
    xml.push('\n');
    tracing::debug!(items = published.len(), "rendered feed");
    Ok(xml)
}
