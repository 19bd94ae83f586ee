//! RSS 2.0 serialization.
//!
//! Authors go into `dc:creator` since RSS `<author>` must be an email
//! address. The full article lands in `content:encoded`.

use super::{FeedDocument, FeedEntry, FeedError, GENERATOR};
use atom_syndication::LinkBuilder;
use rss::{
    ChannelBuilder, GuidBuilder, ImageBuilder, Item, ItemBuilder,
    extension::{atom::AtomExtensionBuilder, dublincore::DublinCoreExtensionBuilder},
    validation::Validate,
};

pub fn to_xml(document: &FeedDocument, pretty: bool) -> Result<String, FeedError> {
    let channel = &document.channel;
    let items: Vec<Item> = document.entries().iter().map(entry_to_item).collect();

    let image = channel.image.as_ref().map(|url| {
        ImageBuilder::default()
            .url(url.clone())
            .title(channel.title.clone())
            .link(channel.link.clone())
            .build()
    });

    let self_link = LinkBuilder::default()
        .href(channel.feed_url.clone())
        .rel("self".to_string())
        .mime_type(Some("application/rss+xml".to_string()))
        .build();

    let channel = ChannelBuilder::default()
        .title(channel.title.clone())
        .link(channel.link.clone())
        .description(channel.description.clone())
        .language(Some(channel.language.clone()))
        .copyright((!channel.copyright.is_empty()).then(|| channel.copyright.clone()))
        .image(image)
        .generator(Some(GENERATOR.to_string()))
        .last_build_date(document.updated().map(|date| date.to_rfc2822()))
        .atom_ext(Some(
            AtomExtensionBuilder::default()
                .links(vec![self_link])
                .build(),
        ))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| FeedError::Serialization(format!("RSS validation failed: {e}")))?;

    if !pretty {
        return Ok(channel.to_string());
    }

    let buf = channel
        .pretty_write_to(Vec::new(), b' ', 2)
        .map_err(|e| FeedError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| FeedError::Serialization(e.to_string()))
}

fn entry_to_item(entry: &FeedEntry) -> Item {
    let creators: Vec<String> = entry.authors.iter().map(|author| author.name.clone()).collect();

    ItemBuilder::default()
        .title(Some(entry.title.clone()))
        .link(Some(entry.link.clone()))
        .guid(Some(
            GuidBuilder::default()
                .permalink(true)
                .value(entry.id.clone())
                .build(),
        ))
        .description(Some(entry.description.clone()))
        .content(Some(entry.content.clone()))
        .pub_date(Some(entry.date.to_rfc2822()))
        .dublin_core_ext(Some(
            DublinCoreExtensionBuilder::default()
                .creators(creators)
                .build(),
        ))
        .build()
}
