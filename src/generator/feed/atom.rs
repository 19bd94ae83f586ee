//! Atom 1.0 serialization.

use super::{FeedDocument, FeedEntry, FeedError, GENERATOR};
use atom_syndication::{
    ContentBuilder, Entry, EntryBuilder, FeedBuilder, FixedDateTime, GeneratorBuilder, Link,
    LinkBuilder, Person, PersonBuilder, Text, WriteConfig,
};

const EPOCH: &str = "1970-01-01T00:00:00Z";

pub fn to_xml(document: &FeedDocument, pretty: bool) -> Result<String, FeedError> {
    let channel = &document.channel;

    let updated = match document.updated() {
        Some(date) => fixed_date(&date.to_rfc3339())?,
        None => fixed_date(EPOCH)?,
    };

    let entries = document
        .entries()
        .iter()
        .map(entry_to_atom)
        .collect::<Result<Vec<Entry>, _>>()?;

    let links = vec![
        link(&channel.feed_url, "self", Some("application/atom+xml")),
        link(&channel.link, "alternate", Some("text/html")),
    ];

    let feed = FeedBuilder::default()
        .id(channel.id.clone())
        .title(Text::plain(channel.title.clone()))
        .subtitle(Some(Text::plain(channel.description.clone())))
        .updated(updated)
        .icon(channel.favicon.clone())
        .logo(channel.image.clone())
        .rights((!channel.copyright.is_empty()).then(|| Text::plain(channel.copyright.clone())))
        .lang(Some(channel.language.clone()))
        .generator(Some(GeneratorBuilder::default().value(GENERATOR).build()))
        .links(links)
        .entries(entries)
        .build();

    if !pretty {
        return Ok(feed.to_string());
    }

    let config = WriteConfig {
        write_document_declaration: true,
        indent_size: Some(2),
    };
    let buf = feed
        .write_with_config(Vec::new(), config)
        .map_err(|e| FeedError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| FeedError::Serialization(e.to_string()))
}

fn entry_to_atom(entry: &FeedEntry) -> Result<Entry, FeedError> {
    let date = fixed_date(&entry.date.to_rfc3339())?;

    let authors: Vec<Person> = entry
        .authors
        .iter()
        .map(|author| {
            PersonBuilder::default()
                .name(author.name.clone())
                .uri(author.link.clone())
                .build()
        })
        .collect();

    let content = ContentBuilder::default()
        .value(Some(entry.content.clone()))
        .content_type(Some("html".to_string()))
        .build();

    Ok(EntryBuilder::default()
        .id(entry.id.clone())
        .title(Text::plain(entry.title.clone()))
        .links(vec![link(&entry.link, "alternate", None)])
        .summary(Some(Text::html(entry.description.clone())))
        .content(Some(content))
        .published(Some(date))
        .updated(date)
        .authors(authors)
        .build())
}

fn link(href: &str, rel: &str, mime_type: Option<&str>) -> Link {
    LinkBuilder::default()
        .href(href.to_string())
        .rel(rel.to_string())
        .mime_type(mime_type.map(str::to_string))
        .build()
}

fn fixed_date(rfc3339: &str) -> Result<FixedDateTime, FeedError> {
    rfc3339
        .parse()
        .map_err(|e| FeedError::Serialization(format!("invalid date `{rfc3339}`: {e}")))
}
