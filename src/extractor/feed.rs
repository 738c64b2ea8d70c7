//! RSS/XML feed item extraction.

use quick_xml::events::Event;
use quick_xml::Reader;

/// One `<item>` from a feed, fields as found in the document.
#[derive(Debug, Clone, Default)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
    pub description: Option<String>,
    pub guid: Option<String>,
    pub pub_date: Option<String>,
}

/// Fields we capture inside an `<item>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemField {
    Title,
    Link,
    Description,
    Guid,
    PubDate,
}

impl ItemField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(ItemField::Title),
            b"link" => Some(ItemField::Link),
            b"description" => Some(ItemField::Description),
            b"guid" => Some(ItemField::Guid),
            b"pubDate" => Some(ItemField::PubDate),
            _ => None,
        }
    }
}

/// Pull every `<item>` out of an RSS document. Tolerant of malformed
/// fragments: a document that stops parsing simply yields the items read
/// so far, and an undecodable text node skips that field.
pub fn extract_items(xml: &str) -> Vec<FeedItem> {
    let mut reader = Reader::from_str(xml);

    let mut items = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut field: Option<ItemField> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                if name.as_ref() == b"item" {
                    current = Some(FeedItem::default());
                    field = None;
                } else if current.is_some() {
                    field = ItemField::from_tag(name.as_ref());
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    match e.decode() {
                        Ok(text) => set_field(item, field, &text),
                        Err(e) => log::warn!("Undecodable feed text node: {}", e),
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    set_field(item, field, &text);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("Feed parse stopped at position {}: {}", reader.buffer_position(), e);
                break;
            }
            _ => {}
        }
    }

    items
}

fn set_field(item: &mut FeedItem, field: ItemField, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    match field {
        ItemField::Title => {
            item.title.push_str(text);
        }
        ItemField::Link => item.link = Some(text.to_string()),
        ItemField::Description => item.description = Some(text.to_string()),
        ItemField::Guid => item.guid = Some(text.to_string()),
        ItemField::PubDate => item.pub_date = Some(text.to_string()),
    }
}
