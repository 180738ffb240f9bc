use feed_rs::model::{Entry, Person};
use feed_rs::parser;
use html_escape::decode_html_entities;
use serde_json::{json, Value};

use crate::app::{FeedsyncError, Result};
use crate::domain::FeedItem;

/// Turns raw RSS/Atom/JSON Feed bytes into [`FeedItem`]s.
///
/// Field names are lowercase: `title`, `description`, `content`, `link`,
/// `links`, `guid`, `published`, `updated`, `author`, `authors`,
/// `categories`. Fields an entry doesn't carry are left out.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Vec<FeedItem>> {
        // Entries without an id of their own keep an empty one, so no `guid`
        // field is reported for them.
        let feed = parser::Builder::new()
            .id_generator(|_links, _title, _uri| String::new())
            .build()
            .parse(body)
            .map_err(|e| FeedsyncError::FeedParse(e.to_string()))?;

        Ok(feed.entries.into_iter().map(Self::entry_to_item).collect())
    }

    fn entry_to_item(entry: Entry) -> FeedItem {
        let mut item = match entry.title {
            Some(title) => FeedItem::new(decode_html_entities(&title.content).to_string()),
            None => FeedItem::default(),
        };

        if !entry.id.is_empty() {
            item = item.with_field("guid", entry.id);
        }
        if let Some(summary) = entry.summary {
            item = item.with_field(
                "description",
                decode_html_entities(&summary.content).to_string(),
            );
        }
        if let Some(body) = entry.content.and_then(|c| c.body) {
            item = item.with_field("content", decode_html_entities(&body).to_string());
        }
        if let Some(link) = entry.links.first() {
            item = item.with_field("link", link.href.clone());
        }
        if !entry.links.is_empty() {
            let links: Vec<Value> = entry
                .links
                .iter()
                .map(|l| Value::String(l.href.clone()))
                .collect();
            item = item.with_field("links", links);
        }
        if let Some(published) = entry.published {
            item = item.with_field("published", published.to_rfc3339());
        }
        if let Some(updated) = entry.updated {
            item = item.with_field("updated", updated.to_rfc3339());
        }
        if let Some(author) = entry.authors.first() {
            item = item.with_field("author", Self::person(author));
        }
        if !entry.authors.is_empty() {
            let authors: Vec<Value> = entry.authors.iter().map(Self::person).collect();
            item = item.with_field("authors", authors);
        }
        if !entry.categories.is_empty() {
            let categories: Vec<Value> = entry
                .categories
                .iter()
                .map(|c| Value::String(c.label.clone().unwrap_or_else(|| c.term.clone())))
                .collect();
            item = item.with_field("categories", categories);
        }

        item
    }

    fn person(person: &Person) -> Value {
        match &person.email {
            Some(email) => json!({ "name": person.name, "email": email }),
            None => json!({ "name": person.name }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rule;
    use crate::sync::project;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <description>A test feed</description>
    <item>
      <title>Test Item 1 &amp; more</title>
      <link>https://example.com/item1</link>
      <guid>item-1</guid>
      <pubDate>Mon, 01 Jan 2024 00:00:00 GMT</pubDate>
      <description>This is item 1</description>
      <category>news</category>
    </item>
    <item>
      <title>Test Item 2</title>
      <link>https://example.com/item2</link>
      <guid>item-2</guid>
      <description>This is item 2</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <subtitle>An Atom test feed</subtitle>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>This is Atom entry 1</summary>
    <author><name>Jane</name><email>jane@example.com</email></author>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let items = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Test Item 1 & more");
        assert_eq!(items[0].field("guid"), Some(&Value::from("item-1")));
        assert_eq!(
            items[0].field("link"),
            Some(&Value::from("https://example.com/item1"))
        );
        assert_eq!(
            items[0].field("description"),
            Some(&Value::from("This is item 1"))
        );
        assert!(items[0].field("published").is_some());
        assert_eq!(items[0].field("categories"), Some(&json!(["news"])));
        assert!(items[1].field("published").is_none());
    }

    #[test]
    fn test_parse_atom() {
        let items = Normalizer::new().normalize(ATOM_SAMPLE.as_bytes()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Atom Entry 1");
        assert_eq!(items[0].field("guid"), Some(&Value::from("atom-entry-1")));
        assert_eq!(
            items[0].field("link"),
            Some(&Value::from("https://example.com/atom1"))
        );
        assert_eq!(
            items[0].field("author"),
            Some(&json!({ "name": "Jane", "email": "jane@example.com" }))
        );
    }

    #[test]
    fn test_untitled_item_without_guid_has_no_such_fields() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item><description>Only a body</description><link>https://example.com/x</link></item>
</channel></rss>"#;
        let items = Normalizer::new().normalize(rss.as_bytes()).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "");
        assert!(items[0].field("title").is_none());
        assert!(items[0].field("guid").is_none());
        assert_eq!(
            items[0].field("description"),
            Some(&Value::from("Only a body"))
        );

        let rule = Rule::compile("Title=t,GUID=id").unwrap();
        assert!(project(&items[0], &rule).is_empty());
    }

    #[test]
    fn test_parse_garbage_is_feed_parse_error() {
        let result = Normalizer::new().normalize(b"definitely not a feed");
        assert!(matches!(result, Err(FeedsyncError::FeedParse(_))));
    }
}
