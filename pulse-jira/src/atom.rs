//! # Atom Activity Feeds
//!
//! Types for the Jira activity stream and a pull-parser that decodes an Atom
//! 1.0 document into them. Only elements in the Atom namespace are mapped;
//! extension elements (`activity:*`, `usr:*`, ...) are skipped, except inside
//! `author` where the whole inner markup is kept verbatim.

use chrono::{DateTime, FixedOffset};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ATOM_NAMESPACE;
use crate::error::{Format, JiraError, Result};

/// An Atom feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityFeed {
  pub title: String,
  pub id: String,
  pub links: Vec<Link>,
  pub updated: Option<DateTime<FixedOffset>>,
  pub author: Person,
  pub entries: Vec<ActivityItem>,
}

impl ActivityFeed {
  /// The `rel="next"` link, used to page through older activity
  pub fn next_link(&self) -> Option<&str> {
    self.links.iter().find(|l| l.rel.as_deref() == Some("next")).map(|l| l.href.as_str())
  }
}

/// A single `entry` of an Atom feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
  pub title: String,
  pub id: String,
  pub links: Vec<Link>,
  pub updated: Option<DateTime<FixedOffset>>,
  pub author: Person,
  pub summary: Text,
  pub category: Category,
}

/// An Atom person construct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
  pub name: String,
  pub uri: String,
  pub email: String,
  /// Raw markup between `<author>` and `</author>`
  pub inner_xml: String,
}

/// An Atom link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
  pub rel: Option<String>,
  pub href: String,
}

/// An Atom category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub term: String,
}

/// An Atom text construct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
  #[serde(rename = "type")]
  pub kind: Option<String>,
  pub body: String,
}

#[derive(Debug, Error)]
enum AtomError {
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),
  #[error(transparent)]
  Attribute(#[from] AttrError),
  #[error("body is not valid UTF-8: {0}")]
  Utf8(#[from] std::str::Utf8Error),
  #[error("invalid <{element}> timestamp '{value}': {source}")]
  Timestamp {
    element: &'static str,
    value: String,
    source: chrono::ParseError,
  },
  #[error("expected an Atom <feed> root element, found <{0}>")]
  NotAFeed(String),
  #[error("document has no root element")]
  MissingRoot,
  #[error("unexpected end of document")]
  UnexpectedEof,
}

type ParseResult<T> = std::result::Result<T, AtomError>;

/// Atom elements the decoder maps onto fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
  Feed,
  Entry,
  Title,
  Id,
  Link,
  Updated,
  Author,
  Summary,
  Category,
  Other,
}

/// Decode an Atom feed document.
///
/// # Errors
///
/// Returns [`JiraError::Decode`] if the body is not well-formed XML, the root
/// is not an Atom `feed`, or an `updated` value is not an RFC 3339 timestamp.
pub fn decode_atom(body: &[u8]) -> Result<ActivityFeed> {
  parse_document(body).map_err(|e| JiraError::decode(Format::AtomXml, e, body))
}

fn parse_document(body: &[u8]) -> ParseResult<ActivityFeed> {
  let text = std::str::from_utf8(body)?;
  let mut reader = NsReader::from_str(text);

  loop {
    match reader.read_event()? {
      Event::Start(start) => {
        if classify(&reader, &start) != Tag::Feed {
          return Err(AtomError::NotAFeed(display_name(&start)));
        }
        return parse_feed(&mut reader);
      }
      Event::Empty(start) => {
        if classify(&reader, &start) != Tag::Feed {
          return Err(AtomError::NotAFeed(display_name(&start)));
        }
        return Ok(ActivityFeed::default());
      }
      Event::Eof => return Err(AtomError::MissingRoot),
      _ => {}
    }
  }
}

fn parse_feed(reader: &mut NsReader<&[u8]>) -> ParseResult<ActivityFeed> {
  let mut feed = ActivityFeed::default();

  loop {
    match reader.read_event()? {
      Event::Start(start) => match classify(reader, &start) {
        Tag::Title => feed.title = read_text(reader)?,
        Tag::Id => feed.id = read_text(reader)?,
        Tag::Updated => feed.updated = read_timestamp(reader, "updated")?,
        Tag::Author => feed.author = read_person(reader, &start)?,
        Tag::Entry => feed.entries.push(parse_entry(reader)?),
        Tag::Link => {
          feed.links.push(read_link(&start)?);
          reader.read_to_end(start.name())?;
        }
        _ => {
          reader.read_to_end(start.name())?;
        }
      },
      Event::Empty(start) => {
        if classify(reader, &start) == Tag::Link {
          feed.links.push(read_link(&start)?);
        }
      }
      Event::End(_) => return Ok(feed),
      Event::Eof => return Err(AtomError::UnexpectedEof),
      _ => {}
    }
  }
}

fn parse_entry(reader: &mut NsReader<&[u8]>) -> ParseResult<ActivityItem> {
  let mut item = ActivityItem::default();

  loop {
    match reader.read_event()? {
      Event::Start(start) => match classify(reader, &start) {
        Tag::Title => item.title = read_text(reader)?,
        Tag::Id => item.id = read_text(reader)?,
        Tag::Updated => item.updated = read_timestamp(reader, "updated")?,
        Tag::Author => item.author = read_person(reader, &start)?,
        Tag::Summary => {
          item.summary = Text {
            kind: attribute(&start, b"type")?,
            body: read_text(reader)?,
          }
        }
        Tag::Link => {
          item.links.push(read_link(&start)?);
          reader.read_to_end(start.name())?;
        }
        Tag::Category => {
          item.category = read_category(&start)?;
          reader.read_to_end(start.name())?;
        }
        _ => {
          reader.read_to_end(start.name())?;
        }
      },
      Event::Empty(start) => match classify(reader, &start) {
        Tag::Link => item.links.push(read_link(&start)?),
        Tag::Category => item.category = read_category(&start)?,
        Tag::Summary => {
          item.summary = Text {
            kind: attribute(&start, b"type")?,
            body: String::new(),
          }
        }
        _ => {}
      },
      Event::End(_) => return Ok(item),
      Event::Eof => return Err(AtomError::UnexpectedEof),
      _ => {}
    }
  }
}

/// Read an `author` element, keeping its inner markup untouched and picking
/// the person fields out of it.
fn read_person(reader: &mut NsReader<&[u8]>, start: &BytesStart<'_>) -> ParseResult<Person> {
  let inner = reader.read_text(start.name())?;
  let mut person = Person {
    inner_xml: inner.to_string(),
    ..Person::default()
  };

  let mut fragment = Reader::from_str(&inner);
  loop {
    match fragment.read_event()? {
      Event::Start(child) => {
        let value = collect_text(|| fragment.read_event())?;
        match child.local_name().as_ref() {
          b"name" => person.name = value,
          b"uri" => person.uri = value,
          b"email" => person.email = value,
          _ => {}
        }
      }
      Event::Eof => return Ok(person),
      _ => {}
    }
  }
}

/// Text content of the element whose start tag was just read
fn read_text(reader: &mut NsReader<&[u8]>) -> ParseResult<String> {
  collect_text(|| reader.read_event())
}

/// Concatenate the character data up to the end tag matching an
/// already-consumed start tag. Text is unescaped, CDATA is taken as is, and
/// the text of nested elements is included.
fn collect_text<'i, F>(mut next_event: F) -> ParseResult<String>
where
  F: FnMut() -> quick_xml::Result<Event<'i>>,
{
  let mut content = String::new();
  let mut depth = 0usize;

  loop {
    match next_event()? {
      Event::Text(text) => content.push_str(&text.unescape()?),
      Event::CData(cdata) => content.push_str(std::str::from_utf8(&cdata.into_inner())?),
      Event::Start(_) => depth += 1,
      Event::End(_) if depth == 0 => return Ok(content),
      Event::End(_) => depth -= 1,
      Event::Eof => return Err(AtomError::UnexpectedEof),
      _ => {}
    }
  }
}

fn read_timestamp(reader: &mut NsReader<&[u8]>, element: &'static str) -> ParseResult<Option<DateTime<FixedOffset>>> {
  let value = read_text(reader)?;
  let value = value.trim();
  if value.is_empty() {
    return Ok(None);
  }
  DateTime::parse_from_rfc3339(value)
    .map(Some)
    .map_err(|source| AtomError::Timestamp {
      element,
      value: value.to_string(),
      source,
    })
}

fn read_link(start: &BytesStart<'_>) -> ParseResult<Link> {
  Ok(Link {
    rel: attribute(start, b"rel")?,
    href: attribute(start, b"href")?.unwrap_or_default(),
  })
}

fn read_category(start: &BytesStart<'_>) -> ParseResult<Category> {
  Ok(Category {
    term: attribute(start, b"term")?.unwrap_or_default(),
  })
}

fn attribute(start: &BytesStart<'_>, key: &[u8]) -> ParseResult<Option<String>> {
  for attr in start.attributes() {
    let attr = attr?;
    if attr.key.as_ref() == key {
      return Ok(Some(attr.unescape_value()?.into_owned()));
    }
  }
  Ok(None)
}

fn classify(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Tag {
  let (ns, local) = reader.resolve_element(start.name());
  let in_atom = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == ATOM_NAMESPACE.as_bytes());
  if !in_atom {
    return Tag::Other;
  }
  match local.as_ref() {
    b"feed" => Tag::Feed,
    b"entry" => Tag::Entry,
    b"title" => Tag::Title,
    b"id" => Tag::Id,
    b"link" => Tag::Link,
    b"updated" => Tag::Updated,
    b"author" => Tag::Author,
    b"summary" => Tag::Summary,
    b"category" => Tag::Category,
    _ => Tag::Other,
  }
}

fn display_name(start: &BytesStart<'_>) -> String {
  String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
  use pulse_test_utils::fixtures::{ACTIVITY_FEED, FIRST_AUTHOR_INNER, SECOND_AUTHOR_INNER};

  use super::*;

  #[test]
  fn test_decode_feed_metadata() {
    let feed = decode_atom(ACTIVITY_FEED.as_bytes()).unwrap();

    assert_eq!(feed.id, "https://jira.example.com/activity");
    assert_eq!(feed.title, "Activity Stream");
    assert_eq!(feed.links.len(), 2);
    assert_eq!(feed.links[0].rel.as_deref(), Some("self"));
    assert_eq!(
      feed.next_link(),
      Some("https://jira.example.com/activity?streams=user+IS+bob&maxResults=10&before=1682928000000")
    );
    assert_eq!(
      feed.updated,
      Some(DateTime::parse_from_rfc3339("2023-05-01T10:00:00Z").unwrap())
    );
  }

  #[test]
  fn test_decode_entries() {
    let feed = decode_atom(ACTIVITY_FEED.as_bytes()).unwrap();
    assert_eq!(feed.entries.len(), 2);

    let first = &feed.entries[0];
    assert_eq!(first.id, "urn:uuid:6c5d4e5e-0001");
    assert_eq!(
      first.title,
      r#"<a href="https://jira.example.com/secure/ViewProfile.jspa?name=bob">Bob Builder</a> created PROJ-1"#
    );
    assert_eq!(first.links[0].href, "https://jira.example.com/browse/PROJ-1");
    assert_eq!(first.summary.kind.as_deref(), Some("html"));
    assert_eq!(first.summary.body, "Created <b>PROJ-1</b>");
    assert_eq!(first.category.term, "created");
    assert_eq!(first.author.name, "Bob Builder");
    assert_eq!(first.author.email, "bob@example.com");
    assert_eq!(first.author.uri, "https://jira.example.com/secure/ViewProfile.jspa?name=bob");

    let second = &feed.entries[1];
    assert_eq!(second.links[0].rel, None);
    assert_eq!(second.summary.kind, None);
    assert_eq!(second.summary.body, "Looks good to me");
    assert_eq!(second.category.term, "comment");
    assert_eq!(second.author.name, "Alice & Co");
    assert_eq!(second.author.email, "");
    assert_eq!(
      second.updated.unwrap().offset().local_minus_utc(),
      2 * 3600,
      "offset should survive decoding"
    );
  }

  #[test]
  fn test_author_inner_xml_is_verbatim() {
    let feed = decode_atom(ACTIVITY_FEED.as_bytes()).unwrap();

    assert_eq!(feed.entries[0].author.inner_xml, FIRST_AUTHOR_INNER);
    assert_eq!(feed.entries[1].author.inner_xml, SECOND_AUTHOR_INNER);
  }

  #[test]
  fn test_decode_skips_foreign_elements() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:x="urn:x">
      <x:title>not the feed title</x:title>
      <title>Real title</title>
      <x:entry><title>ignored</title></x:entry>
    </feed>"#;

    let feed = decode_atom(xml.as_bytes()).unwrap();
    assert_eq!(feed.title, "Real title");
    assert!(feed.entries.is_empty());
  }

  #[test]
  fn test_decode_empty_feed() {
    let feed = decode_atom(br#"<feed xmlns="http://www.w3.org/2005/Atom"/>"#).unwrap();
    assert_eq!(feed, ActivityFeed::default());

    let feed = decode_atom(br#"<feed xmlns="http://www.w3.org/2005/Atom"></feed>"#).unwrap();
    assert!(feed.entries.is_empty());
    assert!(feed.updated.is_none());
    assert!(feed.next_link().is_none());
  }

  #[test]
  fn test_decode_rejects_wrong_namespace() {
    let err = decode_atom(br#"<feed xmlns="http://purl.org/rss/1.0/"></feed>"#).unwrap_err();

    match err {
      JiraError::Decode { format, message, .. } => {
        assert_eq!(format, Format::AtomXml);
        assert!(message.contains("feed"));
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn test_decode_rejects_malformed_xml() {
    let mismatched = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><title>x</title></feed>"#;
    assert!(matches!(
      decode_atom(mismatched.as_bytes()),
      Err(JiraError::Decode {
        format: Format::AtomXml,
        ..
      })
    ));

    let truncated = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry>"#;
    assert!(matches!(decode_atom(truncated.as_bytes()), Err(JiraError::Decode { .. })));

    assert!(matches!(decode_atom(b"not xml at all"), Err(JiraError::Decode { .. })));
    assert!(matches!(decode_atom(b""), Err(JiraError::Decode { .. })));
  }

  #[test]
  fn test_decode_rejects_bad_timestamp() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry><updated>last week</updated></entry></feed>"#;

    let err = decode_atom(xml.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("last week"));
  }

  #[test]
  fn test_decode_cdata_text() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
      <title><![CDATA[A & B]]></title>
      <entry>
        <title>Mixed &amp; <![CDATA[<raw> & more]]></title>
        <summary type="html"><![CDATA[<b>x</b>]]></summary>
        <author><name><![CDATA[Tom & Jerry]]></name></author>
      </entry>
    </feed>"#;

    let feed = decode_atom(xml.as_bytes()).unwrap();
    assert_eq!(feed.title, "A & B");

    let entry = &feed.entries[0];
    assert_eq!(entry.title, "Mixed & <raw> & more");
    assert_eq!(entry.summary.kind.as_deref(), Some("html"));
    assert_eq!(entry.summary.body, "<b>x</b>");
    assert_eq!(entry.author.name, "Tom & Jerry");
    assert_eq!(entry.author.inner_xml, "<name><![CDATA[Tom & Jerry]]></name>");
  }
}
