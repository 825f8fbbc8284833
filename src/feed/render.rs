use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use super::document::{Channel, FeedDocument, Item};
use super::error::FeedError;

pub const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Serializes a feed document as RSS 2.0 with iTunes extensions.
///
/// The channel block is written before every item, matching what feed
/// readers expect in document order.
pub fn render(doc: &FeedDocument) -> Result<String, FeedError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:itunes", ITUNES_NS));
    rss.push_attribute(("xmlns:dc", DC_NS));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_channel(&mut writer, &doc.channel)?;
    for item in &doc.items {
        write_item(&mut writer, item)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

fn write_channel(writer: &mut XmlWriter, channel: &Channel) -> Result<(), FeedError> {
    text_element(writer, "title", &channel.title)?;
    text_element(writer, "link", &channel.link)?;
    text_element(writer, "description", &channel.description)?;
    text_element(writer, "copyright", &channel.copyright)?;
    text_element(writer, "lastBuildDate", &channel.last_build_date.to_rfc2822())?;
    text_element(writer, "generator", &channel.generator)?;

    writer.write_event(Event::Start(BytesStart::new("image")))?;
    text_element(writer, "url", &channel.image.url)?;
    text_element(writer, "title", &channel.image.title)?;
    text_element(writer, "link", &channel.image.link)?;
    writer.write_event(Event::End(BytesEnd::new("image")))?;

    text_element(writer, "itunes:author", &channel.itunes_author)?;
    empty_element(writer, "itunes:category", &[("text", channel.itunes_category.as_str())])?;
    text_element(writer, "itunes:explicit", &channel.itunes_explicit)?;
    empty_element(writer, "itunes:image", &[("href", channel.itunes_image.as_str())])?;
    text_element(writer, "itunes:keywords", &channel.itunes_keywords)?;

    writer.write_event(Event::Start(BytesStart::new("itunes:owner")))?;
    text_element(writer, "itunes:name", &channel.itunes_owner.name)?;
    text_element(writer, "itunes:email", &channel.itunes_owner.email)?;
    writer.write_event(Event::End(BytesEnd::new("itunes:owner")))?;

    text_element(writer, "itunes:subtitle", &channel.itunes_subtitle)?;
    text_element(writer, "itunes:summary", &channel.itunes_summary)?;
    Ok(())
}

fn write_item(writer: &mut XmlWriter, item: &Item) -> Result<(), FeedError> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    text_element(writer, "title", &item.title)?;
    text_element(writer, "link", &item.link)?;
    text_element(writer, "description", &item.description)?;

    let length = item.enclosure.length.to_string();
    empty_element(
        writer,
        "enclosure",
        &[
            ("url", item.enclosure.url.as_str()),
            ("length", length.as_str()),
            ("type", item.enclosure.mime_type.as_str()),
        ],
    )?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", if item.guid.is_permalink { "true" } else { "false" }));
    writer.write_event(Event::Start(guid))?;
    writer.write_event(Event::Text(BytesText::new(&item.guid.value)))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    text_element(writer, "pubDate", &item.pub_date.to_rfc2822())?;
    text_element(writer, "dc:identifier", &item.identifier)?;
    if let Some(author) = &item.itunes_author {
        text_element(writer, "itunes:author", author)?;
    }
    text_element(writer, "itunes:duration", &item.itunes_duration)?;
    text_element(writer, "itunes:explicit", &item.itunes_explicit)?;
    text_element(writer, "itunes:keywords", &item.itunes_keywords)?;
    if let Some(subtitle) = &item.itunes_subtitle {
        text_element(writer, "itunes:subtitle", subtitle)?;
    }
    text_element(writer, "itunes:summary", &item.itunes_summary)?;

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), FeedError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn empty_element(
    writer: &mut XmlWriter,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<(), FeedError> {
    let mut element = BytesStart::new(name);
    for &(key, value) in attributes {
        element.push_attribute((key, value));
    }
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::document::{Enclosure, Guid, Image, Owner};
    use chrono::{TimeZone, Utc};

    fn channel() -> Channel {
        Channel {
            title: "Talks".to_string(),
            link: "https://media.ccc.de/".to_string(),
            description: "All talks".to_string(),
            copyright: "mostly cc-by-nc".to_string(),
            last_build_date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            generator: "media.ccc.de / RSS quick-xml/0.37".to_string(),
            image: Image {
                url: "https://media.ccc.de/logo.png".to_string(),
                title: "Talks".to_string(),
                link: "https://media.ccc.de/".to_string(),
            },
            itunes_author: "CCC".to_string(),
            itunes_category: "Technology".to_string(),
            itunes_explicit: "No".to_string(),
            itunes_image: "https://media.ccc.de/logo.png".to_string(),
            itunes_keywords: "CCC,Hacking".to_string(),
            itunes_owner: Owner {
                name: "CCC".to_string(),
                email: "media@koeln.ccc.de".to_string(),
            },
            itunes_subtitle: String::new(),
            itunes_summary: "All talks".to_string(),
        }
    }

    fn item() -> Item {
        Item {
            title: "Fish & Chips".to_string(),
            link: "https://media.ccc.de/v/fish".to_string(),
            description: "<p>body</p>".to_string(),
            guid: Guid {
                value: "https://cdn.example.com/fish.mp4?100".to_string(),
                is_permalink: true,
            },
            identifier: "abc-123".to_string(),
            pub_date: Utc.with_ymd_and_hms(2023, 12, 27, 11, 0, 0).unwrap(),
            enclosure: Enclosure {
                url: "https://cdn.example.com/fish.mp4".to_string(),
                length: 2_097_152,
                mime_type: "mp4".to_string(),
            },
            itunes_author: None,
            itunes_duration: "01:02:05".to_string(),
            itunes_explicit: "No".to_string(),
            itunes_keywords: String::new(),
            itunes_subtitle: None,
            itunes_summary: "<p>body</p>".to_string(),
        }
    }

    #[test]
    fn test_empty_feed_has_channel_only() {
        let xml = render(&FeedDocument {
            channel: channel(),
            items: vec![],
        })
        .unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns:itunes=\"http://www.itunes.com/dtds/podcast-1.0.dtd\""));
        assert!(xml.contains("<itunes:category text=\"Technology\"/>"));
        assert!(xml.contains("<itunes:image href=\"https://media.ccc.de/logo.png\"/>"));
        assert!(xml.contains("<lastBuildDate>Tue, 2 Jan 2024 03:04:05 +0000</lastBuildDate>"));
        assert!(xml.contains("<itunes:subtitle></itunes:subtitle>"));
        assert!(!xml.contains("<item>"));
        assert!(xml.trim_end().ends_with("</rss>"));
    }

    #[test]
    fn test_item_elements() {
        let xml = render(&FeedDocument {
            channel: channel(),
            items: vec![item()],
        })
        .unwrap();

        assert!(xml.contains("<title>Fish &amp; Chips</title>"));
        assert!(xml.contains("<description>&lt;p&gt;body&lt;/p&gt;</description>"));
        assert!(xml.contains(
            "<enclosure url=\"https://cdn.example.com/fish.mp4\" length=\"2097152\" type=\"mp4\"/>"
        ));
        assert!(xml.contains(
            "<guid isPermaLink=\"true\">https://cdn.example.com/fish.mp4?100</guid>"
        ));
        assert!(xml.contains("<pubDate>Wed, 27 Dec 2023 11:00:00 +0000</pubDate>"));
        assert!(xml.contains("<dc:identifier>abc-123</dc:identifier>"));
        assert!(xml.contains("<itunes:duration>01:02:05</itunes:duration>"));
        assert!(xml.contains("<itunes:keywords></itunes:keywords>"));
    }

    #[test]
    fn test_optional_item_elements_omitted() {
        let xml = render(&FeedDocument {
            channel: channel(),
            items: vec![item()],
        })
        .unwrap();
        let item_xml = &xml[xml.find("<item>").unwrap()..];

        assert!(!item_xml.contains("itunes:subtitle"));
        assert!(!item_xml.contains("itunes:author"));
    }

    #[test]
    fn test_channel_precedes_items() {
        let xml = render(&FeedDocument {
            channel: channel(),
            items: vec![item(), item()],
        })
        .unwrap();

        let first_item = xml.find("<item>").unwrap();
        assert!(xml.find("<itunes:owner>").unwrap() < first_item);
        assert!(xml.find("<lastBuildDate>").unwrap() < first_item);
        assert_eq!(xml.matches("<item>").count(), 2);
        assert_eq!(xml.matches("<channel>").count(), 1);
    }
}
