use crate::error::{PubMedError, Result};
use crate::pubmed::models::{ArticleSummary, format_author_name};
use crate::pubmed::responses::SearchStageResponse;
use quick_xml::Reader;
use quick_xml::events::{BytesText, Event};
use std::io::BufReader;
use tracing::{debug, instrument, warn};

/// One element of a flattened document: tag name plus its direct text content
#[derive(Debug)]
struct XmlElement {
    name: String,
    text: String,
}

/// Forward-only cursor over a flattened element sequence
///
/// Field lookups advance the cursor past the matched element and never
/// backtrack; a miss leaves the cursor in place.
struct ElementCursor<'a> {
    elements: &'a [XmlElement],
    pos: usize,
}

impl<'a> ElementCursor<'a> {
    fn new(elements: &'a [XmlElement]) -> Self {
        Self { elements, pos: 0 }
    }

    /// Advance past the next element with the given name and return its text
    fn advance_to(&mut self, name: &str) -> Option<String> {
        let found = self.elements[self.pos..]
            .iter()
            .position(|element| element.name == name)?;
        self.pos += found + 1;
        Some(self.elements[self.pos - 1].text.clone())
    }
}

pub struct PubMedXmlParser;

impl PubMedXmlParser {
    /// Parse `Count` and the `IdList` ids from an ESearch XML response
    ///
    /// Only the first `Count` and the first `IdList` are consulted; ESearch
    /// repeats `Count` inside its translation stack. An absent element
    /// leaves the corresponding field empty rather than failing.
    #[instrument(skip(xml), fields(xml_size = xml.len()))]
    pub(crate) fn parse_search_from_xml(xml: &str) -> Result<SearchStageResponse> {
        let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
        reader.config_mut().trim_text(true);

        let mut response = SearchStageResponse::default();
        let mut buf = Vec::new();
        let mut count_seen = false;
        let mut id_list_seen = false;
        let mut in_count = false;
        let mut in_id_list = false;
        let mut in_id = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"Count" if !count_seen && !in_id_list => in_count = true,
                    b"IdList" if !id_list_seen => in_id_list = true,
                    b"Id" if in_id_list => in_id = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                    b"Count" if !in_id_list => count_seen = true,
                    b"IdList" => id_list_seen = true,
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.name().as_ref() {
                    b"Count" => {
                        if in_count {
                            count_seen = true;
                        }
                        in_count = false;
                    }
                    b"IdList" => {
                        if in_id_list {
                            id_list_seen = true;
                        }
                        in_id_list = false;
                    }
                    b"Id" => in_id = false,
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    let text = Self::unescape_text(&e)?;
                    if in_count {
                        response.count = text;
                    } else if in_id {
                        response.ids.push(text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(PubMedError::XmlParseError {
                        message: format!("XML parsing error: {}", e),
                    });
                }
                // DOCTYPE and everything else is skipped; the DTD is never fetched
                _ => {}
            }
            buf.clear();
        }

        debug!(
            count = %response.count,
            ids_found = response.ids.len(),
            "Completed search stage XML parsing"
        );

        Ok(response)
    }

    /// Parse an EFetch XML response into article summaries
    ///
    /// Every `PubDate` element delimits one record span; within a span a
    /// forward-only cursor picks up `Year`, `ArticleTitle`, `AbstractText`,
    /// `LastName` and `Initials` in that order. Lookups never cross the next
    /// `PubDate` marker. A span with no `ArticleTitle` is skipped.
    #[instrument(skip(xml), fields(xml_size = xml.len()))]
    pub fn parse_articles_from_xml(xml: &str) -> Result<Vec<ArticleSummary>> {
        let elements = Self::collect_elements(xml)?;
        let markers: Vec<usize> = elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.name == "PubDate")
            .map(|(index, _)| index)
            .collect();

        let mut articles = Vec::new();
        for (n, &marker) in markers.iter().enumerate() {
            let span_end = markers.get(n + 1).copied().unwrap_or(elements.len());
            let mut cursor = ElementCursor::new(&elements[marker + 1..span_end]);

            let year = cursor.advance_to("Year").unwrap_or_default();
            let Some(title) = cursor.advance_to("ArticleTitle") else {
                warn!(record = n, "Record span has no ArticleTitle, skipping");
                continue;
            };
            let abstract_text = cursor.advance_to("AbstractText").unwrap_or_default();
            let last_name = cursor.advance_to("LastName").unwrap_or_default();
            let initials = cursor.advance_to("Initials").unwrap_or_default();

            articles.push(ArticleSummary {
                author: format_author_name(&last_name, &initials),
                title,
                year,
                abstract_text,
            });
        }

        debug!(
            records_found = markers.len(),
            articles_parsed = articles.len(),
            "Completed fetch stage XML parsing"
        );

        Ok(articles)
    }

    /// Flatten a document into elements in start-tag order, each carrying
    /// its direct text content
    fn collect_elements(xml: &str) -> Result<Vec<XmlElement>> {
        let mut reader = Reader::from_reader(BufReader::new(xml.as_bytes()));
        reader.config_mut().trim_text(true);

        let mut elements: Vec<XmlElement> = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    elements.push(XmlElement {
                        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        text: String::new(),
                    });
                    open.push(elements.len() - 1);
                }
                Ok(Event::Empty(ref e)) => {
                    elements.push(XmlElement {
                        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        text: String::new(),
                    });
                }
                Ok(Event::End(_)) => {
                    open.pop();
                }
                Ok(Event::Text(e)) => {
                    let text = Self::unescape_text(&e)?;
                    if let Some(&index) = open.last() {
                        let element = &mut elements[index];
                        if !element.text.is_empty() {
                            element.text.push(' ');
                        }
                        element.text.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(PubMedError::XmlParseError {
                        message: format!("XML parsing error: {}", e),
                    });
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(elements)
    }

    fn unescape_text(e: &BytesText) -> Result<String> {
        Ok(e.unescape()
            .map_err(|_| PubMedError::XmlParseError {
                message: "Failed to decode XML text".to_string(),
            })?
            .into_owned())
    }
}
