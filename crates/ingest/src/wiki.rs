//! Streaming reader for the encyclopedia abstract dump.
//!
//! The corpus is a single XML feed:
//!
//! ```text
//! <feed>
//!   <doc>
//!     <title>Wikipedia: Heat (1995 film)</title>
//!     <url>https://en.wikipedia.org/wiki/Heat_(1995_film)</url>
//!     <abstract>Heat is a 1995 American crime film ...</abstract>
//!     <links>
//!       <sublink linktype="nav"><anchor>Plot</anchor><link>...</link></sublink>
//!     </links>
//!   </doc>
//! </feed>
//! ```
//!
//! [`WikiReader`] pulls events from the underlying reader only as documents
//! are requested, so memory stays bounded by one document regardless of the
//! corpus size. It is a one-pass iterator and cannot be restarted.
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::types::Document;

/// Elements the reader cares about; everything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Doc,
    Title,
    Url,
    Abstract,
    Anchor,
    Other,
}

impl Tag {
    fn from_name(name: &[u8]) -> Self {
        match name {
            b"doc" => Tag::Doc,
            b"title" => Tag::Title,
            b"url" => Tag::Url,
            b"abstract" => Tag::Abstract,
            b"anchor" => Tag::Anchor,
            _ => Tag::Other,
        }
    }

    fn is_field(self) -> bool {
        !matches!(self, Tag::Doc | Tag::Other)
    }
}

/// One reader event reduced to owned data, so the event buffer can be
/// reused before the event is acted upon.
enum Step {
    Open(Tag),
    Close(Tag),
    Text(String),
    Eof,
    Skip,
    Fail(String),
}

/// Counters reported once the stream has been consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Every `<doc>` parsed, movie or not.
    pub documents_seen: usize,
    /// Documents that passed the movie classifier (only counted by
    /// [`Movies`]).
    pub movies_emitted: usize,
}

/// Iterator over every `<doc>` in the corpus, in order.
///
/// Text is stored exactly as found apart from stripping the configured title
/// prefix; call [`Document::normalized`] before comparing.
pub struct WikiReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    title_prefix: String,
    current: Option<Document>,
    field: Option<Tag>,
    text: String,
    stats: ReaderStats,
    finished: bool,
}

impl<R: BufRead> WikiReader<R> {
    pub fn new(source: R, title_prefix: impl Into<String>) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            title_prefix: title_prefix.into(),
            current: None,
            field: None,
            text: String::new(),
            stats: ReaderStats::default(),
            finished: false,
        }
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// Adapt the reader to yield only normalized, movie-like documents.
    pub fn movies(self) -> Movies<R> {
        Movies { inner: self }
    }

    fn next_step(&mut self) -> Step {
        self.buf.clear();
        match self.reader.read_event_into(&mut self.buf) {
            Ok(Event::Start(start)) => Step::Open(Tag::from_name(start.local_name().as_ref())),
            Ok(Event::End(end)) => Step::Close(Tag::from_name(end.local_name().as_ref())),
            Ok(Event::Text(text)) => match text.unescape() {
                Ok(text) => Step::Text(text.into_owned()),
                Err(err) => Step::Fail(err.to_string()),
            },
            Ok(Event::CData(data)) => Step::Text(String::from_utf8_lossy(&data).into_owned()),
            Ok(Event::Eof) => Step::Eof,
            Ok(_) => Step::Skip,
            Err(err) => Step::Fail(err.to_string()),
        }
    }

    fn open(&mut self, tag: Tag) {
        match tag {
            Tag::Doc => {
                if self.current.is_some() {
                    warn!(documents_seen = self.stats.documents_seen, "wiki_doc_not_closed");
                }
                self.current = Some(Document::default());
                self.field = None;
            }
            tag if tag.is_field() && self.current.is_some() => {
                self.field = Some(tag);
                self.text.clear();
            }
            _ => {}
        }
    }

    /// Store a finished field; returns the document when `</doc>` closes it.
    fn close(&mut self, tag: Tag) -> Option<Document> {
        if tag == Tag::Doc {
            self.field = None;
            let doc = self.current.take()?;
            self.stats.documents_seen += 1;
            return Some(doc);
        }

        if self.field != Some(tag) {
            return None;
        }
        self.field = None;
        let text = std::mem::take(&mut self.text);
        let doc = self.current.as_mut()?;

        match tag {
            Tag::Title => {
                doc.title = match text.strip_prefix(self.title_prefix.as_str()) {
                    Some(stripped) => stripped.to_string(),
                    None => text,
                };
            }
            Tag::Url => doc.url = text,
            Tag::Abstract => doc.abstract_text = text,
            Tag::Anchor => doc.anchors.push(text),
            Tag::Doc | Tag::Other => {}
        }
        None
    }
}

impl<R: BufRead> Iterator for WikiReader<R> {
    type Item = Result<Document, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.next_step() {
                Step::Open(tag) => self.open(tag),
                Step::Close(tag) => {
                    if let Some(doc) = self.close(tag) {
                        return Some(Ok(doc));
                    }
                }
                Step::Text(text) => {
                    if self.field.is_some() {
                        self.text.push_str(&text);
                    }
                }
                Step::Skip => {}
                Step::Eof => {
                    self.finished = true;
                    // A trailing document without its closing tag still counts.
                    let doc = self.current.take()?;
                    self.stats.documents_seen += 1;
                    debug!("wiki_trailing_doc_emitted");
                    return Some(Ok(doc));
                }
                Step::Fail(message) => {
                    self.finished = true;
                    return Some(Err(IngestError::Xml(message)));
                }
            }
        }
    }
}

/// Movie-only view over a [`WikiReader`]; see [`WikiReader::movies`].
pub struct Movies<R: BufRead> {
    inner: WikiReader<R>,
}

impl<R: BufRead> Movies<R> {
    pub fn stats(&self) -> ReaderStats {
        self.inner.stats
    }
}

impl<R: BufRead> Iterator for Movies<R> {
    type Item = Result<Document, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let doc = match self.inner.next()? {
                Ok(doc) => doc.normalized(),
                Err(err) => return Some(Err(err)),
            };
            if doc.is_movie() {
                self.inner.stats.movies_emitted += 1;
                return Some(Ok(doc));
            }
        }
    }
}
