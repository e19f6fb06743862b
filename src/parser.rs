//! In-memory tree for the dictionary dump.
//!
//! The dump is parsed completely before extraction starts. Namespace prefixes are
//! dropped, so `<lod:ITEM>` is addressed as `ITEM`.

use crate::config::READ_BUFFER_SIZE;
use crate::error::{ExtractError, Result as ExtractResult};
use anyhow::{bail, Context, Result};
use bzip2::read::BzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Concatenated non-blank text directly inside this element.
    pub text: String,
}

impl Node {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children.first()
    }

    pub fn require_child(&self, tag: &str) -> ExtractResult<&Node> {
        self.child(tag).ok_or_else(|| ExtractError::MissingChild {
            parent: self.tag.clone(),
            child: tag.to_string(),
        })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn require_attr(&self, name: &str) -> ExtractResult<&str> {
        self.attr(name).ok_or_else(|| ExtractError::MissingAttribute {
            element: self.tag.clone(),
            attribute: name.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn local_name(bytes: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(bytes)
        .context("Element or attribute name is not valid UTF-8")?
        .to_string())
}

fn element(start: &BytesStart) -> Result<Node> {
    let mut node = Node::new(&local_name(start.local_name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.context("Malformed attribute")?;
        let key = local_name(attr.key.local_name().as_ref())?;
        let value = attr.unescape_value().context("Malformed attribute value")?;
        node.attributes.push((key, value.into_owned()));
    }
    Ok(node)
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        bail!("Document has more than one root element");
    }
    Ok(())
}

fn push_text(stack: &mut [Node], text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(current) = stack.last_mut() {
        current.text.push_str(text);
    }
}

/// Parses a whole XML document into a tree and returns its root element.
pub fn parse_document<R: BufRead>(input: R) -> Result<Node> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => stack.push(element(&e)?),
            Ok(Event::Empty(e)) => {
                let node = element(&e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().context("Unbalanced closing tag")?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().context("Malformed text content")?;
                push_text(&mut stack, &text);
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&raw));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!("XML error at byte {}: {}", reader.buffer_position(), e),
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        bail!("Document ended inside <{}>", open.tag);
    }
    root.context("Document has no root element")
}

pub fn parse_str(xml: &str) -> Result<Node> {
    parse_document(xml.as_bytes())
}

/// Opens a dump, transparently decompressing `.bz2` files.
pub fn open_dump(path: &str) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("Failed to open dump at: {}", path))?;
    let compressed = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bz2"));
    if compressed {
        Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            BzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

pub fn load_document(path: &str) -> Result<Node> {
    info!("Parsing dump: {}", path);
    let reader = open_dump(path)?;
    let root = parse_document(reader).with_context(|| format!("Failed to parse dump: {}", path))?;
    info!(items = root.children.len(), "Dump parsed");
    Ok(root)
}
