use std::fmt::Write as _;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::foundation::error::{LayerExportError, LayerExportResult};

/// Namespace of Inkscape's `groupmode` / `label` attributes.
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Index of a node inside a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One attribute, value stored unescaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name as written (`inkscape:label`).
    pub qname: String,
    /// Unescaped value.
    pub value: String,
    ns: Option<String>,
}

impl Attribute {
    /// Name without prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.qname)
    }

    /// Resolved namespace URI, `None` for unprefixed attributes.
    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }
}

/// An element node.
#[derive(Clone, Debug)]
pub struct Element {
    /// Qualified tag name as written.
    pub qname: String,
    ns: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn local_name(&self) -> &str {
        local_part(&self.qname)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug)]
enum Node {
    Element(Element),
    // Text and comments are kept in their escaped source form.
    Text(String),
    CData(String),
    Comment(String),
    Pi(String),
    DocType(String),
    Decl(String),
}

/// Owned, mutable XML document.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Everything outside the element
/// structure (declaration, doctype, comments, processing instructions, text) is kept verbatim so
/// an untouched document serializes back to an equivalent file.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    top: Vec<NodeId>,
}

impl Document {
    /// Parse an in-memory document.
    pub fn parse(text: &str) -> LayerExportResult<Self> {
        Self::parse_with_origin(text, "<memory>")
    }

    /// Read and parse a document from disk.
    pub fn from_path(path: &Path) -> LayerExportResult<Self> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LayerExportError::document_load(origin.as_str(), e))?;
        Self::parse_with_origin(&text, &origin)
    }

    fn parse_with_origin(text: &str, origin: &str) -> LayerExportResult<Self> {
        let mut doc = Self {
            nodes: Vec::new(),
            top: Vec::new(),
        };
        let mut reader = Reader::from_str(text);
        let mut open: Vec<NodeId> = Vec::new();
        let mut scopes: Vec<Vec<(String, String)>> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                LayerExportError::document_load(
                    origin,
                    format!("XML parse error at byte {}: {e}", reader.error_position()),
                )
            })?;

            match event {
                Event::Start(e) => {
                    let el = read_element(&e, &mut scopes)
                        .map_err(|msg| LayerExportError::document_load(origin, msg))?;
                    let id = doc.attach(&open, Node::Element(el));
                    open.push(id);
                }
                Event::Empty(e) => {
                    let el = read_element(&e, &mut scopes)
                        .map_err(|msg| LayerExportError::document_load(origin, msg))?;
                    doc.attach(&open, Node::Element(el));
                    scopes.pop();
                }
                Event::End(_) => {
                    open.pop();
                    scopes.pop();
                }
                Event::Text(t) => {
                    doc.attach(&open, Node::Text(String::from_utf8_lossy(&t).into_owned()));
                }
                Event::CData(t) => {
                    doc.attach(&open, Node::CData(String::from_utf8_lossy(&t).into_owned()));
                }
                Event::Comment(t) => {
                    doc.attach(&open, Node::Comment(String::from_utf8_lossy(&t).into_owned()));
                }
                Event::PI(t) => {
                    doc.attach(&open, Node::Pi(String::from_utf8_lossy(&t).into_owned()));
                }
                Event::DocType(t) => {
                    doc.attach(&open, Node::DocType(String::from_utf8_lossy(&t).into_owned()));
                }
                Event::Decl(d) => {
                    doc.attach(&open, Node::Decl(String::from_utf8_lossy(&d).into_owned()));
                }
                Event::Eof => break,
            }
        }

        if let Some(&unclosed) = open.last() {
            let name = doc
                .element(unclosed)
                .map(|e| e.qname.clone())
                .unwrap_or_default();
            return Err(LayerExportError::document_load(
                origin,
                format!("unexpected end of input inside <{name}>"),
            ));
        }
        if doc.root_element().is_none() {
            return Err(LayerExportError::document_load(origin, "no root element"));
        }

        Ok(doc)
    }

    fn attach(&mut self, open: &[NodeId], node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        match open.last() {
            Some(parent) => {
                if let Node::Element(el) = &mut self.nodes[parent.0] {
                    el.children.push(id);
                }
            }
            None => self.top.push(id),
        }
        id
    }

    /// The document element.
    pub fn root_element(&self) -> Option<NodeId> {
        self.top
            .iter()
            .copied()
            .find(|id| matches!(self.nodes[id.0], Node::Element(_)))
    }

    /// All element ids in document (pre-)order.
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.top.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Node::Element(el) = &self.nodes[id.0] {
                out.push(id);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0) {
            Some(Node::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// Attribute by qualified name as written.
    pub fn attribute(&self, id: NodeId, qname: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|a| a.qname == qname)
            .map(|a| a.value.as_str())
    }

    /// Attribute by namespace URI and local name, independent of the prefix in use.
    pub fn attribute_ns(&self, id: NodeId, ns: &str, local: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|a| a.ns.as_deref() == Some(ns) && a.local_name() == local)
            .map(|a| a.value.as_str())
    }

    /// Replace an attribute value in place, or append the attribute.
    pub fn set_attribute(&mut self, id: NodeId, qname: &str, value: &str) -> LayerExportResult<()> {
        let Some(Node::Element(el)) = self.nodes.get_mut(id.0) else {
            return Err(LayerExportError::validation(format!(
                "node {id:?} is not an element"
            )));
        };
        match el.attributes.iter_mut().find(|a| a.qname == qname) {
            Some(attr) => attr.value = value.to_string(),
            None => el.attributes.push(Attribute {
                qname: qname.to_string(),
                value: value.to_string(),
                ns: None,
            }),
        }
        Ok(())
    }

    /// Serialize the whole document.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        for &id in &self.top {
            self.write_node(id, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0] {
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.qname);
                for a in &el.attributes {
                    let _ = write!(out, " {}=\"{}\"", a.qname, quick_xml::escape::escape(a.value.as_str()));
                }
                if el.children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &child in &el.children {
                    self.write_node(child, out);
                }
                let _ = write!(out, "</{}>", el.qname);
            }
            Node::Text(raw) => out.push_str(raw),
            Node::CData(raw) => {
                let _ = write!(out, "<![CDATA[{raw}]]>");
            }
            Node::Comment(raw) => {
                let _ = write!(out, "<!--{raw}-->");
            }
            Node::Pi(raw) | Node::Decl(raw) => {
                let _ = write!(out, "<?{raw}?>");
            }
            Node::DocType(raw) => {
                let _ = write!(out, "<!DOCTYPE {}>", raw.trim_start());
            }
        }
    }
}

fn read_element(
    start: &BytesStart<'_>,
    scopes: &mut Vec<Vec<(String, String)>>,
) -> Result<Element, String> {
    let qname = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut raw = Vec::new();
    let mut declared = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| format!("attribute error in <{qname}>: {e}"))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| format!("bad value for attribute '{key}' in <{qname}>: {e}"))?
            .into_owned();
        if key == "xmlns" {
            declared.push((String::new(), value.clone()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declared.push((prefix.to_string(), value.clone()));
        }
        raw.push((key, value));
    }
    scopes.push(declared);

    let ns = resolve_prefix(scopes, prefix_part(&qname).unwrap_or(""));
    let attributes = raw
        .into_iter()
        .map(|(qname, value)| {
            let ns = match prefix_part(&qname) {
                Some("xmlns") | None => None,
                Some(prefix) => resolve_prefix(scopes, prefix),
            };
            Attribute { qname, value, ns }
        })
        .collect();

    Ok(Element {
        qname,
        ns,
        attributes,
        children: Vec::new(),
    })
}

fn resolve_prefix(scopes: &[Vec<(String, String)>], prefix: &str) -> Option<String> {
    if prefix == "xml" {
        return Some(XML_NS.to_string());
    }
    scopes
        .iter()
        .rev()
        .flat_map(|scope| scope.iter())
        .find(|(p, _)| p == prefix)
        .map(|(_, uri)| uri.clone())
        .filter(|uri| !uri.is_empty())
}

fn prefix_part(qname: &str) -> Option<&str> {
    qname.split_once(':').map(|(p, _)| p)
}

fn local_part(qname: &str) -> &str {
    qname.split_once(':').map_or(qname, |(_, l)| l)
}

#[cfg(test)]
#[path = "../../tests/unit/document/tree.rs"]
mod tests;
