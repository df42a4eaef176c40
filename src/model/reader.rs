use crate::{
    error::Result,
    model::{TEXT_KEY, Value},
};
use quick_xml::{Reader, events::Event};
use std::{collections::HashMap, io::BufRead};

// One partially built element. Attributes are merged into the map up front;
// children and text arrive as events are consumed.
#[derive(Default)]
struct Frame {
    tag: String,
    map: HashMap<String, Value>,
    text: String,
}

impl Frame {
    fn open(event: &quick_xml::events::BytesStart) -> Result<Self> {
        let mut map = HashMap::new();
        for attr in event.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            map.insert(key, Value::Text(attr.unescape_value()?.into_owned()));
        }
        Ok(Self {
            tag: String::from_utf8_lossy(event.local_name().as_ref()).into_owned(),
            map,
            text: String::new(),
        })
    }

    // Text-only elements collapse to plain text, everything else keeps its
    // text content under #text.
    fn into_value(mut self) -> Value {
        if self.map.is_empty() {
            Value::Text(self.text)
        } else {
            if !self.text.is_empty() {
                self.map.insert(TEXT_KEY.into(), Value::Text(self.text));
            }
            Value::Node(self.map)
        }
    }
}

// A repeated tag promotes the existing entry to a list.
fn attach(parent: &mut Frame, tag: String, value: Value) {
    match parent.map.get_mut(&tag) {
        Some(Value::List(items)) => items.push(value),
        Some(existing) => {
            let first = std::mem::replace(existing, Value::List(Vec::new()));
            *existing = Value::List(vec![first, value]);
        }
        None => {
            parent.map.insert(tag, value);
        }
    }
}

/// Read a whole document into the untyped value tree. The returned node maps
/// the root tag to its element, so `.require("Process")` works uniformly.
pub(crate) fn read_document<R: BufRead>(mut reader: Reader<R>) -> Result<Value> {
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack = vec![Frame::default()];
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(event) => stack.push(Frame::open(&event)?),
            Event::Empty(event) => {
                let frame = Frame::open(&event)?;
                let (tag, value) = (frame.tag.clone(), frame.into_value());
                if let Some(parent) = stack.last_mut() {
                    attach(parent, tag, value);
                }
            }
            Event::Text(event) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push_str(&event.xml_content().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(event) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push_str(&String::from_utf8_lossy(&event.into_inner()));
                }
            }
            Event::End(_) if stack.len() > 1 => {
                // Unbalanced tags are caught by the reader before we get here.
                if let Some(frame) = stack.pop() {
                    let (tag, value) = (frame.tag.clone(), frame.into_value());
                    if let Some(parent) = stack.last_mut() {
                        attach(parent, tag, value);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let root = stack.swap_remove(0);
    Ok(Value::Node(root.map))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(xml: &str) -> Value {
        read_document(Reader::from_str(xml)).expect("valid document")
    }

    #[test]
    fn attributes_merge_into_the_element() {
        let doc = read(r#"<Process name="Order"><Workstep id="1" name="A"/></Process>"#);
        let process = doc.get("Process").unwrap();
        assert_eq!(process.attr("name"), Some("Order"));
        let ws = process.get("Workstep").unwrap();
        assert_eq!(ws.attr("id"), Some("1"));
    }

    #[test]
    fn repeated_tags_become_a_list() {
        let doc = read(r#"<Process><Workstep name="A"/><Workstep name="B"/></Process>"#);
        let worksteps = doc.get("Process").unwrap().get("Workstep").unwrap();
        assert!(matches!(worksteps, Value::List(items) if items.len() == 2));
    }

    #[test]
    fn single_tag_stays_single() {
        let doc = read(r#"<Process><Workstep name="A"/></Process>"#);
        let workstep = doc.get("Process").unwrap().get("Workstep").unwrap();
        assert!(matches!(workstep, Value::Node(_)));
    }

    #[test]
    fn text_only_element_collapses_to_text() {
        let doc = read("<Link><Source>Review</Source></Link>");
        let source = doc.get("Link").unwrap().get("Source").unwrap();
        assert_eq!(source, &Value::Text("Review".into()));
    }

    #[test]
    fn text_beside_attributes_lands_under_text_key() {
        let doc = read(r#"<C><ConnectorType exclusive="true">DECISIONSPLIT</ConnectorType></C>"#);
        let ct = doc.get("C").unwrap().get("ConnectorType").unwrap();
        assert_eq!(ct.text(), Some("DECISIONSPLIT"));
        assert!(ct.flag("exclusive"));
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(read_document(Reader::from_str("<Process><Workstep></Process>")).is_err());
    }
}
