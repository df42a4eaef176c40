mod layout;
mod links;
mod shapes;

use crate::{
    error::{Error, MISSING_POOLS, MISSING_PROCESS, Result},
    model::{Value, reader::read_document},
    resources::{DefaultResources, IdSource, Resources, UuidIds},
};
use log::debug;
use std::{collections::HashMap, path::Path, str::FromStr};

pub use layout::{LANE_WIDTH, PHASE_HEIGHT};

/// The ten shape categories, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Atomic,
    InlineBlock,
    Nested,
    Connector,
    External,
    MessagePublisher,
    MessageSubscriber,
    StartBlock,
    EndBlock,
    Note,
}

impl Category {
    pub(crate) const ALL: [Category; 10] = [
        Category::Atomic,
        Category::InlineBlock,
        Category::Nested,
        Category::Connector,
        Category::External,
        Category::MessagePublisher,
        Category::MessageSubscriber,
        Category::StartBlock,
        Category::EndBlock,
        Category::Note,
    ];

    fn tag(self) -> &'static str {
        match self {
            Category::Atomic => "Workstep",
            Category::InlineBlock => "InlineBlock",
            Category::Nested => "NestedWorkstep",
            Category::Connector => "Connector",
            Category::External => "ExternalWorkstep",
            Category::MessagePublisher => "MessagePublisher",
            Category::MessageSubscriber => "MessageSubscriber",
            Category::StartBlock => "Start",
            Category::EndBlock => "End",
            Category::Note => "Notes",
        }
    }

    // Where this category's elements live under the Process element. Notes
    // are nested one level deeper than the other nine.
    fn elements(self, process: &Value) -> Vec<&Value> {
        let found = match self {
            Category::Note => process.get(self.tag()).and_then(|notes| notes.get("Note")),
            other => process.get(other.tag()),
        };
        found.map(Value::as_sequence).unwrap_or_default()
    }
}

/// A normalized element held by the index.
#[derive(Debug, Clone)]
pub(crate) struct NormalizedShape {
    pub(crate) shape_id: String,
    pub(crate) name: String,
    pub(crate) category: Category,
    pub(crate) data: Value,
}

#[derive(Debug, Clone)]
pub(crate) struct NormalizedLane {
    pub(crate) shape_id: String,
    pub(crate) name: String,
    pub(crate) data: Value,
}

#[derive(Debug, Clone)]
pub(crate) struct NormalizedPool {
    pub(crate) shape_id: String,
    pub(crate) name: String,
    pub(crate) lanes: Vec<NormalizedLane>,
}

/// Name-keyed index of every normalized element, in document traversal
/// order. Built once per load, read-only afterwards.
#[derive(Debug, Default)]
pub(crate) struct ShapeIndex {
    entries: Vec<NormalizedShape>,
    by_name: HashMap<String, usize>,
    pools: Vec<NormalizedPool>,
}

impl ShapeIndex {
    // Every element stays visible to its extractor. Only the name map
    // dedupes, last write winning, with nothing reported.
    fn insert(&mut self, shape: NormalizedShape) {
        self.by_name.insert(shape.name.clone(), self.entries.len());
        self.entries.push(shape);
    }

    pub(crate) fn category(&self, category: Category) -> impl Iterator<Item = &NormalizedShape> {
        self.entries
            .iter()
            .filter(move |shape| shape.category == category)
    }

    // Linear search across the categories in declared order, first
    // display-name match.
    pub(crate) fn find(&self, name: &str) -> Option<&NormalizedShape> {
        if !self.by_name.contains_key(name) {
            return None;
        }
        Category::ALL.iter().find_map(|category| {
            self.entries
                .iter()
                .find(|shape| shape.category == *category && shape.name == name)
        })
    }

    pub(crate) fn pools(&self) -> &[NormalizedPool] {
        &self.pools
    }
}

fn prefixed_id(prefix: &str, element: &Value, ids: &dyn IdSource) -> String {
    match element.attr("id") {
        Some(id) => format!("{prefix}_{id}"),
        None => format!("{prefix}_{}", ids.next_id()),
    }
}

// One pass over the document: collect every category's elements into the
// index and synthesize their shape ids, then normalize pools and lanes.
fn prepare_data(process: &Value, ids: &dyn IdSource) -> Result<ShapeIndex> {
    let mut index = ShapeIndex::default();
    for category in Category::ALL {
        for element in category.elements(process) {
            let name = element.attr("name").unwrap_or_default().to_string();
            let shape_id = prefixed_id("shape", element, ids);
            debug!("normalized {category:?} {name:?} as {shape_id}");
            index.insert(NormalizedShape {
                shape_id,
                name,
                category,
                data: element.clone(),
            });
        }
    }

    // Pools sit apart from the shape categories. Lane ids keep the raw id
    // verbatim with no fallback: a lane without one becomes lane_undefined.
    if let Some(package) = process.get("Package") {
        let pools = package
            .require("Pools")
            .map_err(|_| Error::MissingField(MISSING_POOLS.into()))?;
        for pool in pools
            .get("Pool")
            .map(Value::as_sequence)
            .unwrap_or_default()
        {
            let lanes = pool
                .get("Lanes")
                .and_then(|lanes| lanes.get("Lane"))
                .map(Value::as_sequence)
                .unwrap_or_default()
                .into_iter()
                .map(|lane| NormalizedLane {
                    shape_id: format!("lane_{}", lane.attr("id").unwrap_or("undefined")),
                    name: lane.attr("name").unwrap_or_default().to_string(),
                    data: lane.clone(),
                })
                .collect();
            index.pools.push(NormalizedPool {
                shape_id: prefixed_id("pool", pool, ids),
                name: pool.attr("name").unwrap_or_default().to_string(),
                lanes,
            });
        }
    }
    Ok(index)
}

/// Resolved reference to a normalized shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: Category,
}

/// Translates one process-definition document into drawable views.
///
/// Construction parses and normalizes the whole document or fails; a built
/// translator only answers read-only queries. Load a new document by
/// constructing a new translator.
pub struct Translator {
    pub(crate) resources: Box<dyn Resources>,
    pub(crate) process: Value,
    pub(crate) index: ShapeIndex,
}

impl Translator {
    /// Read and normalize a document from a file path, with the default
    /// resources and id generation.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Loader::new().load_file(path)
    }

    /// First normalized shape with the given display name, searching the
    /// categories in declared order. `None` when nothing matches.
    pub fn shape_by_name(&self, name: &str) -> Option<ShapeRef<'_>> {
        self.index.find(name).map(|shape| ShapeRef {
            id: &shape.shape_id,
            name: &shape.name,
            category: shape.category,
        })
    }
}

impl FromStr for Translator {
    type Err = Error;

    /// Load a document from an XML string.
    fn from_str(s: &str) -> Result<Self> {
        Loader::new().load_str(s)
    }
}

/// Entry point with injection seams for the icon/label collaborator and the
/// fallback id generator.
pub struct Loader {
    resources: Box<dyn Resources>,
    ids: Box<dyn IdSource>,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            resources: Box::new(DefaultResources),
            ids: Box::new(UuidIds),
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the icon/label collaborator.
    pub fn resources(mut self, resources: impl Resources + 'static) -> Self {
        self.resources = Box::new(resources);
        self
    }

    /// Replace the fallback id generator.
    pub fn ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn load_file(self, path: impl AsRef<Path>) -> Result<Translator> {
        let document = read_document(quick_xml::Reader::from_file(path)?)?;
        self.load(document)
    }

    pub fn load_str(self, xml: &str) -> Result<Translator> {
        let document = read_document(quick_xml::Reader::from_str(xml))?;
        self.load(document)
    }

    fn load(self, document: Value) -> Result<Translator> {
        let process = match document {
            Value::Node(mut map) => map
                .remove(MISSING_PROCESS)
                .ok_or_else(|| Error::MissingField(MISSING_PROCESS.into()))?,
            _ => return Err(Error::MissingField(MISSING_PROCESS.into())),
        };
        let index = prepare_data(&process, self.ids.as_ref())?;
        Ok(Translator {
            resources: self.resources,
            process,
            index,
        })
    }
}
