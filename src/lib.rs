//! # Flowshape
//!
//! `Flowshape` reads a process-definition XML document and derives flat,
//! drawable views from it: workstep shapes per category, connector shapes,
//! annotation notes, link geometry with placed labels, and phase/lane bands.
//!
//! - One load pass normalizes every recognized element into a name-keyed
//!   index with a synthesized shape id.
//! - All views are pure read-only queries over that index; call them in any
//!   order, as often as needed.
//! - Icon paths and display labels resolve through an injectable
//!   [`Resources`] collaborator; fallback id generation through an
//!   injectable [`IdSource`], so tests can be made deterministic.
//! - Rendering is out of scope: output records are plain in-memory data for
//!   a diagramming canvas to consume.
//!
//! ## Example
//!
//! ### Cargo.toml
//! ```toml
//! [dependencies]
//! flowshape = "0.1"
//! log = "0.4"
//! pretty_env_logger = "0.5"
//! ```
//! ### main.rs
//!
//! ```
//! use flowshape::Translator;
//!
//! extern crate pretty_env_logger;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pretty_env_logger::init();
//!
//!     let translator = Translator::new("order-fulfillment.xml")?;
//!
//!     for shape in translator.atomic_shapes() {
//!         println!("{} at {:?}", shape.data.id, shape.data.position);
//!     }
//!     for connection in translator.connections() {
//!         println!("{:?} -> {:?}", connection.source, connection.target);
//!     }
//!     for pool in translator.pools() {
//!         println!("pool {} with {} lanes", pool.name, pool.lanes.len());
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod error;
mod model;
mod resources;
mod translator;

pub use api::{
    Connection, ConnectorShape, Lane, LinkLabel, LinkType, NoteAttachment, NoteKind, NoteShape,
    Phase, Pool, ShapeData, WorkstepShape,
};
pub use error::{Error, Result};
pub use model::{Bounds, ConnectorType, Point, Size, Value};
pub use resources::{DefaultResources, IdSource, Resources, UuidIds};
pub use translator::{Category, LANE_WIDTH, Loader, PHASE_HEIGHT, ShapeRef, Translator};
