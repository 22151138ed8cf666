//! Saving and loading arrangements.
//!
//! An arrangement file is a JSON object with two arrays:
//!
//! ```json
//! {
//!   "nodes": [[{"x": 100, "y": 100}, 30, 5]],
//!   "connections": [[0, 1]]
//! }
//! ```
//!
//! Each node is a `[center, radius, sides]` triple in scene order and each
//! connection is a `[start, end]` pair of node indices in insertion order.
//! Loading validates the whole document before anything is handed back, so a bad
//! file can never replace the scene being edited.

use crate::error::{ArrangementError, Result};
use crate::geometry::Point;
use crate::types::{Connection, PolygonNode, Scene};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk form of a single node: `[center, radius, sides]`.
#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord(Point, u32, u32);

/// On-disk form of a whole scene.
#[derive(Debug, Serialize, Deserialize)]
struct ArrangementDocument {
    nodes: Vec<NodeRecord>,
    connections: Vec<(usize, usize)>,
}

impl From<&Scene> for ArrangementDocument {
    fn from(scene: &Scene) -> Self {
        Self {
            nodes: scene
                .nodes
                .iter()
                .map(|n| NodeRecord(n.center, n.radius, n.sides))
                .collect(),
            connections: scene
                .connections
                .iter()
                .map(|c| (c.start, c.end))
                .collect(),
        }
    }
}

impl From<ArrangementDocument> for Scene {
    fn from(doc: ArrangementDocument) -> Self {
        Self {
            nodes: doc
                .nodes
                .into_iter()
                .map(|NodeRecord(center, radius, sides)| PolygonNode::new(center, radius, sides))
                .collect(),
            connections: doc
                .connections
                .into_iter()
                .map(|(start, end)| Connection::new(start, end))
                .collect(),
        }
    }
}

/// Serializes the scene to the arrangement JSON format.
pub fn to_json(scene: &Scene) -> Result<String> {
    serde_json::to_string_pretty(&ArrangementDocument::from(scene))
        .map_err(|e| ArrangementError::InvalidFile(e.to_string()))
}

/// Parses and validates an arrangement document.
///
/// Fails with [`ArrangementError::InvalidFile`] if a field is missing or has the
/// wrong type, or if the resulting scene breaks an invariant (a radius of zero or
/// above [`MAX_RADIUS`](crate::constants::MAX_RADIUS), a side count outside the
/// selector's range, a connection index past the last node, a self connection or
/// a repeated pair).
pub fn from_json(json: &str) -> Result<Scene> {
    let doc: ArrangementDocument =
        serde_json::from_str(json).map_err(|e| ArrangementError::InvalidFile(e.to_string()))?;
    let scene = Scene::from(doc);
    scene
        .validate()
        .map_err(|violation| ArrangementError::InvalidFile(violation.to_string()))?;
    Ok(scene)
}

/// Writes the scene to `path`.
///
/// The document goes to a temporary sibling file first and is then renamed over
/// `path`, so an interrupted save never leaves a truncated arrangement behind.
pub fn save_arrangement(scene: &Scene, path: &Path) -> Result<()> {
    let json = to_json(scene)?;
    write_atomically(path, json.as_bytes())?;
    log::info!(
        "Saved arrangement with {} nodes and {} connections to {}",
        scene.nodes.len(),
        scene.connections.len(),
        path.display()
    );
    Ok(())
}

/// Reads and validates the arrangement stored at `path`.
pub fn load_arrangement(path: &Path) -> Result<Scene> {
    let json = fs::read_to_string(path).map_err(|e| ArrangementError::io(path, e))?;
    let scene = from_json(&json)?;
    log::info!(
        "Loaded arrangement with {} nodes and {} connections from {}",
        scene.nodes.len(),
        scene.connections.len(),
        path.display()
    );
    Ok(scene)
}

/// Writes `bytes` next to `path` and renames the result into place.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temporary_sibling(path);
    fs::write(&tmp, bytes).map_err(|e| ArrangementError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(ArrangementError::io(path, e));
    }
    Ok(())
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "arrangement".to_owned());
    path.with_file_name(format!(".{name}.tmp"))
}
