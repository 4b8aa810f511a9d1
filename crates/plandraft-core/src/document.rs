//! Floor-plan document: the ordered shape collection and its commit rules.
//!
//! The document is the only owner of committed shapes. Tools commit through
//! it, the drag controller translates through it, the renderer reads it;
//! nothing else mutates the collection.

use crate::shapes::{Line, Polygon, Rectangle, SerializableColor, Shape, ShapeId, ShapeTrait};
use kurbo::{Affine, Point, Vec2};
use std::collections::HashSet;
use thiserror::Error;

/// Error raised when loading a document snapshot.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The snapshot is not a valid JSON shape array.
    #[error("failed to parse document snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two shapes in the snapshot share an id.
    #[error("duplicate shape id in snapshot: {0}")]
    DuplicateId(ShapeId),
}

/// Ordered collection of committed shapes.
///
/// Insertion order is paint order. Ids are minted at commit time and
/// validated when a snapshot is loaded, so they stay unique.
#[derive(Debug, Clone, Default)]
pub struct PlanDocument {
    shapes: Vec<Shape>,
}

impl PlanDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a wall segment. Zero-length walls are rejected.
    pub fn commit_line(&mut self, start: Point, end: Point) -> Option<ShapeId> {
        if start == end {
            return None;
        }
        let line = Line::new(start, end);
        let id = line.id();
        self.shapes.push(Shape::Line(line));
        log::debug!("committed wall {}", id);
        Some(id)
    }

    /// Commit a filled rectangle from two opposite corners.
    pub fn commit_rectangle(
        &mut self,
        start: Point,
        end: Point,
        fill_color: SerializableColor,
    ) -> ShapeId {
        let rect = Rectangle::new(start, end, fill_color);
        let id = rect.id();
        self.shapes.push(Shape::Rectangle(rect));
        log::debug!("committed rectangle {}", id);
        id
    }

    /// Commit a filled polygon. Rings with fewer than three vertices are
    /// rejected.
    pub fn commit_polygon(
        &mut self,
        points: Vec<Point>,
        fill_color: SerializableColor,
    ) -> Option<ShapeId> {
        if points.len() < 3 {
            return None;
        }
        let poly = Polygon::new(points, fill_color);
        let id = poly.id();
        self.shapes.push(Shape::Polygon(poly));
        log::debug!("committed polygon {}", id);
        Some(id)
    }

    /// Commit a run of walls between consecutive points.
    ///
    /// Runs shorter than two points commit nothing. The run is not closed
    /// back to the first point; callers wanting a closed loop append the
    /// first point again before committing. Zero-length pairs are skipped.
    pub fn commit_wall_polygon(&mut self, points: &[Point]) -> Vec<ShapeId> {
        if points.len() < 2 {
            return Vec::new();
        }
        points
            .windows(2)
            .filter_map(|pair| self.commit_line(pair[0], pair[1]))
            .collect()
    }

    /// Delete a shape by id. Returns whether a shape was removed.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        let before = self.shapes.len();
        self.shapes.retain(|shape| shape.id() != id);
        let removed = self.shapes.len() != before;
        if removed {
            log::debug!("deleted shape {}", id);
        }
        removed
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        log::debug!("cleared {} shapes", self.shapes.len());
        self.shapes.clear();
    }

    /// All shapes in paint order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Look up a shape by id.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the document holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Translate a shape by `delta`. Returns whether the shape exists.
    ///
    /// The drag controller's only mutation path; pure translation keeps
    /// every shape congruent to itself.
    pub fn translate_shape(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.shapes.iter_mut().find(|shape| shape.id() == id) else {
            return false;
        };
        shape.transform(Affine::translate(delta));
        true
    }

    /// Serialize the shape collection as a JSON array snapshot.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.shapes)
    }

    /// Load a document from a JSON array snapshot.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let shapes: Vec<Shape> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        for shape in &shapes {
            if !seen.insert(shape.id()) {
                return Err(DocumentError::DuplicateId(shape.id()));
            }
        }
        log::debug!("loaded document with {} shapes", shapes.len());
        Ok(Self { shapes })
    }
}
