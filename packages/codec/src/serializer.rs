use crate::geometry::{Coordinate, PolygonSet, Ring};
use std::fmt::Write;

/// Serializer converts rings back to canonical `POLYGON(...)` text
///
/// Output is byte-stable for a given input: rings are joined with `", "`,
/// vertices with `","`, and each vertex is written longitude first. Numbers
/// use the shortest representation that parses back to the same `f64`, which
/// never includes an exponent.
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Serialize a whole polygon set
    pub fn serialize(&mut self, set: &PolygonSet) -> String {
        self.serialize_rings(set)
    }

    /// Serialize any ordered sequence of rings
    pub fn serialize_rings<'a>(&mut self, rings: impl IntoIterator<Item = &'a Ring>) -> String {
        self.output.clear();
        self.output.push_str("POLYGON(");

        for (i, ring) in rings.into_iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.serialize_ring(ring);
        }

        self.output.push(')');
        std::mem::take(&mut self.output)
    }

    fn serialize_ring(&mut self, ring: &Ring) {
        self.output.push('(');
        for (i, coordinate) in ring.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.serialize_coordinate(coordinate);
        }
        self.output.push(')');
    }

    fn serialize_coordinate(&mut self, coordinate: &Coordinate) {
        // Writing into a String cannot fail
        let _ = write!(self.output, "{} {}", coordinate.lng(), coordinate.lat());
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to serialize a polygon set
pub fn serialize(set: &PolygonSet) -> String {
    Serializer::new().serialize(set)
}

/// Convenience function to serialize borrowed rings
pub fn serialize_rings<'a>(rings: impl IntoIterator<Item = &'a Ring>) -> String {
    Serializer::new().serialize_rings(rings)
}
