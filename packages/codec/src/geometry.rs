//! # Geometry Model
//!
//! In-memory shapes the codec reads and writes.
//!
//! ```text
//! PolygonSet ── ordered ──▶ Ring ── ordered ──▶ Coordinate (lng, lat)
//! ```
//!
//! Order is significant at both levels: it decides text emission order and
//! is what round-trip equality compares.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};

/// A longitude/latitude pair. Both components are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lng: f64,
    lat: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lng: f64,
    lat: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeometryError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lng, raw.lat)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting NaN and infinities
    pub fn new(lng: f64, lat: f64) -> Result<Self, GeometryError> {
        if lng.is_finite() && lat.is_finite() {
            Ok(Self { lng, lat })
        } else {
            Err(GeometryError::NonFinite { lng, lat })
        }
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Shift by a delta, failing if the result overflows to infinity
    pub fn offset(&self, d_lng: f64, d_lat: f64) -> Result<Self, GeometryError> {
        Self::new(self.lng + d_lng, self.lat + d_lat)
    }
}

/// Axis-aligned lat/lng box around a ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn center(&self) -> Coordinate {
        Coordinate {
            lng: self.west / 2.0 + self.east / 2.0,
            lat: self.south / 2.0 + self.north / 2.0,
        }
    }

    fn extend(&mut self, c: &Coordinate) {
        self.south = self.south.min(c.lat);
        self.north = self.north.max(c.lat);
        self.west = self.west.min(c.lng);
        self.east = self.east.max(c.lng);
    }
}

/// One polygon boundary.
///
/// Closure is not enforced; a ring may repeat its first vertex at the end or
/// not, and may have fewer than three vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring {
    path: Vec<Coordinate>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: Vec<Coordinate>) -> Self {
        Self { path }
    }

    /// Build a ring from raw `(lng, lat)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, GeometryError> {
        let path = pairs
            .iter()
            .map(|&(lng, lat)| Coordinate::new(lng, lat))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coordinate> {
        self.path.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.path.get(index)
    }

    /// Replace the vertex at `index`, returning the previous value
    pub fn set_at(&mut self, index: usize, coordinate: Coordinate) -> Result<Coordinate, GeometryError> {
        let len = self.path.len();
        let slot = self
            .path
            .get_mut(index)
            .ok_or(GeometryError::VertexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, coordinate))
    }

    /// Insert a vertex before `index`; `index == len` appends
    pub fn insert_at(&mut self, index: usize, coordinate: Coordinate) -> Result<(), GeometryError> {
        if index > self.path.len() {
            return Err(GeometryError::VertexOutOfRange {
                index,
                len: self.path.len(),
            });
        }
        self.path.insert(index, coordinate);
        Ok(())
    }

    /// Remove and return the vertex at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<Coordinate, GeometryError> {
        if index >= self.path.len() {
            return Err(GeometryError::VertexOutOfRange {
                index,
                len: self.path.len(),
            });
        }
        Ok(self.path.remove(index))
    }

    pub fn push(&mut self, coordinate: Coordinate) {
        self.path.push(coordinate);
    }

    /// Swap in a whole new path, keeping this ring's identity
    pub fn set_path(&mut self, path: Vec<Coordinate>) {
        self.path = path;
    }

    /// Move every vertex by the same delta. On failure the ring is untouched.
    pub fn translate(&mut self, d_lng: f64, d_lat: f64) -> Result<(), GeometryError> {
        let moved = self
            .path
            .iter()
            .map(|c| c.offset(d_lng, d_lat))
            .collect::<Result<Vec<_>, _>>()?;
        self.path = moved;
        Ok(())
    }

    /// Bounding box of the ring, or `None` when it has no vertices
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.path.split_first()?;
        let mut bounds = Bounds {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for c in rest {
            bounds.extend(c);
        }
        Some(bounds)
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Coordinate;
    type IntoIter = std::slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.iter()
    }
}

impl FromIterator<Coordinate> for Ring {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            path: iter.into_iter().collect(),
        }
    }
}

/// Ordered collection of rings edited together as one field's worth of geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonSet {
    rings: Vec<Ring>,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ring: Ring) {
        self.rings.push(ring);
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ring> {
        self.rings.iter()
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn into_rings(self) -> Vec<Ring> {
        self.rings
    }
}

impl From<Vec<Ring>> for PolygonSet {
    fn from(rings: Vec<Ring>) -> Self {
        Self { rings }
    }
}

impl FromIterator<Ring> for PolygonSet {
    fn from_iter<I: IntoIterator<Item = Ring>>(iter: I) -> Self {
        Self {
            rings: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PolygonSet {
    type Item = Ring;
    type IntoIter = std::vec::IntoIter<Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.into_iter()
    }
}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = &'a Ring;
    type IntoIter = std::slice::Iter<'a, Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.rings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::from_pairs(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_coordinate_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(-67.7, -53.79).is_ok());
    }

    #[test]
    fn test_ring_vertex_edits() {
        let mut ring = square();

        let old = ring.set_at(1, Coordinate::new(2.0, 0.0).unwrap()).unwrap();
        assert_eq!(old, Coordinate::new(1.0, 0.0).unwrap());

        ring.insert_at(4, Coordinate::new(0.0, 0.0).unwrap()).unwrap();
        assert_eq!(ring.len(), 5);

        let removed = ring.remove_at(0).unwrap();
        assert_eq!(removed, Coordinate::new(0.0, 0.0).unwrap());
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_ring_index_out_of_range() {
        let mut ring = square();
        let c = Coordinate::new(5.0, 5.0).unwrap();

        assert_eq!(
            ring.set_at(4, c),
            Err(GeometryError::VertexOutOfRange { index: 4, len: 4 })
        );
        assert!(ring.insert_at(5, c).is_err());
        assert!(ring.remove_at(4).is_err());
        assert_eq!(ring, square());
    }

    #[test]
    fn test_translate_is_all_or_nothing() {
        let mut ring = square();
        ring.translate(10.0, -10.0).unwrap();
        assert_eq!(ring.get(2), Some(&Coordinate::new(11.0, -9.0).unwrap()));

        let before = ring.clone();
        assert!(ring.translate(f64::INFINITY, 0.0).is_err());
        assert_eq!(ring, before);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Ring::new().bounds(), None);

        let bounds = square().bounds().unwrap();
        assert_eq!(bounds.south, 0.0);
        assert_eq!(bounds.north, 1.0);
        assert_eq!(bounds.west, 0.0);
        assert_eq!(bounds.east, 1.0);
        assert_eq!(bounds.center(), Coordinate::new(0.5, 0.5).unwrap());
    }

    #[test]
    fn test_coordinate_json_shape() {
        let json = serde_json::to_string(&Coordinate::new(1.5, -2.0).unwrap()).unwrap();
        assert_eq!(json, r#"{"lng":1.5,"lat":-2.0}"#);

        let ring: Ring = serde_json::from_str(r#"[{"lng":1,"lat":2}]"#).unwrap();
        assert_eq!(ring.len(), 1);
    }
}
