//! Ordered aggregate of intersectable objects.

use crate::{Intersection, IntersectionRecord};
use lux_math::{Interval, Ray};

/// A list of intersectable objects; intersecting it returns the closest hit.
#[derive(Debug, Clone, Default)]
pub struct AssetList {
    objects: Vec<Intersection>,
}

impl AssetList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list from already built objects.
    pub fn with_objects(objects: Vec<Intersection>) -> Self {
        log::debug!("Assembled asset list with {} objects", objects.len());
        Self { objects }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Intersection>) {
        self.objects.push(object.into());
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intersection> {
        self.objects.iter()
    }

    /// Single pass over the children, shrinking the upper bound to the
    /// closest t found so far.
    pub fn intersect<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<IntersectionRecord<'a>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.intersect(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

impl<T: Into<Intersection>> FromIterator<T> for AssetList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let objects: Vec<Intersection> = iter.into_iter().map(Into::into).collect();
        Self::with_objects(objects)
    }
}
