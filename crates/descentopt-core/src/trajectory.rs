//! Record of the iterates visited by an optimization run.
//!
//! A [`Trajectory`] is an append-only sequence of `(point, value)` pairs. The
//! first entry is always the initial point and the last entry the final
//! point; plotting tools rely on that order to mark both ends and to draw a
//! segment between every consecutive pair.

use crate::types::{DVector, Scalar};

/// Ordered, append-only sequence of visited points and objective values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory<T>
where
    T: Scalar,
{
    points: Vec<DVector<T>>,
    values: Vec<T>,
}

impl<T> Trajectory<T>
where
    T: Scalar,
{
    /// Starts a trajectory at the initial point.
    pub fn new(initial_point: DVector<T>, initial_value: T) -> Self {
        Self {
            points: vec![initial_point],
            values: vec![initial_value],
        }
    }

    /// Appends an accepted iterate.
    pub fn push(&mut self, point: DVector<T>, value: T) {
        self.points.push(point);
        self.values.push(value);
    }

    /// Number of recorded iterates, initial point included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Visited points in order.
    pub fn points(&self) -> &[DVector<T>] {
        &self.points
    }

    /// Objective values in visitation order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The first recorded entry (the initial point).
    pub fn first(&self) -> Option<(&DVector<T>, T)> {
        self.points.first().zip(self.values.first().copied())
    }

    /// The last recorded entry (the final point).
    pub fn last(&self) -> Option<(&DVector<T>, T)> {
        self.points.last().zip(self.values.last().copied())
    }

    /// Iterates over `(point, value)` pairs in visitation order.
    pub fn iter(&self) -> impl Iterator<Item = (&DVector<T>, T)> + '_ {
        self.points.iter().zip(self.values.iter().copied())
    }

    /// Iterates over consecutive `(from, to)` point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&DVector<T>, &DVector<T>)> + '_ {
        self.points.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Consumes the trajectory, returning the point and value lists.
    pub fn into_parts(self) -> (Vec<DVector<T>>, Vec<T>) {
        (self.points, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(x: f64, y: f64) -> DVector<f64> {
        DVector::from_vec(vec![x, y])
    }

    #[test]
    fn test_order_is_preserved() {
        let mut trajectory = Trajectory::new(point(1.0, 1.0), 2.0);
        trajectory.push(point(0.5, 0.5), 0.5);
        trajectory.push(point(0.0, 0.0), 0.0);

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.first(), Some((&point(1.0, 1.0), 2.0)));
        assert_eq!(trajectory.last(), Some((&point(0.0, 0.0), 0.0)));
        assert_eq!(trajectory.values(), &[2.0, 0.5, 0.0]);
    }

    #[test]
    fn test_segments() {
        let mut trajectory = Trajectory::new(point(2.0, 0.0), 4.0);
        trajectory.push(point(1.0, 0.0), 1.0);
        trajectory.push(point(0.0, 0.0), 0.0);

        let segments: Vec<_> = trajectory.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], (&point(2.0, 0.0), &point(1.0, 0.0)));
        assert_eq!(segments[1], (&point(1.0, 0.0), &point(0.0, 0.0)));
    }

    #[test]
    fn test_single_entry_has_no_segments() {
        let trajectory = Trajectory::new(point(0.0, 0.0), 0.0);

        assert!(!trajectory.is_empty());
        assert_eq!(trajectory.segments().count(), 0);
        assert_eq!(trajectory.first(), trajectory.last());
    }

    #[test]
    fn test_into_parts() {
        let mut trajectory = Trajectory::new(point(1.0, 0.0), 1.0);
        trajectory.push(point(0.0, 0.0), 0.0);

        let (points, values) = trajectory.into_parts();
        assert_eq!(points, vec![point(1.0, 0.0), point(0.0, 0.0)]);
        assert_eq!(values, vec![1.0, 0.0]);
    }
}
