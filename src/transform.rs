//! # Bounded Model-Transform Stack
//!
//! Scoped positioning for nested draws: `push` saves the current transform,
//! local translate/scale/rotate calls compose into it, and `pop` restores the
//! saved one verbatim. The stack is created per frame and must be back at
//! depth zero when the frame completes.
//!
//! Overflow and underflow are programming errors. They surface as
//! [`StackError`] so the frame aborts instead of drawing with a corrupted
//! transform. Drawing code normally goes through
//! [`DrawContext::scoped`](crate::surface::DrawContext::scoped), which pairs
//! every push with its pop.

use crate::geometry::Mat4;
use thiserror::Error;

/// Maximum number of saved transforms.
pub const MAX_DEPTH: usize = 40;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("transform stack overflow (capacity {capacity})")]
    Overflow { capacity: usize },

    #[error("transform stack underflow")]
    Underflow,
}

#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
    capacity: usize,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::with_capacity(MAX_DEPTH)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Save the current transform.
    pub fn push(&mut self) -> Result<(), StackError> {
        if self.saved.len() >= self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.saved.push(self.current);
        Ok(())
    }

    /// Restore the most recently saved transform and discard it.
    pub fn pop(&mut self) -> Result<(), StackError> {
        self.current = self.saved.pop().ok_or(StackError::Underflow)?;
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn current(&self) -> &Mat4 {
        &self.current
    }

    /// Post-multiply the current transform by `m`.
    pub fn multiply(&mut self, m: &Mat4) {
        self.current = self.current * *m;
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.multiply(&Mat4::translation(x, y, 0.0));
    }

    /// Uniform scale on all three axes.
    pub fn scale(&mut self, s: f64) {
        self.multiply(&Mat4::scale(s, s, s));
    }

    pub fn rotate_z(&mut self, degrees: f64) {
        self.multiply(&Mat4::rotation_z(degrees));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_restores_saved_transform_verbatim() {
        let mut stack = TransformStack::new();
        stack.translate(0.5, 0.25);
        let before = *stack.current();

        stack.push().unwrap();
        stack.scale(3.0);
        stack.rotate_z(90.0);
        assert_ne!(*stack.current(), before);
        stack.pop().unwrap();

        assert_eq!(*stack.current(), before);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn push_beyond_capacity_is_rejected() {
        let mut stack = TransformStack::with_capacity(2);
        stack.push().unwrap();
        stack.push().unwrap();
        assert_eq!(stack.push(), Err(StackError::Overflow { capacity: 2 }));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn pop_on_empty_stack_is_rejected() {
        let mut stack = TransformStack::new();
        assert_eq!(stack.pop(), Err(StackError::Underflow));
    }

    #[test]
    fn default_capacity_is_forty() {
        let mut stack = TransformStack::new();
        for _ in 0..MAX_DEPTH {
            stack.push().unwrap();
        }
        assert!(stack.push().is_err());
    }
}
