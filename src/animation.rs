//! Per-section animation tasks.
//!
//! Each visible section that carries a particle background owns one task in the
//! [`AnimationScheduler`]. The host drives all tasks once per frame with
//! [`AnimationScheduler::tick`]; stopping a task (on unmount or resize) drops its
//! field so no further frames are computed for it.

use crate::particles::ParticleField;
use egui::{Pos2, Vec2};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use uuid::Uuid;

/// Identifies one running animation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(Uuid);

impl AnimationHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Shared, most-recent pointer position in screen coordinates.
///
/// Written by the input handler and read by every running task on its next frame.
/// Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    position: Rc<Cell<Option<Pos2>>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest pointer position, or `None` when the pointer left the window.
    pub fn set(&self, position: Option<Pos2>) {
        self.position.set(position);
    }

    pub fn get(&self) -> Option<Pos2> {
        self.position.get()
    }
}

struct AnimationTask {
    field: ParticleField,
    pointer: PointerTracker,
    /// Screen position of the surface's top-left corner
    origin: Pos2,
}

/// Owns all running particle animations.
#[derive(Default)]
pub struct AnimationScheduler {
    tasks: HashMap<AnimationHandle, AnimationTask>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts animating `field` and returns the handle that stops it.
    ///
    /// # Arguments
    ///
    /// * `field` - The particle field to drive
    /// * `pointer` - Pointer source read on every frame
    /// * `origin` - Screen position of the field's top-left corner
    pub fn start(&mut self, field: ParticleField, pointer: PointerTracker, origin: Pos2) -> AnimationHandle {
        let handle = AnimationHandle::new();
        log::debug!(
            "Starting animation {:?} with {} particles on {:?}",
            handle,
            field.particles().len(),
            field.size()
        );
        self.tasks.insert(handle, AnimationTask { field, pointer, origin });
        handle
    }

    /// Stops the task behind `handle`.
    ///
    /// Idempotent: returns `false` when the task was already stopped.
    pub fn stop(&mut self, handle: AnimationHandle) -> bool {
        let stopped = self.tasks.remove(&handle).is_some();
        if stopped {
            log::debug!("Stopped animation {:?}", handle);
        }
        stopped
    }

    /// Stops every task and returns how many were running.
    pub fn stop_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    pub fn is_running(&self, handle: AnimationHandle) -> bool {
        self.tasks.contains_key(&handle)
    }

    /// Number of tasks currently running.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn field(&self, handle: AnimationHandle) -> Option<&ParticleField> {
        self.tasks.get(&handle).map(|task| &task.field)
    }

    /// Updates where the task's surface sits on screen, e.g. after scrolling.
    pub fn set_origin(&mut self, handle: AnimationHandle, origin: Pos2) {
        if let Some(task) = self.tasks.get_mut(&handle) {
            task.origin = origin;
        }
    }

    /// Replaces a task after its surface changed size.
    ///
    /// The old task is stopped before the replacement field is generated, so there is
    /// never more than one task for the surface. Returns `None` if `handle` was not running.
    pub fn restart_resized(&mut self, handle: AnimationHandle, size: Vec2) -> Option<AnimationHandle> {
        let mut task = self.tasks.remove(&handle)?;
        log::debug!("Surface of {:?} resized to {:?}, regenerating", handle, size);
        let field = task.field.regenerated(size);
        Some(self.start(field, task.pointer, task.origin))
    }

    /// Changes the surface size of a running task without regenerating its field.
    ///
    /// Returns `false` if `handle` was not running.
    pub fn resize_in_place(&mut self, handle: AnimationHandle, size: Vec2) -> bool {
        match self.tasks.get_mut(&handle) {
            Some(task) => {
                task.field.resize_in_place(size);
                true
            }
            None => false,
        }
    }

    /// Advances every running task by one frame.
    ///
    /// The shared pointer position is translated into each surface's local coordinates.
    pub fn tick(&mut self) {
        for task in self.tasks.values_mut() {
            let local = task.pointer.get().map(|p| p - task.origin.to_vec2());
            task.field.step(local);
        }
    }
}
