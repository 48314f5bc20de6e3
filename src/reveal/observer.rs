//! Observer: the viewport intersection source that drives reveal triggers.

use super::options::{RevealOptions, RootMargin};
use super::trigger::{intersection_entry, RevealTrigger};
use crate::config::CellMetrics;
use crate::layout::Rect;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// Identifier of a live observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(u32);

/// A visibility change delivered by [`Observer::set_root`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    /// Which observation changed.
    pub id: ObservationId,
    /// Its new visibility.
    pub visible: bool,
}

struct Watch {
    target: Rect,
    margin: RootMargin,
    trigger: RevealTrigger,
    signal: Rc<Cell<bool>>,
}

struct Registry {
    supported: bool,
    metrics: CellMetrics,
    root: Option<Rect>,
    next_id: u32,
    watches: HashMap<ObservationId, Watch>,
}

impl Registry {
    /// Measure one watch against the current root.
    ///
    /// Returns the new visibility on a crossing, and whether the watch has
    /// latched and should be released.
    fn evaluate(&self, watch: &mut Watch) -> (Option<bool>, bool) {
        let Some(root) = self.root else {
            return (None, false);
        };
        let insets = watch.margin.resolve(root, self.metrics);
        let entry = intersection_entry(watch.target, root, insets);
        let changed = watch.trigger.update(entry);
        if let Some(visible) = changed {
            watch.signal.set(visible);
        }
        (changed, !watch.trigger.is_watching())
    }
}

/// Intersection source for one viewport.
///
/// Single-threaded: it lives on the stage loop, like the rest of the page
/// state. Cloning yields another reference to the same registry.
#[derive(Clone)]
pub struct Observer {
    inner: Rc<RefCell<Registry>>,
}

impl Observer {
    /// An observer that measures intersections.
    pub fn new(metrics: CellMetrics) -> Self {
        Self::build(true, metrics)
    }

    /// An observer for a platform that cannot measure intersections.
    ///
    /// Every handle it hands out reports visible immediately.
    pub fn unsupported() -> Self {
        warn!("intersection observation unavailable, reveals fail open");
        Self::build(false, CellMetrics::default())
    }

    fn build(supported: bool, metrics: CellMetrics) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                supported,
                metrics,
                root: None,
                next_id: 0,
                watches: HashMap::new(),
            })),
        }
    }

    /// Whether intersections are measured.
    pub fn is_supported(&self) -> bool {
        self.inner.borrow().supported
    }

    /// Number of observations still receiving updates.
    pub fn watched(&self) -> usize {
        self.inner.borrow().watches.len()
    }

    /// Start observing `target` (page coordinates).
    ///
    /// If a root is already known the target is measured immediately.
    pub fn observe(&self, target: Rect, options: &RevealOptions) -> RevealHandle {
        let mut registry = self.inner.borrow_mut();
        let id = ObservationId(registry.next_id);
        registry.next_id += 1;

        let mut trigger = RevealTrigger::new(options);
        let signal = Rc::new(Cell::new(false));

        if !registry.supported {
            trigger.force_visible();
            signal.set(true);
            return RevealHandle {
                id,
                signal,
                registry: Weak::new(),
            };
        }

        let mut watch = Watch {
            target,
            margin: options.root_margin,
            trigger,
            signal: Rc::clone(&signal),
        };
        let (_, latched) = registry.evaluate(&mut watch);
        if latched {
            debug!(?id, "revealed on mount, released");
        } else {
            registry.watches.insert(id, watch);
        }

        RevealHandle {
            id,
            signal,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Move the viewport and re-measure every live observation.
    ///
    /// Returns the visibility crossings in observation order. Latched
    /// observations are released as part of the update.
    pub fn set_root(&self, root: Rect) -> Vec<Crossing> {
        let mut registry = self.inner.borrow_mut();
        if !registry.supported {
            return Vec::new();
        }
        registry.root = Some(root);
        trace!(?root, watches = registry.watches.len(), "viewport moved");

        let mut ids: Vec<_> = registry.watches.keys().copied().collect();
        ids.sort_by_key(|id| id.0);

        let mut crossings = Vec::new();
        for id in ids {
            let Some(mut watch) = registry.watches.remove(&id) else {
                continue;
            };
            let (changed, latched) = registry.evaluate(&mut watch);
            if let Some(visible) = changed {
                debug!(?id, visible, "reveal crossing");
                crossings.push(Crossing { id, visible });
            }
            if latched {
                debug!(?id, "latched, observation released");
            } else {
                registry.watches.insert(id, watch);
            }
        }
        crossings
    }

    /// Update the page rectangle of a live observation (after relayout).
    pub fn retarget(&self, handle: &RevealHandle, target: Rect) -> Option<Crossing> {
        let mut registry = self.inner.borrow_mut();
        let mut watch = registry.watches.remove(&handle.id)?;
        watch.target = target;
        let (changed, latched) = registry.evaluate(&mut watch);
        if !latched {
            registry.watches.insert(handle.id, watch);
        }
        changed.map(|visible| Crossing {
            id: handle.id,
            visible,
        })
    }
}

impl std::fmt::Debug for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("Observer")
            .field("supported", &registry.supported)
            .field("root", &registry.root)
            .field("watched", &registry.watches.len())
            .finish()
    }
}

/// A mounted region's view of its observation.
///
/// Dropping the handle releases the observation.
#[derive(Debug)]
pub struct RevealHandle {
    id: ObservationId,
    signal: Rc<Cell<bool>>,
    registry: Weak<RefCell<Registry>>,
}

impl RevealHandle {
    /// Observation identifier.
    pub const fn id(&self) -> ObservationId {
        self.id
    }

    /// Current visibility.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.signal.get()
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                if registry.watches.remove(&self.id).is_some() {
                    trace!(id = ?self.id, "observation released");
                }
            }
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("supported", &self.supported)
            .field("watches", &self.watches.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> Observer {
        Observer::new(CellMetrics::default())
    }

    fn viewport_at(scroll: i32) -> Rect {
        Rect::new(0, scroll, 80, 20)
    }

    #[test]
    fn test_reveal_on_scroll_and_latch() {
        let obs = observer();
        obs.set_root(viewport_at(0));
        let handle = obs.observe(Rect::new(0, 40, 80, 10), &RevealOptions::default());
        assert!(!handle.is_visible());
        assert_eq!(obs.watched(), 1);

        let crossings = obs.set_root(viewport_at(25));
        assert_eq!(crossings, vec![Crossing { id: handle.id(), visible: true }]);
        assert!(handle.is_visible());
        assert_eq!(obs.watched(), 0);

        // Scrolling back to the top cannot hide it again.
        assert!(obs.set_root(viewport_at(0)).is_empty());
        assert!(handle.is_visible());
    }

    #[test]
    fn test_reversible_observation_keeps_watching() {
        let obs = observer();
        let opts = RevealOptions::default().trigger_once(false);
        let handle = obs.observe(Rect::new(0, 30, 80, 10), &opts);

        obs.set_root(viewport_at(25));
        assert!(handle.is_visible());
        obs.set_root(viewport_at(60));
        assert!(!handle.is_visible());
        assert_eq!(obs.watched(), 1);
    }

    #[test]
    fn test_one_update_per_crossing() {
        let obs = observer();
        let opts = RevealOptions::default().trigger_once(false);
        let _handle = obs.observe(Rect::new(0, 30, 80, 10), &opts);

        assert_eq!(obs.set_root(viewport_at(25)).len(), 1);
        assert!(obs.set_root(viewport_at(26)).is_empty());
        assert!(obs.set_root(viewport_at(27)).is_empty());
    }

    #[test]
    fn test_visible_on_mount_is_released_immediately() {
        let obs = observer();
        obs.set_root(viewport_at(0));
        let handle = obs.observe(Rect::new(0, 0, 80, 5), &RevealOptions::default());
        assert!(handle.is_visible());
        assert_eq!(obs.watched(), 0);
    }

    #[test]
    fn test_drop_releases_observation() {
        let obs = observer();
        let handle = obs.observe(Rect::new(0, 100, 80, 10), &RevealOptions::default());
        assert_eq!(obs.watched(), 1);
        drop(handle);
        assert_eq!(obs.watched(), 0);
    }

    #[test]
    fn test_unsupported_fails_open() {
        let obs = Observer::unsupported();
        let handle = obs.observe(Rect::new(0, 500, 80, 10), &RevealOptions::default());
        assert!(handle.is_visible());
        assert!(obs.set_root(viewport_at(0)).is_empty());
        assert!(handle.is_visible());
        assert_eq!(obs.watched(), 0);
    }

    #[test]
    fn test_root_margin_reveals_early() {
        let obs = observer();
        let opts = RevealOptions::default().with_root_margin("0px 0px 100px 0px").unwrap();
        let handle = obs.observe(Rect::new(0, 22, 80, 4), &opts);
        obs.set_root(viewport_at(0));
        assert!(handle.is_visible());
    }

    #[test]
    fn test_extreme_root_margins() {
        let obs = observer();
        let huge = RevealOptions::default().with_root_margin("1e12px").unwrap();
        let negative = RevealOptions::default().with_root_margin("-1e12px").unwrap();
        let far = obs.observe(Rect::new(0, 40, 80, 10), &huge);
        let near = obs.observe(Rect::new(0, 5, 80, 10), &negative.trigger_once(false));

        obs.set_root(viewport_at(0));
        assert!(far.is_visible());
        assert!(!near.is_visible());
        assert_eq!(obs.watched(), 1);
    }

    #[test]
    fn test_retarget_after_relayout() {
        let obs = observer();
        let opts = RevealOptions::default().trigger_once(false);
        let handle = obs.observe(Rect::new(0, 50, 80, 10), &opts);
        obs.set_root(viewport_at(0));
        assert!(!handle.is_visible());

        let crossing = obs.retarget(&handle, Rect::new(0, 5, 80, 10));
        assert_eq!(crossing, Some(Crossing { id: handle.id(), visible: true }));
    }

    #[test]
    fn test_handle_outlives_observer() {
        let handle = {
            let obs = observer();
            obs.observe(Rect::new(0, 0, 10, 10), &RevealOptions::default())
        };
        assert!(!handle.is_visible());
        drop(handle);
    }
}
