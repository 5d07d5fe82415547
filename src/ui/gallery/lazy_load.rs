// SPDX-License-Identifier: MPL-2.0
//! Progressive reveal of gallery thumbnails.
//!
//! The scheduler keeps one "revealed" flag per item. A leading run of items
//! is revealed on mount; every other item is registered once with a shared
//! [`IntersectionRegistry`] and revealed the first time it approaches the
//! viewport, after which its watch is dropped.

use crate::config::{DEFAULT_ROOT_MARGIN_PX, DEFAULT_VISIBILITY_THRESHOLD};
use crate::domain::media::CollectionId;
use iced::Rectangle;
use std::collections::BTreeMap;
use std::fmt;

/// Why a target could not be watched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserveError(pub String);

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewport observation failed: {}", self.0)
    }
}

impl std::error::Error for ObserveError {}

/// One registry of viewport watches shared by a whole gallery.
pub trait IntersectionRegistry {
    /// Whether viewport observation works at all here.
    fn is_supported(&self) -> bool;

    /// Starts watching `target` (content coordinates) for item `index`.
    /// Watching an index again replaces its target.
    fn observe(&mut self, index: usize, target: Rectangle) -> Result<(), ObserveError>;

    fn unobserve(&mut self, index: usize);

    /// Releases every watch.
    fn disconnect_all(&mut self);

    /// Watched indices whose targets are visible enough in `viewport`.
    fn intersecting(&self, viewport: Rectangle) -> Vec<usize>;

    /// Number of outstanding watches.
    fn watched_len(&self) -> usize;
}

/// Registry driven by the gallery scroll position.
///
/// A target intersects when at least `threshold` of its area lies inside the
/// viewport grown by `root_margin` on every side.
#[derive(Debug, Clone)]
pub struct ScrollRegistry {
    targets: BTreeMap<usize, Rectangle>,
    root_margin: f32,
    threshold: f32,
}

impl Default for ScrollRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_MARGIN_PX, DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl ScrollRegistry {
    #[must_use]
    pub fn new(root_margin: f32, threshold: f32) -> Self {
        Self {
            targets: BTreeMap::new(),
            root_margin: root_margin.max(0.0),
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    fn expanded(&self, viewport: Rectangle) -> Rectangle {
        Rectangle {
            x: viewport.x - self.root_margin,
            y: viewport.y - self.root_margin,
            width: viewport.width + 2.0 * self.root_margin,
            height: viewport.height + 2.0 * self.root_margin,
        }
    }
}

impl IntersectionRegistry for ScrollRegistry {
    fn is_supported(&self) -> bool {
        true
    }

    fn observe(&mut self, index: usize, target: Rectangle) -> Result<(), ObserveError> {
        if !(target.x.is_finite()
            && target.y.is_finite()
            && target.width.is_finite()
            && target.height.is_finite())
        {
            return Err(ObserveError(format!("target {index} has no finite bounds")));
        }
        self.targets.insert(index, target);
        Ok(())
    }

    fn unobserve(&mut self, index: usize) {
        self.targets.remove(&index);
    }

    fn disconnect_all(&mut self) {
        self.targets.clear();
    }

    fn intersecting(&self, viewport: Rectangle) -> Vec<usize> {
        let root = self.expanded(viewport);
        self.targets
            .iter()
            .filter(|(_, target)| {
                let area = target.area();
                if area <= 0.0 {
                    return root.contains(target.center());
                }
                target
                    .intersection(&root)
                    .is_some_and(|overlap| overlap.area() / area >= self.threshold)
            })
            .map(|(index, _)| *index)
            .collect()
    }

    fn watched_len(&self) -> usize {
        self.targets.len()
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LazyLoadOptions {
    /// When false every item is revealed on mount.
    pub enabled: bool,
    /// Leading items revealed without waiting for the viewport.
    pub eager_count: usize,
}

/// Result of mounting or re-laying out the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reveal {
    /// Indices that became revealed by this call, ascending.
    pub indices: Vec<usize>,
    /// Set when observation failed and everything was revealed instead.
    pub degraded: Option<String>,
}

/// Tracks which items may show their real thumbnail.
#[derive(Debug)]
pub struct LazyLoadScheduler<R> {
    registry: R,
    options: LazyLoadOptions,
    revealed: Vec<bool>,
    collection: Option<CollectionId>,
}

impl<R: IntersectionRegistry> LazyLoadScheduler<R> {
    pub fn new(registry: R, options: LazyLoadOptions) -> Self {
        Self {
            registry,
            options,
            revealed: Vec::new(),
            collection: None,
        }
    }

    /// Mounts the scheduler on a collection laid out as `targets`.
    ///
    /// Remounting the same collection only re-registers outstanding
    /// targets; a different collection starts from scratch.
    pub fn mount(&mut self, collection: CollectionId, targets: &[Rectangle]) -> Reveal {
        if self.collection == Some(collection) && self.revealed.len() == targets.len() {
            return self.relayout(targets);
        }

        self.unmount();
        self.collection = Some(collection);
        self.revealed = vec![false; targets.len()];

        if !self.options.enabled {
            return Reveal {
                indices: self.reveal_all(),
                degraded: None,
            };
        }
        if !self.registry.is_supported() {
            return Reveal {
                indices: self.reveal_all(),
                degraded: Some("viewport observation is not supported".to_string()),
            };
        }

        let eager = self.options.eager_count.min(targets.len());
        let mut indices: Vec<usize> = (0..eager).collect();
        for index in &indices {
            self.revealed[*index] = true;
        }
        match self.register_outstanding(targets) {
            Ok(()) => Reveal {
                indices,
                degraded: None,
            },
            Err(err) => {
                indices.extend(self.reveal_all());
                Reveal {
                    indices,
                    degraded: Some(err.to_string()),
                }
            }
        }
    }

    /// Moves outstanding watches to new target bounds after a resize.
    pub fn relayout(&mut self, targets: &[Rectangle]) -> Reveal {
        if targets.len() != self.revealed.len() {
            return Reveal::default();
        }
        match self.register_outstanding(targets) {
            Ok(()) => Reveal::default(),
            Err(err) => Reveal {
                indices: self.reveal_all(),
                degraded: Some(err.to_string()),
            },
        }
    }

    /// Reveals every watched item now visible in `viewport`.
    pub fn on_viewport(&mut self, viewport: Rectangle) -> Vec<usize> {
        let hits = self.registry.intersecting(viewport);
        hits.into_iter()
            .filter(|index| self.on_intersection(*index))
            .collect()
    }

    /// Applies one intersection entry. Returns true if it revealed the item.
    pub fn on_intersection(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                self.registry.unobserve(index);
                true
            }
            _ => false,
        }
    }

    /// Releases every watch and forgets the collection.
    pub fn unmount(&mut self) {
        self.registry.disconnect_all();
        self.revealed.clear();
        self.collection = None;
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|flag| **flag).count()
    }

    #[must_use]
    pub fn collection(&self) -> Option<CollectionId> {
        self.collection
    }

    #[must_use]
    pub fn options(&self) -> LazyLoadOptions {
        self.options
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    fn register_outstanding(&mut self, targets: &[Rectangle]) -> Result<(), ObserveError> {
        for (index, target) in targets.iter().enumerate() {
            if !self.revealed[index] {
                self.registry.observe(index, *target)?;
            }
        }
        Ok(())
    }

    fn reveal_all(&mut self) -> Vec<usize> {
        self.registry.disconnect_all();
        let newly = self
            .revealed
            .iter()
            .enumerate()
            .filter(|(_, flag)| !**flag)
            .map(|(index, _)| index)
            .collect();
        self.revealed.iter_mut().for_each(|flag| *flag = true);
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaCollection;

    /// Registry fake: records calls and reports queued intersections.
    #[derive(Debug, Default)]
    struct FakeRegistry {
        supported: bool,
        fail_observe: bool,
        watched: BTreeMap<usize, Rectangle>,
        queued: Vec<usize>,
        disconnects: usize,
    }

    impl FakeRegistry {
        fn supported() -> Self {
            Self {
                supported: true,
                ..Self::default()
            }
        }
    }

    impl IntersectionRegistry for FakeRegistry {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn observe(&mut self, index: usize, target: Rectangle) -> Result<(), ObserveError> {
            if self.fail_observe {
                return Err(ObserveError("boom".into()));
            }
            self.watched.insert(index, target);
            Ok(())
        }

        fn unobserve(&mut self, index: usize) {
            self.watched.remove(&index);
        }

        fn disconnect_all(&mut self) {
            self.disconnects += 1;
            self.watched.clear();
        }

        fn intersecting(&self, _viewport: Rectangle) -> Vec<usize> {
            self.queued
                .iter()
                .copied()
                .filter(|i| self.watched.contains_key(i))
                .collect()
        }

        fn watched_len(&self) -> usize {
            self.watched.len()
        }
    }

    fn column(count: usize) -> Vec<Rectangle> {
        (0..count)
            .map(|i| Rectangle::new(iced::Point::new(0.0, i as f32 * 110.0), iced::Size::new(100.0, 100.0)))
            .collect()
    }

    fn lazy(eager_count: usize) -> LazyLoadOptions {
        LazyLoadOptions {
            enabled: true,
            eager_count,
        }
    }

    #[test]
    fn eager_prefix_is_revealed_without_intersections() {
        let mut scheduler = LazyLoadScheduler::new(FakeRegistry::supported(), lazy(6));
        let reveal = scheduler.mount(MediaCollection::empty().id(), &column(10));

        assert_eq!(reveal.indices, vec![0, 1, 2, 3, 4, 5]);
        assert!((0..6).all(|i| scheduler.is_revealed(i)));
        assert!(!scheduler.is_revealed(6));
        assert_eq!(scheduler.registry().watched_len(), 4);
    }

    #[test]
    fn intersection_reveals_once_and_stops_watching() {
        let mut scheduler = LazyLoadScheduler::new(FakeRegistry::supported(), lazy(6));
        scheduler.mount(MediaCollection::empty().id(), &column(10));

        assert!(scheduler.on_intersection(7));
        assert!(!scheduler.on_intersection(7));
        assert!(scheduler.is_revealed(7));
        assert!(!scheduler.is_revealed(6));
        assert_eq!(scheduler.registry().watched_len(), 3);
    }

    #[test]
    fn viewport_updates_reveal_queued_entries() {
        let mut registry = FakeRegistry::supported();
        registry.queued = vec![8, 9, 2];
        let mut scheduler = LazyLoadScheduler::new(registry, lazy(6));
        scheduler.mount(MediaCollection::empty().id(), &column(10));

        let newly = scheduler.on_viewport(Rectangle::with_size(iced::Size::new(1.0, 1.0)));
        assert_eq!(newly, vec![8, 9]);
    }

    #[test]
    fn disabled_lazy_loading_reveals_everything() {
        let options = LazyLoadOptions {
            enabled: false,
            eager_count: 6,
        };
        let mut scheduler = LazyLoadScheduler::new(FakeRegistry::supported(), options);
        let reveal = scheduler.mount(MediaCollection::empty().id(), &column(20));

        assert_eq!(reveal.indices.len(), 20);
        assert_eq!(scheduler.revealed_count(), 20);
        assert_eq!(scheduler.registry().watched_len(), 0);
    }

    #[test]
    fn unsupported_observation_degrades_to_eager() {
        let mut scheduler = LazyLoadScheduler::new(FakeRegistry::default(), lazy(2));
        let reveal = scheduler.mount(MediaCollection::empty().id(), &column(5));

        assert_eq!(scheduler.revealed_count(), 5);
        assert!(reveal.degraded.is_some());
    }

    #[test]
    fn observe_failure_degrades_to_eager() {
        let registry = FakeRegistry {
            supported: true,
            fail_observe: true,
            ..FakeRegistry::default()
        };
        let mut scheduler = LazyLoadScheduler::new(registry, lazy(2));
        let reveal = scheduler.mount(MediaCollection::empty().id(), &column(5));

        assert_eq!(reveal.indices, vec![0, 1, 2, 3, 4]);
        assert!(reveal.degraded.is_some());
        assert_eq!(scheduler.registry().watched_len(), 0);
    }

    #[test]
    fn new_collection_releases_previous_watches() {
        let mut scheduler = LazyLoadScheduler::new(FakeRegistry::supported(), lazy(1));
        let first = MediaCollection::empty();
        let second = MediaCollection::empty();
        scheduler.mount(first.id(), &column(5));
        scheduler.on_intersection(3);

        scheduler.mount(second.id(), &column(3));

        assert_eq!(scheduler.collection(), Some(second.id()));
        assert!(!scheduler.is_revealed(3));
        assert_eq!(scheduler.registry().watched_len(), 2);
        assert!(scheduler.registry().disconnects >= 1);
    }

    #[test]
    fn remount_of_same_collection_keeps_reveals() {
        let mut scheduler = LazyLoadScheduler::new(FakeRegistry::supported(), lazy(1));
        let collection = MediaCollection::empty();
        scheduler.mount(collection.id(), &column(4));
        scheduler.on_intersection(2);

        let reveal = scheduler.mount(collection.id(), &column(4));

        assert!(reveal.indices.is_empty());
        assert!(scheduler.is_revealed(2));
        assert_eq!(scheduler.registry().watched_len(), 2);
    }

    #[test]
    fn unmount_releases_everything() {
        let mut scheduler = LazyLoadScheduler::new(FakeRegistry::supported(), lazy(1));
        scheduler.mount(MediaCollection::empty().id(), &column(8));
        scheduler.unmount();

        assert_eq!(scheduler.registry().watched_len(), 0);
        assert_eq!(scheduler.collection(), None);
        assert!(!scheduler.is_revealed(0));
    }

    #[test]
    fn scroll_registry_uses_margin_and_threshold() {
        let mut registry = ScrollRegistry::new(100.0, 0.1);
        let size = iced::Size::new(100.0, 100.0);
        registry
            .observe(0, Rectangle::new(iced::Point::new(0.0, 550.0), size))
            .expect("observe");
        registry
            .observe(1, Rectangle::new(iced::Point::new(0.0, 595.0), size))
            .expect("observe");
        registry
            .observe(2, Rectangle::new(iced::Point::new(0.0, 1000.0), size))
            .expect("observe");

        // Viewport ends at 500, margin extends to 600.
        let viewport = Rectangle::new(iced::Point::ORIGIN, iced::Size::new(400.0, 500.0));
        assert_eq!(registry.intersecting(viewport), vec![0]);
    }

    #[test]
    fn scroll_registry_rejects_non_finite_targets() {
        let mut registry = ScrollRegistry::default();
        let bad = Rectangle::new(iced::Point::new(f32::NAN, 0.0), iced::Size::new(1.0, 1.0));
        assert!(registry.observe(0, bad).is_err());
        assert_eq!(registry.watched_len(), 0);
    }
}
