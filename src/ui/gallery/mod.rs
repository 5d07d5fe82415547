// SPDX-License-Identifier: MPL-2.0
//! Gallery grid component: layout selection, progressive thumbnail reveal
//! and activation of items.

pub mod accessibility;
pub mod geometry;
pub mod lazy_load;
mod view;

pub use geometry::GridGeometry;
pub use lazy_load::{
    IntersectionRegistry, LazyLoadOptions, LazyLoadScheduler, ObserveError, Reveal, ScrollRegistry,
};
pub use view::{view, ViewContext};

use crate::config::{Config, DEFAULT_THUMBNAIL_CACHE_ENTRIES};
use crate::diagnostics::{WarningEvent, WarningType};
use crate::domain::media::{CollectionId, MediaCollection};
use crate::error::MediaError;
use crate::layout::{resolve_layout, GridLayoutConfig};
use crate::media::{self, ImageData};
use crate::ui::design_tokens::sizing;
use iced::widget::scrollable::{AbsoluteOffset, RelativeOffset};
use iced::widget::{image, operation, Id};
use iced::{Point, Rectangle, Size, Task};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Identifier of the grid scrollable.
pub const SCROLLABLE_ID: &str = "gallery-grid-scrollable";

/// Window size assumed until the first resize event arrives.
pub const INITIAL_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Display state of one thumbnail.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbnailState {
    /// Not revealed yet: skeleton.
    Hidden,
    Loading,
    Ready(image::Handle),
    /// Kind placeholder with a retry affordance.
    Failed(MediaError),
    /// Item has no thumbnail: kind placeholder only.
    Unavailable,
}

/// How the grid behaves, fixed for the lifetime of the component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryOptions {
    pub lazy: LazyLoadOptions,
    pub show_metadata: bool,
    pub adaptive_layout: bool,
    /// Layout used when `adaptive_layout` is off.
    pub fixed_layout: GridLayoutConfig,
}

impl GalleryOptions {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            lazy: LazyLoadOptions {
                enabled: config.gallery.enable_lazy_loading,
                eager_count: config.gallery.eager_count,
            },
            show_metadata: config.gallery.show_metadata,
            adaptive_layout: config.gallery.adaptive_layout,
            fixed_layout: config.gallery.fixed_layout(),
        }
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// The grid scrollable moved or changed size.
    Scrolled {
        bounds: Rectangle,
        offset: AbsoluteOffset,
    },
    /// The window was resized.
    Resized(Size),
    ThumbnailLoaded {
        collection: CollectionId,
        index: usize,
        url: String,
        result: Result<ImageData, MediaError>,
    },
    /// A cell was activated.
    Activate(usize),
    Retry(usize),
}

/// Side effects for the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Open the lightbox at this index.
    Open(usize),
    Warning(WarningEvent),
}

pub struct State {
    collection: MediaCollection,
    urls: std::sync::Arc<dyn media::UrlProvider + Send + Sync>,
    options: GalleryOptions,
    layout: GridLayoutConfig,
    scheduler: LazyLoadScheduler<ScrollRegistry>,
    thumbnails: Vec<ThumbnailState>,
    cache: LruCache<String, image::Handle>,
    viewport: Rectangle,
    geometry: GridGeometry,
    selected: Option<usize>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("gallery::State")
            .field("collection", &self.collection.id())
            .field("layout", &self.layout)
            .field("viewport", &self.viewport)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl State {
    #[must_use]
    pub fn new(options: GalleryOptions) -> Self {
        let capacity = NonZeroUsize::new(DEFAULT_THUMBNAIL_CACHE_ENTRIES).unwrap_or(NonZeroUsize::MIN);
        Self {
            collection: MediaCollection::empty(),
            urls: std::sync::Arc::new(media::ManifestUrls::default()),
            options,
            layout: options.fixed_layout,
            scheduler: LazyLoadScheduler::new(ScrollRegistry::default(), options.lazy),
            thumbnails: Vec::new(),
            cache: LruCache::new(capacity),
            viewport: Rectangle::new(Point::ORIGIN, INITIAL_VIEWPORT),
            geometry: GridGeometry::default(),
            selected: None,
        }
    }

    /// Replaces the collection. The layout is chosen once here and kept
    /// until the next collection.
    pub fn set_collection(
        &mut self,
        collection: MediaCollection,
        urls: std::sync::Arc<dyn media::UrlProvider + Send + Sync>,
    ) -> (Effect, Task<Message>) {
        self.layout = resolve_layout(
            self.options.adaptive_layout,
            self.options.fixed_layout,
            collection.items(),
        );
        self.collection = collection;
        self.urls = urls;
        self.thumbnails = vec![ThumbnailState::Hidden; self.collection.len()];
        self.selected = None;
        self.viewport.x = 0.0;
        self.viewport.y = 0.0;
        self.recompute_geometry();

        let reveal = self
            .scheduler
            .mount(self.collection.id(), &self.geometry.cells);
        let effect = match reveal.degraded {
            Some(reason) => {
                Effect::Warning(WarningEvent::new(WarningType::ObserverUnsupported, reason))
            }
            None => Effect::None,
        };
        let mut revealed = reveal.indices;
        revealed.extend(self.scheduler.on_viewport(self.viewport));
        (effect, self.start_loads(revealed))
    }

    /// Releases every viewport watch.
    pub fn unmount(&mut self) {
        self.scheduler.unmount();
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Scrolled { bounds, offset } => {
                let resized = (bounds.width - self.viewport.width).abs() > 0.5;
                self.viewport = Rectangle::new(Point::new(offset.x, offset.y), bounds.size());
                self.after_viewport_change(resized)
            }
            Message::Resized(size) => {
                let resized = (size.width - self.viewport.width).abs() > 0.5;
                self.viewport.width = size.width;
                self.viewport.height = size.height;
                self.after_viewport_change(resized)
            }
            Message::ThumbnailLoaded {
                collection,
                index,
                url,
                result,
            } => {
                if collection != self.collection.id() {
                    return (Effect::None, Task::none());
                }
                let Some(slot) = self.thumbnails.get_mut(index) else {
                    return (Effect::None, Task::none());
                };
                match result {
                    Ok(data) => {
                        self.cache.put(url, data.handle.clone());
                        *slot = ThumbnailState::Ready(data.handle);
                        (Effect::None, Task::none())
                    }
                    Err(err) => {
                        let warning = WarningEvent::new(
                            WarningType::ThumbnailLoadFailed,
                            format!("item {index}: {err}"),
                        );
                        *slot = ThumbnailState::Failed(err);
                        (Effect::Warning(warning), Task::none())
                    }
                }
            }
            Message::Activate(index) => {
                if index < self.collection.len() {
                    self.selected = Some(index);
                    (Effect::Open(index), Task::none())
                } else {
                    (Effect::None, Task::none())
                }
            }
            Message::Retry(index) => {
                if matches!(self.thumbnails.get(index), Some(ThumbnailState::Failed(_))) {
                    (Effect::None, self.start_loads(vec![index]))
                } else {
                    (Effect::None, Task::none())
                }
            }
        }
    }

    /// Marks `index` as the cell focus returns to after the lightbox closes.
    pub fn select(&mut self, index: usize) {
        if index < self.collection.len() {
            self.selected = Some(index);
        }
    }

    /// Selects `index` and scrolls its cell into view if it is off screen.
    pub fn focus(&mut self, index: usize) -> Task<Message> {
        self.select(index);
        let Some(cell) = self.geometry.cells.get(index) else {
            return Task::none();
        };
        let top = self.viewport.y;
        let bottom = top + self.viewport.height;
        if cell.y >= top && cell.y + cell.height <= bottom {
            return Task::none();
        }
        let range = (self.geometry.content_height - self.viewport.height).max(0.0);
        if range <= 0.0 {
            return Task::none();
        }
        let target = (cell.y - self.geometry.gap).clamp(0.0, range);
        operation::snap_to(
            Id::new(SCROLLABLE_ID),
            RelativeOffset {
                x: 0.0,
                y: target / range,
            },
        )
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn collection(&self) -> &MediaCollection {
        &self.collection
    }

    #[must_use]
    pub fn layout(&self) -> &GridLayoutConfig {
        &self.layout
    }

    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn options(&self) -> &GalleryOptions {
        &self.options
    }

    #[must_use]
    pub fn thumbnail(&self, index: usize) -> Option<&ThumbnailState> {
        self.thumbnails.get(index)
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.scheduler.is_revealed(index)
    }

    #[must_use]
    pub fn urls(&self) -> std::sync::Arc<dyn media::UrlProvider + Send + Sync> {
        std::sync::Arc::clone(&self.urls)
    }

    fn recompute_geometry(&mut self) {
        self.geometry = geometry::compute(
            self.viewport.width,
            sizing::GALLERY_PADDING,
            &self.layout,
            self.collection.items(),
            self.options.show_metadata,
        );
    }

    fn after_viewport_change(&mut self, resized: bool) -> (Effect, Task<Message>) {
        let mut revealed = Vec::new();
        let mut effect = Effect::None;
        if resized {
            self.recompute_geometry();
            let reveal = self.scheduler.relayout(&self.geometry.cells);
            if let Some(reason) = reveal.degraded {
                effect =
                    Effect::Warning(WarningEvent::new(WarningType::ObserverUnsupported, reason));
            }
            revealed.extend(reveal.indices);
        }
        revealed.extend(self.scheduler.on_viewport(self.viewport));
        (effect, self.start_loads(revealed))
    }

    /// Starts thumbnail fetches for newly revealed indices.
    fn start_loads(&mut self, indices: Vec<usize>) -> Task<Message> {
        let collection = self.collection.id();
        let mut tasks = Vec::new();

        for index in indices {
            let Some(item) = self.collection.get(index) else {
                continue;
            };
            let url = item.thumbnail_url().to_string();
            let state = if url.is_empty() {
                ThumbnailState::Unavailable
            } else if let Some(handle) = self.cache.get(&url) {
                ThumbnailState::Ready(handle.clone())
            } else {
                let request = url.clone();
                tasks.push(Task::perform(
                    media::image::load_thumbnail(request),
                    move |result| Message::ThumbnailLoaded {
                        collection,
                        index,
                        url: url.clone(),
                        result,
                    },
                ));
                ThumbnailState::Loading
            };
            if let Some(slot) = self.thumbnails.get_mut(index) {
                *slot = state;
            }
        }

        Task::batch(tasks)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(GalleryOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{Dimensions, MediaItem, MediaKind};
    use crate::layout::LayoutName;
    use std::sync::Arc;

    fn mockups(count: usize) -> MediaCollection {
        MediaCollection::new(
            (0..count)
                .map(|i| {
                    MediaItem::new(
                        format!("m{i}"),
                        format!("/g/m{i}.png"),
                        format!("/g/m{i}.png"),
                        MediaKind::MobileMockup,
                    )
                    .with_dimensions(Some(Dimensions::new(900, 1600)))
                })
                .collect(),
        )
    }

    fn urls() -> Arc<dyn media::UrlProvider + Send + Sync> {
        Arc::new(media::ManifestUrls::new("/g"))
    }

    #[test]
    fn adaptive_layout_is_chosen_per_collection() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(10), urls());
        assert_eq!(gallery.layout().layout_name, LayoutName::MobileFocus);
    }

    #[test]
    fn fixed_layout_is_used_when_adaptive_is_off() {
        let options = GalleryOptions {
            adaptive_layout: false,
            ..GalleryOptions::default()
        };
        let mut gallery = State::new(options);
        let _ = gallery.set_collection(mockups(10), urls());
        assert_eq!(gallery.layout(), &options.fixed_layout);
    }

    #[test]
    fn mount_reveals_eager_prefix_and_marks_it_loading() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(40), urls());

        for index in 0..6 {
            assert!(gallery.is_revealed(index));
            assert_eq!(gallery.thumbnail(index), Some(&ThumbnailState::Loading));
        }
        assert!(!gallery.is_revealed(39));
        assert_eq!(gallery.thumbnail(39), Some(&ThumbnailState::Hidden));
    }

    #[test]
    fn relayout_failure_is_reported_as_a_warning() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(40), urls());
        assert!(!gallery.is_revealed(39));

        let (effect, _) =
            gallery.handle_message(Message::Resized(iced::Size::new(f32::INFINITY, 800.0)));

        match effect {
            Effect::Warning(warning) => {
                assert_eq!(warning.warning_type, WarningType::ObserverUnsupported);
            }
            other => panic!("expected a warning, got {other:?}"),
        }
        assert!(gallery.is_revealed(39));
    }

    #[test]
    fn scrolling_reveals_cells_near_the_viewport() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(40), urls());
        let last = gallery.geometry().cells[39];

        let _ = gallery.handle_message(Message::Scrolled {
            bounds: Rectangle::new(Point::ORIGIN, INITIAL_VIEWPORT),
            offset: AbsoluteOffset {
                x: 0.0,
                y: last.y - 100.0,
            },
        });

        assert!(gallery.is_revealed(39));
    }

    #[test]
    fn items_without_thumbnail_are_unavailable() {
        let collection = MediaCollection::new(vec![MediaItem::new(
            "clip",
            "/g/clip.mp4",
            "",
            MediaKind::Video,
        )]);
        let mut gallery = State::default();
        let _ = gallery.set_collection(collection, urls());
        assert_eq!(gallery.thumbnail(0), Some(&ThumbnailState::Unavailable));
    }

    #[test]
    fn failed_load_only_affects_its_item() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(3), urls());
        let collection = gallery.collection().id();

        let (effect, _) = gallery.handle_message(Message::ThumbnailLoaded {
            collection,
            index: 1,
            url: "/g/m1.png".into(),
            result: Err(MediaError::NotFound),
        });

        assert!(matches!(effect, Effect::Warning(_)));
        assert_eq!(
            gallery.thumbnail(1),
            Some(&ThumbnailState::Failed(MediaError::NotFound))
        );
        assert_eq!(gallery.thumbnail(0), Some(&ThumbnailState::Loading));
        assert_eq!(gallery.thumbnail(2), Some(&ThumbnailState::Loading));
    }

    #[test]
    fn completions_for_a_previous_collection_are_dropped() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(3), urls());
        let old = gallery.collection().id();
        let _ = gallery.set_collection(mockups(3), urls());

        let (effect, _) = gallery.handle_message(Message::ThumbnailLoaded {
            collection: old,
            index: 0,
            url: "/g/m0.png".into(),
            result: Err(MediaError::NotFound),
        });

        assert_eq!(effect, Effect::None);
        assert_eq!(gallery.thumbnail(0), Some(&ThumbnailState::Loading));
    }

    #[test]
    fn retry_restarts_a_failed_load() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(2), urls());
        let collection = gallery.collection().id();
        let _ = gallery.handle_message(Message::ThumbnailLoaded {
            collection,
            index: 0,
            url: "/g/m0.png".into(),
            result: Err(MediaError::Network("reset".into())),
        });

        let _ = gallery.handle_message(Message::Retry(0));
        assert_eq!(gallery.thumbnail(0), Some(&ThumbnailState::Loading));
    }

    #[test]
    fn successful_loads_are_cached_by_url() {
        let mut gallery = State::default();
        let collection = mockups(1);
        let id = collection.id();
        let _ = gallery.set_collection(collection.clone(), urls());
        let data = ImageData::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let _ = gallery.handle_message(Message::ThumbnailLoaded {
            collection: id,
            index: 0,
            url: "/g/m0.png".into(),
            result: Ok(data),
        });

        // Same items under a new identity: served from the cache.
        let again = MediaCollection::new(collection.items().to_vec());
        let _ = gallery.set_collection(again, urls());
        assert!(matches!(gallery.thumbnail(0), Some(ThumbnailState::Ready(_))));
    }

    #[test]
    fn activation_opens_valid_indices_only() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(2), urls());

        let (effect, _) = gallery.handle_message(Message::Activate(1));
        assert_eq!(effect, Effect::Open(1));
        assert_eq!(gallery.selected(), Some(1));

        let (effect, _) = gallery.handle_message(Message::Activate(5));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn resize_recomputes_columns() {
        let mut gallery = State::default();
        let _ = gallery.set_collection(mockups(10), urls());
        assert_eq!(gallery.geometry().columns, 4);

        let _ = gallery.handle_message(Message::Resized(Size::new(500.0, 800.0)));
        assert_eq!(gallery.geometry().columns, 2);
    }

    #[test]
    fn disabled_lazy_loading_reveals_all() {
        let options = GalleryOptions {
            lazy: LazyLoadOptions {
                enabled: false,
                eager_count: 6,
            },
            ..GalleryOptions::default()
        };
        let mut gallery = State::new(options);
        let _ = gallery.set_collection(mockups(50), urls());
        assert!((0..50).all(|i| gallery.is_revealed(i)));
    }
}
