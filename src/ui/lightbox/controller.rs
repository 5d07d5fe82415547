// SPDX-License-Identifier: MPL-2.0
//! Lightbox state machine.
//!
//! [`LightboxController`] exclusively owns the open [`ViewerState`]. Input
//! never mutates it directly: everything arrives as an [`Action`] through
//! [`LightboxController::dispatch`], which returns a [`Transition`]
//! describing what the host has to do next (notify, load, warn).
//!
//! Asset loads are tagged with a [`LoadTicket`]. Any index or page change
//! issues a new ticket before the load starts, so a late completion for a
//! previous item is recognized and discarded.

use super::fullscreen::FullscreenCapability;
use super::leaf::{DocumentViewer, VideoViewer};
use super::navigation::{IndexOutOfRange, NavigationCoordinator, NavigationEvent};
use crate::diagnostics::{WarningEvent, WarningType};
use crate::domain::media::{MediaCollection, MediaItem, MediaKind};
use crate::domain::ui::{RotationAngle, ViewMode, ZoomLevel};
use crate::error::MediaError;
use crate::media::{ImageData, ManifestUrls, UrlProvider};
use crate::ui::state::DragState;
use iced::{Point, Size, Vector};
use std::sync::Arc;

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Everything the lightbox can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    /// One wheel movement; the sign picks the direction.
    Wheel(f32),
    DragStart(Point),
    DragMove(Point),
    DragEnd,
    Rotate,
    SetViewMode(ViewMode),
    ToggleFullscreen,
    Navigate(Direction),
    Close,
    PreviousPage,
    NextPage,
    Retry,
}

/// Identifies one asset load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub index: usize,
    pub generation: u64,
}

/// What to fetch for a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadTarget {
    /// Decode the image at this location at full size.
    Image(String),
    /// Probe the clip and fetch its poster, if any.
    Video {
        source: String,
        poster: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub target: LoadTarget,
}

/// Successful result of a [`LoadRequest`].
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Image(ImageData),
    Video {
        poster: Option<ImageData>,
        byte_size: Option<u64>,
    },
}

/// Load state of the open asset.
#[derive(Debug, Clone)]
pub enum AssetState {
    Loading,
    Ready(ImageData),
    /// Video probed successfully but has no poster to show.
    NoPreview,
    Failed(MediaError),
}

/// Kind-specific part of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// Zoomable image surface.
    Visual,
    Video(VideoViewer),
    Document(DocumentViewer),
}

/// State of the open viewer. Exactly one exists while the lightbox is open.
#[derive(Debug, Clone)]
pub struct ViewerState {
    index: usize,
    kind: MediaKind,
    zoom: ZoomLevel,
    pan: Vector,
    rotation: RotationAngle,
    view_mode: ViewMode,
    is_fullscreen: bool,
    drag: DragState,
    ticket: LoadTicket,
    asset: AssetState,
    leaf: Leaf,
}

impl ViewerState {
    fn fresh(index: usize, item: &MediaItem, is_fullscreen: bool, urls: &dyn UrlProvider) -> Self {
        let kind = item.kind();
        let leaf = match kind {
            MediaKind::Video => Leaf::Video(VideoViewer::new(item.duration_secs())),
            MediaKind::Pdf => Leaf::Document(DocumentViewer::new(
                item.metadata().page_count,
                urls.page_url(item, 1).is_some(),
            )),
            _ => Leaf::Visual,
        };
        Self {
            index,
            kind,
            zoom: ZoomLevel::NEUTRAL,
            pan: Vector::ZERO,
            rotation: RotationAngle::ZERO,
            view_mode: ViewMode::Fit,
            is_fullscreen,
            drag: DragState::default(),
            ticket: LoadTicket {
                index,
                generation: 0,
            },
            asset: AssetState::Loading,
            leaf,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    #[must_use]
    pub fn pan(&self) -> Vector {
        self.pan
    }

    #[must_use]
    pub fn rotation(&self) -> RotationAngle {
        self.rotation
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging
    }

    #[must_use]
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    #[must_use]
    pub fn asset(&self) -> &AssetState {
        &self.asset
    }

    #[must_use]
    pub fn leaf(&self) -> &Leaf {
        &self.leaf
    }

    /// Natural size of the loaded asset, when it is an image.
    #[must_use]
    pub fn asset_size(&self) -> Option<Size> {
        match &self.asset {
            AssetState::Ready(data) => Some(Size::new(data.width as f32, data.height as f32)),
            _ => None,
        }
    }

    fn reset_transform(&mut self) {
        self.zoom = ZoomLevel::NEUTRAL;
        self.pan = Vector::ZERO;
        self.drag.stop();
    }
}

/// Outcome of one state machine step.
#[derive(Debug, Clone, Default)]
pub struct Transition {
    /// Viewer state changed and must be redrawn.
    pub changed: bool,
    pub event: Option<NavigationEvent>,
    /// Load the host must start.
    pub load: Option<LoadRequest>,
    pub warning: Option<WarningEvent>,
}

impl Transition {
    fn unchanged() -> Self {
        Self::default()
    }

    fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    fn warning(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning: Some(WarningEvent::new(warning_type, message)),
            ..Self::default()
        }
    }
}

/// Size an asset of natural size `asset` is drawn at inside `frame`.
///
/// `Fit` letterboxes, `Fill` covers, `Actual` uses one asset pixel per
/// logical pixel; the zoom factor multiplies all three. At 90° and 270° the
/// asset's sides trade places.
#[must_use]
pub fn display_size(
    asset: Size,
    frame: Size,
    zoom: ZoomLevel,
    view_mode: ViewMode,
    rotation: RotationAngle,
) -> Size {
    let oriented = if rotation.swaps_dimensions() {
        Size::new(asset.height, asset.width)
    } else {
        asset
    };
    if oriented.width <= 0.0 || oriented.height <= 0.0 {
        return Size::ZERO;
    }
    let scale_x = frame.width / oriented.width;
    let scale_y = frame.height / oriented.height;
    let base = match view_mode {
        ViewMode::Fit => scale_x.min(scale_y),
        ViewMode::Fill => scale_x.max(scale_y),
        ViewMode::Actual => 1.0,
    };
    let scale = if base.is_finite() && base > 0.0 { base } else { 1.0 } * zoom.value();
    Size::new(oriented.width * scale, oriented.height * scale)
}

/// Largest pan offset per axis that keeps the asset covering the frame.
#[must_use]
pub fn pan_limit(display: Size, frame: Size) -> Vector {
    Vector::new(
        ((display.width - frame.width) / 2.0).max(0.0),
        ((display.height - frame.height) / 2.0).max(0.0),
    )
}

pub struct LightboxController<F> {
    navigation: NavigationCoordinator,
    viewer: Option<ViewerState>,
    fullscreen: F,
    collection: MediaCollection,
    urls: Arc<dyn UrlProvider + Send + Sync>,
    generation: u64,
    frame: Size,
}

impl<F: std::fmt::Debug> std::fmt::Debug for LightboxController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightboxController")
            .field("navigation", &self.navigation)
            .field("viewer", &self.viewer)
            .field("fullscreen", &self.fullscreen)
            .field("generation", &self.generation)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl<F: FullscreenCapability> LightboxController<F> {
    pub fn new(fullscreen: F, remember_last_index: bool) -> Self {
        Self {
            navigation: NavigationCoordinator::new(0, remember_last_index),
            viewer: None,
            fullscreen,
            collection: MediaCollection::empty(),
            urls: Arc::new(ManifestUrls::default()),
            generation: 0,
            frame: Size::new(1280.0, 800.0),
        }
    }

    /// Switches to another collection. An open viewer is closed: its index
    /// means nothing in the new list.
    pub fn set_collection(
        &mut self,
        collection: MediaCollection,
        urls: Arc<dyn UrlProvider + Send + Sync>,
    ) -> Transition {
        let transition = self.close();
        self.navigation.set_item_count(collection.len());
        self.collection = collection;
        self.urls = urls;
        transition
    }

    /// Opens the viewer at `index`, replacing any open viewer.
    pub fn open(&mut self, index: usize) -> Result<Transition, IndexOutOfRange> {
        let index = self.navigation.open(index)?;
        Ok(self.show(index))
    }

    /// Opens at the remembered index, or at `fallback`.
    pub fn reopen(&mut self, fallback: usize) -> Result<Transition, IndexOutOfRange> {
        let index = self.navigation.reopen(fallback)?;
        Ok(self.show(index))
    }

    /// Applies one action. Actions on a closed lightbox do nothing.
    pub fn dispatch(&mut self, action: Action) -> Transition {
        if self.viewer.is_none() {
            return Transition::unchanged();
        }
        match action {
            Action::ZoomIn => self.transform(|v| v.zoom = v.zoom.zoom_in()),
            Action::ZoomOut => self.transform(|v| v.zoom = v.zoom.zoom_out()),
            Action::ResetZoom => self.transform(ViewerState::reset_transform),
            Action::Wheel(delta) => {
                if !self.kind().is_some_and(MediaKind::supports_wheel_zoom) {
                    return Transition::unchanged();
                }
                self.transform(|v| v.zoom = v.zoom.wheel(delta))
            }
            Action::DragStart(position) => self.drag_start(position),
            Action::DragMove(position) => self.drag_move(position),
            Action::DragEnd => match self.viewer.as_mut() {
                Some(viewer) if viewer.drag.is_dragging => {
                    viewer.drag.stop();
                    Transition::changed()
                }
                _ => Transition::unchanged(),
            },
            Action::Rotate => self.transform(|v| v.rotation = v.rotation.rotate_clockwise()),
            Action::SetViewMode(mode) => self.transform(|v| {
                v.view_mode = mode;
                v.reset_transform();
            }),
            Action::ToggleFullscreen => self.toggle_fullscreen(),
            Action::Navigate(direction) => {
                let event = match direction {
                    Direction::Forward => self.navigation.next(),
                    Direction::Backward => self.navigation.prev(),
                };
                match event {
                    Some(event @ (NavigationEvent::Next(index) | NavigationEvent::Prev(index))) => {
                        let mut transition = self.show(index);
                        transition.event = Some(event);
                        transition
                    }
                    _ => Transition::unchanged(),
                }
            }
            Action::Close => self.close(),
            Action::PreviousPage | Action::NextPage => self.turn_page(action == Action::NextPage),
            Action::Retry => match self.viewer.as_ref().map(|v| &v.asset) {
                Some(AssetState::Failed(err)) if *err != MediaError::InlineUnsupported => {
                    let mut transition = Transition::changed();
                    transition.load = self.begin_load();
                    transition
                }
                _ => Transition::unchanged(),
            },
        }
    }

    /// Applies a finished load if its ticket is still current.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<LoadOutcome, MediaError>,
    ) -> Transition {
        let Some(viewer) = self.viewer.as_mut().filter(|v| v.ticket == ticket) else {
            return Transition::warning(
                WarningType::StaleLoadDiscarded,
                format!(
                    "load for item {} (generation {}) arrived after the viewer moved on",
                    ticket.index, ticket.generation
                ),
            );
        };

        let mut transition = Transition::changed();
        match result {
            Ok(LoadOutcome::Image(data)) => viewer.asset = AssetState::Ready(data),
            Ok(LoadOutcome::Video { poster, byte_size }) => {
                if let Leaf::Video(video) = &mut viewer.leaf {
                    video.byte_size = byte_size;
                }
                viewer.asset = poster.map_or(AssetState::NoPreview, AssetState::Ready);
            }
            Err(err) => {
                transition.warning = Some(WarningEvent::new(
                    WarningType::AssetLoadFailed,
                    format!("item {}: {err}", ticket.index),
                ));
                viewer.asset = AssetState::Failed(err);
            }
        }
        transition
    }

    /// Records the size of the area the asset is drawn in.
    pub fn set_frame(&mut self, frame: Size) {
        self.frame = frame;
        self.clamp_pan();
    }

    #[must_use]
    pub fn frame(&self) -> Size {
        self.frame
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&ViewerState> {
        self.viewer.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.viewer.is_some()
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.viewer
            .as_ref()
            .and_then(|v| self.collection.get(v.index))
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationCoordinator {
        &self.navigation
    }

    #[must_use]
    pub fn collection(&self) -> &MediaCollection {
        &self.collection
    }

    pub fn fullscreen(&self) -> &F {
        &self.fullscreen
    }

    pub fn fullscreen_mut(&mut self) -> &mut F {
        &mut self.fullscreen
    }

    /// Display size of the loaded image in the current frame.
    #[must_use]
    pub fn display_size(&self) -> Option<Size> {
        let viewer = self.viewer.as_ref()?;
        let asset = viewer.asset_size()?;
        Some(display_size(
            asset,
            self.frame,
            viewer.zoom,
            viewer.view_mode,
            viewer.rotation,
        ))
    }

    /// Document page and the location of its image, for the open document.
    #[must_use]
    pub fn page_location(&self) -> Option<(u32, String)> {
        let viewer = self.viewer.as_ref()?;
        let Leaf::Document(doc) = &viewer.leaf else {
            return None;
        };
        let item = self.collection.get(viewer.index)?;
        let url = self.urls.page_url(item, doc.page())?;
        Some((doc.page(), url))
    }

    fn kind(&self) -> Option<MediaKind> {
        self.viewer.as_ref().map(|v| v.kind)
    }

    /// Builds a fresh viewer for `index`, keeping fullscreen, and loads it.
    fn show(&mut self, index: usize) -> Transition {
        let Some(item) = self.collection.get(index) else {
            return Transition::unchanged();
        };
        let is_fullscreen = self.viewer.as_ref().is_some_and(|v| v.is_fullscreen);
        self.viewer = Some(ViewerState::fresh(
            index,
            item,
            is_fullscreen,
            self.urls.as_ref(),
        ));
        let mut transition = Transition::changed();
        transition.load = self.begin_load();
        transition
    }

    /// Issues a new ticket for the open viewer and describes what to fetch.
    fn begin_load(&mut self) -> Option<LoadRequest> {
        self.generation += 1;
        let generation = self.generation;
        let page_location = self.page_location();
        let viewer = self.viewer.as_mut()?;
        let item = self.collection.get(viewer.index)?;

        viewer.ticket = LoadTicket {
            index: viewer.index,
            generation,
        };
        viewer.asset = AssetState::Loading;

        let target = match &viewer.leaf {
            Leaf::Visual => LoadTarget::Image(item.source_url().to_string()),
            Leaf::Video(_) => LoadTarget::Video {
                source: item.source_url().to_string(),
                poster: Some(item.thumbnail_url().to_string()).filter(|url| !url.is_empty()),
            },
            Leaf::Document(_) => match page_location {
                Some((_, url)) => LoadTarget::Image(url),
                None => {
                    viewer.asset = AssetState::Failed(MediaError::InlineUnsupported);
                    return None;
                }
            },
        };
        Some(LoadRequest {
            ticket: viewer.ticket,
            target,
        })
    }

    /// Runs a transform on visual kinds only, then re-validates pan.
    fn transform(&mut self, apply: impl FnOnce(&mut ViewerState)) -> Transition {
        let Some(viewer) = self.viewer.as_mut() else {
            return Transition::unchanged();
        };
        if !viewer.kind.supports_transform() {
            return Transition::unchanged();
        }
        apply(viewer);
        if !viewer.zoom.is_magnified() {
            viewer.pan = Vector::ZERO;
            viewer.drag.stop();
        }
        self.clamp_pan();
        Transition::changed()
    }

    fn drag_start(&mut self, position: Point) -> Transition {
        match self.viewer.as_mut() {
            Some(viewer) if viewer.kind.supports_pan() && viewer.zoom.is_magnified() => {
                viewer.drag.start(position, viewer.pan);
                Transition::changed()
            }
            _ => Transition::unchanged(),
        }
    }

    fn drag_move(&mut self, position: Point) -> Transition {
        let Some(viewer) = self.viewer.as_mut() else {
            return Transition::unchanged();
        };
        let Some(pan) = viewer.drag.pan_at(position) else {
            return Transition::unchanged();
        };
        viewer.pan = pan;
        self.clamp_pan();
        Transition::changed()
    }

    fn clamp_pan(&mut self) {
        let Some(limit) = self
            .display_size()
            .map(|display| pan_limit(display, self.frame))
        else {
            return;
        };
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.pan = Vector::new(
                viewer.pan.x.clamp(-limit.x, limit.x),
                viewer.pan.y.clamp(-limit.y, limit.y),
            );
        }
    }

    fn toggle_fullscreen(&mut self) -> Transition {
        if !self.fullscreen.is_supported() {
            return Transition::warning(
                WarningType::FullscreenUnavailable,
                "fullscreen is not supported here",
            );
        }
        let Some(viewer) = self.viewer.as_mut() else {
            return Transition::unchanged();
        };
        let result = if viewer.is_fullscreen {
            self.fullscreen.exit_fullscreen()
        } else {
            self.fullscreen.request_fullscreen()
        };
        match result {
            Ok(()) => {
                viewer.is_fullscreen = !viewer.is_fullscreen;
                Transition::changed()
            }
            Err(err) => Transition::warning(WarningType::FullscreenFailed, err.to_string()),
        }
    }

    fn turn_page(&mut self, forward: bool) -> Transition {
        let turned = match self.viewer.as_mut().map(|v| &mut v.leaf) {
            Some(Leaf::Document(doc)) => {
                if forward {
                    doc.next_page()
                } else {
                    doc.previous_page()
                }
            }
            _ => false,
        };
        if !turned {
            return Transition::unchanged();
        }
        let mut transition = Transition::changed();
        transition.load = self.begin_load();
        transition
    }

    /// Closes the viewer, leaving fullscreen first. Idempotent.
    fn close(&mut self) -> Transition {
        let Some(event) = self.navigation.close() else {
            self.viewer = None;
            return Transition::unchanged();
        };
        let mut transition = Transition::changed();
        transition.event = Some(event);
        if let Some(viewer) = self.viewer.take() {
            if viewer.is_fullscreen {
                if let Err(err) = self.fullscreen.exit_fullscreen() {
                    transition.warning =
                        Some(WarningEvent::new(WarningType::FullscreenFailed, err.to_string()));
                }
            }
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaMetadata;
    use crate::ui::lightbox::fullscreen::FullscreenError;

    #[derive(Debug, Default)]
    struct FakeFullscreen {
        unsupported: bool,
        fail: bool,
        requests: usize,
        exits: usize,
    }

    impl FullscreenCapability for FakeFullscreen {
        fn is_supported(&self) -> bool {
            !self.unsupported
        }

        fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
            if self.fail {
                return Err(FullscreenError("denied".into()));
            }
            self.requests += 1;
            Ok(())
        }

        fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
            if self.fail {
                return Err(FullscreenError("denied".into()));
            }
            self.exits += 1;
            Ok(())
        }
    }

    fn images(count: usize) -> MediaCollection {
        MediaCollection::new(
            (0..count)
                .map(|i| {
                    MediaItem::new(
                        format!("i{i}"),
                        format!("/g/i{i}.png"),
                        format!("/g/i{i}.png"),
                        MediaKind::Image,
                    )
                })
                .collect(),
        )
    }

    fn controller(collection: MediaCollection) -> LightboxController<FakeFullscreen> {
        let mut controller = LightboxController::new(FakeFullscreen::default(), false);
        let _ = controller.set_collection(collection, Arc::new(ManifestUrls::new("/g")));
        controller.set_frame(Size::new(1000.0, 1000.0));
        controller
    }

    fn ready(controller: &mut LightboxController<FakeFullscreen>, width: u32, height: u32) {
        let ticket = controller.viewer().expect("open").ticket();
        let data = ImageData::from_rgba(width, height, vec![0; (width * height * 4) as usize]);
        let _ = controller.complete_load(ticket, Ok(LoadOutcome::Image(data)));
    }

    #[test]
    fn open_creates_default_state_and_requests_load() {
        let mut lightbox = controller(images(5));
        let transition = lightbox.open(3).expect("open");

        let viewer = lightbox.viewer().expect("open");
        assert_eq!(viewer.index(), 3);
        assert_eq!(viewer.zoom(), ZoomLevel::NEUTRAL);
        assert_eq!(viewer.view_mode(), ViewMode::Fit);
        assert_eq!(
            transition.load.map(|l| l.target),
            Some(LoadTarget::Image("/g/i3.png".into()))
        );
    }

    #[test]
    fn open_out_of_range_fails() {
        let mut lightbox = controller(images(2));
        assert!(lightbox.open(2).is_err());
        assert!(!lightbox.is_open());
    }

    #[test]
    fn navigation_resets_transform_state() {
        let mut lightbox = controller(images(5));
        lightbox.open(3).expect("open");
        ready(&mut lightbox, 100, 100);
        lightbox.dispatch(Action::ZoomIn);
        lightbox.dispatch(Action::Rotate);
        lightbox.dispatch(Action::SetViewMode(ViewMode::Fill));
        lightbox.dispatch(Action::ZoomIn);

        let first = lightbox.dispatch(Action::Navigate(Direction::Forward));
        assert_eq!(first.event, Some(NavigationEvent::Next(4)));
        let viewer = lightbox.viewer().expect("open");
        assert_eq!(viewer.zoom(), ZoomLevel::NEUTRAL);
        assert_eq!(viewer.pan(), Vector::ZERO);
        assert_eq!(viewer.rotation(), RotationAngle::ZERO);
        assert_eq!(viewer.view_mode(), ViewMode::Fit);

        let second = lightbox.dispatch(Action::Navigate(Direction::Forward));
        assert_eq!(second.event, Some(NavigationEvent::Next(0)));
    }

    #[test]
    fn zoom_saturates() {
        let mut lightbox = controller(images(1));
        lightbox.open(0).expect("open");
        for _ in 0..10 {
            lightbox.dispatch(Action::ZoomIn);
        }
        assert_eq!(lightbox.viewer().expect("open").zoom().value(), 10.0);
        for _ in 0..20 {
            lightbox.dispatch(Action::ZoomOut);
        }
        assert_eq!(lightbox.viewer().expect("open").zoom().value(), 0.1);
    }

    #[test]
    fn drag_requires_magnification() {
        let mut lightbox = controller(images(1));
        lightbox.open(0).expect("open");
        ready(&mut lightbox, 1000, 1000);

        lightbox.dispatch(Action::DragStart(Point::new(10.0, 10.0)));
        assert!(!lightbox.viewer().expect("open").is_dragging());

        lightbox.dispatch(Action::ZoomIn);
        lightbox.dispatch(Action::DragStart(Point::new(10.0, 10.0)));
        assert!(lightbox.viewer().expect("open").is_dragging());
        lightbox.dispatch(Action::DragMove(Point::new(60.0, 30.0)));
        assert_eq!(lightbox.viewer().expect("open").pan(), Vector::new(50.0, 20.0));
        lightbox.dispatch(Action::DragEnd);
        assert!(!lightbox.viewer().expect("open").is_dragging());
    }

    #[test]
    fn pan_is_clamped_to_overflow() {
        let mut lightbox = controller(images(1));
        lightbox.open(0).expect("open");
        ready(&mut lightbox, 1000, 1000);
        lightbox.dispatch(Action::ZoomIn); // 1500px in a 1000px frame

        lightbox.dispatch(Action::DragStart(Point::ORIGIN));
        lightbox.dispatch(Action::DragMove(Point::new(900.0, -900.0)));
        assert_eq!(lightbox.viewer().expect("open").pan(), Vector::new(250.0, -250.0));
    }

    #[test]
    fn zooming_back_to_neutral_drops_pan() {
        let mut lightbox = controller(images(1));
        lightbox.open(0).expect("open");
        ready(&mut lightbox, 1000, 1000);
        lightbox.dispatch(Action::ZoomIn);
        lightbox.dispatch(Action::DragStart(Point::ORIGIN));
        lightbox.dispatch(Action::DragMove(Point::new(100.0, 0.0)));

        lightbox.dispatch(Action::ZoomOut);
        let viewer = lightbox.viewer().expect("open");
        assert_eq!(viewer.pan(), Vector::ZERO);
        assert!(!viewer.is_dragging());
    }

    #[test]
    fn wheel_is_gated_by_kind() {
        let collection = MediaCollection::new(vec![
            MediaItem::new("m", "/g/m.png", "/g/m.png", MediaKind::MobileMockup),
            MediaItem::new("d", "/g/d.png", "/g/d.png", MediaKind::DesktopMockup),
        ]);
        let mut lightbox = controller(collection);
        lightbox.open(0).expect("open");
        assert!(!lightbox.dispatch(Action::Wheel(1.0)).changed);
        assert!(lightbox.dispatch(Action::ZoomIn).changed);

        lightbox.open(1).expect("open");
        lightbox.dispatch(Action::Wheel(1.0));
        assert!((lightbox.viewer().expect("open").zoom().value() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn video_ignores_transforms() {
        let collection = MediaCollection::new(vec![MediaItem::new(
            "v",
            "/g/v.mp4",
            "",
            MediaKind::Video,
        )]);
        let mut lightbox = controller(collection);
        let transition = lightbox.open(0).expect("open");
        assert_eq!(
            transition.load.map(|l| l.target),
            Some(LoadTarget::Video {
                source: "/g/v.mp4".into(),
                poster: None
            })
        );

        for action in [Action::ZoomIn, Action::Rotate, Action::SetViewMode(ViewMode::Fill)] {
            assert!(!lightbox.dispatch(action).changed);
        }
        let viewer = lightbox.viewer().expect("open");
        assert_eq!(viewer.zoom(), ZoomLevel::NEUTRAL);
        assert_eq!(viewer.rotation(), RotationAngle::ZERO);
    }

    #[test]
    fn rotation_cycles() {
        let mut lightbox = controller(images(1));
        lightbox.open(0).expect("open");
        for _ in 0..5 {
            lightbox.dispatch(Action::Rotate);
        }
        assert_eq!(lightbox.viewer().expect("open").rotation().degrees(), 90);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut lightbox = controller(images(3));
        lightbox.open(0).expect("open");
        let stale = lightbox.viewer().expect("open").ticket();
        lightbox.dispatch(Action::Navigate(Direction::Forward));

        let data = ImageData::from_rgba(1, 1, vec![0; 4]);
        let transition = lightbox.complete_load(stale, Ok(LoadOutcome::Image(data)));

        assert!(!transition.changed);
        assert_eq!(
            transition.warning.map(|w| w.warning_type),
            Some(WarningType::StaleLoadDiscarded)
        );
        assert!(matches!(
            lightbox.viewer().expect("open").asset(),
            AssetState::Loading
        ));
    }

    #[test]
    fn failed_load_offers_retry() {
        let mut lightbox = controller(images(1));
        lightbox.open(0).expect("open");
        let ticket = lightbox.viewer().expect("open").ticket();
        let transition =
            lightbox.complete_load(ticket, Err(MediaError::Network("reset".into())));
        assert!(transition.warning.is_some());

        let retry = lightbox.dispatch(Action::Retry);
        let load = retry.load.expect("reload");
        assert_ne!(load.ticket, ticket);
        assert!(matches!(
            lightbox.viewer().expect("open").asset(),
            AssetState::Loading
        ));
    }

    #[test]
    fn fullscreen_toggles_and_persists_across_navigation() {
        let mut lightbox = controller(images(3));
        lightbox.open(0).expect("open");
        assert!(lightbox.dispatch(Action::ToggleFullscreen).changed);
        lightbox.dispatch(Action::Navigate(Direction::Backward));
        assert!(lightbox.viewer().expect("open").is_fullscreen());

        lightbox.dispatch(Action::Close);
        assert_eq!(lightbox.fullscreen().exits, 1);
    }

    #[test]
    fn fullscreen_failure_leaves_state_unchanged() {
        let mut lightbox = LightboxController::new(
            FakeFullscreen {
                fail: true,
                ..FakeFullscreen::default()
            },
            false,
        );
        let _ = lightbox.set_collection(images(2), Arc::new(ManifestUrls::new("/g")));
        lightbox.open(0).expect("open");

        let transition = lightbox.dispatch(Action::ToggleFullscreen);
        assert!(!transition.changed);
        assert_eq!(
            transition.warning.map(|w| w.warning_type),
            Some(WarningType::FullscreenFailed)
        );
        assert!(!lightbox.viewer().expect("open").is_fullscreen());
    }

    #[test]
    fn unsupported_fullscreen_warns() {
        let mut lightbox = LightboxController::new(
            FakeFullscreen {
                unsupported: true,
                ..FakeFullscreen::default()
            },
            false,
        );
        let _ = lightbox.set_collection(images(1), Arc::new(ManifestUrls::new("/g")));
        lightbox.open(0).expect("open");
        let transition = lightbox.dispatch(Action::ToggleFullscreen);
        assert_eq!(
            transition.warning.map(|w| w.warning_type),
            Some(WarningType::FullscreenUnavailable)
        );
    }

    #[test]
    fn close_is_idempotent() {
        let mut lightbox = controller(images(2));
        lightbox.open(1).expect("open");
        assert_eq!(
            lightbox.dispatch(Action::Close).event,
            Some(NavigationEvent::Closed(1))
        );
        let again = lightbox.dispatch(Action::Close);
        assert!(!again.changed);
        assert_eq!(again.event, None);
    }

    #[test]
    fn document_without_pages_is_inline_unsupported() {
        let collection = MediaCollection::new(vec![MediaItem::new(
            "brief",
            "/g/brief.pdf",
            "",
            MediaKind::Pdf,
        )]);
        let mut lightbox = controller(collection);
        let transition = lightbox.open(0).expect("open");

        assert!(transition.load.is_none());
        assert!(matches!(
            lightbox.viewer().expect("open").asset(),
            AssetState::Failed(MediaError::InlineUnsupported)
        ));
        assert!(lightbox.dispatch(Action::Retry).load.is_none());
    }

    #[test]
    fn document_pages_reload_with_new_tickets() {
        let mut urls = ManifestUrls::new("/g");
        urls.insert_page_template("brief", "pages/{page}.png".into());
        let collection = MediaCollection::new(vec![MediaItem::new(
            "brief",
            "/g/brief.pdf",
            "",
            MediaKind::Pdf,
        )
        .with_metadata(MediaMetadata {
            page_count: Some(2),
            ..MediaMetadata::default()
        })]);
        let mut lightbox = LightboxController::new(FakeFullscreen::default(), false);
        let _ = lightbox.set_collection(collection, Arc::new(urls));

        let first = lightbox.open(0).expect("open").load.expect("page 1");
        let second = lightbox.dispatch(Action::NextPage).load.expect("page 2");
        assert_ne!(first.ticket, second.ticket);
        assert!(matches!(second.target, LoadTarget::Image(ref url) if url.ends_with("2.png")));
        assert!(lightbox.dispatch(Action::NextPage).load.is_none());
    }

    #[test]
    fn display_size_follows_view_mode_and_rotation() {
        let asset = Size::new(400.0, 200.0);
        let frame = Size::new(800.0, 800.0);
        let zoom = ZoomLevel::NEUTRAL;
        let rot = RotationAngle::ZERO;

        assert_eq!(display_size(asset, frame, zoom, ViewMode::Fit, rot), Size::new(800.0, 400.0));
        assert_eq!(display_size(asset, frame, zoom, ViewMode::Fill, rot), Size::new(1600.0, 800.0));
        assert_eq!(display_size(asset, frame, zoom, ViewMode::Actual, rot), asset);
        assert_eq!(
            display_size(asset, frame, zoom, ViewMode::Actual, rot.rotate_clockwise()),
            Size::new(200.0, 400.0)
        );
    }
}
