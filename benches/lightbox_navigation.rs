// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for lightbox state transitions.
//!
//! Measures the pure state-machine cost of navigating and transforming,
//! without any asset loading.

use criterion::{criterion_group, criterion_main, Criterion};
use iced::{Point, Size};
use iced_folio::domain::media::{MediaCollection, MediaItem, MediaKind};
use iced_folio::media::ManifestUrls;
use iced_folio::ui::lightbox::{
    Action, Direction, FullscreenCapability, FullscreenError, LightboxController,
};
use std::hint::black_box;
use std::sync::Arc;

struct Headless;

impl FullscreenCapability for Headless {
    fn is_supported(&self) -> bool {
        true
    }

    fn request_fullscreen(&mut self) -> Result<(), FullscreenError> {
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), FullscreenError> {
        Ok(())
    }
}

fn controller(len: usize) -> LightboxController<Headless> {
    let items = (0..len)
        .map(|i| {
            MediaItem::new(
                format!("m{i}"),
                format!("/g/m{i}.png"),
                format!("/g/m{i}.png"),
                MediaKind::Image,
            )
        })
        .collect();
    let mut controller = LightboxController::new(Headless, false);
    let _ = controller.set_collection(MediaCollection::new(items), Arc::new(ManifestUrls::new("/g")));
    controller.set_frame(Size::new(1280.0, 800.0));
    controller
}

fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox_navigation");
    let mut lightbox = controller(500);
    let _ = lightbox.open(0);

    group.bench_function("navigate_forward", |b| {
        b.iter(|| black_box(lightbox.dispatch(Action::Navigate(Direction::Forward))));
    });

    group.bench_function("navigate_backward", |b| {
        b.iter(|| black_box(lightbox.dispatch(Action::Navigate(Direction::Backward))));
    });

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox_navigation");
    let mut lightbox = controller(1);
    let _ = lightbox.open(0);

    group.bench_function("zoom_rotate_drag", |b| {
        b.iter(|| {
            let _ = lightbox.dispatch(Action::ZoomIn);
            let _ = lightbox.dispatch(Action::Rotate);
            let _ = lightbox.dispatch(Action::DragStart(Point::new(100.0, 100.0)));
            let _ = lightbox.dispatch(Action::DragMove(Point::new(140.0, 90.0)));
            let _ = lightbox.dispatch(Action::DragEnd);
            black_box(lightbox.dispatch(Action::ResetZoom))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_navigate, bench_transform);
criterion_main!(benches);
