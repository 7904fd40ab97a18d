//! Confetti is a frame-driven particle burst engine for decorative overlays.
//!
//! A caller hands a list of [`Content`] descriptors (shapes, images or text) to
//! [`ConfettiOverlay::emit`]. Each content is rasterized into a sprite, turned into an
//! [`EmissionCell`], and emitted from a line along the top edge of the host surface. The burst
//! holds full emission for the first half of its duration, eases the birth rate to zero over the
//! second half, fades the whole emitter out, and then invokes the caller's completion.
//!
//! # Driving a burst
//!
//! 1. **Attach**: [`ConfettiOverlay::attach`] adopts the host surface bounds.
//! 2. **Emit**: [`ConfettiOverlay::emit`] starts an independent burst and returns its [`BurstId`].
//! 3. **Tick**: the host calls [`ConfettiOverlay::tick`] from its frame clock.
//! 4. **Render** (optional): [`CpuOverlayRenderer::render`] composites the overlay into a
//!    premultiplied [`FrameRGBA`].
//!
//! Everything runs on the caller's thread; there are no background tasks. Particle randomness is
//! deterministic for a given [`OverlayConfig::seed`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod burst;
mod config;
mod content;
mod emission;
mod foundation;
mod render;
mod timeline;

pub use animation::ease::Ease;
pub use animation::keyframes::{Keyframe, Keyframes, Lerp};
pub use burst::controller::{BurstController, BurstId, BurstStatus, Completion};
pub use burst::overlay::{ConfettiOverlay, DEFAULT_DURATION_SECS};
pub use config::{DEFAULT_SEED, OverlayConfig};
pub use content::bitmap::{Bitmap, decode_bitmap};
pub use content::color::Color;
pub use content::model::{Content, DEFAULT_TEXT_SIZE, ShapeKind};
pub use content::raster::{ContentRasterizer, DEFAULT_SPRITE_SIZE, Sprite};
pub use emission::cell::{
    CellParams, DEFAULT_BIRTH_RATE, DEFAULT_LIFETIME, EmissionCell, build_cell,
};
pub use emission::emitter::{EmitterGeometry, ParticleEmitter};
pub use emission::particle::Particle;
pub use foundation::core::{Affine, BezPath, Fps, Point, Rect, Rgba8Premul, Size, SurfaceSize, Vec2};
pub use foundation::error::{ConfettiError, ConfettiResult};
pub use foundation::math::Rng64;
pub use render::backend::{FrameRGBA, RenderSettings};
pub use render::cpu::CpuOverlayRenderer;
pub use timeline::state::{
    EmissionTimeline, FADE_SECS, TimelineEvent, TimelinePhase, TimelineSample, TimelineStep,
};
