//! trackplot core library
//!
//! Panel geometry, track row packing, glyph rendering and image-map output for
//! linear feature maps.

pub mod color;
pub mod config;
pub mod coords;
pub mod error;
pub mod feature;
pub mod glyph;
pub mod imagemap;
pub mod io;
pub mod panel;
pub mod ruler;
pub mod surface;
pub mod track;

// Re-export commonly used types
pub use color::Rgba;
pub use config::LayoutConfig;
pub use coords::{DisplayWindow, Position};
pub use error::{Result, TrackplotError};
pub use feature::{Feature, PixelRange, PlacedFeature, Segment, Strand};
pub use glyph::{FeatureContext, Glyph, GlyphKind};
pub use imagemap::{ImageMap, MapRegion};
pub use panel::{Composition, Panel, PanelParams, RenderSummary, RenderedImage};
pub use ruler::Ruler;
pub use surface::{PixmapSurface, ShapePath, Surface};
pub use track::Track;

/// Version information for the trackplot core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
