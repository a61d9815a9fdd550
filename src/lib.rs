//! Scanline polygon fill in fixed point
//!
//! Vector paths of lines, quadratic and cubic curves are turned into pixel
//! coverage and written into a bitmap.
//!
//! # How does this work
//!
//! ```text
//!     path   = Path::new()  -- move_to, line_to, quad_to, cubic_to
//!     paint  = Paint::new(color)
//!     draw_path(pixmap, path, paint, transform, config)
//!       path.transform()
//!       EdgeBuilder::build()            -- 'EDGE BUILDER: Polygon|General'
//!         polygon: clip_line()          -- single contour of lines
//!         general: EdgeClipper          -- curves chopped and flattened
//!           Edge::from_line()           -- 26.6 end points, 16.16 slope
//!       Output: EdgeList sorted by first scanline
//!     Scan Conversion
//!       ScanConverter::advance()
//!         step(y)                       -- active edge table, sorted by x
//!         walk_spans()                  -- fill rule to [left, right)
//!       fill_path()     -> Blitter::blit_h
//!       fill_path_aa()  -> SuperSampler -> blit_h / blit_anti_h
//!     With a mask filter
//!       rasterize_to_mask()  -> MaskBlitter
//!       MaskFilter::filter_mask()       -- stipple or emboss
//!       Blitter::blit_mask()
//! ```
//!
//! # Example
//!
//!     use edgefill::*;
//!
//!     let mut pix = Pixmap::new(16, 16, PixelFormat::Argb32).unwrap();
//!     let path = Path::polygon(&[(2., 2.), (14., 2.), (8., 14.)]);
//!     let paint = Paint::new(Rgba8::new(255, 0, 0, 255)).anti_alias(false);
//!     draw_path(&mut pix, &path, &paint, &Transform::new(), &RasterConfig::default()).unwrap();
//!     assert_eq!(pix.get_argb32(8, 6), 0xFFFF_0000);
//!     assert_eq!(pix.get_argb32(0, 0), 0);
//!

pub mod errors;
pub mod config;
pub mod fdot6;
pub mod geometry;
pub mod transform;
pub mod path_storage;
pub mod clip;
pub mod edge;
pub mod edge_builder;
pub mod scan;
pub mod raster;
pub mod math;
pub mod color;
pub mod pixfmt;
pub mod buffer;
pub mod mask;
pub mod blur;
pub mod mask_filter;
pub mod blitter;
pub mod render;
pub mod ppm;

pub use errors::*;
pub use config::*;
pub use fdot6::*;
pub use geometry::*;
pub use transform::*;
pub use path_storage::*;
pub use clip::*;
pub use edge::*;
pub use edge_builder::*;
pub use scan::*;
pub use raster::*;
pub use math::*;
pub use color::*;
pub use pixfmt::*;
pub use buffer::*;
pub use mask::*;
pub use blur::*;
pub use mask_filter::*;
pub use blitter::*;
pub use render::*;
pub use ppm::*;
