//! Paginated report documents
//!
//! The report is laid out as a sequence of blocks on an abstract drawing
//! surface. `PdfSurface` writes a PDF; `MemorySurface` records every draw
//! call for inspection.

pub mod blocks;
pub mod layout;
pub mod pdf;
pub mod report;
pub mod surface;

pub use layout::{Block, PageChrome, PageGeometry, Paginator};
pub use pdf::{PdfSurface, PdfSurfaceFactory};
pub use report::{render_document, SECTION_TITLES};
pub use surface::{
    DrawOp, DrawingSurface, MemorySurface, MemorySurfaceFactory, SurfaceFactory, SurfaceLog,
};
