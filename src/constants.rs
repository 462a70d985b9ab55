//! Global constants for the polydraw application

/// Number of vertices a freshly added region gets
pub const DEFAULT_VERTEX_COUNT: usize = 4;

/// Maximum pixel distance at which a pointer press grabs a vertex
pub const DEFAULT_HIT_THRESHOLD: f64 = 40.0;

/// Upper bound (exclusive) of the random normalized coordinates of a new region
pub const INITIAL_VERTEX_SPREAD: f32 = 0.5;

/// Fractional digits kept when vertices are written to text
pub const VERTEX_DECIMALS: usize = 3;

/// File name of the persisted polygon data inside the results directory
pub const POLYGON_DATA_FILENAME: &str = "polygon_drawer.yaml";

/// Sub-directory of the results directory that receives rendered previews
pub const PREVIEW_DIR: &str = "previews";

/// Rendering defaults
pub mod style {
    /// Region outline, marker and label background color (RGB)
    pub const REGION_COLOR: [u8; 3] = [0, 255, 0];

    /// Label text color (RGB)
    pub const TEXT_COLOR: [u8; 3] = [0, 0, 0];

    /// Edge thickness in pixels
    pub const LINE_THICKNESS: u32 = 2;

    /// Radius of an idle vertex marker
    pub const MARKER_RADIUS: u32 = 4;

    /// Radius of the grabbed vertex marker
    pub const SELECTED_MARKER_RADIUS: u32 = 8;

    /// Label font size in pixels
    pub const LABEL_FONT_SIZE: f32 = 14.0;

    /// Label line height in pixels
    pub const LABEL_LINE_HEIGHT: f32 = 18.0;
}
