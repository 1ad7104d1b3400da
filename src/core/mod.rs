pub mod geometry;
pub mod labels;
pub mod linear_scale;
pub mod radial_scale;
pub mod range_fit;
pub mod types;

pub use geometry::{alias_pixel, angle_from_point, to_radians};
pub use labels::{LabelTemplate, build_value_labels, decimal_places};
pub use linear_scale::{
    LinearScale, LinearScaleOptions, LinearScaleUpdate, PlotArea, XLabelVisibility,
};
pub use radial_scale::{RadialScale, RadialScaleOptions, RadialScaleUpdate};
pub use range_fit::{
    MIN_STEPS, RangeFitOptions, RangeOverride, ScaleRange, calculate_scale_range,
};
pub use types::{PixelPoint, PolarOffset, Viewport};
