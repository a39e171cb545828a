mod point;
mod vector;

pub use point::Point;
pub use vector::GeoVector;
