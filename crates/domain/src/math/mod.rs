pub mod price_geometry;
