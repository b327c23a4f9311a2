pub mod measurement_window;
pub mod price;
pub mod yield_report;

pub use measurement_window::MeasurementWindow;
pub use price::SpotPrice;
pub use yield_report::YieldReport;
