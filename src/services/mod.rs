pub mod device_driver;
pub mod filter_service;
pub mod viewer;
pub mod warn_writer;

pub use device_driver::DeviceDriver;
pub use filter_service::FilterService;
pub use warn_writer::WarnWriter;
