pub mod flow_io;
pub mod image_io;
