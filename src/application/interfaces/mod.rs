/// Response format accessors shared by the REST and SOAP clients
pub mod format;

pub use format::ResponseFormat;
