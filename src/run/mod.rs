mod driver;

pub use driver::RunDriver;
