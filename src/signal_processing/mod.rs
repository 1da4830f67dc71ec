pub mod filter;
pub mod low_pass;

pub use filter::Filter;
pub use low_pass::LowPassFilter;
