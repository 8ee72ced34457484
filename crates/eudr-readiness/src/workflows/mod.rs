pub mod assessment;
pub mod dds;
