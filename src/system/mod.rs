pub mod collector;
pub mod cpuinfo;
pub mod hwmon;
pub mod sensors;
pub mod snapshot;
pub mod source;
pub mod stat;
pub mod usage;
