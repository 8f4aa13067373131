pub mod nameservers;

pub use nameservers::{load_nameservers, parse_nameservers};
