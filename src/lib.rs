pub mod decode;
pub mod entity;
pub mod enums;
pub mod error;
pub mod fetch;
pub mod flatten;
pub mod ingest;
pub mod timestamps;
pub mod translate;

pub use error::{Error, Result};

pub mod transit_realtime {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}
