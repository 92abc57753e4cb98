//! Remote doctors API adapter
//!
//! [`HttpDoctorsSource`] is the production implementation of
//! [`DoctorsSource`]. Responses are decoded into [`DoctorRecord`] and
//! [`SlotRecord`] values and handed out through a [`RecordStream`].

pub mod http;
pub mod records;
pub mod source;
pub mod stream;

pub use http::HttpDoctorsSource;
pub use records::{parse_timestamp, DoctorRecord, SlotRecord, MAX_PAYLOAD_DEPTH};
pub use source::DoctorsSource;
pub use stream::{RecordStream, Step};
