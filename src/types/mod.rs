pub mod push;

pub use push::{Classification, InboundPush, PayloadData, PushMetadata, PushPriority, Route};
