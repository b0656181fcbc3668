//! Per-node serializers and readers
//!
//! A serializer writes its node's fields and yields child requests; a reader
//! reads the fields and yields a request for each child it expects. The driving
//! encoder and decoder in `encode`/`decode` service those requests.

mod query;
mod sequence;
mod text;

pub use query::QueryReader;
pub use sequence::SequenceReader;
pub use text::TextReader;

pub(crate) use query::serialize as serialize_query;
pub(crate) use sequence::serialize as serialize_sequence;
pub(crate) use text::serialize as serialize_text;
