//! Query node wire format
//!
//! Field order: name, subtype, exclusive, filter count, each filter (tag then
//! body), carrier presence flag, carrier, and finally the complement as a
//! nested node.

use std::io::{Read, Write};

use tracing::debug;

use crate::interpreter::types::{LineCol, Node, QueryNode};
use crate::serial::codec::{BinReader, BinWriter};
use crate::serial::decode::{DecodeFlow, ForwardRef};
use crate::serial::encode::EncodeFlow;
use crate::serial::error::{SerialError, SerialResult};
use crate::vocabulary::{Carrier, Filter, Query};

/// Step 0 writes the query fields and yields the complement
pub fn serialize<'a, W: Write>(
    node: &'a QueryNode,
    step: usize,
    output: &mut BinWriter<W>,
) -> SerialResult<EncodeFlow<'a>> {
    if step > 0 {
        return Ok(EncodeFlow::Done);
    }

    let query = &node.query;
    output.write_opt_str(query.name())?;
    output.write_opt_str(query.subtype())?;
    output.write_bool(query.is_exclusive())?;
    output.write_len(query.filter_count())?;
    for filter in query.filters() {
        filter.write_to(output)?;
    }

    match query.carrier() {
        Some(carrier) => {
            output.write_bool(true)?;
            carrier.write_to(output)?;
        }
        None => output.write_bool(false)?,
    }

    Ok(EncodeFlow::Child(query.complement()))
}

/// Rebuilds a query node; suspends once to have its complement decoded
#[derive(Debug)]
pub struct QueryReader {
    location: LineCol,
    pending: Option<Query>,
}

impl QueryReader {
    pub fn new(location: LineCol) -> Self {
        Self {
            location,
            pending: None,
        }
    }

    pub fn resume<R: Read>(
        &mut self,
        input: &mut BinReader<R>,
        reply: Option<ForwardRef>,
    ) -> SerialResult<DecodeFlow> {
        match self.pending.take() {
            None => {
                self.pending = Some(read_fields(input)?);
                Ok(DecodeFlow::Request)
            }
            Some(mut query) => {
                let complement = reply
                    .ok_or(SerialError::Protocol("query resumed without its complement"))?
                    .into_result();
                query.set_complement(complement);
                Ok(DecodeFlow::Complete(Node::Query(QueryNode {
                    location: self.location,
                    query,
                })))
            }
        }
    }
}

fn read_fields<R: Read>(input: &mut BinReader<R>) -> SerialResult<Query> {
    let name = input.read_opt_str()?;
    let subtype = input.read_opt_str()?;
    let exclusive = input.read_bool()?;
    let mut query = Query::from_fields(name, subtype, exclusive);

    let filter_count = input.read_len()?;
    for _ in 0..filter_count {
        let tag = input.read_u16()?;
        match Filter::read_from(tag, input)? {
            Some(filter) => query.push_filter(filter),
            None => debug!(tag, "skipping filter with unknown tag"),
        }
    }

    if input.read_bool()? {
        query.set_carrier(Carrier::read_from(input)?);
    }

    Ok(query)
}
