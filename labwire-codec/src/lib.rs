#![deny(missing_docs)]
//! Graph ⇄ manifest codec.
//!
//! Both directions are stateless free functions.
//!
//! - [`encode`] turns nodes and links into a [`Manifest`]; [`encode_yaml`]
//!   renders it as text and [`encode_json`] as the JSON value the relay
//!   forwards.
//! - [`decode`] parses manifest text into a [`Topology`]. It never fails:
//!   anything that is not a manifest decodes to an empty graph and a
//!   `tracing` warning. [`try_decode`] reports the failure instead.
//!
//! For graphs built from known kinds, `decode(encode(g))` reproduces every
//! node id, kind, image, `exec`, `cmd`, `mgmt-ipv4`, and both interface names
//! of every link. Positions and canvas handles are layout-only and do not
//! survive. Unknown manifest kinds decode as linux, so foreign kind strings
//! do not survive either.

mod decode;
mod encode;

pub use decode::{
    COLUMN_PITCH, GRID_COLUMNS, GRID_ORIGIN, ROW_PITCH, decode, from_manifest, grid_position,
    try_decode,
};
pub use encode::{encode, encode_json, encode_topology, encode_yaml, render_yaml};

pub use labwire_types::{CodecError, Manifest, Topology};
