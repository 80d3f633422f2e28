//! Request/response transcripts for RECORDING routes.
//!
//! Every recorded exchange produces two files in the route's response
//! directory:
//! - `<key>_req.dat` - the raw inbound request body
//! - `<key>_res.dat` - the upstream response text, UTF-8 encoded
//!
//! # Module Structure
//!
//! - `types` - transcript keys and file naming
//! - `store` - the recorder that forwards and writes the pair

mod store;
mod types;

pub use store::TranscriptRecorder;
pub use types::{Transcript, TranscriptKey, REQUEST_SUFFIX, RESPONSE_SUFFIX};
