//! CHLP/1.0 framing.
//!
//! A message is a start line, a header block ended by a blank line, and a
//! body whose exact length is declared by the `Body-Size` header:
//!
//! ```text
//! GET /index.html CHLP/1.0\n        request line: METHOD RESOURCE VERSION
//! Body-Size: 0\n                    zero or more `Name: value` lines
//! \n                                end of headers
//!                                   Body-Size bytes of body
//! ```
//!
//! Responses use the same layout with a `CHLP/1.0 200 OK` status line.
//!
//! # Architecture
//!
//! - **`io`**: send-all / receive-exactly over a fragmenting stream
//! - **`line`**: byte-at-a-time line reader that never reads past `\n`
//! - **`headers`**: ordered, case-insensitive header list
//! - **`codec`**: step-wise decoding and full-message encoding, shared by
//!   the client and the server
//! - **`request`** / **`response`**: typed start lines and messages
//! - **`error`**: framing and transport errors

pub mod codec;
pub mod error;
pub mod headers;
pub mod io;
pub mod line;
pub mod request;
pub mod response;

pub use codec::{HeaderBlock, decode_request, decode_response, write_message};
pub use error::FrameError;
pub use headers::Headers;
pub use request::{Method, Request, RequestLine};
pub use response::{Response, ResponseMessage, StatusCode, StatusLine};

pub const PROTOCOL_VERSION: &str = "CHLP/1.0";
