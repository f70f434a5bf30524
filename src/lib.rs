//! Integer arithmetic coding after Amir Said's "Introduction to Arithmetic
//! Coding - Theory and Practice" (Algorithms 22-29).
//!
//! [`encode`]/[`decode`] compress and decompress a sequence of source
//! symbols given a model of the source distribution (a CDF). The encoded
//! stream is self-delimiting: the decoder recovers the message length from
//! an implicit end-of-message symbol, with no length prefix.
//!
//! # Examples
//!
//! ```
//! use arithcode::{decode, encode};
//! use arithcode::width::U8;
//!
//! # fn main() -> Result<(), arithcode::ArithCodeError> {
//! let cdf = vec![0.0f32, 0.2, 0.7, 0.9, 1.0];
//! let symbols: Vec<u8> = vec![2, 1, 0, 0, 1, 3];
//!
//! let compressed = encode::<U8, u8>(&symbols, &cdf)?;
//! let decompressed: Vec<u8> = decode::<U8, u8>(&compressed, &cdf)?;
//! assert_eq!(decompressed, symbols);
//! # Ok(())
//! # }
//! ```
//!
//! For an output alphabet that isn't a power of two (printable ASCII, for
//! instance), use [`vencode`]/[`vdecode`]:
//!
//! ```
//! use arithcode::{vdecode, vencode};
//!
//! # fn main() -> Result<(), arithcode::ArithCodeError> {
//! let cdf = vec![0.0f32, 0.2, 0.7, 0.9, 1.0];
//! let symbols: Vec<u8> = vec![2, 1, 0, 0, 1, 3];
//!
//! let compressed = vencode(&symbols, &cdf, 94)?;
//! let decompressed: Vec<u8> = vdecode(&compressed, &cdf, 94)?;
//! assert_eq!(decompressed, symbols);
//! # Ok(())
//! # }
//! ```

mod cdf;
mod coder;
mod decoder;
mod encoder;
pub mod errors;
mod stream;
mod symbol;
mod varalpha;
pub mod width;

pub use cdf::cdf_build;
pub use decoder::decode;
pub use encoder::encode;
pub use errors::ArithCodeError;
pub use symbol::Symbol;
pub use varalpha::{vdecode, vencode};
