//! Variable-alphabet adapter: re-expresses an 8-bit-output encoding in an
//! arbitrary output alphabet of size `K < 256` (e.g. 94 printable ASCII
//! symbols), and its inverse.
//!
//! Grounded on `ac.c`'s `vdecode1`: decode the ordinary byte-output encoding
//! with a uniform CDF over `K` symbols to get the `K`-ary sequence, and
//! terminate once a shadow re-encoder - run in null mode, tracking only the
//! write cursor - would have consumed as many bytes as the original
//! encoding. This supersedes the hard-coded 100-symbol loop bound from the
//! older `src/2/said.c` draft, which is not implemented here.

use crate::coder::CoderState;
use crate::decoder::{bisect, renormalize as decoder_renormalize, prime, DecoderState};
use crate::encoder::{self, encode, NullSink};
use crate::errors::ArithCodeError;
use crate::stream::{NullStream, Stream};
use crate::symbol::Symbol;
use crate::width::{OutputWidth, SHIFT, U8};

fn validate_out_alphabet_size(size: usize) -> Result<(), ArithCodeError> {
    if size < 2 || size >= 256 {
        return Err(ArithCodeError::UnsupportedOutputAlphabet { size });
    }
    Ok(())
}

/// Uniform CDF over `k` symbols: `T[i] = i / k`.
fn uniform_cdf(k: usize) -> Vec<f32> {
    (0..=k).map(|i| i as f32 / k as f32).collect()
}

/// Encodes `symbols` into a sequence of bytes each in `0..out_alphabet_size`.
pub fn vencode<S: Symbol>(symbols: &[S], cdf: &[f32], out_alphabet_size: usize) -> Result<Vec<u8>, ArithCodeError> {
    validate_out_alphabet_size(out_alphabet_size)?;

    let b1 = encode::<U8, S>(symbols, cdf)?;
    let nin = b1.len();
    let t_cdf = uniform_cdf(out_alphabet_size);

    let mut d0 = DecoderState::new(&t_cdf, SHIFT, U8::D, U8::LOG2_D, U8::LOWL)?;
    let mut stream0 = Stream::from_bytes(b1);
    prime::<U8>(&mut d0, &mut stream0);

    let mut shadow = CoderState::new::<U8>(&t_cdf)?;
    let mut shadow_stream = NullStream::new();

    let mut out = Vec::new();
    while shadow_stream.len() < nin {
        let s = bisect(&mut d0);
        decoder_renormalize::<U8>(&mut d0, &mut stream0);

        out.push(s as u8);

        let mut sink = NullSink(&mut shadow_stream);
        encoder::update(&mut shadow, s, &mut sink);
        encoder::renormalize(&mut shadow, &mut sink);
    }

    Ok(out)
}

/// Inverse of [`vencode`]: recovers the original symbol sequence from a
/// `K`-ary byte sequence.
pub fn vdecode<S: Symbol>(bytes: &[u8], cdf: &[f32], out_alphabet_size: usize) -> Result<Vec<S>, ArithCodeError> {
    validate_out_alphabet_size(out_alphabet_size)?;

    for &b in bytes {
        if b as usize >= out_alphabet_size {
            return Err(ArithCodeError::SymbolOutOfRange {
                symbol: b as u64,
                nsym: out_alphabet_size,
            });
        }
    }

    let t_cdf = uniform_cdf(out_alphabet_size);
    let b1 = encode::<U8, u8>(bytes, &t_cdf)?;
    crate::decoder::decode::<U8, S>(&b1, cdf)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_a_small_alphabet() {
        let cdf = vec![0.0f32, 0.2, 0.7, 0.9, 1.0];
        let symbols: Vec<u8> = vec![2, 1, 0, 0, 1, 3, 2, 2, 1, 0];
        let k = 94;
        let encoded = vencode(&symbols, &cdf, k).unwrap();
        assert!(encoded.iter().all(|&b| (b as usize) < k));
        let decoded: Vec<u8> = vdecode(&encoded, &cdf, k).unwrap();
        assert_eq!(decoded, symbols);
    }

    #[test]
    fn rejects_degenerate_alphabet_sizes() {
        let cdf = vec![0.0f32, 1.0];
        let symbols: Vec<u8> = vec![0];
        assert!(matches!(
            vencode(&symbols, &cdf, 0).unwrap_err(),
            ArithCodeError::UnsupportedOutputAlphabet { size: 0 }
        ));
        assert!(matches!(
            vencode(&symbols, &cdf, 1).unwrap_err(),
            ArithCodeError::UnsupportedOutputAlphabet { size: 1 }
        ));
        assert!(matches!(
            vencode(&symbols, &cdf, 256).unwrap_err(),
            ArithCodeError::UnsupportedOutputAlphabet { size: 256 }
        ));
    }
}
