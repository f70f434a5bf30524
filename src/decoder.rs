//! The inverse protocol: bisect the interval by the CDF, renormalize by
//! pulling output symbols, stop once the implicit EOM symbol is drawn.
//!
//! Grounded on `dselect`/`DEFN_DRENORM`/`DEFN_DPRIME`/`DEFN_DSTEP`/
//! `DEFN_DECODE` in `ac.c`. The primer zero-initializes `v` before
//! accumulating, per the fix noted in `DESIGN.md` over the earlier
//! `src/2/said.c` draft, which left it uninitialized.

use crate::cdf::build_scaled_cdf;
use crate::errors::ArithCodeError;
use crate::stream::Stream;
use crate::symbol::Symbol;
use crate::width::{OutputWidth, MASK, SHIFT};

/// Decoder-side interval state: length `l`, decoder value `v`, and the
/// scaled CDF shared with the encoder's construction.
pub(crate) struct DecoderState {
    pub(crate) l: u64,
    pub(crate) v: u64,
    pub(crate) cdf: Vec<u64>,
    pub(crate) log2_d: u32,
    pub(crate) lowl: u64,
}

impl DecoderState {
    pub(crate) fn new(cdf: &[f32], shift: u32, d: u64, log2_d: u32, lowl: u64) -> Result<Self, ArithCodeError> {
        let scaled = build_scaled_cdf(cdf, shift, d)?;
        Ok(Self {
            l: MASK,
            v: 0,
            cdf: scaled,
            log2_d,
            lowl,
        })
    }

    pub(crate) fn eom(&self) -> usize {
        self.cdf.len() - 1
    }
}

/// Primes `v` from the first `P` output symbols.
pub(crate) fn prime<W: OutputWidth>(state: &mut DecoderState, stream: &mut Stream) {
    state.v = 0;
    for i in 1..=W::P {
        state.v += W::pop(stream) << (SHIFT - i * state.log2_d);
    }
}

/// Binary-searches the CDF for the symbol containing `v`, updates the
/// interval, and returns the symbol index.
pub(crate) fn bisect(state: &mut DecoderState) -> usize {
    let mut s = 0usize;
    let mut n = state.cdf.len();
    let mut x = 0u64;
    let mut y = state.l;

    while n - s > 1 {
        let m = (s + n) / 2;
        let z = (state.l * state.cdf[m]) >> SHIFT;
        if z > state.v {
            n = m;
            y = z;
        } else {
            s = m;
            x = z;
        }
    }

    state.v -= x;
    state.l = y - x;
    s
}

/// Pulls another output symbol into `v` while the interval is too narrow.
pub(crate) fn renormalize<W: OutputWidth>(state: &mut DecoderState, stream: &mut Stream) {
    while state.l < state.lowl {
        state.v = ((state.v << state.log2_d) & MASK) + W::pop(stream);
        state.l = (state.l << state.log2_d) & MASK;
    }
}

/// Decodes until EOM, feeding each emitted symbol index to `on_symbol`.
///
/// Returns once EOM is drawn; `on_symbol` is never called for the EOM
/// symbol itself. Used directly by [`decode`] and, with a shadow re-encoder
/// plugged into `on_symbol`, by `crate::varalpha`.
pub(crate) fn run<W: OutputWidth>(state: &mut DecoderState, stream: &mut Stream, mut on_symbol: impl FnMut(usize)) {
    prime::<W>(state, stream);
    let eom = state.eom();
    loop {
        let s = bisect(state);
        if s == eom {
            return;
        }
        on_symbol(s);
        renormalize::<W>(state, stream);
    }
}

/// Decodes a byte buffer produced by [`crate::encode`] back into source
/// symbols. Output length comes from the implicit EOM, not a caller hint.
pub fn decode<W: OutputWidth, S: Symbol>(bytes: &[u8], cdf: &[f32]) -> Result<Vec<S>, ArithCodeError> {
    let mut state = DecoderState::new(cdf, SHIFT, W::D, W::LOG2_D, W::LOWL)?;
    let mut stream = Stream::from_bytes(bytes.to_vec());
    let mut out = Vec::new();
    run::<W>(&mut state, &mut stream, |s| out.push(S::from_index(s as u64)));
    Ok(out)
}
