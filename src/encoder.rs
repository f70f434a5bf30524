//! The interval update, renormalization, carry and termination protocol.
//!
//! Grounded on `DEFN_UPDATE`/`DEFN_ERENORM`/`DEFN_ESELECT`/`DEFN_ENCODE` in
//! `ac.c`, generalized away from that file's hard-coded `bitsofD = 8` (a
//! latent bug that left the u1/u4 paths broken - see `DESIGN.md`) so that
//! every supported width uses its own `log2(D)`.

use crate::coder::CoderState;
use crate::errors::ArithCodeError;
use crate::stream::{NullStream, Stream};
use crate::symbol::Symbol;
use crate::width::{OutputWidth, MASK, SHIFT};
use std::marker::PhantomData;

/// Where encoded output symbols go. Real encoding pushes to a [`Stream`];
/// the variable-alphabet adapter's shadow re-encoder pushes to a
/// [`NullStream`] that only counts.
pub(crate) trait Sink {
    fn push(&mut self, v: u64);
    fn carry(&mut self);
}

pub(crate) struct StreamSink<'s, W: OutputWidth> {
    stream: &'s mut Stream,
    _width: PhantomData<W>,
}

impl<'s, W: OutputWidth> StreamSink<'s, W> {
    pub(crate) fn new(stream: &'s mut Stream) -> Self {
        Self {
            stream,
            _width: PhantomData,
        }
    }
}

impl<'s, W: OutputWidth> Sink for StreamSink<'s, W> {
    fn push(&mut self, v: u64) {
        W::push(self.stream, v);
    }
    fn carry(&mut self) {
        W::carry(self.stream);
    }
}

pub(crate) struct NullSink<'s>(pub(crate) &'s mut NullStream);

impl Sink for NullSink<'_> {
    fn push(&mut self, _v: u64) {
        self.0.push();
    }
    fn carry(&mut self) {
        self.0.carry();
    }
}

/// One interval update for source symbol `s` (which may be the EOM index).
///
/// Panics if the resulting interval collapses to zero length: this is only
/// reachable with a CDF that failed to reserve enough probability mass for
/// some symbol, which the public entry points reject before this loop ever
/// runs (see `cdf::build_scaled_cdf`'s `debug_assert!`).
pub(crate) fn update(state: &mut CoderState, s: usize, sink: &mut impl Sink) {
    let n = state.nsym_internal();
    let y = if s == n - 1 {
        state.l
    } else {
        (state.l * state.cdf[s + 1]) >> SHIFT
    };
    let x = (state.l * state.cdf[s]) >> SHIFT;

    let a = state.b;
    state.b = (state.b + x) & MASK;
    state.l = y - x;

    if a > state.b {
        sink.carry();
    }

    assert!(state.l > 0, "arithmetic coder interval collapsed to zero length");
}

/// Emits settled output symbols while the interval is too narrow to encode
/// another symbol's worth of precision.
pub(crate) fn renormalize(state: &mut CoderState, sink: &mut impl Sink) {
    while state.l < state.lowl {
        sink.push(state.b >> (SHIFT - state.log2_d));
        state.l = (state.l << state.log2_d) & MASK;
        state.b = (state.b << state.log2_d) & MASK;
    }
}

/// Forces the interval down to its termination reserve and flushes it.
///
/// Requires `P > 2` output-symbol slack, which the crate only exposes for
/// widths where that holds (see `width` module docs).
fn select(state: &mut CoderState, sink: &mut impl Sink) {
    let log2_d = state.log2_d;
    let a = state.b;
    state.b = (state.b + (1u64 << (SHIFT - log2_d - 1))) & MASK;
    state.l = (1u64 << (SHIFT - 2 * log2_d)) - 1;

    if a > state.b {
        sink.carry();
    }

    renormalize(state, sink);
}

/// Runs the full update/renormalize loop for `symbols`, followed by the
/// implicit EOM symbol and termination.
pub(crate) fn run(state: &mut CoderState, symbols: &[usize], sink: &mut impl Sink) {
    for &s in symbols {
        update(state, s, sink);
        renormalize(state, sink);
    }
    let eom = state.eom();
    update(state, eom, sink);
    renormalize(state, sink);
    select(state, sink);
}

/// Encodes `symbols` (drawn from the alphabet described by `cdf`) into a
/// self-delimiting byte buffer using output width `W`.
pub fn encode<W: OutputWidth, S: Symbol>(symbols: &[S], cdf: &[f32]) -> Result<Vec<u8>, ArithCodeError> {
    let mut state = CoderState::new::<W>(cdf)?;
    let nsym_real = state.eom();

    let mut indices = Vec::with_capacity(symbols.len());
    for &sym in symbols {
        let idx = sym.to_index();
        if idx as usize >= nsym_real {
            return Err(ArithCodeError::SymbolOutOfRange {
                symbol: idx,
                nsym: nsym_real,
            });
        }
        indices.push(idx as usize);
    }

    let mut stream = Stream::new();
    {
        let mut sink = StreamSink::<W>::new(&mut stream);
        run(&mut state, &indices, &mut sink);
    }
    Ok(stream.into_bytes())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::width::U8;

    #[test]
    fn tiny_message_round_trips_through_raw_bytes() {
        let cdf = vec![0.0f32, 0.2, 0.7, 0.9, 1.0];
        let symbols: Vec<u8> = vec![2, 1, 0, 0, 1, 3];
        let bytes = encode::<U8, u8>(&symbols, &cdf).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn rejects_out_of_range_symbol() {
        let cdf = vec![0.0f32, 0.5, 1.0];
        let symbols: Vec<u8> = vec![0, 1, 2];
        let err = encode::<U8, u8>(&symbols, &cdf).unwrap_err();
        assert!(matches!(err, ArithCodeError::SymbolOutOfRange { symbol: 2, nsym: 2 }));
    }
}
