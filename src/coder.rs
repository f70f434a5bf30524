//! The shared interval-tracking datum used by both encoder and decoder.
//!
//! Rendition of `state_t` from the reference: interval base `b`, length `l`,
//! the scaled integer CDF, and the width-derived constants. The reference
//! keeps `D`/`shift`/`mask`/`lowl` on the struct too; here they are folded
//! into plain fields computed once at construction, since the width type
//! itself (`W: OutputWidth`) only needs to stay alive at the push/pop/carry
//! call sites in [`crate::encoder`] and [`crate::decoder`].

use crate::errors::ArithCodeError;
use crate::width::{OutputWidth, MASK, SHIFT};

pub(crate) struct CoderState {
    pub(crate) b: u64,
    pub(crate) l: u64,
    pub(crate) cdf: Vec<u64>,
    pub(crate) log2_d: u32,
    pub(crate) lowl: u64,
}

impl CoderState {
    /// Builds a state from a user CDF for output width `W`.
    pub(crate) fn new<W: OutputWidth>(cdf: &[f32]) -> Result<Self, ArithCodeError> {
        let scaled = crate::cdf::build_scaled_cdf(cdf, SHIFT, W::D)?;
        Ok(Self {
            b: 0,
            l: MASK,
            cdf: scaled,
            log2_d: W::LOG2_D,
            lowl: W::LOWL,
        })
    }

    /// Number of internal symbols, real alphabet plus the implicit EOM.
    pub(crate) fn nsym_internal(&self) -> usize {
        self.cdf.len()
    }

    /// Index of the implicit end-of-message symbol.
    pub(crate) fn eom(&self) -> usize {
        self.nsym_internal() - 1
    }
}
