//! C3 linearization of the base-class graph.
//!
//! The hierarchy walker consumes a precomputed linearization list rather
//! than re-deriving resolution order on every query. Cycles are impossible
//! by construction (a base must already be registered), so the only failure
//! mode is an inconsistent merge.

use smallvec::{SmallVec, smallvec};

use super::ClassId;

/// Merge `head`'s base linearizations C3-style.
///
/// `base_linearizations[i]` is the precomputed linearization of `bases[i]`.
/// Returns `None` when no consistent order exists.
pub(crate) fn c3_merge(
    head: ClassId,
    bases: &[ClassId],
    base_linearizations: &[&[ClassId]],
) -> Option<SmallVec<[ClassId; 4]>> {
    let mut out: SmallVec<[ClassId; 4]> = smallvec![head];

    // The sequences to merge: each base's linearization, then the base list
    // itself (preserves local precedence order).
    let mut seqs: Vec<Vec<ClassId>> = base_linearizations
        .iter()
        .map(|lin| lin.to_vec())
        .collect();
    seqs.push(bases.to_vec());

    loop {
        seqs.retain(|seq| !seq.is_empty());
        if seqs.is_empty() {
            return Some(out);
        }

        // A candidate is good when it appears in no sequence's tail.
        let candidate = seqs.iter().map(|seq| seq[0]).find(|&cand| {
            !seqs
                .iter()
                .any(|seq| seq.iter().skip(1).any(|&c| c == cand))
        })?;

        out.push(candidate);
        for seq in &mut seqs {
            if seq.first() == Some(&candidate) {
                seq.remove(0);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/linearize_tests.rs"]
mod tests;
