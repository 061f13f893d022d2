//! Rayon-powered batch extraction.
//!
//! Transactions are independent, so a batch is processed in parallel with no
//! ordering between them. Result indices always refer to the input slice.

use rayon::prelude::*;
use txextract_core::{error::ExtractError, tx::TxBundle};

use crate::extractor::{Extractor, Outcome};

/// Process a slice of transactions in parallel using Rayon.
/// Returns `(outcomes, errors)`, each tagged with its input index.
pub fn parallel_extract(
    extractor: &Extractor,
    bundles: &[TxBundle],
) -> (Vec<(usize, Outcome)>, Vec<(usize, ExtractError)>) {
    let results: Vec<(usize, Result<Outcome, ExtractError>)> = bundles
        .par_iter()
        .enumerate()
        .map(|(idx, bundle)| (idx, extractor.process_bundle(bundle)))
        .collect();

    let mut outcomes = Vec::new();
    let mut errors = Vec::new();
    for (idx, r) in results {
        match r {
            Ok(o) => outcomes.push((idx, o)),
            Err(e) => errors.push((idx, e)),
        }
    }
    (outcomes, errors)
}

/// Chunk `bundles` into slices of at most `chunk_size` and process each chunk
/// in parallel. Returns a flat list of outcomes and errors.
pub fn chunked_extract(
    extractor: &Extractor,
    bundles: &[TxBundle],
    chunk_size: usize,
) -> (Vec<(usize, Outcome)>, Vec<(usize, ExtractError)>) {
    let mut all_outcomes = Vec::new();
    let mut all_errors = Vec::new();
    let mut offset = 0;

    for chunk in bundles.chunks(chunk_size.max(1)) {
        let (outcomes, errors) = parallel_extract(extractor, chunk);
        // Adjust indices relative to the overall slice
        all_outcomes.extend(outcomes.into_iter().map(|(idx, o)| (offset + idx, o)));
        all_errors.extend(errors.into_iter().map(|(idx, e)| (offset + idx, e)));
        offset += chunk.len();
    }

    (all_outcomes, all_errors)
}
