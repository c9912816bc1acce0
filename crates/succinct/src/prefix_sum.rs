use rayon::prelude::*;

/// Replaces `values` with its inclusive prefix sums in place.
///
/// The slice is split into one contiguous chunk per worker. Each chunk
/// is scanned locally in parallel, the chunk totals are carried across
/// all chunk boundaries sequentially, and the carried offsets are then
/// added back to every chunk in parallel. The result is identical to
/// the sequential scan for every worker count.
pub fn prefix_sum(values: &mut [u32]) {
    if values.is_empty() {
        return;
    }

    let chunk = chunk_size(values.len());

    values.par_chunks_mut(chunk).for_each(|chunk| {
        let mut acc = 0;
        for value in chunk {
            *value += acc;
            acc = *value;
        }
    });

    let mut total = 0;
    let offsets = values
        .chunks(chunk)
        .map(|chunk| {
            total += *chunk.last().unwrap();
            total
        })
        .collect::<Vec<_>>();

    values
        .par_chunks_mut(chunk)
        .enumerate()
        .skip(1)
        .for_each(|(i, chunk)| {
            let offset = offsets[i - 1];
            for value in chunk {
                *value += offset;
            }
        });
}

/// Chunk size that splits `len` elements into at most one chunk per
/// worker.
pub(crate) fn chunk_size(len: usize) -> usize {
    let threads = usize::max(rayon::current_num_threads(), 1);
    usize::max((len + threads - 1) / threads, 1)
}
