//! Useful elementary array / vec based functions

use std::ops::Range;

/// Copies the rows at `indices` out of a flat row major array.
pub fn gather_rows(values: &[f32], row_len: usize, indices: &[usize]) -> Vec<f32> {
    let mut res = Vec::with_capacity(indices.len() * row_len);
    for &ix in indices {
        res.extend_from_slice(&values[ix * row_len..(ix + 1) * row_len]);
    }
    res
}

/// Copies the rows in `tail` followed by the rows in `head` out of a flat
/// row major array.
pub fn concat_rows(
    values: &[f32],
    row_len: usize,
    tail: Range<usize>,
    head: Range<usize>,
) -> Vec<f32> {
    let mut res = Vec::with_capacity((tail.len() + head.len()) * row_len);
    res.extend_from_slice(&values[tail.start * row_len..tail.end * row_len]);
    res.extend_from_slice(&values[head.start * row_len..head.end * row_len]);
    res
}

#[cfg(test)]
mod tests {
    use super::{concat_rows, gather_rows};

    #[test]
    fn test_gather_rows() {
        let values = vec![0., 0., 1., 1., 2., 2., 3., 3.];
        assert_eq!(gather_rows(&values, 2, &[3, 1]), vec![3., 3., 1., 1.]);
    }

    #[test]
    fn test_concat_rows() {
        let values = vec![0., 0., 1., 1., 2., 2., 3., 3.];
        assert_eq!(
            concat_rows(&values, 2, 2..4, 0..1),
            vec![2., 2., 3., 3., 0., 0.]
        );
        assert_eq!(concat_rows(&values, 2, 1..3, 0..0), vec![1., 1., 2., 2.]);
    }
}
