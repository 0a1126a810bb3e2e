//! Seeded train/test split of a dataset.

use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split as shuffle_split;
use spam_data::{Dataset, Label};

use crate::error::{DetectorError, Result};

#[derive(Debug, Clone)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

/// Shuffle rows with `seed` and hold out `test_size` of them.
///
/// The held-out count is `n * test_size` rounded down, the same count
/// smartcore's shuffle produces.
///
/// The shuffle runs over a single-column matrix of row positions, so the
/// messages themselves never enter a numeric matrix.
pub fn train_test_split(dataset: &Dataset, test_size: f32, seed: u64) -> Result<Split> {
    let n = dataset.len();
    let n_test = (n as f32 * test_size) as usize;
    if n_test == 0 || n_test >= n {
        return Err(DetectorError::InsufficientData(format!(
            "cannot hold out {test_size} of {n} messages"
        )));
    }

    let rows: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let positions = DenseMatrix::from_2d_vec(&rows);
    let labels: Vec<usize> = dataset.labels().into_iter().map(Label::index).collect();

    let (train_positions, test_positions, _, _) =
        shuffle_split(&positions, &labels, test_size, true, Some(seed));

    Ok(Split {
        train: dataset.select(&column(&train_positions)),
        test: dataset.select(&column(&test_positions)),
    })
}

fn column(matrix: &DenseMatrix<usize>) -> Vec<usize> {
    (0..matrix.shape().0).map(|row| *matrix.get((row, 0))).collect()
}

#[cfg(test)]
mod test {
    use spam_data::Message;

    use super::*;

    fn dataset(n: usize) -> Dataset {
        Dataset::new(
            (0..n)
                .map(|i| {
                    let label = if i % 3 == 0 { Label::Spam } else { Label::NotSpam };
                    Message::new(label, format!("message {i}"))
                })
                .collect(),
        )
    }

    #[test]
    fn test_split_sizes() {
        let split = train_test_split(&dataset(50), 0.2, 42).expect("split");
        assert_eq!(split.test.len(), 10);
        assert_eq!(split.train.len(), 40);
    }

    #[test]
    fn test_split_rounds_down() {
        // 37 * 0.2 = 7.4 held-out rows.
        let split = train_test_split(&dataset(37), 0.2, 42).expect("split");
        assert_eq!(split.test.len(), 7);
        assert_eq!(split.train.len(), 30);
    }

    #[test]
    fn test_split_is_a_partition() {
        let data = dataset(37);
        let split = train_test_split(&data, 0.2, 42).expect("split");
        let mut texts: Vec<&str> = split.train.texts();
        texts.extend(split.test.texts());
        texts.sort_unstable();
        let mut expected = data.texts();
        expected.sort_unstable();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_split_is_reproducible() {
        let data = dataset(40);
        let a = train_test_split(&data, 0.2, 42).expect("split");
        let b = train_test_split(&data, 0.2, 42).expect("split");
        assert_eq!(a.test.messages(), b.test.messages());
        assert_eq!(a.train.messages(), b.train.messages());
    }

    #[test]
    fn test_too_small() {
        assert!(matches!(
            train_test_split(&dataset(3), 0.2, 42),
            Err(DetectorError::InsufficientData(_))
        ));
        assert!(train_test_split(&Dataset::default(), 0.2, 42).is_err());
    }
}
