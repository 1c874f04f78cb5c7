//! Remapping of arbitrary integer labels onto contiguous class ids.

use crate::error::TreeError;

/// Maps an arbitrary set of integer labels onto `0..n_classes`.
///
/// Classes are numbered by ascending original value, so negative or sparse
/// label spaces can be fed to the classifier without inflating class counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<i64>,
}

impl LabelEncoder {
    /// Learn the distinct labels in `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyDataset`] when `labels` is empty.
    pub fn fit(labels: &[i64]) -> Result<Self, TreeError> {
        if labels.is_empty() {
            return Err(TreeError::EmptyDataset);
        }
        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        Ok(Self { classes })
    }

    /// Return the original label values, indexed by class id.
    #[must_use]
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Return the number of distinct classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Map original labels to class ids.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidLabel`] for a label not seen by [`LabelEncoder::fit`].
    pub fn transform(&self, labels: &[i64]) -> Result<Vec<usize>, TreeError> {
        labels
            .iter()
            .enumerate()
            .map(|(sample_index, label)| {
                self.classes
                    .binary_search(label)
                    .map_err(|_| TreeError::InvalidLabel {
                        sample_index,
                        reason: format!("label {label} was not seen when fitting the encoder"),
                    })
            })
            .collect()
    }

    /// Map class ids back to original labels.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidLabel`] for an id outside `0..n_classes`.
    pub fn inverse_transform(&self, class_ids: &[usize]) -> Result<Vec<i64>, TreeError> {
        class_ids
            .iter()
            .enumerate()
            .map(|(sample_index, &id)| {
                self.classes
                    .get(id)
                    .copied()
                    .ok_or_else(|| TreeError::InvalidLabel {
                        sample_index,
                        reason: format!("class id {id} is outside 0..{}", self.classes.len()),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::LabelEncoder;
    use crate::error::{ErrorKind, TreeError};

    #[test]
    fn negative_and_sparse_labels_become_contiguous() {
        let encoder = LabelEncoder::fit(&[7, -3, 100, 7, -3]).unwrap();
        assert_eq!(encoder.classes(), &[-3, 7, 100]);
        assert_eq!(encoder.n_classes(), 3);
        assert_eq!(encoder.transform(&[100, -3, 7]).unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn inverse_restores_original_values() {
        let original = [5, -1, 5, 9];
        let encoder = LabelEncoder::fit(&original).unwrap();
        let ids = encoder.transform(&original).unwrap();
        assert_eq!(encoder.inverse_transform(&ids).unwrap(), original.to_vec());
    }

    #[test]
    fn unseen_label_is_invalid() {
        let encoder = LabelEncoder::fit(&[1, 2]).unwrap();
        let err = encoder.transform(&[1, 3]).unwrap_err();
        assert!(matches!(err, TreeError::InvalidLabel { sample_index: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidLabel);
    }

    #[test]
    fn out_of_range_class_id_is_invalid() {
        let encoder = LabelEncoder::fit(&[1, 2]).unwrap();
        assert!(encoder.inverse_transform(&[2]).is_err());
    }

    #[test]
    fn empty_labels_rejected() {
        assert!(matches!(LabelEncoder::fit(&[]), Err(TreeError::EmptyDataset)));
    }
}
