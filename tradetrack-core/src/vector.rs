use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Type alias for employee identifiers.
pub type EmployeeId = String;

/// A face embedding produced by an external recognition model.
///
/// Serialized as a plain array of numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Embedding(pub Array1<f64>);

// Implement Deref to allow easy access to Array1 methods
impl std::ops::Deref for Embedding {
    type Target = Array1<f64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<f64>> for Embedding {
    fn from(vec: Vec<f64>) -> Self {
        Embedding(Array1::from(vec))
    }
}

impl From<Array1<f64>> for Embedding {
    fn from(array: Array1<f64>) -> Self {
        Embedding(array)
    }
}

impl From<Embedding> for Vec<f64> {
    fn from(embedding: Embedding) -> Self {
        embedding.0.to_vec()
    }
}
