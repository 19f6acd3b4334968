#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn zeros(dimensions: usize) -> Self {
        Self {
            values: vec![0.0; dimensions],
        }
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    pub fn magnitude(&self) -> f32 {
        self.values.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Normalized dot product. Mismatched lengths and zero-norm vectors score 0.
    pub fn cosine_similarity(&self, other: &Self) -> f32 {
        if self.values.len() != other.values.len() {
            return 0.0;
        }

        let dot_product: f32 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum();

        let magnitude_a = self.magnitude();
        let magnitude_b = other.magnitude();

        if magnitude_a == 0.0 || magnitude_b == 0.0 {
            return 0.0;
        }

        let similarity = dot_product / (magnitude_a * magnitude_b);
        if similarity.is_finite() { similarity } else { 0.0 }
    }
}
