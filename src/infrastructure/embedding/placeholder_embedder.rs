use crate::application::ports::Embedder;
use crate::domain::Embedding;

pub const DEFAULT_EMBEDDING_DIMENSION: usize = 32;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic stand-in for a semantic embedding: hashed character trigrams.
///
/// Each whitespace token is wrapped as `#token#`, every trigram is hashed with FNV-1a
/// into one of `dimensions` buckets and added with a sign taken from the hash's top bit.
/// The result is L2-normalised. Text with no characters maps to the zero vector.
#[derive(Debug, Clone)]
pub struct PlaceholderEmbedder {
    dimensions: usize,
}

impl PlaceholderEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }
}

impl Default for PlaceholderEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIMENSION)
    }
}

impl Embedder for PlaceholderEmbedder {
    fn embed(&self, text: &str) -> Embedding {
        let mut values = vec![0.0_f32; self.dimensions];

        for token in text.to_lowercase().split_whitespace() {
            let padded: Vec<char> = std::iter::once('#')
                .chain(token.chars())
                .chain(std::iter::once('#'))
                .collect();

            for window in padded.windows(3) {
                let hash = fnv1a(window);
                let bucket = (hash % self.dimensions as u64) as usize;
                let sign = if hash >> 63 == 1 { -1.0 } else { 1.0 };
                values[bucket] += sign;
            }
        }

        let mut embedding = Embedding::new(values);
        let magnitude = embedding.magnitude();
        if magnitude > 0.0 {
            embedding.values.iter_mut().for_each(|v| *v /= magnitude);
        }
        embedding
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn fnv1a(chars: &[char]) -> u64 {
    let mut buf = [0u8; 4];
    chars.iter().fold(FNV_OFFSET_BASIS, |hash, c| {
        c.encode_utf8(&mut buf)
            .bytes()
            .fold(hash, |h, b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
    })
}
