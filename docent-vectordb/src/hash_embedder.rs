use async_trait::async_trait;
use docent_core::{Embedding, EmbeddingError};

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

const BUCKET_SEED: u64 = 0;
const SIGN_SEED: u64 = 1;

fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = FNV_OFFSET ^ seed;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministic embedder for tests and offline use.
///
/// Texts are split into lowercased alphanumeric terms and each term is
/// hashed into one of `dimension` signed buckets (feature hashing). The
/// result is L2-normalised, so the cosine similarity of two embeddings
/// grows with the terms their texts share. Text without any term embeds
/// to the zero vector.
#[derive(Clone, Debug)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_to_vec(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        if self.dimension == 0 {
            return vector;
        }

        for term in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|term| !term.is_empty())
        {
            let term = term.to_lowercase();
            let bytes = term.as_bytes();
            let bucket = (fnv1a(bytes, BUCKET_SEED) % self.dimension as u64) as usize;
            let sign = if fnv1a(bytes, SIGN_SEED) & 1 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|value| value * value).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl Embedding for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.hash_to_vec(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.hash_to_vec(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
