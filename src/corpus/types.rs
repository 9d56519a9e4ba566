use serde::Deserialize;

use super::error::CorpusError;

/// One precomputed question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaqEntry {
    /// The canonical question.
    pub question: String,
    /// The answer returned verbatim on a confident match.
    pub answer: String,
}

impl FaqEntry {
    /// Creates an entry from anything string-like.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered FAQ pairs; row `i` pairs with row `i` of an [`EmbeddingMatrix`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqCorpus {
    entries: Vec<FaqEntry>,
}

impl FaqCorpus {
    /// Wraps entries, keeping their order.
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&FaqEntry> {
        self.entries.get(row)
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Answers in row order.
    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.answer.as_str())
    }
}

impl FromIterator<FaqEntry> for FaqCorpus {
    fn from_iter<I: IntoIterator<Item = FaqEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Dense row-major `rows x dim` matrix of answer embeddings.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    data: Vec<f32>,
    rows: usize,
    dim: usize,
}

impl EmbeddingMatrix {
    /// Builds a matrix from flat row-major data.
    pub fn new(data: Vec<f32>, rows: usize, dim: usize) -> Result<Self, CorpusError> {
        if rows > 0 && dim == 0 {
            return Err(CorpusError::InvalidMatrix {
                reason: format!("{rows} rows with zero columns"),
            });
        }

        if data.len() != rows * dim {
            return Err(CorpusError::InvalidMatrix {
                reason: format!(
                    "expected {} values for {rows}x{dim}, got {}",
                    rows * dim,
                    data.len()
                ),
            });
        }

        Ok(Self { data, rows, dim })
    }

    /// Builds a matrix from per-row vectors; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, CorpusError> {
        let dim = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut data = Vec::with_capacity(row_count * dim);

        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(CorpusError::InvalidMatrix {
                    reason: format!("row {idx} has {} columns, expected {dim}", row.len()),
                });
            }
            data.extend(row);
        }

        Self::new(data, row_count, dim)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn row(&self, idx: usize) -> Option<&[f32]> {
        if idx >= self.rows {
            return None;
        }
        let start = idx * self.dim;
        self.data.get(start..start + self.dim)
    }

    /// Iterates rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks_exact panics on 0; an empty matrix has no data either way.
        self.data.chunks_exact(self.dim.max(1))
    }
}

/// A row-aligned corpus and embedding matrix.
///
/// Construction is the alignment check: a `FaqIndex` has exactly one embedding
/// per FAQ entry. An empty index is representable (the matcher answers
/// `NoMatch` for it); refusing to serve an empty snapshot is the loader's job.
#[derive(Debug, Clone)]
pub struct FaqIndex {
    corpus: FaqCorpus,
    embeddings: EmbeddingMatrix,
}

impl FaqIndex {
    pub fn new(corpus: FaqCorpus, embeddings: EmbeddingMatrix) -> Result<Self, CorpusError> {
        if corpus.len() != embeddings.rows() {
            return Err(CorpusError::RowMismatch {
                corpus_rows: corpus.len(),
                embedding_rows: embeddings.rows(),
            });
        }

        Ok(Self { corpus, embeddings })
    }

    /// An index with no rows.
    pub fn empty(dim: usize) -> Self {
        Self {
            corpus: FaqCorpus::default(),
            embeddings: EmbeddingMatrix {
                data: Vec::new(),
                rows: 0,
                dim,
            },
        }
    }

    /// Checks the matrix width against the encoder's output dimension.
    pub fn ensure_dim(&self, encoder_dim: usize) -> Result<(), CorpusError> {
        if self.embeddings.dim() != encoder_dim {
            return Err(CorpusError::DimensionMismatch {
                expected: encoder_dim,
                actual: self.embeddings.dim(),
            });
        }
        Ok(())
    }

    pub fn corpus(&self) -> &FaqCorpus {
        &self.corpus
    }

    pub fn embeddings(&self) -> &EmbeddingMatrix {
        &self.embeddings
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.embeddings.dim()
    }
}
