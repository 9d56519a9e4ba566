use std::fs::File;
use std::path::Path;

use candle_core::{DType, Tensor};
use tracing::{debug, info};

use super::error::CorpusError;
use super::types::{EmbeddingMatrix, FaqCorpus, FaqEntry, FaqIndex};

const QUESTION_COLUMN: &str = "question";
const ANSWER_COLUMN: &str = "answer";

/// Reads the FAQ table. Requires `question` and `answer` header columns; any
/// other columns are ignored and row order is preserved.
pub fn load_faq_csv(path: impl AsRef<Path>) -> Result<FaqCorpus, CorpusError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_faq_csv(file)
}

/// Same as [`load_faq_csv`] for any reader.
pub fn read_faq_csv<R: std::io::Read>(reader: R) -> Result<FaqCorpus, CorpusError> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in [QUESTION_COLUMN, ANSWER_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(CorpusError::MissingColumn { column });
        }
    }

    let entries = reader
        .deserialize::<FaqEntry>()
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = entries.len(), "Parsed FAQ table");

    Ok(FaqCorpus::new(entries))
}

/// Reads a 2-D `.npy` array (any float dtype) into an f32 matrix.
pub fn load_embeddings_npy(path: impl AsRef<Path>) -> Result<EmbeddingMatrix, CorpusError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CorpusError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a file"),
        });
    }

    let tensor = Tensor::read_npy(path)?;
    let shape = tensor.dims().to_vec();

    let [rows, dim] = shape[..] else {
        return Err(CorpusError::InvalidShape { shape });
    };

    let data = tensor.to_dtype(DType::F32)?.flatten_all()?.to_vec1::<f32>()?;

    debug!(rows, dim, "Loaded embedding matrix");

    EmbeddingMatrix::new(data, rows, dim)
}

/// Loads both files and aligns them. An empty snapshot is rejected here so the
/// server never starts without anything to match against.
pub fn load_index(
    faq_path: impl AsRef<Path>,
    embeddings_path: impl AsRef<Path>,
) -> Result<FaqIndex, CorpusError> {
    let corpus = load_faq_csv(faq_path.as_ref())?;
    if corpus.is_empty() {
        return Err(CorpusError::Empty);
    }

    let embeddings = load_embeddings_npy(embeddings_path.as_ref())?;
    let index = FaqIndex::new(corpus, embeddings)?;

    info!(
        rows = index.len(),
        dim = index.dim(),
        faq_path = %faq_path.as_ref().display(),
        "FAQ index loaded"
    );

    Ok(index)
}
