use super::*;
use candle_core::{Device, Tensor};
use std::io::Write;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(contents.as_bytes()).expect("write fixture");
    path
}

fn write_npy(dir: &TempDir, name: &str, rows: &[[f32; 3]]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let data: Vec<f32> = rows.iter().flatten().copied().collect();
    Tensor::from_vec(data, (rows.len(), 3), &Device::Cpu)
        .expect("tensor")
        .write_npy(&path)
        .expect("write npy");
    path
}

const FAQ_CSV: &str = "\
question,answer
reset password,\"Go to settings > security > reset.\"
refund policy,Refunds are issued within 14 days.
shipping time,Orders ship in 2-3 business days.
";

mod matrix_tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = EmbeddingMatrix::new(vec![1.0, 2.0, 3.0], 2, 2).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidMatrix { .. }));
    }

    #[test]
    fn test_new_rejects_zero_columns() {
        let err = EmbeddingMatrix::new(vec![], 2, 0).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidMatrix { .. }));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = EmbeddingMatrix::from_rows(vec![vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_row_access() {
        let matrix =
            EmbeddingMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]])
                .expect("matrix");

        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.row(1), Some(&[0.0, 1.0][..]));
        assert_eq!(matrix.row(3), None);
        assert_eq!(matrix.iter_rows().count(), 3);
    }

    #[test]
    fn test_empty_matrix_iterates_nothing() {
        let matrix = EmbeddingMatrix::from_rows(vec![]).expect("empty matrix");
        assert!(matrix.is_empty());
        assert_eq!(matrix.iter_rows().count(), 0);
        assert_eq!(matrix.row(0), None);
    }
}

mod index_tests {
    use super::*;

    fn corpus(n: usize) -> FaqCorpus {
        (0..n)
            .map(|i| FaqEntry::new(format!("q{i}"), format!("a{i}")))
            .collect()
    }

    #[test]
    fn test_row_mismatch_is_rejected() {
        let matrix = EmbeddingMatrix::from_rows(vec![vec![1.0, 0.0]]).expect("matrix");
        let err = FaqIndex::new(corpus(2), matrix).unwrap_err();

        match err {
            CorpusError::RowMismatch {
                corpus_rows,
                embedding_rows,
            } => {
                assert_eq!(corpus_rows, 2);
                assert_eq!(embedding_rows, 1);
            }
            other => panic!("Expected RowMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_dim() {
        let matrix =
            EmbeddingMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).expect("matrix");
        let index = FaqIndex::new(corpus(2), matrix).expect("aligned");

        assert!(index.ensure_dim(2).is_ok());
        let err = index.ensure_dim(384).unwrap_err();
        assert!(matches!(
            err,
            CorpusError::DimensionMismatch {
                expected: 384,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_empty_index() {
        let index = FaqIndex::empty(4);
        assert!(index.is_empty());
        assert_eq!(index.dim(), 4);
    }
}

mod loader_tests {
    use super::*;

    #[test]
    fn test_read_faq_csv_preserves_order() {
        let corpus = read_faq_csv(FAQ_CSV.as_bytes()).expect("parse");

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.get(0).map(|e| e.question.as_str()), Some("reset password"));
        assert_eq!(
            corpus.answers().collect::<Vec<_>>(),
            vec![
                "Go to settings > security > reset.",
                "Refunds are issued within 14 days.",
                "Orders ship in 2-3 business days.",
            ]
        );
    }

    #[test]
    fn test_read_faq_csv_ignores_extra_columns() {
        let csv = "id,answer,category,question\n1,Yes.,billing,Can I pay by card?\n";
        let corpus = read_faq_csv(csv.as_bytes()).expect("parse");

        assert_eq!(corpus.entries(), &[FaqEntry::new("Can I pay by card?", "Yes.")]);
    }

    #[test]
    fn test_read_faq_csv_missing_answer_column() {
        let csv = "question,reply\nhello,world\n";
        let err = read_faq_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CorpusError::MissingColumn { column: "answer" }));
    }

    #[test]
    fn test_load_faq_csv_missing_file() {
        let err = load_faq_csv("/nonexistent/faq.csv").unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn test_load_embeddings_npy() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_npy(&dir, "emb.npy", &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

        let matrix = load_embeddings_npy(&path).expect("load npy");
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.row(1), Some(&[0.0, 1.0, 0.0][..]));
    }

    #[test]
    fn test_load_embeddings_npy_rejects_vector() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("flat.npy");
        Tensor::new(&[1.0f32, 2.0, 3.0], &Device::Cpu)
            .expect("tensor")
            .write_npy(&path)
            .expect("write npy");

        let err = load_embeddings_npy(&path).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidShape { .. }));
    }

    #[test]
    fn test_load_index_aligned() {
        let dir = TempDir::new().expect("temp dir");
        let faq = write_file(&dir, "faq.csv", FAQ_CSV);
        let emb = write_npy(
            &dir,
            "emb.npy",
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        );

        let index = load_index(&faq, &emb).expect("load index");
        assert_eq!(index.len(), 3);
        assert_eq!(index.dim(), 3);
    }

    #[test]
    fn test_load_index_row_mismatch() {
        let dir = TempDir::new().expect("temp dir");
        let faq = write_file(&dir, "faq.csv", FAQ_CSV);
        let emb = write_npy(&dir, "emb.npy", &[[1.0, 0.0, 0.0]]);

        let err = load_index(&faq, &emb).unwrap_err();
        assert!(matches!(err, CorpusError::RowMismatch { .. }));
    }

    #[test]
    fn test_load_index_empty_corpus() {
        let dir = TempDir::new().expect("temp dir");
        let faq = write_file(&dir, "faq.csv", "question,answer\n");
        let emb = write_npy(&dir, "emb.npy", &[[1.0, 0.0, 0.0]]);

        let err = load_index(&faq, &emb).unwrap_err();
        assert!(matches!(err, CorpusError::Empty));
    }
}
