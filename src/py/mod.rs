use std::path::Path;

use log::debug;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::{pyclass, pymethods, pymodule, types::PyModule, PyResult, Python};

use crate::base::{Count, DocId};
use crate::builder::DocumentIndexer;
use crate::cluster::{cluster_index, ClusteringOptions};
use crate::error::ClusterError;
use crate::output::Clustering;

fn to_py_err(error: ClusterError) -> pyo3::PyErr {
    match error {
        ClusterError::InvalidOption(_) | ClusterError::EmptyCorpus => {
            PyValueError::new_err(error.to_string())
        }
        _ => PyRuntimeError::new_err(error.to_string()),
    }
}

#[pyclass(name = "ClusteringOptions")]
#[derive(Clone)]
struct PyClusteringOptions(ClusteringOptions);

#[pymethods]
impl PyClusteringOptions {
    #[new]
    fn new() -> Self {
        PyClusteringOptions(ClusteringOptions::default())
    }

    #[getter]
    fn batch_size(&self) -> usize {
        self.0.batch_size
    }

    #[setter]
    fn set_batch_size(&mut self, value: usize) {
        self.0.batch_size = value;
    }

    #[getter]
    fn max_vocab_size(&self) -> Option<usize> {
        self.0.max_vocab_size
    }

    #[setter]
    fn set_max_vocab_size(&mut self, value: Option<usize>) {
        self.0.max_vocab_size = value;
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    #[setter]
    fn set_seed(&mut self, value: u64) {
        self.0.seed = value;
    }
}

/// Each document is a list of tokens
#[pyclass(name = "DocumentIndexer")]
struct PyDocumentIndexer {
    indexer: Option<DocumentIndexer>,
}

#[pymethods]
impl PyDocumentIndexer {
    #[new]
    fn new() -> Self {
        PyDocumentIndexer {
            indexer: Some(DocumentIndexer::new()),
        }
    }

    /// Adds a new document and returns its ID
    fn add(&mut self, tokens: Vec<String>) -> PyResult<DocId> {
        let indexer = self
            .indexer
            .as_mut()
            .ok_or_else(|| PyRuntimeError::new_err("The indexer has already been consumed"))?;
        Ok(indexer.add(tokens))
    }

    /// Clusters the indexed words (consumes the indexer)
    fn cluster(
        &mut self,
        py: Python<'_>,
        options: Option<&PyClusteringOptions>,
    ) -> PyResult<PyClusters> {
        let indexer = self
            .indexer
            .take()
            .ok_or_else(|| PyRuntimeError::new_err("The indexer has already been consumed"))?;
        let options = options.map(|o| o.0.clone()).unwrap_or_default();

        let clustering = py
            .allow_threads(|| cluster_index(indexer.build(), &options))
            .map_err(to_py_err)?;
        Ok(PyClusters { clustering })
    }
}

#[pyclass(name = "DocumentLevelClusters")]
struct PyClusters {
    clustering: Clustering,
}

#[pymethods]
impl PyClusters {
    #[new]
    #[pyo3(signature = (documents, batch_size=1000, max_vocab_size=None, seed=1234567890))]
    fn new(
        py: Python<'_>,
        documents: Vec<Vec<String>>,
        batch_size: usize,
        max_vocab_size: Option<usize>,
        seed: u64,
    ) -> PyResult<Self> {
        let options = ClusteringOptions {
            batch_size,
            max_vocab_size,
            seed,
            ..ClusteringOptions::default()
        };
        let clustering = py
            .allow_threads(|| crate::cluster::cluster_documents(documents, &options))
            .map_err(to_py_err)?;
        Ok(PyClusters { clustering })
    }

    /// Returns the bitstring of a word (None if unknown)
    fn bitstring(&self, word: &str) -> Option<String> {
        self.clustering.bitstring(word)
    }

    /// List of (word, bitstring, frequency)
    fn records(&self) -> Vec<(String, String, Count)> {
        self.clustering
            .records()
            .map(|r| (r.word.to_string(), r.code, r.frequency))
            .collect()
    }

    fn save_clusters(&self, path: &str) -> PyResult<()> {
        self.clustering
            .save(Path::new(path))
            .map_err(|e| PyIOError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.clustering.words().len()
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn pmi_cluster(_py: Python, module: &PyModule) -> PyResult<()> {
    // Init logging
    pyo3_log::init();
    debug!("Loading pmi-cluster extension");

    module.add_class::<PyClusteringOptions>()?;
    module.add_class::<PyDocumentIndexer>()?;
    module.add_class::<PyClusters>()?;

    Ok(())
}
