use std::cell::{Cell, OnceCell};
use std::sync::Arc;

use tracing::debug;

use crate::ClientResult;
use crate::dataset::{self, Dataset, DatasetSource};

/// Load-once holder for the sales dataset.
///
/// The entry point owns one cache and lends it to every command. The first
/// `get` reads and normalizes the source; later calls hand out the same
/// `Arc<Dataset>`. There is no invalidation: a new process is a new load.
#[derive(Debug)]
pub struct DatasetCache {
    source: DatasetSource,
    delimiter: Option<u8>,
    loaded: OnceCell<Arc<Dataset>>,
    loads: Cell<usize>,
}

impl DatasetCache {
    pub fn new(source: DatasetSource, delimiter: Option<u8>) -> Self {
        Self {
            source,
            delimiter,
            loaded: OnceCell::new(),
            loads: Cell::new(0),
        }
    }

    /// A cache that is already populated; nothing is ever read from disk.
    pub fn with_dataset(dataset: Dataset) -> Self {
        let source = DatasetSource::Text {
            label: dataset.source.clone(),
            content: String::new(),
        };
        Self {
            source,
            delimiter: None,
            loaded: OnceCell::from(Arc::new(dataset)),
            loads: Cell::new(0),
        }
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn get(&self) -> ClientResult<Arc<Dataset>> {
        if let Some(dataset) = self.loaded.get() {
            debug!(source = %dataset.source, "dataset cache hit");
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(dataset::load(&self.source, self.delimiter)?);
        self.loads.set(self.loads.get() + 1);
        Ok(Arc::clone(self.loaded.get_or_init(|| dataset)))
    }

    /// How many times the source was actually read.
    pub fn load_count(&self) -> usize {
        self.loads.get()
    }
}
