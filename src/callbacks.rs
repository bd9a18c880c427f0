//! Shipped callback adapters

use std::sync::{Arc, Mutex};

use crate::{error::Result, ports::Callback, types::Transition};

/// Accumulates every dataset it is handed into a shared buffer
///
/// The buffer handle can be cloned out before the callback is boxed and
/// handed to the loop, so collected transitions remain readable after
/// learning finishes.
///
/// # Examples
///
/// ```no_run
/// use rlcore::callbacks::CollectDataset;
///
/// let collect = CollectDataset::new();
/// let buffer = collect.handle();
/// // ... register Box::new(collect) with the loop, run learn() ...
/// let collected = buffer.lock().unwrap();
/// println!("{} transitions", collected.len());
/// ```
pub struct CollectDataset {
    data: Arc<Mutex<Vec<Transition>>>,
}

impl CollectDataset {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the accumulated transitions
    pub fn handle(&self) -> Arc<Mutex<Vec<Transition>>> {
        Arc::clone(&self.data)
    }
}

impl Default for CollectDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Callback for CollectDataset {
    fn call(&mut self, dataset: &[Transition]) -> Result<()> {
        self.data
            .lock()
            .expect("dataset buffer poisoned")
            .extend_from_slice(dataset);
        Ok(())
    }
}
