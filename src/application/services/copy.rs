//! Copy every value of one configuration into another.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::configuration::Configuration;
use crate::application::factory::ConfigurationFactory;
use crate::application::ApplicationResult;
use crate::domain::{tree_to_key_values, LeafVisitor, Path};

/// Outcome of a finished copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopyReport {
    /// Number of values written to the destination
    pub copied: usize,
}

/// Writes one leaf to the destination with the put matching its type.
struct PutVisitor<'a> {
    dest: &'a mut Configuration,
    path: Path,
}

impl LeafVisitor for PutVisitor<'_> {
    type Output = ApplicationResult<()>;

    fn visit_string(&mut self, value: &str) -> Self::Output {
        self.dest.put_path(&self.path, value)
    }

    fn visit_int(&mut self, value: i64) -> Self::Output {
        self.dest.put_path(&self.path, value)
    }

    // Flat stores have no boolean type; 0/1 reads back through coercion.
    fn visit_bool(&mut self, value: bool) -> Self::Output {
        self.dest.put_path(&self.path, i64::from(value))
    }

    fn visit_double(&mut self, value: f64) -> Self::Output {
        self.dest.put_path(&self.path, value)
    }
}

/// Copies whole configuration trees between backends.
pub struct CopyService {
    factory: Arc<ConfigurationFactory>,
}

impl CopyService {
    pub fn new(factory: Arc<ConfigurationFactory>) -> Self {
        Self { factory }
    }

    /// Copy the full tree of `source` into `dest`.
    ///
    /// Every pair is written at its segment path below the destination
    /// prefix, so keys holding the destination separator stay intact.
    /// Stops at the first failing write; values written before it stay in
    /// `dest`.
    pub fn copy(source: &Configuration, dest: &mut Configuration) -> ApplicationResult<CopyReport> {
        let tree = source.get_recursive("")?;
        let pairs = tree_to_key_values(&tree);
        debug!(
            "copy: {} values from {} to {}",
            pairs.len(),
            source.backend_name(),
            dest.backend_name()
        );

        let mut report = CopyReport::default();
        for (path, leaf) in pairs {
            let mut visitor = PutVisitor {
                path,
                dest: &mut *dest,
            };
            leaf.accept(&mut visitor)?;
            report.copied += 1;
        }
        Ok(report)
    }

    /// Resolve both URIs through the factory, then [`CopyService::copy`].
    #[instrument(skip(self))]
    pub fn copy_uris(&self, source_uri: &str, dest_uri: &str) -> ApplicationResult<CopyReport> {
        let source = self.factory.get_configuration(source_uri)?;
        let mut dest = self.factory.get_configuration(dest_uri)?;
        let report = Self::copy(&source, &mut dest)?;
        info!("copied {} values", report.copied);
        Ok(report)
    }
}
