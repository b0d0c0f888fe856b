//! Name-keyed collection of refractive-index models.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::builtin::builtin_formulas;
use crate::provider::{MaterialError, RefractiveIndex};
use crate::record::{MaterialRecord, MaterialSource};
use crate::sellmeier::{DispersionFormula, SampledIndex};
use crate::{BUILTIN_GRID_POINTS, RECORD_GRID_POINTS};

/// Maps material names to index models.
///
/// Models are immutable once inserted. Inserting under an existing name
/// replaces the previous model, which is how built-ins are overridden.
#[derive(Clone, Default)]
pub struct MaterialCatalog {
    materials: HashMap<String, Arc<dyn RefractiveIndex>>,
}

impl std::fmt::Debug for MaterialCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialCatalog")
            .field("materials", &self.names())
            .finish()
    }
}

impl MaterialCatalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A catalog seeded with air, fused silica, MgF₂, sapphire and BBO.
    pub fn with_builtins() -> Result<Self, MaterialError> {
        let mut catalog = Self::empty();
        for (name, formula) in builtin_formulas() {
            let model = SampledIndex::from_formula(name, &formula, BUILTIN_GRID_POINTS)?;
            catalog.insert(Arc::new(model));
        }
        Ok(catalog)
    }

    /// Insert a model under its own name, replacing any existing entry.
    pub fn insert(&mut self, model: Arc<dyn RefractiveIndex>) {
        let name = model.name().to_string();
        if self.materials.insert(name.clone(), model).is_some() {
            log::debug!("Replaced material '{}'", name);
        }
    }

    /// Add a material from standard Sellmeier coefficients (λ in µm):
    /// $n = \sqrt{1 + \sum B\lambda^2/(\lambda^2 - C)}$.
    pub fn add_material(
        &mut self,
        name: &str,
        b_coeff: &[f64],
        c_coeff: &[f64],
    ) -> Result<(), MaterialError> {
        let formula = DispersionFormula::sellmeier(b_coeff, c_coeff)?;
        self.add_formula(name, &formula)
    }

    /// Add a material from any closed-form formula.
    pub fn add_formula(&mut self, name: &str, formula: &DispersionFormula) -> Result<(), MaterialError> {
        let model = SampledIndex::from_formula(name, formula, RECORD_GRID_POINTS)?;
        self.insert(Arc::new(model));
        Ok(())
    }

    /// Add a material described by a parsed record.
    pub fn add_record(&mut self, record: &MaterialRecord) -> Result<(), MaterialError> {
        self.add_formula(&record.name, &record.formula())
    }

    /// Load every record that `source` yields for `path`. Returns the number
    /// of materials added or replaced.
    pub fn load_from<S: MaterialSource + ?Sized>(
        &mut self,
        source: &S,
        path: &Path,
    ) -> Result<usize, MaterialError> {
        let records = source.load(path)?;
        for record in &records {
            log::info!("Loading material '{}'", record.name);
            self.add_record(record)?;
        }
        Ok(records.len())
    }

    /// Look up a model by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn RefractiveIndex>> {
        self.materials.get(name).cloned()
    }

    /// Look up a model by name, failing with [`MaterialError::NotFound`].
    pub fn require(&self, name: &str) -> Result<Arc<dyn RefractiveIndex>, MaterialError> {
        self.get(name)
            .ok_or_else(|| MaterialError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Material names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
