//! Long-lived combustion property provider.
//!
//! The provider resolves propellant names through the catalog, validates the
//! operating point, and delegates to a `CombustionModel`. It can optionally
//! memoize results so repeated design points skip the backend.

use crate::catalog;
use crate::error::{CombustionError, CombustionResult};
use crate::model::{CombustionModel, validation};
use crate::propellant::{Propellant, PropellantRole};
use crate::properties::{CombustionProperties, CombustionQuery};
use crate::tabulated::TabulatedCombustionModel;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Unit contract between callers and the backend, fixed when the provider is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderUnits {
    pub pressure: &'static str,
    pub c_star: &'static str,
    pub temperature: &'static str,
    pub molar_mass: &'static str,
}

impl ProviderUnits {
    /// MPa in; m/s, K and g/mol out.
    pub const CEA: ProviderUnits = ProviderUnits {
        pressure: "MPa",
        c_star: "m/s",
        temperature: "K",
        molar_mass: "g/mol",
    };
}

/// Cache key: the query with floats compared bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct QueryKey {
    oxidizer: Propellant,
    fuel: Propellant,
    chamber_pressure_bits: u64,
    mixture_ratio_bits: u64,
    expansion_ratio_bits: u64,
}

impl From<&CombustionQuery> for QueryKey {
    fn from(q: &CombustionQuery) -> Self {
        Self {
            oxidizer: q.oxidizer,
            fuel: q.fuel,
            chamber_pressure_bits: q.chamber_pressure_mpa.to_bits(),
            mixture_ratio_bits: q.mixture_ratio.to_bits(),
            expansion_ratio_bits: q.expansion_ratio.to_bits(),
        }
    }
}

type ResultCache = Mutex<HashMap<QueryKey, CombustionProperties>>;

/// Combustion property provider wrapping one backend model.
pub struct CombustionPropertyProvider<M: CombustionModel> {
    model: M,
    units: ProviderUnits,
    cache: Option<ResultCache>,
}

impl CombustionPropertyProvider<TabulatedCombustionModel> {
    /// Provider over the built-in tabulated equilibrium data.
    pub fn tabulated() -> Self {
        Self::new(TabulatedCombustionModel::new())
    }
}

impl<M: CombustionModel> CombustionPropertyProvider<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            units: ProviderUnits::CEA,
            cache: None,
        }
    }

    /// Enable memoization of successful results.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(Mutex::new(HashMap::new()));
        self
    }

    pub fn units(&self) -> ProviderUnits {
        self.units
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Resolve a propellant name for the given role.
    ///
    /// A name that exists only in the other role is unknown for this one.
    pub fn resolve(&self, name: &str, role: PropellantRole) -> CombustionResult<Propellant> {
        match catalog::lookup(name) {
            Some(entry) if entry.role() == role => Ok(entry.propellant),
            _ => Err(CombustionError::UnknownPropellant {
                name: name.to_string(),
                role,
            }),
        }
    }

    /// Evaluate `(IspVac, C*, Tc, M, γ)` for a named propellant pair.
    ///
    /// `chamber_pressure_mpa` is in MPa; mixture and expansion ratios are dimensionless.
    pub fn evaluate(
        &self,
        oxidizer: &str,
        fuel: &str,
        chamber_pressure_mpa: f64,
        mixture_ratio: f64,
        expansion_ratio: f64,
    ) -> CombustionResult<CombustionProperties> {
        let query = CombustionQuery {
            oxidizer: self.resolve(oxidizer, PropellantRole::Oxidizer)?,
            fuel: self.resolve(fuel, PropellantRole::Fuel)?,
            chamber_pressure_mpa,
            mixture_ratio,
            expansion_ratio,
        };
        self.evaluate_query(&query)
    }

    /// Evaluate an already-resolved query.
    pub fn evaluate_query(&self, query: &CombustionQuery) -> CombustionResult<CombustionProperties> {
        validation::validate_query(query)?;
        if !self.model.supports_pair(query.oxidizer, query.fuel) {
            return Err(CombustionError::UnsupportedPair {
                oxidizer: query.oxidizer.to_string(),
                fuel: query.fuel.to_string(),
            });
        }

        let key = QueryKey::from(query);
        if let Some(cache) = &self.cache {
            if let Some(hit) = lock(cache).get(&key).copied() {
                debug!(oxidizer = %query.oxidizer, fuel = %query.fuel, "combustion cache hit");
                return Ok(hit);
            }
        }

        let props = self.model.evaluate(query)?;
        validation::validate_properties(&props)?;
        debug!(
            model = self.model.name(),
            oxidizer = %query.oxidizer,
            fuel = %query.fuel,
            pc_mpa = query.chamber_pressure_mpa,
            mr = query.mixture_ratio,
            eps = query.expansion_ratio,
            result = %props.summary(),
            "combustion properties evaluated"
        );

        if let Some(cache) = &self.cache {
            lock(cache).insert(key, props);
        }
        Ok(props)
    }

    /// Number of memoized results (zero when caching is off).
    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| lock(c).len())
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            lock(cache).clear();
        }
    }
}

// Cached values are plain data, so a poisoned lock is still usable.
fn lock(cache: &ResultCache) -> MutexGuard<'_, HashMap<QueryKey, CombustionProperties>> {
    cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
