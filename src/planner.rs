// src/planner.rs

use std::sync::Arc;

use log::debug;

use crate::common::{FftError, FftProcess, supports_size, validate_shape, validate_size};
use crate::engine::CooleyTukey;
use crate::kernels::{Butterfly2, Butterfly4};
use crate::result::TransformResult;

pub type SharedProcess = Arc<dyn FftProcess + Send + Sync>;

/// One entry of the static implementation table.
pub struct Registration {
    pub name: &'static str,
    /// Higher wins when several entries support a size.
    pub priority: u8,
    /// Fixed size, or `None` for every power of two.
    pub size: Option<usize>,
    build: fn(&Arc<CooleyTukey>) -> SharedProcess,
}

impl Registration {
    pub fn supports(&self, n: usize) -> bool {
        supports_size(self.size, n)
    }
}

fn build_butterfly2(_: &Arc<CooleyTukey>) -> SharedProcess {
    Arc::new(Butterfly2)
}

fn build_butterfly4(_: &Arc<CooleyTukey>) -> SharedProcess {
    Arc::new(Butterfly4)
}

fn build_cooley_tukey(engine: &Arc<CooleyTukey>) -> SharedProcess {
    Arc::clone(engine) as SharedProcess
}

/// Known implementations. Among the entries supporting a size, the
/// highest `priority` is used.
pub static REGISTRY: &[Registration] = &[
    Registration {
        name: "butterfly2",
        priority: 10,
        size: Some(2),
        build: build_butterfly2,
    },
    Registration {
        name: "butterfly4",
        priority: 10,
        size: Some(4),
        build: build_butterfly4,
    },
    Registration {
        name: "cooley-tukey",
        priority: 0,
        size: None,
        build: build_cooley_tukey,
    },
];

/// Picks an implementation per size from `REGISTRY`.
///
/// The generic engine is always present as the fallback and as the
/// baseline other entries are checked against.
#[derive(Clone)]
pub struct Planner {
    engine: Arc<CooleyTukey>,
}

impl Planner {
    pub fn new(engine: CooleyTukey) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn baseline(&self) -> &CooleyTukey {
        &self.engine
    }

    pub fn registration(&self, n: usize) -> Result<&'static Registration, FftError> {
        validate_size(n)?;
        REGISTRY
            .iter()
            .filter(|entry| entry.supports(n))
            .max_by_key(|entry| entry.priority)
            .ok_or(FftError::InvalidSize { len: n })
    }

    pub fn plan(&self, n: usize) -> Result<SharedProcess, FftError> {
        let entry = self.registration(n)?;
        debug!("planned size {n} with {}", entry.name);
        Ok((entry.build)(&self.engine))
    }

    pub fn transform(
        &self,
        real: &[f64],
        imag: &[f64],
        forward: bool,
    ) -> Result<TransformResult, FftError> {
        let n = validate_shape(real, imag)?;
        let interleaved = self.plan(n)?.process(real, imag, forward)?;
        TransformResult::from_interleaved(&interleaved)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(CooleyTukey::shared())
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
