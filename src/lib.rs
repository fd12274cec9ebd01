//! Radix-2 Cooley-Tukey FFT over `f64` with cached twiddle factors and
//! bit-reversal tables.
//!
//! ```
//! use radix2_fft::CooleyTukey;
//!
//! let engine = CooleyTukey::shared();
//! let spectrum = engine.forward(&[1.0, 0.0, 0.0, 0.0], &[0.0; 4]).unwrap();
//! assert_eq!(spectrum.magnitudes(), vec![0.5; 4]);
//! ```

pub mod cache;
pub mod common;
pub mod engine;
pub mod kernels;
pub mod planner;
pub mod result;
pub mod validate;

pub use cache::{BitReversalCache, CacheConfig, CacheStats, TrigFactorCache};
pub use common::{FftError, FftProcess};
pub use engine::{CooleyTukey, Trace};
pub use kernels::{Butterfly2, Butterfly4};
pub use planner::{Planner, REGISTRY, Registration};
pub use result::TransformResult;
pub use validate::{Comparison, DEFAULT_TOLERANCE, Divergence, compare, compare_traces};
