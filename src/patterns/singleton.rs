//! Once-only lazy construction of process-wide resources

use std::any::type_name;
use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

/// Builds a singleton value for types without a usable `Default`
pub trait InitStrategy<T> {
    fn init() -> T;
}

/// A process-wide value constructed on first access
///
/// Safe to use from a `static`: the first [`instance`](Self::instance) call
/// constructs the value, concurrent callers block until it is ready, and
/// every caller observes the same instance. The value is never dropped
/// while the singleton lives.
///
/// ```
/// use typereg::patterns::{InitStrategy, LazySingleton};
///
/// struct Settings {
///     verbose: bool,
/// }
///
/// struct FromEnv;
///
/// impl InitStrategy<Settings> for FromEnv {
///     fn init() -> Settings {
///         Settings { verbose: std::env::var_os("VERBOSE").is_some() }
///     }
/// }
///
/// static COUNTERS: LazySingleton<Vec<u32>> = LazySingleton::with_default();
/// static SETTINGS: LazySingleton<Settings> = LazySingleton::with_strategy::<FromEnv>();
///
/// assert!(COUNTERS.instance().is_empty());
/// let _ = SETTINGS.instance().verbose;
/// ```
pub struct LazySingleton<T> {
    cell: OnceLock<T>,
    init: fn() -> T,
}

impl<T> LazySingleton<T> {
    /// Create a singleton built by `init`
    pub const fn new(init: fn() -> T) -> Self {
        Self {
            cell: OnceLock::new(),
            init,
        }
    }

    /// Create a singleton built by the strategy `S`
    pub const fn with_strategy<S: InitStrategy<T>>() -> Self {
        Self::new(S::init)
    }

    /// Get the instance, constructing it on first call
    pub fn instance(&self) -> &T {
        self.cell.get_or_init(|| {
            debug!(singleton = type_name::<T>(), "constructing singleton instance");
            (self.init)()
        })
    }

    /// Get the instance only if it has already been constructed
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Check whether the instance has been constructed
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: Default> LazySingleton<T> {
    /// Create a singleton built by `T::default`
    pub const fn with_default() -> Self {
        Self::new(T::default)
    }
}

impl<T: Default> Default for LazySingleton<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazySingleton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySingleton")
            .field("instance", &self.cell.get())
            .finish()
    }
}
