use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fixed storage key identifying one persisted sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace(&'static str);

impl Namespace {
    /// Blood sugar readings
    pub const SUGAR_LEVELS: Namespace = Namespace("sugarLevels");

    /// Blood pressure readings
    pub const BLOOD_PRESSURE: Namespace = Namespace("bloodPressure");

    /// Medicines
    pub const MEDICINES: Namespace = Namespace("medicines");

    /// Create a namespace for an arbitrary key
    pub const fn new(key: &'static str) -> Self {
        Namespace(key)
    }

    /// Storage key of the namespace
    pub fn key(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// An entity persisted as one append-ordered sequence under a fixed namespace
pub trait Reading: Serialize + DeserializeOwned + Clone {
    /// Namespace the sequence lives under
    const NAMESPACE: Namespace;
}
