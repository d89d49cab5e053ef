//! Hash containers keyed by small `Copy` values like handles.
//!
//! Handles are never attacker controlled, so we trade the DoS resistance of the
//! default SipHash for the speed of `FxHasher`.

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;

use rustc_hash::FxHasher;

pub type FastBuildHasher = BuildHasherDefault<FxHasher>;
pub type FastHashMap<K, V> = HashMap<K, V, FastBuildHasher>;
pub type FastHashSet<K> = HashSet<K, FastBuildHasher>;
