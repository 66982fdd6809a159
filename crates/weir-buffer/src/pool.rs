//! The capacity-accounting primitive behind both storage tiers.

use indexmap::IndexMap;

use weir_core::PoolError;

/// One storage tier: a capacity counter under a per-tick rate cap,
/// plus the ledger of observations whose data sits in the tier.
///
/// The hot and cold tiers are two instances of this type with
/// different parameters. `current_capacity` counts free space, so it
/// starts at `total_capacity` and falls as data arrives. The resident
/// ledger maps observation name to the amount staged here so far;
/// for the hot tier that amount is the authoritative record of how
/// much data remains to move to cold.
///
/// Every operation is all-or-nothing: a rejected call leaves both the
/// counter and the ledger exactly as they were.
#[derive(Clone, Debug)]
pub struct CapacityPool {
    name: String,
    total_capacity: u64,
    current_capacity: u64,
    rate_cap: u64,
    residents: IndexMap<String, u64>,
}

impl CapacityPool {
    /// Create an empty pool with all capacity free.
    pub fn new(name: impl Into<String>, total_capacity: u64, rate_cap: u64) -> Self {
        Self {
            name: name.into(),
            total_capacity,
            current_capacity: total_capacity,
            rate_cap,
            residents: IndexMap::new(),
        }
    }

    /// Name of the pool (`hot` or `cold` in a standard buffer).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Immutable size of the tier.
    pub fn total_capacity(&self) -> u64 {
        self.total_capacity
    }

    /// Free space right now. Always within `0..=total_capacity`.
    pub fn current_capacity(&self) -> u64 {
        self.current_capacity
    }

    /// Most units the pool admits in one tick.
    pub fn rate_cap(&self) -> u64 {
        self.rate_cap
    }

    /// Units currently occupied.
    pub fn used(&self) -> u64 {
        self.total_capacity - self.current_capacity
    }

    /// Consume `amount` units of free space.
    ///
    /// A single call covers at most one tick's worth of arrival, so
    /// `amount` must respect the rate cap as well as the free space.
    ///
    /// # Errors
    ///
    /// [`PoolError::RateExceeded`] if `amount` beats the per-tick cap;
    /// [`PoolError::CapacityExhausted`] if it beats the free space.
    /// The pool is unchanged on either.
    pub fn reserve(&mut self, amount: u64) -> Result<(), PoolError> {
        if amount > self.rate_cap {
            return Err(PoolError::RateExceeded {
                pool: self.name.clone(),
                requested: amount,
                rate_cap: self.rate_cap,
            });
        }
        if amount > self.current_capacity {
            return Err(PoolError::CapacityExhausted {
                pool: self.name.clone(),
                requested: amount,
                available: self.current_capacity,
            });
        }
        self.current_capacity -= amount;
        Ok(())
    }

    /// Return `amount` units of space, saturating at `total_capacity`.
    ///
    /// Used when data is moved out of the tier. Releasing more than
    /// is occupied simply refills the pool; it cannot overflow the
    /// capacity bound.
    pub fn release(&mut self, amount: u64) {
        self.current_capacity = self
            .current_capacity
            .saturating_add(amount)
            .min(self.total_capacity);
    }

    /// Record `amount` more units as staged for an observation.
    ///
    /// First call for a name makes it resident, appended behind the
    /// existing residents (the ledger keeps arrival order); later
    /// calls accumulate.
    pub fn track(&mut self, observation: &str, amount: u64) {
        *self
            .residents
            .entry(observation.to_string())
            .or_insert(0) += amount;
    }

    /// Remove an observation from the resident ledger.
    ///
    /// # Errors
    ///
    /// [`PoolError::NotResident`] if the name is unknown here.
    pub fn untrack(&mut self, observation: &str) -> Result<(), PoolError> {
        self.residents
            .shift_remove(observation)
            .map(|_| ())
            .ok_or_else(|| PoolError::NotResident {
                pool: self.name.clone(),
                observation: observation.to_string(),
            })
    }

    /// Draw `amount` units off an observation's staged ledger entry,
    /// returning what remains staged for it.
    ///
    /// The entry stays in the ledger even at zero; only
    /// [`untrack`](Self::untrack) removes it. Capacity is a separate
    /// ledger — callers pair `withdraw` with [`release`](Self::release)
    /// when the drawn data actually leaves the tier.
    ///
    /// # Errors
    ///
    /// [`PoolError::NotResident`] if the name is unknown here;
    /// [`PoolError::CapacityExhausted`] if `amount` exceeds the staged
    /// remainder.
    pub fn withdraw(&mut self, observation: &str, amount: u64) -> Result<u64, PoolError> {
        let staged = self.residents.get_mut(observation).ok_or_else(|| {
            PoolError::NotResident {
                pool: self.name.clone(),
                observation: observation.to_string(),
            }
        })?;
        if amount > *staged {
            return Err(PoolError::CapacityExhausted {
                pool: self.name.clone(),
                requested: amount,
                available: *staged,
            });
        }
        *staged -= amount;
        Ok(*staged)
    }

    /// Amount staged for an observation, or `None` if not resident.
    pub fn staged(&self, observation: &str) -> Option<u64> {
        self.residents.get(observation).copied()
    }

    /// Whether an observation is resident in this tier.
    pub fn contains(&self, observation: &str) -> bool {
        self.residents.contains_key(observation)
    }

    /// Resident observation names, in arrival order.
    pub fn observations(&self) -> impl Iterator<Item = &str> {
        self.residents.keys().map(String::as_str)
    }

    /// Number of resident observations.
    pub fn resident_count(&self) -> usize {
        self.residents.len()
    }
}
