//! Resolution counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters updated by the resolver and snapshots.
#[derive(Debug, Default)]
pub struct ResolverStats {
	lookups: AtomicU64,
	provider_hits: AtomicU64,
	rule_hits: AtomicU64,
	cycles: AtomicU64,
	invalid_values: AtomicU64,
	stale_reuses: AtomicU64,
}

/// Point-in-time copy of [`ResolverStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
	/// Walks started for non-reserved keys.
	pub lookups: u64,
	/// Values answered directly by a provider.
	pub provider_hits: u64,
	/// Values derived by a rule.
	pub rule_hits: u64,
	/// Re-entries stopped by the cycle guard.
	pub cycles: u64,
	/// Values flagged by a validator.
	pub invalid_values: u64,
	/// Snapshot uses after their event had passed.
	pub stale_reuses: u64,
}

impl ResolverStats {
	pub(crate) fn record_lookup(&self) {
		self.lookups.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_provider_hit(&self) {
		self.provider_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_rule_hit(&self) {
		self.rule_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cycle(&self) {
		self.cycles.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_invalid(&self) {
		self.invalid_values.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_stale(&self) {
		self.stale_reuses.fetch_add(1, Ordering::Relaxed);
	}

	pub fn snapshot(&self) -> StatsSnapshot {
		StatsSnapshot {
			lookups: self.lookups.load(Ordering::Relaxed),
			provider_hits: self.provider_hits.load(Ordering::Relaxed),
			rule_hits: self.rule_hits.load(Ordering::Relaxed),
			cycles: self.cycles.load(Ordering::Relaxed),
			invalid_values: self.invalid_values.load(Ordering::Relaxed),
			stale_reuses: self.stale_reuses.load(Ordering::Relaxed),
		}
	}
}
