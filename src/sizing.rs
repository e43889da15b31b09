//! Workforce sizing and per-worker token allocation
//!
//! Both functions are pure computations: no suspension, no side effects.

use crate::catalog::PatternSpec;

/// Description length that buys one extra worker beyond the pattern minimum.
const CHARS_PER_WORKER: usize = 40;

/// Size the workforce for a pattern from the description length.
///
/// Longer descriptions bias toward the high end of the pattern's worker
/// range; the result is always clamped into
/// `[min_workers, max_workers]`, for zero-length and arbitrarily long
/// descriptions alike.
pub fn size_workforce(spec: &PatternSpec, description: &str) -> u32 {
    let extra = (description.len() / CHARS_PER_WORKER) as u32;
    spec.min_workers
        .saturating_add(extra)
        .clamp(spec.min_workers, spec.max_workers)
}

/// Compute the token allocation for each worker.
///
/// `floor(total_budget * (1 - efficiency_ratio) / worker_count)`. The
/// allocations of all workers together never exceed the budget; rounding
/// slack stays "saved". A workforce of zero receives the whole budget as a
/// single non-delegated allocation rather than dividing by zero.
pub fn allocate_per_worker(total_budget: u64, spec: &PatternSpec, worker_count: u32) -> u64 {
    if worker_count == 0 {
        return total_budget;
    }
    let effective = (total_budget as f64 * (1.0 - spec.efficiency_ratio)).floor() as u64;
    effective / u64::from(worker_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, PatternKind};

    fn custom_spec(efficiency_ratio: f64) -> PatternSpec {
        PatternSpec {
            efficiency_ratio,
            ..crate::catalog::spec_for(PatternKind::Decompose).clone()
        }
    }

    #[test]
    fn test_size_stays_in_range_for_all_patterns() {
        let long = "x".repeat(10_000);
        for spec in catalog() {
            for description in ["", "short task", long.as_str()] {
                let count = size_workforce(spec, description);
                assert!(count >= spec.min_workers, "{}: below min", spec.kind);
                assert!(count <= spec.max_workers, "{}: above max", spec.kind);
            }
        }
    }

    #[test]
    fn test_longer_descriptions_scale_up() {
        let spec = crate::catalog::spec_for(PatternKind::Decompose);
        let short = size_workforce(spec, "brief");
        let long = size_workforce(spec, &"elaborate on this endlessly ".repeat(8));
        assert_eq!(short, spec.min_workers);
        assert!(long > short);
    }

    #[test]
    fn test_allocation_matches_formula() {
        // budget 1000, ratio 0.65, 4 workers -> floor(1000 * 0.35 / 4) = 87
        let spec = custom_spec(0.65);
        assert_eq!(allocate_per_worker(1000, &spec, 4), 87);
    }

    #[test]
    fn test_allocation_never_exceeds_budget() {
        for spec in catalog() {
            for budget in [0u64, 1, 99, 1000, 123_456] {
                for count in 1..=12u32 {
                    let per = allocate_per_worker(budget, spec, count);
                    assert!(
                        per * u64::from(count) <= budget,
                        "{}: {} workers overspend budget {}",
                        spec.kind,
                        count,
                        budget
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_workers_returns_full_budget() {
        let spec = crate::catalog::spec_for(PatternKind::Broadcast);
        assert_eq!(allocate_per_worker(1000, spec, 0), 1000);
    }
}
