//! Stack safety for recursive tree walks.
//!
//! Expression evaluation and static checking recurse over the program tree.
//! Trees come from an external parser and may be arbitrarily deep, so every
//! recursive entry point is wrapped in [`ensure_sufficient_stack`], which grows
//! the stack on demand instead of overflowing.
//!
//! - **Native targets**: uses `stacker` to grow the stack.
//! - **WASM targets**: no-op passthrough.

/// Minimum stack space to keep available (64KB red zone).
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mirrors a left-leaning chain like `((1 + 1) + 1) + ...`.
    fn nested_sum(depth: u32) -> f64 {
        ensure_sufficient_stack(|| {
            if depth == 0 {
                0.0
            } else {
                nested_sum(depth - 1) + 1.0
            }
        })
    }

    #[test]
    fn test_shallow_chain() {
        assert!((nested_sum(10) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        assert!((nested_sum(100_000) - 100_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
