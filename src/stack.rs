//! Host-stack headroom for the recursive evaluator.
//!
//! Every Lox call nests several Rust frames (`evaluate` → `call` →
//! `execute_block` → `execute` → `evaluate`), so a script recursing up to
//! [`MAX_CALL_DEPTH`](crate::interpreter::MAX_CALL_DEPTH) can need more stack
//! than an embedder's thread has.  Recursion goes through
//! [`ensure_sufficient_stack`], which moves onto a fresh heap-allocated segment
//! whenever the current one runs low, so the depth guard is always reached
//! first.

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (128KB red zone).
    const RED_ZONE: usize = 128 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
