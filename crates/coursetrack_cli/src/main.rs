//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `coursetrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe that validates core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("coursetrack_core ping={}", coursetrack_core::ping());
    println!("coursetrack_core version={}", coursetrack_core::core_version());
}
