//! Domain model for the personal course list.
//!
//! # Responsibility
//! - Define the canonical course record and its pre-persistence draft shape.
//! - Enforce the course validity invariant before anything reaches SQL.
//!
//! # Invariants
//! - A course is valid only when department and location are non-empty and
//!   the course number is a positive integer.
//! - `CourseId` values are assigned by the store, never by callers.

pub mod course;
