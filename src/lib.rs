//! Intersection Simulation Library
//!
//! Compares an adaptive, queue-driven signal controller against a classic
//! fixed-timing controller on the same stream of arriving traffic.

pub mod simulation;
