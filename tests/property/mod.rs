// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of the pure naming and change-detection functions that must
//! hold for all inputs.

mod change_detection;
mod subscription_naming;
