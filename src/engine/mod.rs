// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure computation over in-memory record collections. Nothing in here
//! touches the store or performs I/O; malformed or empty input reduces to
//! zero-valued results instead of errors.

pub mod aggregate;
pub mod advice;
pub mod health;
pub mod trend;
pub mod validate;
