//! Integration tests for fsv path operations

mod compare_agreement;
mod hashing;
mod removal;
mod support;
mod symlinks;
