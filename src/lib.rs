//! Test and benchmark host for the `radius-msgauth` workspace.
//!
//! The verifier lives in `radius-msgauth`; the command-line shell in
//! `radius-msgauth-cli`. This package only carries the end-to-end tests
//! under `tests/` and the criterion benches under `benches/`.
