//! End-to-end parser tests: declarations, scoping, declaration-state
//! transitions, and the error paths.
