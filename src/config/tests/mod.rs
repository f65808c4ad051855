//! Config module tests
//!
//! Contains test suites for:
//! - Rc file discovery and template creation
//! - Reload and open commands, including failure handling
