//! # Clock Scenario and Property Tests
//!
//! Cross-module checks that exercise the whole render path and the
//! animation clock together. Unit tests live next to the code they test.
