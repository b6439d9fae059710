//! Property test suite entry point.

mod match_properties;
