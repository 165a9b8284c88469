//! Parser tests.
//!
//! - `scenarios`: small block streams with known trees
//! - `document`: header, body, schedules and conclusions
//! - `properties`: rollback, determinism, memo transparency and the
//!   sequence law over generated streams

mod document;
