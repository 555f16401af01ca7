//! Entity structs for fitgen domain objects.
//!
//! Users and catalog entries are read-only inputs to generation. Routines and
//! their exercises map to the `routines` / `routine_exercises` tables in the
//! libSQL store. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON output and schema validation.

mod catalog;
mod routine;
mod user;

pub use catalog::CatalogEntry;
pub use routine::{Routine, RoutineDetail, RoutineExercise, ValidatedExercise};
pub use user::UserContext;
