//! Passes computing properties of programs and transforming them.

mod marking;
pub use marking::check_negative_invisible;
pub use marking::mark_io_atoms;
pub use marking::mark_occurrences;
pub use marking::mark_visible;

mod statistics;
pub use statistics::ProgramStatistics;

mod strip;
pub use strip::strip_compute_statement;
pub use strip::strip_program;
