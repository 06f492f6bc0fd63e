//! Objects used to read and write logic programs and CNF formulas.

mod dimacs_reader;
pub use dimacs_reader::DimacsReader;

mod output_style;
pub use output_style::OutputStyle;

mod program_writer;
pub use program_writer::atom_len;
pub use program_writer::ProgramWriter;

mod smodels_reader;
pub use smodels_reader::SmodelsReader;

mod specs;
pub use specs::Instance;
pub use specs::InstanceHeader;
pub use specs::InstanceReader;
pub use specs::WarningHandler;

mod table_writer;
pub use table_writer::write_status;

mod token_reader;
