//! Interned atom names.

mod symbol;
pub use symbol::Symbol;

mod symbol_table;
pub use symbol_table::SymbolTable;
