pub mod ast;
pub mod parser;
pub mod printer;
pub mod program;
pub mod report;
pub mod symbol;


pub use parser::{parse_clause, parse_program, parse_translation_unit, ParseError};
pub use printer::print;
pub use program::{ClauseHandle, Program, ProgramError, TranslationUnit};
pub use report::{DebugReport, Diagnostic, ErrorReport};
pub use symbol::{Symbol, SymbolId, SymbolTable};
