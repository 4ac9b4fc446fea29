pub mod ngram;
pub mod repetition;
pub mod token;
pub mod turn;

pub use ngram::*;
pub use repetition::*;
pub use token::*;
pub use turn::*;
