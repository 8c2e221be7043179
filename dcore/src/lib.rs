pub mod buf;
pub mod tally;
