pub mod bqm;
pub mod cqm;
pub mod decode;
pub mod encoding;
pub mod error;
pub mod items;
pub mod solve;

pub use bqm::{EncodedBqm, build_bqm, encode_bqm, slack_coefficients};
pub use cqm::{CAPACITY_LABEL, build_cqm, capacity_constraint, encode_cqm};
pub use decode::{Decoded, decode, decode_sample, selected_items};
pub use encoding::Encoding;
pub use error::KnapsackError;
pub use items::{Item, Items, Totals};
pub use solve::{KnapsackSolution, solve};
