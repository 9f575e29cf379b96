#![deny(missing_docs)]
#![doc = "Permutation-symmetry reduction of spin-1/2 nuclear baths into weighted blocks."]

/// Binomial coefficients, degeneracy weights and block sizes.
pub mod combinatorics;
/// Enumeration of reduced multiplicity combinations.
pub mod product;
pub mod reduction;
/// Grouping of couplings into equivalent sets.
pub mod shrink;

pub use combinatorics::{block_size, group_weight, n_choose_r, weight};
pub use product::{cartesian_product, group_multiplicities, CombinationMatrix};
pub use reduction::BathReduction;
pub use shrink::{shrink, GroupedBath};
