//! Nearest-neighbour queries over typed stores.

mod brute;

pub use brute::BruteNearestNeighbour;
