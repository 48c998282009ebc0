pub mod index_writer;
pub mod inverted;
pub mod posting;
