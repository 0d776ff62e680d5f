/// Legacy Word binary format support.
///
/// SPRM decoding is shared by every property record; the Word specific
/// records and the parser event interface live in [`doc`].
pub mod doc;
pub mod sprm;
pub mod sprm_operations;
