mod writer;

pub use writer::ObkWriter;
