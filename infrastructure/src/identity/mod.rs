pub mod uuid_generator;

pub use uuid_generator::UuidIdGenerator;
