pub mod errors;
pub mod pfe;
pub mod pfn;
pub mod primes;
