pub mod abi;
pub mod contract;
