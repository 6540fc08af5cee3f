pub mod allocation_service;
pub mod cost_basis_service;
pub mod market_data_service;
pub mod performance_service;
pub mod valuation_service;
