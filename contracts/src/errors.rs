//! Engine error definitions.

use odra::prelude::*;

/// IDRW engine errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EngineError {
    // Input validation errors (1xx)
    ZeroAmount = 100,
    ZeroAddress = 101,
    SameCollateral = 102,

    // Position errors (2xx)
    InsufficientCollateral = 200,
    RepayExceedsDebt = 201,
    BreaksCollateralRatio = 202,

    // Oracle errors (3xx)
    OracleUnavailable = 300,

    // Arithmetic errors (4xx)
    ArithmeticOverflow = 400,

    // Access control errors (5xx)
    NotAuthorized = 500,

    // Token errors (6xx)
    InsufficientTokenBalance = 600,
    InsufficientAllowance = 601,

    // Configuration errors (9xx)
    InvalidConfig = 900,
}

impl EngineError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Input validation
            EngineError::ZeroAmount => "Amount must be greater than zero",
            EngineError::ZeroAddress => "Invalid destination address",
            EngineError::SameCollateral => "Source and destination collateral must differ",

            // Position
            EngineError::InsufficientCollateral => "Insufficient collateral balance",
            EngineError::RepayExceedsDebt => "Repay amount exceeds outstanding debt",
            EngineError::BreaksCollateralRatio => "Operation breaks the collateralization ratio",

            // Oracle
            EngineError::OracleUnavailable => "Price feed unavailable or non-positive",

            // Arithmetic
            EngineError::ArithmeticOverflow => "Arithmetic overflow",

            // Access control
            EngineError::NotAuthorized => "Caller lacks the required authority",

            // Token
            EngineError::InsufficientTokenBalance => "Insufficient token balance",
            EngineError::InsufficientAllowance => "Insufficient allowance",

            // Config
            EngineError::InvalidConfig => "Invalid configuration parameter",
        }
    }
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<EngineError> for OdraError {
    fn from(error: EngineError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
