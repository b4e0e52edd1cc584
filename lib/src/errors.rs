use soroban_sdk::contracterror;

/// Error taxonomy shared by every StellarDrop contract.
///
/// Contract entry points return `Result<_, Error>`; a returned error aborts
/// the invocation and rolls back all storage writes, so a failed call never
/// leaves partial state behind.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    NotOwner = 4,
    InvalidPriceBounds = 5,
    AlreadyListed = 6,
    NotListed = 7,
    InsufficientPayment = 8,
    UnsupportedToken = 9,
    NoFunds = 10,
    StaleOrInvalidQuote = 11,
    ConfigurationError = 12,
    AssetNotFound = 13,
    Overflow = 14,
}
