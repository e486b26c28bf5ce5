use std::collections::HashSet;

/// Crypto exchange traded products, reported apart from other securities.
pub const CRYPTO_ISINS: [&str; 7] = [
    "GB00BLD4ZL17", // CoinShares Physical Bitcoin
    "GB00BNRRF105", // CoinShares Physical Staked Algorand
    "GB00BNRRB013", // CoinShares Physical Staked Matic
    "GB00BNRRFW10", // CoinShares Physical Staked Polkadot
    "GB00BLD4ZN31", // CoinShares Physical XRP
    "DE000A3GVKY4", // ETC Group Physical Cardano
    "DE000A3GVKZ1", // ETC Group Physical Solana
];

/// Selects securities by ISIN.
///
/// An empty include set admits every ISIN. The exclude set is applied after
/// the include set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsinFilter {
    include: HashSet<String>,
    exclude: HashSet<String>
}

impl IsinFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn including<I, S>(isins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: isins.into_iter().map(Into::into).collect(),
            exclude: HashSet::new()
        }
    }

    pub fn excluding<I, S>(isins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: HashSet::new(),
            exclude: isins.into_iter().map(Into::into).collect()
        }
    }

    pub fn crypto() -> Self {
        Self::including(CRYPTO_ISINS)
    }

    pub fn without_crypto() -> Self {
        Self::excluding(CRYPTO_ISINS)
    }

    pub fn matches(&self, isin: &str) -> bool {
        (self.include.is_empty() || self.include.contains(isin)) && !self.exclude.contains(isin)
    }
}
