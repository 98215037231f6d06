//! Protocol constants.

use std::fmt;

/// Network type: Mainnet or Testnet.
///
/// Selects which compiled-in checkpoint table is active.
///
/// # Examples
///
/// ```
/// use strata_core::constants::NetworkType;
/// let net = NetworkType::default();
/// assert_eq!(net, NetworkType::Mainnet);
/// assert_eq!(net.name(), "mainnet");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkType {
    /// Production network.
    #[default]
    Mainnet,
    /// Public test network. Carries no checkpoints.
    Testnet,
}

impl NetworkType {
    /// Lowercase network name.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_core::constants::NetworkType;
    /// assert_eq!(NetworkType::Testnet.name(), "testnet");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distance in blocks between the chain tip and the sync horizon.
///
/// Blocks at or below `tip.height - CHECKPOINT_SPAN` are treated as settled
/// and may not be rewritten by a reorganization.
pub const CHECKPOINT_SPAN: u64 = 500;
