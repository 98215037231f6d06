//! Compiled-in checkpoint tables.
//!
//! A checkpoint pins the block hash at a given height. Any block at a pinned
//! height must carry exactly that hash; heights without a pin are
//! unconstrained by this module.
//!
//! # Attack vectors
//!
//! - **Long-range rewrite:** Without checkpoints an attacker with enough hash
//!   power could rewrite arbitrarily deep history. A pinned hash makes any
//!   competing chain that differs at that height invalid outright.
//!
//! - **Checkpoint spoofing:** The tables are compiled into the binary. An
//!   attacker would need to distribute a modified binary to exploit this,
//!   which is outside our threat model.
//!
//! # Tables
//!
//! [`MAINNET_CHECKPOINTS`] is populated from genesis upward.
//! [`TESTNET_CHECKPOINTS`] is empty. Use [`CheckpointTable::for_network`] to
//! pick the active one. Tests build their own tables with
//! [`CheckpointTable::new`].

use strata_core::block_index::BlockIndexNode;
use strata_core::constants::NetworkType;
use strata_core::traits::ChainView;
use strata_core::types::Hash256;

/// A trusted `(height, hash)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checkpoint {
    /// Pinned block height.
    pub height: u64,
    /// Expected block hash at `height`.
    pub hash: Hash256,
}

impl Checkpoint {
    /// Pin `hash` at `height`.
    pub const fn new(height: u64, hash: Hash256) -> Self {
        Self { height, hash }
    }
}

/// Immutable checkpoint list sorted by strictly increasing height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckpointTable<'a> {
    entries: &'a [Checkpoint],
}

impl<'a> CheckpointTable<'a> {
    /// A table with no checkpoints.
    pub const EMPTY: Self = Self { entries: &[] };

    /// Wrap a checkpoint list.
    ///
    /// # Panics
    ///
    /// Panics if heights are not strictly increasing. For a table built in a
    /// `static` initializer this is a compile error.
    pub const fn new(entries: &'a [Checkpoint]) -> Self {
        let mut i = 1;
        while i < entries.len() {
            assert!(
                entries[i - 1].height < entries[i].height,
                "checkpoint heights must be strictly increasing"
            );
            i += 1;
        }
        Self { entries }
    }

    /// The compiled-in table for `network`.
    pub fn for_network(network: NetworkType) -> &'static CheckpointTable<'static> {
        match network {
            NetworkType::Mainnet => &MAINNET_CHECKPOINTS,
            NetworkType::Testnet => &TESTNET_CHECKPOINTS,
        }
    }

    /// All checkpoints, ascending by height.
    pub fn entries(&self) -> &'a [Checkpoint] {
        self.entries
    }

    /// Iterate checkpoints in ascending height order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a Checkpoint> + use<'a> {
        self.entries.iter()
    }

    /// Number of checkpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if the table has no checkpoints.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The pinned hash at `height`, if any.
    pub fn get(&self, height: u64) -> Option<&'a Hash256> {
        let entries = self.entries;
        entries
            .binary_search_by_key(&height, |cp| cp.height)
            .ok()
            .map(|i| &entries[i].hash)
    }

    /// The highest checkpoint, if any.
    pub fn last(&self) -> Option<&'a Checkpoint> {
        self.entries.last()
    }

    /// Whether `hash` is acceptable at `height`.
    ///
    /// Returns `true` when there is no checkpoint at `height`, otherwise
    /// `true` iff `hash` equals the pinned hash. A `false` result means the
    /// block, and every chain built on it, must be rejected.
    pub fn check_hardened(&self, height: u64, hash: &Hash256) -> bool {
        match self.get(height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    /// Rough expected chain length for sync progress reporting.
    ///
    /// The highest checkpoint height, or 0 for an empty table. Never used for
    /// validation.
    pub fn total_blocks_estimate(&self) -> u64 {
        self.last().map_or(0, |cp| cp.height)
    }

    /// The locally indexed node of the highest checkpoint present in `chain`.
    ///
    /// Scans from the highest height downward and stops at the first
    /// checkpoint hash found in the index. Returns `None` if no checkpoint
    /// hash is indexed.
    pub fn last_checkpoint<'c, C>(&self, chain: &'c C) -> Option<&'c BlockIndexNode>
    where
        C: ChainView + ?Sized,
    {
        self.entries.iter().rev().find_map(|cp| chain.find(&cp.hash))
    }
}

const MAINNET_ENTRIES: &[Checkpoint] = &[
    Checkpoint::new(0, Hash256::from_hex_const("0x00000b1677bc31fdf9d92f0781896022289464b4a31a3576a486390b86ace531")), // genesis
    Checkpoint::new(50_000, Hash256::from_hex_const("0xf9c0721cbf01b5c1579a2538cc469c3fc212d3d4c11794542fb53ab4f6b6048e")),
    Checkpoint::new(100_000, Hash256::from_hex_const("0xa304cc0b47360c511e31aaf3499e6d20bb94038c6976096c8e8e2768bdb80a3b")),
    Checkpoint::new(150_000, Hash256::from_hex_const("0x9670f10c225211a838aefab6ba079fcdcd32dcb3425c4cf85b0fed43b566d8fc")),
    Checkpoint::new(200_000, Hash256::from_hex_const("0xa8d150e4026c00e3b720f34f7dd6956f78bfd9db42d26330871098d8ff275213")),
    Checkpoint::new(240_000, Hash256::from_hex_const("0x4f36341a6d8f8c7fd313d8f8c01523a0bca9ad614f1123ce59024b45a339befe")),
    Checkpoint::new(278_000, Hash256::from_hex_const("0x6899ae0197f0552dc86ec55413eaf59905e3d9c695279860827464ddd0658bef")),
    Checkpoint::new(296_756, Hash256::from_hex_const("0x151cf67b473236b0b5c7422c967a0555cd2827a707745840badf4498d5e3e369")),
    Checkpoint::new(309_668, Hash256::from_hex_const("0x71896e216eaf74512ed3b5403a4db32dc51fb94dd6bb2414ab41ca81859f96e6")),
    Checkpoint::new(318_823, Hash256::from_hex_const("0xce22b29442d7d4e701967fcace3d707cd1e67f2624e74195131ea697c4abd52a")),
    Checkpoint::new(336_636, Hash256::from_hex_const("0xe57af6f99d9d22a5a96211790af7329855328d8b0521c95a99c3ea41116b8868")),
    Checkpoint::new(341_111, Hash256::from_hex_const("0x5a7e7f416037a7afadf091191c0940756a742de0dc18fd26207f56a6fb8ae13c")),
    Checkpoint::new(371_144, Hash256::from_hex_const("0xa5276315015a7240e549849028be3cbf5554610128f5ff5e803e02e9c945ab71")),
    Checkpoint::new(416_918, Hash256::from_hex_const("0xd65962e793ef8c446147f2a4b0581e60c6fe7cdbe5233f7e22609feafafd1215")),
    Checkpoint::new(441_775, Hash256::from_hex_const("0x5b4444671231800a4c773d850396b073e7eef2dbab33681677ecffefb71f6a41")),
    Checkpoint::new(477_829, Hash256::from_hex_const("0x07b2d4ca094ddf584ff98bae028129cf6f6dc9f2697314e334d4b6be31df385e")),
    Checkpoint::new(563_360, Hash256::from_hex_const("0xb4f86f102a3762d0c191e2e338684fe82c35a733a8ace65f5b2d5b8eca299030")),
    Checkpoint::new(585_856, Hash256::from_hex_const("0x3a5ed4262d04d1a40c78a0ea106934c810f836ab7e6c959c75e299ab0d2eba39")),
];

/// Production checkpoints, genesis first.
///
/// Only append entries buried deep enough that no honest reorg can reach
/// them, and keep heights ascending: the table is checked at compile time.
pub static MAINNET_CHECKPOINTS: CheckpointTable<'static> = CheckpointTable::new(MAINNET_ENTRIES);

/// Test network checkpoints. Always empty.
pub static TESTNET_CHECKPOINTS: CheckpointTable<'static> = CheckpointTable::EMPTY;

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::block_index::BlockIndex;

    const HA: Hash256 = Hash256([0xAA; 32]);
    const HB: Hash256 = Hash256([0xBB; 32]);
    const HZ: Hash256 = Hash256([0xFF; 32]);

    const GENESIS: Hash256 = Hash256::from_hex_const(
        "00000b1677bc31fdf9d92f0781896022289464b4a31a3576a486390b86ace531",
    );

    fn two_entry_entries() -> [Checkpoint; 2] {
        [Checkpoint::new(0, HA), Checkpoint::new(100, HB)]
    }

    // ------------------------------------------------------------------
    // check_hardened
    // ------------------------------------------------------------------

    #[test]
    fn hardened_passes_for_matching_hash() {
        let entries = two_entry_entries();
        let table = CheckpointTable::new(&entries);
        assert!(table.check_hardened(0, &HA));
        assert!(table.check_hardened(100, &HB));
    }

    #[test]
    fn hardened_fails_for_wrong_hash() {
        let entries = two_entry_entries();
        let table = CheckpointTable::new(&entries);
        assert!(!table.check_hardened(0, &HZ));
        assert!(!table.check_hardened(100, &HA));
    }

    #[test]
    fn no_checkpoint_at_height_passes() {
        let entries = two_entry_entries();
        let table = CheckpointTable::new(&entries);
        for height in [1, 50, 99, 101, u64::MAX] {
            assert!(
                table.check_hardened(height, &HZ),
                "height {height} should pass with no checkpoint"
            );
        }
    }

    #[test]
    fn empty_table_accepts_everything() {
        assert!(CheckpointTable::EMPTY.check_hardened(0, &HZ));
        assert!(TESTNET_CHECKPOINTS.check_hardened(0, &HZ));
        assert!(TESTNET_CHECKPOINTS.check_hardened(u64::MAX, &Hash256::ZERO));
    }

    #[test]
    fn mainnet_genesis_is_pinned() {
        assert!(MAINNET_CHECKPOINTS.check_hardened(0, &GENESIS));
        assert!(!MAINNET_CHECKPOINTS.check_hardened(0, &Hash256::ZERO));
    }

    // ------------------------------------------------------------------
    // table structure
    // ------------------------------------------------------------------

    #[test]
    fn mainnet_table_is_strictly_increasing_from_genesis() {
        let entries = MAINNET_CHECKPOINTS.entries();
        assert_eq!(entries.len(), 18);
        assert_eq!(entries[0].height, 0);
        assert!(entries.windows(2).all(|w| w[0].height < w[1].height));
    }

    #[test]
    fn testnet_table_is_empty() {
        assert!(TESTNET_CHECKPOINTS.is_empty());
        assert_eq!(TESTNET_CHECKPOINTS.len(), 0);
        assert!(TESTNET_CHECKPOINTS.last().is_none());
    }

    #[test]
    fn for_network_selects_table() {
        assert_eq!(
            CheckpointTable::for_network(NetworkType::Mainnet).len(),
            MAINNET_CHECKPOINTS.len()
        );
        assert!(CheckpointTable::for_network(NetworkType::Testnet).is_empty());
    }

    #[test]
    fn get_finds_exact_heights_only() {
        assert_eq!(MAINNET_CHECKPOINTS.get(0), Some(&GENESIS));
        assert!(MAINNET_CHECKPOINTS.get(100_000).is_some());
        assert!(MAINNET_CHECKPOINTS.get(100_001).is_none());
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn unsorted_table_panics() {
        let entries = [Checkpoint::new(10, HA), Checkpoint::new(5, HB)];
        let _ = CheckpointTable::new(&entries);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn duplicate_height_panics() {
        let entries = [Checkpoint::new(10, HA), Checkpoint::new(10, HB)];
        let _ = CheckpointTable::new(&entries);
    }

    // ------------------------------------------------------------------
    // total_blocks_estimate
    // ------------------------------------------------------------------

    #[test]
    fn estimate_is_highest_height() {
        let entries = two_entry_entries();
        assert_eq!(CheckpointTable::new(&entries).total_blocks_estimate(), 100);
        assert_eq!(MAINNET_CHECKPOINTS.total_blocks_estimate(), 585_856);
    }

    #[test]
    fn estimate_empty_is_zero() {
        assert_eq!(TESTNET_CHECKPOINTS.total_blocks_estimate(), 0);
        assert_eq!(CheckpointTable::EMPTY.total_blocks_estimate(), 0);
    }

    // ------------------------------------------------------------------
    // last_checkpoint
    // ------------------------------------------------------------------

    #[test]
    fn last_checkpoint_picks_highest_present() {
        let entries = two_entry_entries();
        let table = CheckpointTable::new(&entries);

        let mut index = BlockIndex::new();
        index.insert(HA, None).unwrap();
        index.insert(HB, Some(&HA)).unwrap();

        let node = table.last_checkpoint(&index).unwrap();
        assert_eq!(node.hash, HB);
    }

    #[test]
    fn last_checkpoint_falls_back_to_lower_entry() {
        let entries = two_entry_entries();
        let table = CheckpointTable::new(&entries);

        let mut index = BlockIndex::new();
        index.insert(HA, None).unwrap();
        index.insert(HZ, Some(&HA)).unwrap();

        let node = table.last_checkpoint(&index).unwrap();
        assert_eq!(node.hash, HA);
    }

    #[test]
    fn last_checkpoint_none_when_nothing_indexed() {
        let entries = two_entry_entries();
        let table = CheckpointTable::new(&entries);

        let mut index = BlockIndex::new();
        index.insert(HZ, None).unwrap();
        assert!(table.last_checkpoint(&index).is_none());
        assert!(table.last_checkpoint(&BlockIndex::new()).is_none());
    }

    #[test]
    fn last_checkpoint_empty_table_is_none() {
        let mut index = BlockIndex::new();
        index.insert(GENESIS, None).unwrap();
        assert!(TESTNET_CHECKPOINTS.last_checkpoint(&index).is_none());
        assert_eq!(
            MAINNET_CHECKPOINTS.last_checkpoint(&index).map(|n| n.hash),
            Some(GENESIS)
        );
    }
}
