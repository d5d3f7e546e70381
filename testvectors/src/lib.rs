//! Fixed Preview network values shared by unit and live tests.

/// Blocks known to exist on Preview.
pub mod blocks {
    /// Hash of the block at [`REFERENCE_SLOT`].
    pub const REFERENCE_HASH: &str =
        "6d1b288746ce3be63dcf68af9783282a0795c4d22eda4f5daef195f6034ccfc4";
    /// Slot of [`REFERENCE_HASH`].
    pub const REFERENCE_SLOT: u64 = 84_194_200;
}

/// A known unspent output and its encoding.
pub mod utxos {
    /// Id of the transaction that produced the output.
    pub const TX_HASH: &str = "9874bdf4ad47b2d30a2146fc4ba1f94859e58e772683e75001aca6e85de7690d";
    /// Output position.
    pub const OUTPUT_INDEX: u32 = 0;
    /// The output as the server stores it.
    pub const NATIVE_BYTES: &str = "82583900729c67d0de8cde3c0afc768fb0fcb1596e8cfcbf781b553efcd228813b7bb577937983e016d4e8429ff48cf386d6818883f9e88b62a804e01a05f5e100";
}

/// A base address holding outputs, and its two credentials.
pub mod addresses {
    /// Full base address: header byte, payment credential, delegation credential.
    pub const BASE_ADDRESS: &str = "0053fbfffab7b001281917de77f18a8087413be03401db4aa2a7dbf0ae1591d34d5b4b2728d04a80fdd041bb52edb334dacbf25aa27877e738";
    /// Payment credential of [`BASE_ADDRESS`].
    pub const PAYMENT_PART: &str = "53fbfffab7b001281917de77f18a8087413be03401db4aa2a7dbf0ae";
    /// Delegation credential of [`BASE_ADDRESS`].
    pub const DELEGATION_PART: &str = "1591d34d5b4b2728d04a80fdd041bb52edb334dacbf25aa27877e738";
}

/// A native asset with outputs on Preview.
pub mod assets {
    /// Minting policy.
    pub const POLICY_ID: &str = "047e0f912c4260fe66ae271e5ae494dcd5f79635bbbb1386be195f4e";
    /// `ALLEYKATZ00060`
    pub const ASSET_NAME: &str = "414c4c45594b41545a3030303630";
    /// A policy nothing was ever minted under.
    pub const UNKNOWN_POLICY_ID: &str = "00000000000000000000000000000000000000000000000000000000";
}

/// Preview protocol parameters at the time the fixtures were recorded.
pub mod params {
    pub const COINS_PER_UTXO_BYTE: u64 = 4310;
    pub const MAX_TX_SIZE: u64 = 16384;
    pub const MIN_FEE_COEFFICIENT: u64 = 44;
    pub const MIN_FEE_CONSTANT: u64 = 155_381;
    pub const MAX_BLOCK_BODY_SIZE: u64 = 90112;
    pub const MAX_BLOCK_HEADER_SIZE: u64 = 1100;
    pub const STAKE_KEY_DEPOSIT: u64 = 2_000_000;
    pub const POOL_DEPOSIT: u64 = 500_000_000;
    pub const DESIRED_NUMBER_OF_POOLS: u64 = 500;
    pub const MIN_POOL_COST: u64 = 170_000_000;
    pub const MAX_VALUE_SIZE: u64 = 5000;
    pub const COLLATERAL_PERCENTAGE: u64 = 150;
    pub const MAX_COLLATERAL_INPUTS: u64 = 3;
    pub const PROTOCOL_VERSION: (u32, u32) = (9, 0);
    pub const POOL_INFLUENCE: (i32, u32) = (5_033_165, 16_777_216);
    pub const MONETARY_EXPANSION: (i32, u32) = (6_442_451, 2_147_483_648);
    pub const TREASURY_EXPANSION: (i32, u32) = (13_421_773, 67_108_864);
    pub const PRICE_STEPS: (i32, u32) = (721, 10_000_000);
    pub const PRICE_MEMORY: (i32, u32) = (577, 10_000);
    /// Steps then memory.
    pub const MAX_TX_EX_UNITS: (u64, u64) = (10_000_000_000, 14_000_000);
    /// Steps then memory.
    pub const MAX_BLOCK_EX_UNITS: (u64, u64) = (20_000_000_000, 62_000_000);
    pub const COMMITTEE_TERM_LIMIT: u64 = 365;
    pub const GOVERNANCE_ACTION_VALIDITY_PERIOD: u64 = 30;
    pub const GOVERNANCE_ACTION_DEPOSIT: u64 = 100_000_000_000;
    pub const DREP_DEPOSIT: u64 = 500_000_000;
    pub const DREP_INACTIVITY_PERIOD: u64 = 20;
}

/// Decodes one of the hex fixtures above.
///
/// Panics on malformed input, which can only be a typo in this crate.
pub fn bytes(hex_fixture: &str) -> Vec<u8> {
    hex::decode(hex_fixture).expect("fixtures are valid hex")
}
