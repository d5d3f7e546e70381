//! Filter expressions and their rendering into the three wire predicate shapes.
//!
//! `SearchUtxos`, `WatchMempool` and `WatchTx` each define their own predicate message even though
//! they mean the same thing. A [`Predicate`] is written once and rendered per target through
//! [`WirePredicate`]. Address and asset matches become a `TxOutputPattern` for UTxO queries and a
//! `TxPattern` (`has_address` / `moves_asset`) for transaction watches.

use utxorpc_proto::{cardano, query, submit, watch};

use crate::error::{PredicateError, Target};

/// A filter over outputs or transactions.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// The full serialized address.
    ExactAddress(Vec<u8>),
    /// The payment credential of an address.
    PaymentPart(Vec<u8>),
    /// The delegation (stake) credential of an address.
    DelegationPart(Vec<u8>),
    /// Any asset under this minting policy.
    PolicyId(Vec<u8>),
    /// Any asset with this name, regardless of policy.
    AssetName(Vec<u8>),
    /// Matches when none of the nested predicates match.
    Not(Vec<Predicate>),
    /// Matches when every nested predicate matches.
    AllOf(Vec<Predicate>),
    /// Matches when at least one nested predicate matches.
    AnyOf(Vec<Predicate>),
    /// Wire patterns supplied verbatim, one per target.
    Pattern(RawPattern),
}

/// Escape hatch for patterns the variants above do not cover.
///
/// Each target has its own slot; rendering for a target whose slot is empty fails with
/// [`PredicateError::Unsupported`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawPattern {
    utxo: Option<cardano::TxOutputPattern>,
    mempool: Option<cardano::TxPattern>,
    watch: Option<cardano::TxPattern>,
}

impl RawPattern {
    /// An empty pattern, unusable until at least one target is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern used for `SearchUtxos`.
    pub fn with_utxo(mut self, pattern: cardano::TxOutputPattern) -> Self {
        self.utxo = Some(pattern);
        self
    }

    /// Pattern used for `WatchMempool`.
    pub fn with_mempool(mut self, pattern: cardano::TxPattern) -> Self {
        self.mempool = Some(pattern);
        self
    }

    /// Pattern used for `WatchTx`.
    pub fn with_watch(mut self, pattern: cardano::TxPattern) -> Self {
        self.watch = Some(pattern);
        self
    }

    /// Same pattern for both transaction targets.
    pub fn with_tx(self, pattern: cardano::TxPattern) -> Self {
        self.with_mempool(pattern.clone()).with_watch(pattern)
    }
}

impl Predicate {
    /// See [`Predicate::ExactAddress`].
    pub fn exact_address(address: impl Into<Vec<u8>>) -> Self {
        Predicate::ExactAddress(address.into())
    }

    /// See [`Predicate::PaymentPart`].
    pub fn payment_part(credential: impl Into<Vec<u8>>) -> Self {
        Predicate::PaymentPart(credential.into())
    }

    /// See [`Predicate::DelegationPart`].
    pub fn delegation_part(credential: impl Into<Vec<u8>>) -> Self {
        Predicate::DelegationPart(credential.into())
    }

    /// See [`Predicate::PolicyId`].
    pub fn policy_id(policy: impl Into<Vec<u8>>) -> Self {
        Predicate::PolicyId(policy.into())
    }

    /// See [`Predicate::AssetName`].
    pub fn asset_name(name: impl Into<Vec<u8>>) -> Self {
        Predicate::AssetName(name.into())
    }

    /// See [`Predicate::Not`].
    pub fn none_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Not(predicates.into_iter().collect())
    }

    /// See [`Predicate::AllOf`].
    pub fn all_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::AllOf(predicates.into_iter().collect())
    }

    /// See [`Predicate::AnyOf`].
    pub fn any_of(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::AnyOf(predicates.into_iter().collect())
    }

    /// Renders into the shape of any supported target.
    pub fn to_wire<P: WirePredicate>(&self) -> Result<P, PredicateError> {
        match self {
            Predicate::ExactAddress(bytes) => {
                let bytes = non_empty("exact address", bytes)?;
                Ok(P::from_address(cardano::AddressPattern {
                    exact_address: bytes,
                    ..Default::default()
                }))
            }
            Predicate::PaymentPart(bytes) => {
                let bytes = non_empty("payment part", bytes)?;
                Ok(P::from_address(cardano::AddressPattern {
                    payment_part: bytes,
                    ..Default::default()
                }))
            }
            Predicate::DelegationPart(bytes) => {
                let bytes = non_empty("delegation part", bytes)?;
                Ok(P::from_address(cardano::AddressPattern {
                    delegation_part: bytes,
                    ..Default::default()
                }))
            }
            Predicate::PolicyId(bytes) => {
                let bytes = non_empty("policy id", bytes)?;
                Ok(P::from_asset(cardano::AssetPattern {
                    policy_id: bytes,
                    ..Default::default()
                }))
            }
            Predicate::AssetName(bytes) => {
                let bytes = non_empty("asset name", bytes)?;
                Ok(P::from_asset(cardano::AssetPattern {
                    asset_name: bytes,
                    ..Default::default()
                }))
            }
            Predicate::Not(nested) => Ok(P::combine(Combinator::Not, render_all(nested)?)),
            Predicate::AllOf(nested) => Ok(P::combine(Combinator::AllOf, render_all(nested)?)),
            Predicate::AnyOf(nested) => Ok(P::combine(Combinator::AnyOf, render_all(nested)?)),
            Predicate::Pattern(raw) => {
                P::from_raw(raw).ok_or(PredicateError::Unsupported { target: P::TARGET })
            }
        }
    }

    /// Renders for `SearchUtxos`.
    pub fn to_utxo_predicate(&self) -> Result<query::UtxoPredicate, PredicateError> {
        self.to_wire()
    }

    /// Renders for `WatchMempool`.
    pub fn to_mempool_predicate(&self) -> Result<submit::TxPredicate, PredicateError> {
        self.to_wire()
    }

    /// Renders for `WatchTx`.
    pub fn to_watch_predicate(&self) -> Result<watch::TxPredicate, PredicateError> {
        self.to_wire()
    }
}

fn non_empty(kind: &'static str, bytes: &[u8]) -> Result<Vec<u8>, PredicateError> {
    if bytes.is_empty() {
        Err(PredicateError::EmptyPattern { kind })
    } else {
        Ok(bytes.to_vec())
    }
}

fn render_all<P: WirePredicate>(nested: &[Predicate]) -> Result<Vec<P>, PredicateError> {
    nested.iter().map(Predicate::to_wire::<P>).collect()
}

/// Which repeated field of a wire predicate the children go into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// `not`
    Not,
    /// `all_of`
    AllOf,
    /// `any_of`
    AnyOf,
}

/// A wire predicate message that a [`Predicate`] can be rendered into.
pub trait WirePredicate: Sized {
    /// Target named in errors.
    const TARGET: Target;

    /// A leaf matching an address pattern.
    fn from_address(pattern: cardano::AddressPattern) -> Self;

    /// A leaf matching an asset pattern.
    fn from_asset(pattern: cardano::AssetPattern) -> Self;

    /// A leaf built from the raw pattern slot for this target, if set.
    fn from_raw(raw: &RawPattern) -> Option<Self>;

    /// A node holding `children` under `combinator`.
    fn combine(combinator: Combinator, children: Vec<Self>) -> Self;
}

impl WirePredicate for query::UtxoPredicate {
    const TARGET: Target = Target::Query;

    fn from_address(pattern: cardano::AddressPattern) -> Self {
        utxo_leaf(cardano::TxOutputPattern {
            address: Some(pattern),
            asset: None,
        })
    }

    fn from_asset(pattern: cardano::AssetPattern) -> Self {
        utxo_leaf(cardano::TxOutputPattern {
            address: None,
            asset: Some(pattern),
        })
    }

    fn from_raw(raw: &RawPattern) -> Option<Self> {
        raw.utxo.clone().map(utxo_leaf)
    }

    fn combine(combinator: Combinator, children: Vec<Self>) -> Self {
        let mut node = Self::default();
        match combinator {
            Combinator::Not => node.not = children,
            Combinator::AllOf => node.all_of = children,
            Combinator::AnyOf => node.any_of = children,
        }
        node
    }
}

fn utxo_leaf(pattern: cardano::TxOutputPattern) -> query::UtxoPredicate {
    query::UtxoPredicate {
        r#match: Some(query::AnyUtxoPattern {
            utxo_pattern: Some(query::any_utxo_pattern::UtxoPattern::Cardano(pattern)),
        }),
        ..Default::default()
    }
}

fn address_tx_pattern(pattern: cardano::AddressPattern) -> cardano::TxPattern {
    cardano::TxPattern {
        has_address: Some(pattern),
        ..Default::default()
    }
}

fn asset_tx_pattern(pattern: cardano::AssetPattern) -> cardano::TxPattern {
    cardano::TxPattern {
        moves_asset: Some(pattern),
        ..Default::default()
    }
}

// The mempool and watch predicates are structurally identical but live in different packages.
macro_rules! tx_wire_predicate {
    ($pkg:ident, $target:expr, $slot:ident) => {
        impl WirePredicate for $pkg::TxPredicate {
            const TARGET: Target = $target;

            fn from_address(pattern: cardano::AddressPattern) -> Self {
                Self::from_tx_pattern(address_tx_pattern(pattern))
            }

            fn from_asset(pattern: cardano::AssetPattern) -> Self {
                Self::from_tx_pattern(asset_tx_pattern(pattern))
            }

            fn from_raw(raw: &RawPattern) -> Option<Self> {
                raw.$slot.clone().map(Self::from_tx_pattern)
            }

            fn combine(combinator: Combinator, children: Vec<Self>) -> Self {
                let mut node = Self::default();
                match combinator {
                    Combinator::Not => node.not = children,
                    Combinator::AllOf => node.all_of = children,
                    Combinator::AnyOf => node.any_of = children,
                }
                node
            }
        }

        impl TxLeaf for $pkg::TxPredicate {
            fn from_tx_pattern(pattern: cardano::TxPattern) -> Self {
                $pkg::TxPredicate {
                    r#match: Some($pkg::AnyChainTxPattern {
                        chain: Some($pkg::any_chain_tx_pattern::Chain::Cardano(pattern)),
                    }),
                    ..Default::default()
                }
            }
        }
    };
}

trait TxLeaf {
    fn from_tx_pattern(pattern: cardano::TxPattern) -> Self;
}

tx_wire_predicate!(submit, Target::Mempool, mempool);
tx_wire_predicate!(watch, Target::Watch, watch);
