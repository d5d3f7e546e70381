#![warn(missing_docs)]
//! Wire bindings for the UTxO RPC `v1alpha` schema.
//!
//! Generated at build time from the vendored `.proto` files under `proto/`. One module per
//! protobuf package; each service package carries a `tonic` client stub with one method per RPC.
//! Only the fields this workspace reads or writes are declared; anything else a server sends is
//! skipped on decode.

/// Ledger specific payloads and patterns, `utxorpc.v1alpha.cardano`.
#[allow(missing_docs)]
pub mod cardano {
    tonic::include_proto!("utxorpc.v1alpha.cardano");
}

/// Ledger queries, `utxorpc.v1alpha.query`.
#[allow(missing_docs)]
pub mod query {
    tonic::include_proto!("utxorpc.v1alpha.query");
}

/// Transaction submission and mempool tracking, `utxorpc.v1alpha.submit`.
#[allow(missing_docs)]
pub mod submit {
    tonic::include_proto!("utxorpc.v1alpha.submit");
}

/// Chain synchronization, `utxorpc.v1alpha.sync`.
#[allow(missing_docs)]
pub mod sync {
    tonic::include_proto!("utxorpc.v1alpha.sync");
}

/// Transaction watching, `utxorpc.v1alpha.watch`.
#[allow(missing_docs)]
pub mod watch {
    tonic::include_proto!("utxorpc.v1alpha.watch");
}

pub use prost_types::FieldMask;

#[cfg(test)]
mod tests {
    use prost::Message as _;

    use super::*;

    #[test]
    fn stage_names_follow_the_schema() {
        assert_eq!(
            submit::Stage::from_str_name("STAGE_CONFIRMED"),
            Some(submit::Stage::Confirmed)
        );
        assert_eq!(submit::Stage::Mempool as i32, 2);
        assert!(submit::Stage::try_from(5).is_err());
    }

    #[test]
    fn watch_tx_skips_fields_it_does_not_declare() {
        // field 2, length delimited, one byte
        let tx = watch::AnyChainTx::decode(&[0x12, 0x01, 0xff][..]).unwrap();
        assert_eq!(tx, watch::AnyChainTx::default());
    }

    #[test]
    fn follow_tip_reset_keeps_its_tags() {
        let response = sync::FollowTipResponse {
            action: Some(sync::follow_tip_response::Action::Reset(sync::BlockRef {
                slot: 7,
                ..Default::default()
            })),
            tip: None,
        };
        // action.reset is field 3 holding slot (field 1) = 7
        assert_eq!(response.encode_to_vec(), vec![0x1a, 0x02, 0x08, 0x07]);
    }
}
