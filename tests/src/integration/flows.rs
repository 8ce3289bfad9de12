//! # Dispatch Flows
//!
//! Inbound packet through parsing, transfer hooks, pre-actions, forwarding
//! and statistics.
//!
//! ```text
//! IBC packet ──→ Adapter ──→ Fee / Swap ──→ CCTP / Hyperlane ──→ stats
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use orbiter_core::DispatchedAmount;
    use primitive_types::U256;
    use shared_types::{Coin, CrossChainId, ErrorKind, OrbiterError, Payload, ProtocolId};

    fn cctp_destination(domain: u32) -> CrossChainId {
        CrossChainId::new(ProtocolId::Cctp, domain.to_string()).unwrap()
    }

    // =========================================================================
    // FEE + FORWARD
    // =========================================================================

    #[test]
    fn test_fee_then_cctp_forward() {
        let h = Harness::new();
        let payload = Payload::new(vec![fee_action("treasury", 500)], cctp_forwarding(7));

        h.deliver(
            &ibc_source(),
            &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
        )
        .unwrap();

        assert_eq!(h.balance("treasury", "uusdc"), U256::from(5u64));
        assert_eq!(h.balance(CCTP_ESCROW, "uusdc"), U256::from(95u64));
        assert!(h.balance(HOLDING, "uusdc").is_zero());

        let sent = h.cctp.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].transfer_attributes.destination_amount(),
            U256::from(95u64)
        );

        let stats = h
            .orbiter
            .query
            .dispatched_amount(&ibc_source(), &cctp_destination(7), "uusdc")
            .unwrap();
        assert_eq!(
            stats,
            DispatchedAmount::new(U256::from(100u64), U256::from(95u64))
        );
        assert_eq!(
            h.orbiter
                .query
                .dispatched_count(&ibc_source(), &cctp_destination(7))
                .unwrap(),
            1
        );
        assert_eq!(h.events.count("fee_charged"), 1);
        assert_eq!(h.events.count("payload_processed"), 1);
    }

    #[test]
    fn test_stats_accumulate_across_packets() {
        let h = Harness::new();
        for _ in 0..3 {
            let payload = Payload::new(vec![fee_action("treasury", 500)], cctp_forwarding(7));
            h.deliver(
                &ibc_source(),
                &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
            )
            .unwrap();
        }

        let stats = h
            .orbiter
            .query
            .dispatched_amount(&ibc_source(), &cctp_destination(7), "uusdc")
            .unwrap();
        assert_eq!(
            stats,
            DispatchedAmount::new(U256::from(300u64), U256::from(285u64))
        );
        assert_eq!(
            h.orbiter
                .query
                .dispatched_count(&ibc_source(), &cctp_destination(7))
                .unwrap(),
            3
        );
        assert_eq!(h.balance(CCTP_ESCROW, "uusdc"), U256::from(285u64));
    }

    #[test]
    fn test_forward_only_keeps_amount() {
        let h = Harness::new();
        let payload = Payload::forward_only(hyperlane_forwarding(42));

        h.deliver(
            &ibc_source(),
            &RawPacket::inline(Coin::new("uusdc", 1_000u64), payload),
        )
        .unwrap();

        assert_eq!(h.balance(HYPERLANE_ESCROW, "uusdc"), U256::from(1_000u64));
        assert!(h.cctp.sent().is_empty());
        assert_eq!(h.hyperlane.sent().len(), 1);
    }

    // =========================================================================
    // DENOM CHANGES
    // =========================================================================

    #[test]
    fn test_swap_records_both_denoms() {
        let h = Harness::new();
        let payload = Payload::new(vec![swap_action("uatom", 40)], cctp_forwarding(7));

        h.deliver(
            &ibc_source(),
            &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
        )
        .unwrap();

        assert_eq!(h.balance(CCTP_ESCROW, "uatom"), U256::from(50u64));

        let mut amounts = h
            .orbiter
            .query
            .dispatched_amounts(&ibc_source(), &cctp_destination(7))
            .unwrap();
        amounts.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            amounts,
            vec![
                (
                    "uatom".to_string(),
                    DispatchedAmount::new(U256::zero(), U256::from(50u64))
                ),
                (
                    "uusdc".to_string(),
                    DispatchedAmount::new(U256::from(100u64), U256::zero())
                ),
            ]
        );
    }

    #[test]
    fn test_fee_then_swap_sees_reduced_amount() {
        let h = Harness::new();
        let payload = Payload::new(
            vec![fee_action("treasury", 1_000), swap_action("uatom", 1)],
            cctp_forwarding(7),
        );

        h.deliver(
            &ibc_source(),
            &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
        )
        .unwrap();

        assert_eq!(h.balance("treasury", "uusdc"), U256::from(10u64));
        assert_eq!(h.balance(CCTP_ESCROW, "uatom"), U256::from(45u64));
    }

    // =========================================================================
    // FAILURES
    // =========================================================================

    #[test]
    fn test_failed_swap_forwards_and_records_nothing() {
        let h = Harness::new();
        let payload = Payload::new(vec![swap_action("uatom", 60)], cctp_forwarding(7));

        let err = h
            .deliver(
                &ibc_source(),
                &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            OrbiterError::ActionFailed {
                action: shared_types::ActionId::Swap,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Controller);
        assert!(h.cctp.sent().is_empty());
        assert_eq!(
            h.orbiter
                .query
                .dispatched_count(&ibc_source(), &cctp_destination(7))
                .unwrap(),
            0
        );
        assert_eq!(h.events.count("payload_processed"), 0);
    }

    #[test]
    fn test_leftover_balance_swept_to_dust() {
        let h = Harness::new();
        h.bank.mint(HOLDING, &Coin::new("uusdc", 3u64)).unwrap();
        let payload = Payload::forward_only(cctp_forwarding(7));

        h.deliver(
            &ibc_source(),
            &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
        )
        .unwrap();

        assert_eq!(h.balance(DUST, "uusdc"), U256::from(3u64));
        assert_eq!(h.balance(CCTP_ESCROW, "uusdc"), U256::from(100u64));
        assert_eq!(h.events.count("dust_cleared"), 1);
    }

    #[test]
    fn test_funds_not_received_rejected() {
        let h = Harness::new();
        let payload = Payload::forward_only(cctp_forwarding(7));
        let raw = RawPacket::inline(Coin::new("uusdc", 100u64), payload);

        let err = h
            .orbiter
            .adapter
            .handle_packet(&ibc_source(), &raw, |_| Ok(()))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert!(h.cctp.sent().is_empty());
    }

    #[test]
    fn test_unrouted_source_protocol() {
        let h = Harness::new();
        let source = CrossChainId::new(ProtocolId::Hyperlane, "1").unwrap();
        let raw = RawPacket::inline(
            Coin::new("uusdc", 100u64),
            Payload::forward_only(cctp_forwarding(7)),
        );

        assert_eq!(
            h.deliver(&source, &raw).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_malformed_packet_rejected() {
        let h = Harness::new();
        let err = h.deliver(&ibc_source(), b"not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(h.events.events().is_empty());
    }
}
