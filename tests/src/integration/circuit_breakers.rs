//! # Circuit Breakers
//!
//! Action, protocol and route pauses driven through the administrative
//! surface and observed on the inbound path.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use orbiter_core::service::export_genesis;
    use orbiter_core::ExecutorApi;
    use primitive_types::U256;
    use shared_types::{ActionId, Coin, CrossChainId, ErrorKind, OrbiterError, Payload, ProtocolId};

    fn deliver_to_cctp(h: &Harness, domain: u32) -> Result<(), OrbiterError> {
        let payload = Payload::forward_only(cctp_forwarding(domain));
        h.deliver(
            &ibc_source(),
            &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
        )
    }

    #[test]
    fn test_protocol_pause_blocks_every_route() {
        let h = Harness::new();
        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Cctp, &[])
            .unwrap();

        for domain in [0, 7, 11] {
            let err = deliver_to_cctp(&h, domain).unwrap_err();
            assert!(matches!(err, OrbiterError::ForwardingFailed { .. }));
            assert_eq!(err.kind(), ErrorKind::Paused);
        }
        assert!(h.cctp.sent().is_empty());

        h.orbiter
            .admin
            .unpause_protocol(AUTHORITY, ProtocolId::Cctp, &[])
            .unwrap();
        deliver_to_cctp(&h, 7).unwrap();
        assert_eq!(h.cctp.sent().len(), 1);
    }

    #[test]
    fn test_route_pause_blocks_only_that_route() {
        let h = Harness::new();
        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Cctp, &["7".to_string()])
            .unwrap();

        assert_eq!(
            deliver_to_cctp(&h, 7).unwrap_err().kind(),
            ErrorKind::Paused
        );
        deliver_to_cctp(&h, 8).unwrap();

        assert!(!h
            .orbiter
            .query
            .is_protocol_paused(ProtocolId::Cctp)
            .unwrap());
        assert_eq!(
            h.orbiter
                .query
                .paused_counterparties(ProtocolId::Cctp)
                .unwrap(),
            vec![CrossChainId::new(ProtocolId::Cctp, "7").unwrap()]
        );
    }

    #[test]
    fn test_paused_route_keeps_funds_in_holding() {
        let h = Harness::new();
        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Cctp, &["7".to_string()])
            .unwrap();

        deliver_to_cctp(&h, 7).unwrap_err();

        assert_eq!(h.balance(HOLDING, "uusdc"), U256::from(100u64));
        assert!(h.balance(CCTP_ESCROW, "uusdc").is_zero());
    }

    #[test]
    fn test_action_pause_fails_before_forwarding() {
        let h = Harness::new();
        h.orbiter.admin.pause_action(AUTHORITY, ActionId::Fee).unwrap();
        assert!(h.orbiter.executor.is_paused(ActionId::Fee).unwrap());

        let payload = Payload::new(vec![fee_action("treasury", 500)], cctp_forwarding(7));
        let err = h
            .deliver(
                &ibc_source(),
                &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            OrbiterError::ActionFailed {
                action: ActionId::Fee,
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Paused);
        assert!(h.cctp.sent().is_empty());
        assert!(h.balance("treasury", "uusdc").is_zero());

        // Swap is unaffected.
        let payload = Payload::new(vec![swap_action("uatom", 1)], cctp_forwarding(7));
        h.deliver(
            &ibc_source(),
            &RawPacket::inline(Coin::new("uusdc", 100u64), payload),
        )
        .unwrap();
    }

    #[test]
    fn test_pause_events_only_on_change() {
        let h = Harness::new();
        let routes = vec!["7".to_string(), "7".to_string(), "8".to_string()];

        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Cctp, &routes)
            .unwrap();
        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Cctp, &routes)
            .unwrap();
        h.orbiter.admin.pause_action(AUTHORITY, ActionId::Swap).unwrap();
        h.orbiter.admin.pause_action(AUTHORITY, ActionId::Swap).unwrap();

        assert_eq!(h.events.count("counterparty_paused"), 2);
        assert_eq!(h.events.count("action_paused"), 1);
    }

    #[test]
    fn test_invalid_route_in_batch_pauses_nothing() {
        let h = Harness::new();
        let err = h
            .orbiter
            .admin
            .pause_protocol(
                AUTHORITY,
                ProtocolId::Cctp,
                &["7".to_string(), String::new()],
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(h
            .orbiter
            .query
            .paused_counterparties(ProtocolId::Cctp)
            .unwrap()
            .is_empty());
        deliver_to_cctp(&h, 7).unwrap();
    }

    #[test]
    fn test_non_authority_cannot_pause() {
        let h = Harness::new();
        let err = h
            .orbiter
            .admin
            .pause_protocol("mallory", ProtocolId::Cctp, &[])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        deliver_to_cctp(&h, 7).unwrap();
    }

    #[test]
    fn test_pauses_survive_genesis_export() {
        let h = Harness::new();
        h.orbiter.admin.pause_action(AUTHORITY, ActionId::Swap).unwrap();
        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Hyperlane, &[])
            .unwrap();
        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Cctp, &["3".to_string()])
            .unwrap();

        let genesis = export_genesis(&h.store).unwrap();

        assert_eq!(genesis.paused_actions, vec![ActionId::Swap]);
        assert_eq!(genesis.paused_protocols, vec![ProtocolId::Hyperlane]);
        assert_eq!(
            genesis.paused_counterparties,
            vec![CrossChainId::new(ProtocolId::Cctp, "3").unwrap()]
        );
        assert_eq!(genesis.params, h.orbiter.config.params);
    }
}
