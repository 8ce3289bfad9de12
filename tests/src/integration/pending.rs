//! # Pending Payload Flows
//!
//! Payloads recorded ahead of their transfer: submission, resolution by the
//! inbound path, removal and expiry.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use orbiter_core::{Params, PayloadLifecycleApi};
    use primitive_types::U256;
    use rand::Rng;
    use shared_types::{Coin, CrossChainId, ErrorKind, Forwarding, Payload, ProtocolId};

    fn make_payload() -> Payload {
        Payload::new(vec![fee_action("treasury", 500)], cctp_forwarding(7))
    }

    fn make_random_payload(rng: &mut impl Rng) -> Payload {
        let base = cctp_forwarding(rng.gen_range(0..1_000));
        let passthrough: Vec<u8> = (0..rng.gen_range(0..64)).map(|_| rng.gen()).collect();
        Payload::forward_only(Forwarding::new(base.attributes().clone(), passthrough))
    }

    #[test]
    fn test_pending_payload_resolved_once() {
        let h = Harness::new();
        let hash = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 1);

        let raw = RawPacket::pending(Coin::new("uusdc", 100u64), hash);
        h.deliver(&ibc_source(), &raw).unwrap();

        assert_eq!(h.balance(CCTP_ESCROW, "uusdc"), U256::from(95u64));
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 0);
        assert!(h.orbiter.query.pending_payload(&hash).unwrap().is_none());

        let err = h.deliver(&ibc_source(), &raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(h.cctp.sent().len(), 1);
        assert_eq!(
            h.orbiter
                .query
                .dispatched_count(
                    &ibc_source(),
                    &CrossChainId::new(ProtocolId::Cctp, "7").unwrap()
                )
                .unwrap(),
            1
        );
    }

    #[test]
    fn test_rejected_coin_keeps_pending_payload() {
        let h = Harness::new();
        let hash = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();

        let raw = RawPacket::pending(Coin::new("", 100u64), hash);
        let err = h.deliver(&ibc_source(), &raw).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 1);
        assert!(h.orbiter.query.pending_payload(&hash).unwrap().is_some());
    }

    #[test]
    fn test_paused_route_keeps_pending_payload_for_retry() {
        let h = Harness::new();
        let hash = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();
        h.orbiter
            .admin
            .pause_protocol(AUTHORITY, ProtocolId::Cctp, &["7".to_string()])
            .unwrap();

        let raw = RawPacket::pending(Coin::new("uusdc", 100u64), hash);
        let err = h.deliver(&ibc_source(), &raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Paused);
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 1);
        assert_eq!(h.events.count("pending_payload_removed"), 0);

        h.orbiter
            .admin
            .unpause_protocol(AUTHORITY, ProtocolId::Cctp, &["7".to_string()])
            .unwrap();
        h.deliver(&ibc_source(), &raw).unwrap();

        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 0);
        assert_eq!(h.cctp.sent().len(), 1);
        assert_eq!(h.balance(CCTP_ESCROW, "uusdc"), U256::from(95u64));
    }

    #[test]
    fn test_removed_payload_cannot_be_resolved() {
        let h = Harness::new();
        let hash = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();

        h.orbiter.admin.remove_pending(AUTHORITY, &hash).unwrap();

        let raw = RawPacket::pending(Coin::new("uusdc", 100u64), hash);
        assert_eq!(
            h.deliver(&ibc_source(), &raw).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(h.events.count("pending_payload_removed"), 1);
    }

    #[test]
    fn test_same_payload_twice_gets_two_entries() {
        let h = Harness::new();
        let first = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();
        let second = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();

        assert_ne!(first, second);
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 2);
    }

    #[test]
    fn test_passthrough_limit_follows_params() {
        let h = Harness::new();
        h.orbiter
            .admin
            .update_params(
                AUTHORITY,
                Params {
                    max_passthrough_payload_size: 4,
                },
            )
            .unwrap();

        let payload = Payload::forward_only(Forwarding::new(
            cctp_forwarding(7).attributes().clone(),
            vec![0xAB; 5],
        ));
        let err = h.orbiter.admin.submit_payload("alice", payload).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 0);
    }

    #[test]
    fn test_end_block_sweep_is_bounded() {
        let h = Harness::new();
        let mut rng = rand::thread_rng();
        for _ in 0..250 {
            h.orbiter
                .lifecycle
                .submit(make_random_payload(&mut rng))
                .unwrap();
        }

        let ttl = h.orbiter.config.pending.ttl_secs;
        h.clock.advance(ttl + 1);
        let now = GENESIS_TIME + ttl + 1;

        let first = h.orbiter.lifecycle.end_block(now).unwrap();
        assert_eq!(first.len(), 200);
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 50);

        let second = h.orbiter.lifecycle.end_block(now).unwrap();
        assert_eq!(second.len(), 50);
        assert_eq!(h.orbiter.query.pending_payload_count().unwrap(), 0);
        assert_eq!(h.events.count("pending_payload_expired"), 250);
    }

    #[test]
    fn test_fresh_payloads_survive_end_block() {
        let h = Harness::new();
        let old = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();
        h.clock.advance(100);
        let fresh = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();

        let ttl = h.orbiter.config.pending.ttl_secs;
        let swept = h.orbiter.lifecycle.end_block(GENESIS_TIME + ttl + 1).unwrap();

        assert_eq!(swept, vec![old]);
        assert!(h.orbiter.query.pending_payload(&fresh).unwrap().is_some());
    }

    #[test]
    fn test_entry_at_cutoff_is_kept() {
        let h = Harness::new();
        let hash = h.orbiter.admin.submit_payload("alice", make_payload()).unwrap();

        let swept = h.orbiter.lifecycle.sweep_expired(GENESIS_TIME).unwrap();

        assert!(swept.is_empty());
        assert!(h.orbiter.lifecycle.get(&hash).unwrap().is_some());
    }
}
