//! Shared harness for the integration flows.
//!
//! Raw inbound packets are JSON-encoded [`RawPacket`]s, parsed by
//! [`JsonParser`] under IBC. Forwarding doubles move the outgoing coin out of
//! the holding account, as a real burn or escrow would.

use orbiter_core::adapters::{EventRecorder, FixedClock, InMemoryBank, InMemoryKVStore};
use orbiter_core::{
    ActionController, BankKeeper, Controller, ForwardingController, Orbiter, OrbiterBuilder,
    OrbiterConfig, PacketParser, SharedStore,
};
use parking_lot::{Mutex, RwLock};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{
    Action, ActionAttributes, ActionId, ActionPacket, CctpAttributes, Coin, CrossChainId,
    FeeAttributes, FeeInfo, Forwarding, ForwardingAttributes, ForwardingPacket,
    HyperlaneAttributes, OrbiterError, PacketPayload, ParsedPacket, Payload, PayloadHash,
    ProtocolId, SwapAttributes,
};
use std::sync::Arc;

pub const AUTHORITY: &str = "gov";
pub const HOLDING: &str = "orbiter-holding";
pub const DUST: &str = "orbiter-dust";
pub const CCTP_ESCROW: &str = "cctp-escrow";
pub const HYPERLANE_ESCROW: &str = "hyperlane-escrow";
pub const SWAP_POOL: &str = "swap-pool";
pub const GENESIS_TIME: u64 = 1_700_000_000;

/// Wire form of an inbound packet for [`JsonParser`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawPacket {
    pub coin: Coin,
    pub payload: PacketPayload,
}

impl RawPacket {
    pub fn inline(coin: Coin, payload: Payload) -> Vec<u8> {
        Self::encode(coin, PacketPayload::Inline(payload))
    }

    pub fn pending(coin: Coin, hash: PayloadHash) -> Vec<u8> {
        Self::encode(coin, PacketPayload::Pending(hash))
    }

    fn encode(coin: Coin, payload: PacketPayload) -> Vec<u8> {
        serde_json::to_vec(&RawPacket { coin, payload }).unwrap()
    }
}

/// IBC parser over JSON-encoded [`RawPacket`]s.
pub struct JsonParser;

impl Controller<ProtocolId> for JsonParser {
    fn id(&self) -> ProtocolId {
        ProtocolId::Ibc
    }

    fn name(&self) -> &str {
        "json-ibc"
    }
}

impl PacketParser for JsonParser {
    fn parse_packet(&self, raw: &[u8]) -> Result<ParsedPacket, OrbiterError> {
        let packet: RawPacket =
            serde_json::from_slice(raw).map_err(|e| OrbiterError::Serialization(e.to_string()))?;
        Ok(ParsedPacket {
            coin: packet.coin,
            payload: packet.payload,
        })
    }
}

/// Forwarding double: moves the outgoing coin to an escrow account and keeps
/// the packet.
pub struct EscrowForwarder {
    protocol: ProtocolId,
    escrow: &'static str,
    bank: Arc<InMemoryBank>,
    sent: Mutex<Vec<ForwardingPacket>>,
}

impl EscrowForwarder {
    pub fn new(protocol: ProtocolId, escrow: &'static str, bank: Arc<InMemoryBank>) -> Self {
        Self {
            protocol,
            escrow,
            bank,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<ForwardingPacket> {
        self.sent.lock().clone()
    }
}

impl Controller<ProtocolId> for EscrowForwarder {
    fn id(&self) -> ProtocolId {
        self.protocol
    }
}

impl ForwardingController for EscrowForwarder {
    fn handle_packet(&self, packet: &ForwardingPacket) -> Result<(), OrbiterError> {
        let coin = packet.transfer_attributes.destination_coin();
        self.bank.send_coins(HOLDING, self.escrow, &[coin])?;
        self.sent.lock().push(packet.clone());
        Ok(())
    }
}

/// Swap double: trades the whole destination coin at a fixed 2:1 rate
/// against a pool account.
pub struct FixedRateSwap {
    bank: Arc<InMemoryBank>,
}

impl FixedRateSwap {
    pub fn new(bank: Arc<InMemoryBank>) -> Self {
        Self { bank }
    }
}

impl Controller<ActionId> for FixedRateSwap {
    fn id(&self) -> ActionId {
        ActionId::Swap
    }
}

impl ActionController for FixedRateSwap {
    fn handle_packet(&self, packet: &mut ActionPacket) -> Result<(), OrbiterError> {
        let ActionAttributes::Swap(swap) = packet.action.attributes() else {
            return Err(OrbiterError::validation("swap controller got non-swap attributes"));
        };
        let swap = swap.clone();
        let attr = &mut packet.transfer_attributes;
        let input = attr.destination_coin();
        let output = Coin::new(swap.output_denom.clone(), input.amount / 2u64);
        if output.amount < swap.min_output_amount {
            return Err(OrbiterError::Controller(format!(
                "swap output {} below minimum {}",
                output.amount, swap.min_output_amount
            )));
        }

        self.bank.send_coins(HOLDING, SWAP_POOL, &[input])?;
        self.bank.send_coins(SWAP_POOL, HOLDING, &[output.clone()])?;
        attr.set_destination_denom(output.denom)?;
        attr.set_destination_amount(output.amount);
        Ok(())
    }
}

/// Fully wired router over in-memory ports.
pub struct Harness {
    pub orbiter: Orbiter,
    pub store: SharedStore,
    pub bank: Arc<InMemoryBank>,
    pub clock: Arc<FixedClock>,
    pub events: Arc<EventRecorder>,
    pub cctp: Arc<EscrowForwarder>,
    pub hyperlane: Arc<EscrowForwarder>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(make_config())
    }

    pub fn with_config(config: OrbiterConfig) -> Self {
        orbiter_telemetry::init_test_tracing();

        let store: SharedStore = Arc::new(RwLock::new(InMemoryKVStore::new()));
        let bank = Arc::new(InMemoryBank::new());
        let clock = Arc::new(FixedClock::new(GENESIS_TIME));
        let events = Arc::new(EventRecorder::new());
        let cctp = Arc::new(EscrowForwarder::new(
            ProtocolId::Cctp,
            CCTP_ESCROW,
            bank.clone(),
        ));
        let hyperlane = Arc::new(EscrowForwarder::new(
            ProtocolId::Hyperlane,
            HYPERLANE_ESCROW,
            bank.clone(),
        ));

        bank.mint(SWAP_POOL, &Coin::new("uatom", 1_000_000u64)).unwrap();

        let orbiter = OrbiterBuilder::new(
            config,
            store.clone(),
            bank.clone(),
            clock.clone(),
            events.clone(),
        )
        .with_parser(Arc::new(JsonParser))
        .with_fee_controller()
        .with_action(Arc::new(FixedRateSwap::new(bank.clone())))
        .with_forwarder(cctp.clone())
        .with_forwarder(hyperlane.clone())
        .build()
        .unwrap();

        Self {
            orbiter,
            store,
            bank,
            clock,
            events,
            cctp,
            hyperlane,
        }
    }

    /// Deliver `raw` from `source`, crediting the holding account with the
    /// parsed coin between the transfer hooks.
    pub fn deliver(&self, source: &CrossChainId, raw: &[u8]) -> Result<(), OrbiterError> {
        self.orbiter
            .adapter
            .handle_packet(source, raw, |packet| {
                let attr = &packet.transfer_attributes;
                self.bank
                    .mint(HOLDING, &Coin::new(attr.source_denom(), attr.source_amount()))
            })
            .map(|_| ())
    }

    pub fn balance(&self, account: &str, denom: &str) -> U256 {
        self.bank.get_balance(account, denom).unwrap()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn make_config() -> OrbiterConfig {
    let mut config = OrbiterConfig::default();
    config.authority = AUTHORITY.to_string();
    config.accounts.holding = HOLDING.to_string();
    config.accounts.dust = DUST.to_string();
    config
}

pub fn ibc_source() -> CrossChainId {
    CrossChainId::new(ProtocolId::Ibc, "channel-0").unwrap()
}

pub fn cctp_forwarding(domain: u32) -> Forwarding {
    Forwarding::new(
        ForwardingAttributes::Cctp(CctpAttributes {
            destination_domain: domain,
            mint_recipient: vec![0x42; 32],
            destination_caller: vec![],
        }),
        vec![],
    )
}

pub fn hyperlane_forwarding(domain: u32) -> Forwarding {
    Forwarding::new(
        ForwardingAttributes::Hyperlane(HyperlaneAttributes {
            token_id: vec![0x01; 32],
            destination_domain: domain,
            recipient: vec![0x07; 32],
            custom_hook_id: None,
            gas_limit: U256::zero(),
            max_fee: U256::zero(),
        }),
        vec![],
    )
}

pub fn fee_action(recipient: &str, basis_points: u32) -> Action {
    Action::new(ActionAttributes::Fee(FeeAttributes {
        fees: vec![FeeInfo {
            recipient: recipient.to_string(),
            basis_points,
        }],
    }))
}

pub fn swap_action(output_denom: &str, min_output: u64) -> Action {
    Action::new(ActionAttributes::Swap(SwapAttributes {
        output_denom: output_denom.to_string(),
        min_output_amount: U256::from(min_output),
        recipient: None,
    }))
}
