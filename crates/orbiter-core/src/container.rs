//! # Component Container
//!
//! Wires the dispatch components together in dependency order and seals
//! their routers.
//!
//! ```text
//! Level 0: Executor, Forwarder, PayloadLifecycle (store + host ports)
//! Level 1: Dispatcher (Executor, Forwarder)
//! Level 2: Adapter (Dispatcher, PayloadLifecycle)
//! Level 3: AdminService, QueryService
//! ```

use crate::adapters::StaticAuthority;
use crate::config::OrbiterConfig;
use crate::controllers::FeeController;
use crate::domain::keys;
use crate::domain::params::Params;
use crate::ports::outbound::{
    ActionController, AuthorityChecker, BankKeeper, EventEmitter, ForwardingController,
    PacketParser, SharedStore, TimeSource,
};
use crate::service::{
    init_genesis, store, Adapter, AdminService, Dispatcher, Executor, Forwarder, GenesisState,
    PayloadLifecycle, QueryService,
};
use shared_types::OrbiterError;
use std::sync::Arc;
use tracing::info;

/// All components, sealed and ready to serve packets.
pub struct Orbiter {
    pub adapter: Arc<Adapter>,
    pub dispatcher: Arc<Dispatcher>,
    pub executor: Arc<Executor>,
    pub forwarder: Arc<Forwarder>,
    pub lifecycle: Arc<PayloadLifecycle>,
    pub admin: AdminService,
    pub query: QueryService,
    pub config: OrbiterConfig,
}

/// Collects host ports and controllers before [`OrbiterBuilder::build`].
pub struct OrbiterBuilder {
    config: OrbiterConfig,
    store: SharedStore,
    bank: Arc<dyn BankKeeper>,
    clock: Arc<dyn TimeSource>,
    events: Arc<dyn EventEmitter>,
    authority: Option<Arc<dyn AuthorityChecker>>,
    parsers: Vec<Arc<dyn PacketParser>>,
    actions: Vec<Arc<dyn ActionController>>,
    forwarders: Vec<Arc<dyn ForwardingController>>,
    fee_controller: bool,
}

impl OrbiterBuilder {
    pub fn new(
        config: OrbiterConfig,
        store: SharedStore,
        bank: Arc<dyn BankKeeper>,
        clock: Arc<dyn TimeSource>,
        events: Arc<dyn EventEmitter>,
    ) -> Self {
        Self {
            config,
            store,
            bank,
            clock,
            events,
            authority: None,
            parsers: Vec::new(),
            actions: Vec::new(),
            forwarders: Vec::new(),
            fee_controller: false,
        }
    }

    /// Replace the default [`StaticAuthority`] built from the config.
    pub fn with_authority(mut self, authority: Arc<dyn AuthorityChecker>) -> Self {
        self.authority = Some(authority);
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn PacketParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    pub fn with_action(mut self, controller: Arc<dyn ActionController>) -> Self {
        self.actions.push(controller);
        self
    }

    pub fn with_forwarder(mut self, controller: Arc<dyn ForwardingController>) -> Self {
        self.forwarders.push(controller);
        self
    }

    /// Route `ActionId::Fee` to the built-in [`FeeController`].
    pub fn with_fee_controller(mut self) -> Self {
        self.fee_controller = true;
        self
    }

    /// Validate the config, write genesis params if the store has none, and
    /// assemble the components.
    pub fn build(self) -> Result<Orbiter, OrbiterError> {
        self.config.validate()?;
        self.init_params()?;

        let holding = self.config.accounts.holding.clone();

        let mut executor = Executor::new(self.store.clone(), self.events.clone());
        if self.fee_controller {
            executor.add_controller(Arc::new(FeeController::new(
                self.bank.clone(),
                holding.clone(),
                self.events.clone(),
            )))?;
        }
        for controller in self.actions {
            executor.add_controller(controller)?;
        }
        executor.seal();
        let executor = Arc::new(executor);

        let mut forwarder = Forwarder::new(
            self.store.clone(),
            self.bank.clone(),
            holding,
            self.events.clone(),
        );
        for controller in self.forwarders {
            forwarder.add_controller(controller)?;
        }
        forwarder.seal();
        let forwarder = Arc::new(forwarder);

        let lifecycle = Arc::new(PayloadLifecycle::new(
            self.store.clone(),
            self.clock,
            self.events.clone(),
            &self.config.pending,
        ));

        let dispatcher = Arc::new(Dispatcher::new(
            executor.clone(),
            forwarder.clone(),
            self.store.clone(),
        ));

        let mut adapter = Adapter::new(
            dispatcher.clone(),
            lifecycle.clone(),
            self.bank,
            self.store.clone(),
            self.events.clone(),
            self.config.accounts.clone(),
        );
        for parser in self.parsers {
            adapter.add_parser(parser)?;
        }
        adapter.seal();
        let adapter = Arc::new(adapter);

        let authority: Arc<dyn AuthorityChecker> = match self.authority {
            Some(authority) => authority,
            None => Arc::new(StaticAuthority::new(self.config.authority.clone())),
        };
        let admin = AdminService::new(
            authority,
            executor.clone(),
            forwarder.clone(),
            lifecycle.clone(),
            self.store.clone(),
            self.events,
        );

        info!(
            "[orbiter:container] Ready: {} parser(s), {} action(s), {} forwarder(s)",
            adapter.router().len(),
            executor.router().len(),
            forwarder.router().len()
        );

        Ok(Orbiter {
            adapter,
            dispatcher,
            executor,
            forwarder,
            lifecycle,
            admin,
            query: QueryService::new(self.store),
            config: self.config,
        })
    }

    fn init_params(&self) -> Result<(), OrbiterError> {
        if store::read::<Params>(&self.store, keys::PARAMS_KEY)?.is_some() {
            return Ok(());
        }
        let genesis = GenesisState {
            params: self.config.params.clone(),
            ..GenesisState::default()
        };
        init_genesis(&self.store, &genesis)
    }
}
