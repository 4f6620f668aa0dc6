//! Application bootstrap: owns the registries and wires addons into them.

use hookwire_core::{BoxError, DispatchError, ListenerError, Method};
use hookwire_std::{Config, ConfigError, Dispatcher, EventBus, Response, Router, events};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by [`App`].
#[derive(Error, Debug)]
pub enum AppError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An addon failed to register.
    #[error("addon `{name}` failed to register")]
    Addon {
        /// The addon's name.
        name: String,
        /// The error it returned.
        #[source]
        source: BoxError,
    },

    /// A lifecycle listener failed.
    #[error(transparent)]
    Listener(#[from] ListenerError),

    /// A request could not be dispatched.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The configuration could not be encoded as an event payload.
    #[error("config could not be encoded: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A unit of extension: registers listeners and routes at startup.
pub trait Addon: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Attaches the addon's listeners and routes.
    fn register(&self, app: &mut Bootstrap<'_>) -> Result<(), BoxError>;
}

/// What an addon can reach while it registers.
pub struct Bootstrap<'a> {
    config: &'a Config,
    bus: &'a EventBus<Value>,
    router: &'a Router<Value>,
}

impl Bootstrap<'_> {
    /// The application configuration.
    pub fn config(&self) -> &Config {
        self.config
    }

    /// The event bus.
    pub fn bus(&self) -> &EventBus<Value> {
        self.bus
    }

    /// The router.
    pub fn router(&self) -> &Router<Value> {
        self.router
    }
}

/// The application context: one event bus, one router, and the addons
/// registered into them.
pub struct App {
    config: Config,
    dispatcher: Dispatcher,
    addons: Vec<String>,
}

impl App {
    /// Builds empty registries from `config`.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let base_path = config.base_path()?;
        let bus = Arc::new(EventBus::with_default_priority(config.default_priority));
        let router = Arc::new(Router::with_base_path(base_path));
        Ok(Self {
            config,
            dispatcher: Dispatcher::new(bus, router),
            addons: Vec::new(),
        })
    }

    /// The configuration the app was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared event bus.
    pub fn bus(&self) -> &Arc<EventBus<Value>> {
        self.dispatcher.bus()
    }

    /// The shared router.
    pub fn router(&self) -> &Arc<Router<Value>> {
        self.dispatcher.router()
    }

    /// The request dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Names of registered addons, in registration order.
    pub fn addons(&self) -> &[String] {
        &self.addons
    }

    /// Registers one addon.
    pub fn register(&mut self, addon: &dyn Addon) -> Result<(), AppError> {
        let name = addon.name().to_string();
        debug!(addon = %name, "registering addon");
        let mut bootstrap = Bootstrap {
            config: &self.config,
            bus: self.dispatcher.bus(),
            router: self.dispatcher.router(),
        };
        addon
            .register(&mut bootstrap)
            .map_err(|source| AppError::Addon {
                name: name.clone(),
                source,
            })?;
        self.addons.push(name);
        Ok(())
    }

    /// Registers `addons` in order, then fires `app_init` and `app_ready`
    /// with the configuration as payload.
    ///
    /// Registration stops at the first addon that fails; the lifecycle
    /// events are not fired in that case.
    pub fn bootstrap(
        &mut self,
        addons: impl IntoIterator<Item = Box<dyn Addon>>,
    ) -> Result<(), AppError> {
        for addon in addons {
            self.register(addon.as_ref())?;
        }
        let payload = serde_json::to_value(&self.config)?;
        self.bus().trigger(events::APP_INIT, payload.clone())?;
        self.bus().trigger(events::APP_READY, payload)?;
        info!(addons = self.addons.len(), routes = self.router().len(), "application ready");
        Ok(())
    }

    /// Registers every addon submitted with `inventory`, ordered by
    /// `order` then name.
    #[cfg(feature = "inventory")]
    pub fn bootstrap_collected(&mut self) -> Result<(), AppError> {
        let addons = crate::registration::collected_addons()
            .into_iter()
            .map(|registration| (registration.factory)());
        self.bootstrap(addons)
    }

    /// Dispatches a request and runs `app_output` over the body. A null body
    /// is returned as is.
    pub fn handle(&self, method: Method, uri: &str, body: Value) -> Result<Response, AppError> {
        let response = self.dispatcher.dispatch(method, uri, body)?;
        if response.body.is_null() {
            return Ok(response);
        }
        let body = self.bus().filter(events::APP_OUTPUT, response.body, &[])?;
        Ok(Response {
            status: response.status,
            body,
        })
    }

    /// Fires `app_shutdown`.
    pub fn shutdown(&self) -> Result<(), AppError> {
        self.bus().trigger(events::APP_SHUTDOWN, Value::Null)?;
        info!("application shut down");
        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("addons", &self.addons)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
