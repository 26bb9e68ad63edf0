//! Startup orchestration.
//!
//! # Responsibilities
//! - Register every route (showcase first, then configured routes)
//! - Initialize metrics and the sound sink
//! - Bind the listener and hand over to the dispatcher
//!
//! # Design Decisions
//! - Fail fast: any registration error is fatal, nothing is served
//! - Registration completes before the listener is bound
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

use crate::chain::Component;
use crate::config::{RouteConfig, ServerConfig, SoundConfig};
use crate::http::Dispatcher;
use crate::lifecycle::ShutdownSignal;
use crate::net::listener::{Listener, ListenerError};
use crate::observability::metrics;
use crate::routing::{exhibit, RegistrationError, Registrar, RouteTable};
use crate::showcase;
use crate::sound::{Silent, SoundBoard, SoundCue, SoundSink};

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("route registration failed: {0}")]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// Register every route the configuration asks for.
pub fn register_routes(config: &ServerConfig, include_broken: bool) -> Result<RouteTable, RegistrationError> {
    let mut registrar = Registrar::new();

    if config.showcase || include_broken {
        showcase::register(&mut registrar, include_broken)?;
    }
    for route in &config.routes {
        register_configured(&mut registrar, route)?;
    }

    tracing::info!(
        routes = registrar.table().len(),
        curated = registrar.curated_routes(),
        "Route registration complete"
    );
    Ok(registrar.into_table())
}

fn register_configured(registrar: &mut Registrar, route: &RouteConfig) -> Result<(), RegistrationError> {
    let mut builder = registrar.route(&route.method, &route.path);

    for entry in &route.chain {
        // Validated configs never fail here; anything else is rejected by the chain check.
        let component = entry.parse().unwrap_or_else(|_| Component::Unknown {
            kind: entry.clone(),
            id: String::new(),
        });
        builder = builder.component(component);
    }
    if let Some(power) = &route.power {
        builder = builder.power_supply(power.wattage, &power.cable);
    }
    if route.curated {
        builder = builder.curate();
    }
    if let Some(sound) = &route.sound {
        builder = builder.sound(sound);
    }

    let body = route.body.clone();
    if route.exhibit {
        builder.finalize(exhibit(move || body.clone()))?;
    } else {
        builder.finalize(move || body.clone())?;
    }
    Ok(())
}

/// Build the sound sink described by the configuration.
pub fn sound_sink(config: &SoundConfig) -> Arc<dyn SoundSink> {
    if config.enabled {
        Arc::new(SoundBoard::from_config(config))
    } else {
        Arc::new(Silent)
    }
}

/// Register every route, then serve until `shutdown` fires.
///
/// A registration error returns before any socket is opened.
pub async fn run(config: &ServerConfig, include_broken: bool, shutdown: ShutdownSignal) -> Result<(), StartupError> {
    let routes = register_routes(config, include_broken)?;
    start(config, routes, shutdown).await
}

/// Bind and serve `routes` until `shutdown` fires.
pub async fn start(config: &ServerConfig, routes: RouteTable, shutdown: ShutdownSignal) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = Listener::bind(&config.listener).await?;

    let sounds = sound_sink(&config.sounds);
    if config.sounds.enabled {
        if let Some(track) = &config.sounds.background_track {
            sounds.play(SoundCue::Background(track.clone()));
        }
    }

    Dispatcher::new(routes, sounds).serve(listener, shutdown).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainError;
    use crate::config::PowerConfig;

    fn configured(method: &str, path: &str, chain: &[&str], power: Option<(u32, &str)>) -> RouteConfig {
        RouteConfig {
            method: method.into(),
            path: path.into(),
            body: format!("{method} {path}"),
            chain: chain.iter().map(|s| s.to_string()).collect(),
            power: power.map(|(wattage, cable)| PowerConfig {
                wattage,
                cable: cable.into(),
            }),
            curated: false,
            exhibit: false,
            sound: None,
        }
    }

    #[test]
    fn showcase_then_configured() {
        let mut config = ServerConfig::default();
        let mut status = configured("GET", "/status", &["cable:usba"], None);
        status.sound = Some("ping.mp3".into());
        status.exhibit = true;
        config.routes.push(status);

        let table = register_routes(&config, false).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.sound_for("/status"), Some("ping.mp3"));
        let body = table.lookup("GET", "/status").unwrap()();
        assert!(body.contains("\nGET /status\n"));
    }

    #[test]
    fn configured_only_needs_power_first() {
        let mut config = ServerConfig::default();
        config.showcase = false;
        config.routes.push(configured("GET", "/a", &["cable:usbc"], None));

        let err = register_routes(&config, false).unwrap_err();
        assert!(matches!(err, RegistrationError::PowerPreconditionFailed { .. }));

        config.routes.insert(0, configured("GET", "/first", &["cable:usbc"], Some((60, "usbc"))));
        let table = register_routes(&config, false).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unknown_kind_from_config() {
        let mut config = ServerConfig::default();
        config.routes.push(configured("GET", "/fuse", &["cable:usbc", "fuse:10A"], None));

        let err = register_routes(&config, false).unwrap_err();
        assert_eq!(
            err,
            RegistrationError::ChainValidationFailed {
                method: "GET".into(),
                path: "/fuse".into(),
                source: ChainError::UnknownComponentKind("fuse".into()),
            }
        );
    }

    #[test]
    fn broken_route_registers_even_without_showcase() {
        let mut config = ServerConfig::default();
        config.showcase = false;
        assert!(register_routes(&config, true).is_err());
    }

    #[tokio::test]
    async fn run_aborts_before_binding() {
        let mut config = ServerConfig::default();
        // Would fail to bind if startup got that far.
        config.listener.bind_address = "127.0.0.1:not-a-port".into();

        let err = run(&config, true, crate::lifecycle::Shutdown::new().subscribe())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StartupError::Registration(RegistrationError::ChainValidationFailed {
                source: ChainError::MustStartWithCable { .. },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn run_reports_listener_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "0.0.0.0:0".into();

        let err = run(&config, false, crate::lifecycle::Shutdown::new().subscribe())
            .await
            .unwrap_err();
        assert!(matches!(err, StartupError::Listener(ListenerError::NotLoopback(_))));
    }

    #[test]
    fn disabled_sounds_are_silent() {
        let config = SoundConfig {
            enabled: false,
            ..SoundConfig::default()
        };
        // Silent never needs a runtime.
        sound_sink(&config).play(SoundCue::NotFound);
    }
}
